//! Console front end: menu loop over a line-oriented reader and writer.
//!
//! The console owns the [`Catalog`] for the length of a session. It turns
//! typed text into catalog calls and renders each outcome. Every prompted
//! field is trimmed; a rejected operation prints `Error: …` and the loop
//! carries on.
//!
//! The session ends on menu choice `0`, when input reaches EOF, or when the
//! `shutdown` token is cancelled (Ctrl-C in the binary).
//!
//! Reader and writer are generic so tests can drive a session from an
//! in-memory script.

pub mod menu;
pub mod render;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::catalog::{BookUpdate, Catalog, CatalogError, EntityKind, Genre, MemberUpdate};
use crate::config::ConsoleConfig;
use crate::error::AppError;

use menu::MenuChoice;

/// What the loop does after an action.
enum Flow {
    Continue,
    Exit,
}

/// Reads one trimmed line or ends the action with [`Flow::Exit`] when input
/// is closed.
macro_rules! field {
    ($console:expr, $label:expr) => {
        match $console.prompt($label).await? {
            Some(value) => value,
            None => return Ok(Flow::Exit),
        }
    };
}

pub struct Console<R, W> {
    lines: Lines<R>,
    out: W,
    catalog: Catalog,
    settings: ConsoleConfig,
    shutdown: CancellationToken,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(
        input: R,
        out: W,
        catalog: Catalog,
        settings: ConsoleConfig,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            lines: input.lines(),
            out,
            catalog,
            settings,
            shutdown,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Hand back the catalog and the writer once the session is over.
    pub fn into_parts(self) -> (Catalog, W) {
        (self.catalog, self.out)
    }

    /// Drive the menu loop until exit, EOF or shutdown.
    pub async fn run(&mut self) -> Result<(), AppError> {
        info!(
            books = self.catalog.book_count(),
            members = self.catalog.member_count(),
            "console session started"
        );

        if self.settings.banner {
            self.say("\nWelcome to the Library Catalog!").await?;
            self.say(&format!("Valid Genres: {}", Genre::names())).await?;
        }

        loop {
            self.say(&menu::render()).await?;
            let Some(input) = self.prompt("\nEnter your choice (0-11): ").await? else {
                break;
            };

            let flow = match MenuChoice::parse(&input) {
                Some(choice) => {
                    debug!(operation = choice.operation(), "menu choice");
                    self.dispatch(choice).await?
                }
                None => {
                    debug!(input = %input, "invalid menu choice");
                    self.say("\n✗ Invalid choice! Please enter a number between 0-11.").await?;
                    Flow::Continue
                }
            };

            if let Flow::Exit = flow {
                break;
            }
            if self.settings.pause_after_action
                && self.prompt("\nPress Enter to continue...").await?.is_none()
            {
                break;
            }
        }

        info!("console session ended");
        Ok(())
    }

    async fn dispatch(&mut self, choice: MenuChoice) -> Result<Flow, AppError> {
        match choice {
            MenuChoice::AddBook => self.add_book().await,
            MenuChoice::SearchBooks => self.search_books().await,
            MenuChoice::UpdateBook => self.update_book().await,
            MenuChoice::DeleteBook => self.delete_book().await,
            MenuChoice::ListBooks => {
                let text = render::book_list(self.settings.format, &self.catalog.list_books())?;
                self.say(&text).await?;
                Ok(Flow::Continue)
            }
            MenuChoice::AddMember => self.add_member().await,
            MenuChoice::UpdateMember => self.update_member().await,
            MenuChoice::DeleteMember => self.delete_member().await,
            MenuChoice::ListMembers => {
                let text = render::member_list(self.settings.format, &self.catalog.list_members())?;
                self.say(&text).await?;
                Ok(Flow::Continue)
            }
            MenuChoice::BorrowBook => self.borrow_book().await,
            MenuChoice::ReturnBook => self.return_book().await,
            MenuChoice::Exit => {
                let rule = menu::rule();
                self.say(&format!(
                    "\n{rule}\nThank you for using the Library Catalog!\nGoodbye!\n{rule}"
                ))
                .await?;
                Ok(Flow::Exit)
            }
        }
    }

    // ── Books ─────────────────────────────────────────────────────────────

    async fn add_book(&mut self) -> Result<Flow, AppError> {
        self.say("\n--- ADD NEW BOOK ---").await?;
        let isbn = field!(self, "Enter ISBN: ");
        // Reject a taken ISBN before asking for the rest of the record.
        if self.catalog.book(&isbn).is_some() {
            let err = CatalogError::DuplicateKey { kind: EntityKind::Book, key: isbn };
            return self.reject("add_book", err).await;
        }
        let title = field!(self, "Enter Title: ");
        let author = field!(self, "Enter Author: ");
        let genre = field!(self, &format!("Enter Genre ({}): ", Genre::names()));
        let copies = field!(self, "Enter Total Copies: ");

        let outcome = self
            .catalog
            .add_book(&isbn, &title, &author, &genre, &copies)
            .map(|book| book.title.clone());
        match outcome {
            Ok(title) => {
                info!(%isbn, "book added");
                self.say(&format!("✓ Book '{title}' added successfully")).await?;
                Ok(Flow::Continue)
            }
            Err(e) => self.reject("add_book", e).await,
        }
    }

    async fn search_books(&mut self) -> Result<Flow, AppError> {
        self.say("\n--- SEARCH BOOKS ---").await?;
        let term = field!(self, "Enter title or author to search: ");
        let text = render::search_results(self.settings.format, &self.catalog.search_books(&term))?;
        self.say(&text).await?;
        Ok(Flow::Continue)
    }

    async fn update_book(&mut self) -> Result<Flow, AppError> {
        self.say("\n--- UPDATE BOOK ---").await?;
        let isbn = field!(self, "Enter ISBN of book to update: ");
        let Some(current) = self.catalog.book(&isbn).cloned() else {
            return self.reject("update_book", CatalogError::book_not_found(&isbn)).await;
        };

        self.say("Leave blank to keep current value").await?;
        let update = BookUpdate {
            title: Some(field!(self, &format!("New Title (current: {}): ", current.title))),
            author: Some(field!(self, &format!("New Author (current: {}): ", current.author))),
            genre: Some(field!(self, &format!("New Genre (current: {}): ", current.genre))),
            total_copies: Some(field!(
                self,
                &format!("New Total Copies (current: {}): ", current.total_copies)
            )),
        };

        match self.catalog.update_book(&isbn, update).map(|_| ()) {
            Ok(()) => {
                info!(%isbn, "book updated");
                self.say(&format!("✓ Book with ISBN {isbn} updated successfully")).await?;
                Ok(Flow::Continue)
            }
            Err(e) => self.reject("update_book", e).await,
        }
    }

    async fn delete_book(&mut self) -> Result<Flow, AppError> {
        self.say("\n--- DELETE BOOK ---").await?;
        let isbn = field!(self, "Enter ISBN of book to delete: ");
        let title = match self.catalog.ensure_book_removable(&isbn) {
            Ok(book) => book.title.clone(),
            Err(e) => return self.reject("delete_book", e).await,
        };

        let confirm = field!(self, &format!("Delete '{title}'? (yes/no): "));
        if !confirm.eq_ignore_ascii_case("yes") {
            self.say("✗ Deletion cancelled").await?;
            return Ok(Flow::Continue);
        }

        match self.catalog.delete_book(&isbn).map(|_| ()) {
            Ok(()) => {
                info!(%isbn, "book deleted");
                self.say(&format!("✓ Book with ISBN {isbn} deleted successfully")).await?;
                Ok(Flow::Continue)
            }
            Err(e) => self.reject("delete_book", e).await,
        }
    }

    // ── Members ───────────────────────────────────────────────────────────

    async fn add_member(&mut self) -> Result<Flow, AppError> {
        self.say("\n--- ADD NEW MEMBER ---").await?;
        let id = field!(self, "Enter Member ID: ");
        if self.catalog.member(&id).is_some() {
            let err = CatalogError::DuplicateKey { kind: EntityKind::Member, key: id };
            return self.reject("add_member", err).await;
        }
        let name = field!(self, "Enter Name: ");
        let email = field!(self, "Enter Email: ");
        let contact = field!(self, "Enter Contact: ");

        match self.catalog.add_member(&id, &name, &email, &contact).map(|_| ()) {
            Ok(()) => {
                info!(member_id = %id, "member added");
                self.say(&format!("✓ Member '{name}' added successfully")).await?;
                Ok(Flow::Continue)
            }
            Err(e) => self.reject("add_member", e).await,
        }
    }

    async fn update_member(&mut self) -> Result<Flow, AppError> {
        self.say("\n--- UPDATE MEMBER ---").await?;
        let id = field!(self, "Enter Member ID to update: ");
        let Some(current) = self.catalog.member(&id).cloned() else {
            return self.reject("update_member", CatalogError::member_not_found(&id)).await;
        };

        self.say("Leave blank to keep current value").await?;
        let update = MemberUpdate {
            name: Some(field!(self, &format!("New Name (current: {}): ", current.name))),
            email: Some(field!(self, &format!("New Email (current: {}): ", current.email))),
            contact: Some(field!(self, &format!("New Contact (current: {}): ", current.contact))),
        };

        match self.catalog.update_member(&id, update).map(|_| ()) {
            Ok(()) => {
                info!(member_id = %id, "member updated");
                self.say(&format!("✓ Member with ID {id} updated successfully")).await?;
                Ok(Flow::Continue)
            }
            Err(e) => self.reject("update_member", e).await,
        }
    }

    async fn delete_member(&mut self) -> Result<Flow, AppError> {
        self.say("\n--- DELETE MEMBER ---").await?;
        let id = field!(self, "Enter Member ID to delete: ");
        let name = match self.catalog.ensure_member_removable(&id) {
            Ok(member) => member.name.clone(),
            Err(e) => return self.reject("delete_member", e).await,
        };

        let confirm = field!(self, &format!("Delete member '{name}'? (yes/no): "));
        if !confirm.eq_ignore_ascii_case("yes") {
            self.say("✗ Deletion cancelled").await?;
            return Ok(Flow::Continue);
        }

        match self.catalog.delete_member(&id).map(|_| ()) {
            Ok(()) => {
                info!(member_id = %id, "member deleted");
                self.say(&format!("✓ Member with ID {id} deleted successfully")).await?;
                Ok(Flow::Continue)
            }
            Err(e) => self.reject("delete_member", e).await,
        }
    }

    // ── Loans ─────────────────────────────────────────────────────────────

    async fn borrow_book(&mut self) -> Result<Flow, AppError> {
        self.say("\n--- BORROW BOOK ---").await?;
        let member_id = field!(self, "Enter Member ID: ");
        // Unknown member and the borrow limit are reported before the ISBN prompt.
        if let Err(e) = self.catalog.ensure_can_borrow(&member_id) {
            return self.reject("borrow_book", e).await;
        }
        let isbn = field!(self, "Enter Book ISBN: ");

        match self.catalog.borrow_book(&member_id, &isbn) {
            Ok(()) => {
                info!(%member_id, %isbn, "book borrowed");
                let line = self.loan_line("borrowed", &member_id, &isbn);
                self.say(&line).await?;
                Ok(Flow::Continue)
            }
            Err(e) => self.reject("borrow_book", e).await,
        }
    }

    async fn return_book(&mut self) -> Result<Flow, AppError> {
        self.say("\n--- RETURN BOOK ---").await?;
        let member_id = field!(self, "Enter Member ID: ");
        if self.catalog.member(&member_id).is_none() {
            return self.reject("return_book", CatalogError::member_not_found(&member_id)).await;
        }
        let isbn = field!(self, "Enter Book ISBN: ");

        match self.catalog.return_book(&member_id, &isbn) {
            Ok(()) => {
                info!(%member_id, %isbn, "book returned");
                let line = self.loan_line("returned", &member_id, &isbn);
                self.say(&line).await?;
                Ok(Flow::Continue)
            }
            Err(e) => self.reject("return_book", e).await,
        }
    }

    fn loan_line(&self, verb: &str, member_id: &str, isbn: &str) -> String {
        let title = self.catalog.book(isbn).map_or(isbn, |b| b.title.as_str());
        let name = self.catalog.member(member_id).map_or(member_id, |m| m.name.as_str());
        format!("✓ Book '{title}' {verb} successfully by {name}")
    }

    // ── I/O ───────────────────────────────────────────────────────────────

    async fn reject(&mut self, operation: &'static str, err: CatalogError) -> Result<Flow, AppError> {
        info!(operation, code = err.code(), "{err}");
        self.say(&format!("Error: {err}")).await?;
        Ok(Flow::Continue)
    }

    async fn say(&mut self, text: &str) -> Result<(), AppError> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await?;
        Ok(())
    }

    /// Print `label`, then wait for one line. `None` when input is closed or
    /// shutdown was requested.
    async fn prompt(&mut self, label: &str) -> Result<Option<String>, AppError> {
        self.out.write_all(label.as_bytes()).await?;
        self.out.flush().await?;

        tokio::select! {
            biased;

            _ = self.shutdown.cancelled() => {
                self.out.write_all(b"\n").await?;
                self.out.flush().await?;
                info!("shutdown signal received, closing console");
                Ok(None)
            }

            line = self.lines.next_line() => {
                match line? {
                    Some(input) => Ok(Some(input.trim().to_string())),
                    None => {
                        info!("console input closed");
                        Ok(None)
                    }
                }
            }
        }
    }
}
