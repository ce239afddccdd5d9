//! Member records.

use serde::Serialize;

/// Most books a member may hold at once.
pub const MAX_BORROWED: usize = 3;

/// A registered borrower.
///
/// `borrowed_isbns` is the member's side of every open loan, in borrow order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub email: String,
    pub contact: String,
    pub borrowed_isbns: Vec<String>,
}

impl Member {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            contact: contact.into(),
            borrowed_isbns: Vec::new(),
        }
    }

    pub fn borrowed_count(&self) -> usize {
        self.borrowed_isbns.len()
    }

    pub fn at_borrow_limit(&self) -> bool {
        self.borrowed_isbns.len() >= MAX_BORROWED
    }

    pub fn holds(&self, isbn: &str) -> bool {
        self.borrowed_isbns.iter().any(|held| held == isbn)
    }

    /// Drop the earliest loan of `isbn`, if any.
    pub(crate) fn release(&mut self, isbn: &str) {
        if let Some(position) = self.borrowed_isbns.iter().position(|held| held == isbn) {
            self.borrowed_isbns.remove(position);
        }
    }
}

/// Partial edit for [`Catalog::update_member`](super::Catalog::update_member).
/// `None` or blank keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
}
