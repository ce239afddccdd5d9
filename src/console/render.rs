//! Text and JSON rendering of catalog records.

use crate::catalog::{Book, Member};
use crate::config::OutputFormat;
use crate::error::AppError;

pub fn book_line(book: &Book) -> String {
    format!(
        "ISBN: {}, Title: {}, Author: {}, Genre: {}, Available: {}/{}",
        book.isbn, book.title, book.author, book.genre, book.available_copies, book.total_copies
    )
}

pub fn member_line(member: &Member) -> String {
    format!(
        "ID: {}, Name: {}, Email: {}, Contact: {}, Borrowed Books: {}",
        member.id,
        member.name,
        member.email,
        member.contact,
        member.borrowed_count()
    )
}

fn json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// "Display All Books" output.
pub fn book_list(format: OutputFormat, books: &[&Book]) -> Result<String, AppError> {
    match format {
        OutputFormat::Json => json(books),
        OutputFormat::Text if books.is_empty() => Ok("\n✗ No books in the library".to_string()),
        OutputFormat::Text => {
            let mut out = String::from("\n=== ALL BOOKS ===");
            for book in books {
                out.push('\n');
                out.push_str(&book_line(book));
            }
            Ok(out)
        }
    }
}

/// "Display All Members" output.
pub fn member_list(format: OutputFormat, members: &[&Member]) -> Result<String, AppError> {
    match format {
        OutputFormat::Json => json(members),
        OutputFormat::Text if members.is_empty() => Ok("\n✗ No members registered".to_string()),
        OutputFormat::Text => {
            let mut out = String::from("\n=== ALL MEMBERS ===");
            for member in members {
                out.push('\n');
                out.push_str(&member_line(member));
            }
            Ok(out)
        }
    }
}

/// "Search Books" output.
pub fn search_results(format: OutputFormat, books: &[&Book]) -> Result<String, AppError> {
    match format {
        OutputFormat::Json => json(books),
        OutputFormat::Text if books.is_empty() => {
            Ok("✗ No books found matching your search".to_string())
        }
        OutputFormat::Text => {
            let mut out = format!("\n✓ Found {} book(s):", books.len());
            for book in books {
                out.push_str("\n  ");
                out.push_str(&book_line(book));
            }
            Ok(out)
        }
    }
}
