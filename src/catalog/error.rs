//! Catalog error types.
//!
//! Every variant is an expected, recoverable condition. The console renders
//! the `Display` text and resumes its loop; structured logs carry [`CatalogError::code`].

use std::fmt;

use thiserror::Error;

use super::book::Genre;

/// Which collection a key refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Book,
    Member,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Book => write!(f, "book"),
            EntityKind::Member => write!(f, "member"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("{kind} '{key}' already exists")]
    DuplicateKey { kind: EntityKind, key: String },

    #[error("genre '{0}' is not one of: {genres}", genres = Genre::names())]
    InvalidGenre(String),

    #[error("total copies must be a non-negative number, got '{0}'")]
    InvalidInput(String),

    #[error("{kind} '{key}' not found")]
    NotFound { kind: EntityKind, key: String },

    #[error("cannot delete book '{isbn}': copies on loan: {borrowed}")]
    HasBorrowedCopies { isbn: String, borrowed: u64 },

    #[error("cannot delete member '{id}': {count} borrowed books outstanding")]
    HasBorrowedBooks { id: String, count: usize },

    #[error("member '{id}' has already borrowed {limit} books")]
    BorrowLimitReached { id: String, limit: usize },

    #[error("no copies of '{isbn}' are available")]
    NoCopiesAvailable { isbn: String },

    #[error("member '{id}' has not borrowed '{isbn}'")]
    NotBorrowed { id: String, isbn: String },
}

impl CatalogError {
    pub(crate) fn book_not_found(isbn: &str) -> Self {
        CatalogError::NotFound { kind: EntityKind::Book, key: isbn.to_string() }
    }

    pub(crate) fn member_not_found(id: &str) -> Self {
        CatalogError::NotFound { kind: EntityKind::Member, key: id.to_string() }
    }

    /// Stable snake_case identifier, used as a structured log field.
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::DuplicateKey { .. } => "duplicate_key",
            CatalogError::InvalidGenre(_) => "invalid_genre",
            CatalogError::InvalidInput(_) => "invalid_input",
            CatalogError::NotFound { .. } => "not_found",
            CatalogError::HasBorrowedCopies { .. } => "has_borrowed_copies",
            CatalogError::HasBorrowedBooks { .. } => "has_borrowed_books",
            CatalogError::BorrowLimitReached { .. } => "borrow_limit_reached",
            CatalogError::NoCopiesAvailable { .. } => "no_copies_available",
            CatalogError::NotBorrowed { .. } => "not_borrowed",
        }
    }
}
