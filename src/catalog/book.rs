//! Book records and the fixed genre set.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::CatalogError;

// ── Genre ─────────────────────────────────────────────────────────────────────

/// The closed set of genres a book may carry.
///
/// Parsing is exact and case-sensitive: `"Sci-Fi"` is accepted, `"sci-fi"`
/// is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Genre {
    Fiction,
    #[serde(rename = "Non-Fiction")]
    NonFiction,
    #[serde(rename = "Sci-Fi")]
    SciFi,
}

impl Genre {
    pub const ALL: [Genre; 3] = [Genre::Fiction, Genre::NonFiction, Genre::SciFi];

    pub fn as_str(self) -> &'static str {
        match self {
            Genre::Fiction => "Fiction",
            Genre::NonFiction => "Non-Fiction",
            Genre::SciFi => "Sci-Fi",
        }
    }

    /// Comma-separated list of every genre name, for prompts and messages.
    pub fn names() -> String {
        Self::ALL.iter().map(|g| g.as_str()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| CatalogError::InvalidGenre(s.to_string()))
    }
}

// ── Book ──────────────────────────────────────────────────────────────────────

/// One catalogued title and its copy counts.
///
/// `isbn` is the catalog key and never changes once the book is added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub genre: Genre,
    pub total_copies: u64,
    pub available_copies: u64,
}

impl Book {
    /// A freshly added book has every copy on the shelf.
    pub fn new(
        isbn: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        genre: Genre,
        total_copies: u64,
    ) -> Self {
        Self {
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
            genre,
            total_copies,
            available_copies: total_copies,
        }
    }

    /// Copies currently on loan. Zero when an edit pushed `total_copies`
    /// below `available_copies`.
    pub fn borrowed_copies(&self) -> u64 {
        self.total_copies.saturating_sub(self.available_copies)
    }

    /// Case-insensitive substring match on title or author.
    /// `needle` must already be lowercased.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.author.to_lowercase().contains(needle)
    }
}

/// Partial edit for [`Catalog::update_book`](super::Catalog::update_book).
///
/// `None` or a blank string keeps the current value. Genre and copy count stay
/// as raw text so that validation happens inside the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub total_copies: Option<String>,
}

/// Parse a copy count typed by a user. Whitespace is ignored; anything that is
/// not a non-negative integer is rejected.
pub fn parse_copies(raw: &str) -> Result<u64, CatalogError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| CatalogError::InvalidInput(raw.trim().to_string()))
}
