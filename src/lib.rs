//! Library catalog: in-memory books, members and loans.
//!
//! [`catalog::Catalog`] holds the records and enforces the lending rules.
//! [`console::Console`] is the interactive menu the binary runs on top of it.
//! [`config`], [`logger`] and [`error`] make up the application shell.

pub mod catalog;
pub mod config;
pub mod console;
pub mod error;
pub mod logger;
pub mod seed;
