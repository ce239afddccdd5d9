//! Thread-shareable catalog handle.
//!
//! [`Catalog`] itself assumes one caller at a time. [`SharedCatalog`] puts the
//! whole catalog behind a single `Mutex`, so each operation runs inside one
//! critical section and the rules in [`Catalog`] hold unchanged.

use std::sync::{Arc, Mutex};

use crate::error::AppError;

use super::Catalog;

/// Cloneable handle to one catalog. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct SharedCatalog {
    inner: Arc<Mutex<Catalog>>,
}

impl SharedCatalog {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(Mutex::new(catalog)),
        }
    }

    /// Run `f` with exclusive access to the catalog.
    ///
    /// The outer `Result` only fails on a poisoned lock; the operation's own
    /// outcome is whatever `f` returns.
    pub fn with<R>(&self, f: impl FnOnce(&mut Catalog) -> R) -> Result<R, AppError> {
        let mut catalog = self
            .inner
            .lock()
            .map_err(|_| AppError::State("catalog lock poisoned".into()))?;
        Ok(f(&mut *catalog))
    }

    /// Point-in-time copy of the whole catalog.
    pub fn snapshot(&self) -> Result<Catalog, AppError> {
        self.with(|catalog| catalog.clone())
    }
}
