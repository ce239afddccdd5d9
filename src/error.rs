//! Application-wide error types.
//!
//! [`AppError`] covers failures that stop startup or end a session. Rejected
//! catalog operations are [`CatalogError`]s and are normally rendered by the
//! console instead of being converted.

use thiserror::Error;

use crate::catalog::CatalogError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("state error: {0}")]
    State(String),

    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
