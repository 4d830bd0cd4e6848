//! Error types for the core crate

use thiserror::Error;

/// Core ledger errors
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid transaction record: {0}")]
    InvalidRecord(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;
