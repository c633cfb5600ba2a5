//! Persistence Error Types

use crate::models::ValidationError;
use thiserror::Error;

/// Errors raised by note persistence
#[derive(Error, Debug)]
pub enum StoreError {
    /// Import batch rejected as a whole; nothing was written
    #[error("Import rejected: {0}")]
    InvalidImport(String),

    /// Stored note failed schema validation
    #[error("Stored note is invalid: {0}")]
    Validation(#[from] ValidationError),

    /// Note nests deeper than the JSON reader accepts, so it could not be loaded back
    #[error("Note {id} nests {nesting} JSON levels, more than the {max} storage can read back")]
    TooDeep {
        id: String,
        nesting: usize,
        max: usize,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage backend failed: {0}")]
    Backend(#[from] anyhow::Error),
}

impl StoreError {
    pub fn invalid_import(msg: impl Into<String>) -> Self {
        Self::InvalidImport(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
