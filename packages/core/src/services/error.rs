//! Service Layer Error Types
//!
//! Errors raised by notebook operations. Persistence failures surface as
//! `StoreError` from the store layer and are wrapped here when a notebook
//! operation touches storage.

use crate::models::ValidationError;
use crate::store::StoreError;
use thiserror::Error;

/// Notebook operation errors
#[derive(Error, Debug)]
pub enum NotebookError {
    /// Note not found by ID
    #[error("Note not found: {id}")]
    NoteNotFound { id: String },

    /// A note with this ID already exists in the notebook
    #[error("Duplicate note: {id}")]
    DuplicateNote { id: String },

    /// Note or forest failed validation
    #[error("Note validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    /// Loading from or saving to the store failed
    #[error("Store operation failed: {0}")]
    Store(#[from] StoreError),
}

impl NotebookError {
    /// Create a note not found error
    pub fn note_not_found(id: impl Into<String>) -> Self {
        Self::NoteNotFound { id: id.into() }
    }

    /// Create a duplicate note error
    pub fn duplicate_note(id: impl Into<String>) -> Self {
        Self::DuplicateNote { id: id.into() }
    }
}

pub type Result<T> = std::result::Result<T, NotebookError>;
