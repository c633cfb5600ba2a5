//! Persistence Layer
//!
//! Notes are stored as JSON under string keys:
//!
//! - [`KeyValueBackend`] - get/set/remove of string values (memory or files)
//! - [`NoteStore`] - note-level persistence, export and import
//! - [`KeyValueNoteStore`] - `NoteStore` over any `KeyValueBackend`

mod backend;
mod error;
mod note_store;

pub use backend::{FileBackend, KeyValueBackend, MemoryBackend};
pub use error::{Result, StoreError};
pub use note_store::{KeyValueNoteStore, NoteStore, MAX_JSON_NESTING};
