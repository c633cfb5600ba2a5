//! Application Services
//!
//! This module contains the services that coordinate models and storage:
//!
//! - `Notebook` - the in-memory forest of notes and the active note
//! - `AutoSaver` - background task that persists edited notes after a quiet period
//!
//! Services sit between the editor surface and the store layer, enforcing
//! forest invariants and keeping persistence off the editing path.

pub mod autosave;
pub mod error;
pub mod notebook;

#[cfg(test)]
mod notebook_test;

pub use autosave::{AutoSaveHandle, AutoSaver};
pub use error::NotebookError;
pub use notebook::Notebook;
