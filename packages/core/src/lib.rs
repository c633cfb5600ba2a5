//! Nexus Notes Core
//!
//! This crate provides the editing, organization and persistence logic of the
//! Nexus Notes application, independent of any UI toolkit.
//!
//! # Architecture
//!
//! - **Notes as a forest**: every note owns its content blocks and child notes
//! - **Projections**: tree and graph views are derived read-only from the forest
//! - **Slash commands**: a static block catalog filtered by a menu controller
//! - **Key-value persistence**: notes stored as JSON under string keys, with
//!   whole-notebook export and all-or-nothing import
//!
//! # Modules
//!
//! - [`models`] - Data structures (Note, Block, projections, outline)
//! - [`commands`] - Slash-command registry and menu state
//! - [`editor`] - Editor controller, caret positioning and markdown templates
//! - [`store`] - `NoteStore` trait with memory and file backends
//! - [`services`] - Notebook and background auto-save
//! - [`config`] - Storage and auto-save settings
//! - [`logging`] - `tracing` subscriber setup for hosts

pub mod commands;
pub mod config;
pub mod editor;
pub mod logging;
pub mod models;
pub mod services;
pub mod store;

// Re-export commonly used types
pub use commands::{CommandDescriptor, CommandMenu, COMMANDS};
pub use config::NotesConfig;
pub use editor::{EditorController, EditorSnapshot};
pub use models::*;
pub use services::*;
pub use store::{FileBackend, KeyValueNoteStore, MemoryBackend, NoteStore, StoreError};
