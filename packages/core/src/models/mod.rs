//! Data Models
//!
//! This module contains the core data structures of Nexus Notes:
//!
//! - `Note` / `NoteMetadata` - a note, its metadata and its owned subtree
//! - `Block` / `BlockType` - content units and their markdown fragments
//! - Projections - read-only tree and graph views of a note forest
//! - `Outline` - collapsible ASCII rendering of the tree projection
//!
//! Every type here serializes to the JSON layout used for persistence and
//! import/export (a JSON array of notes).

mod block;
mod note;
pub mod outline;
pub mod projection;
pub mod text;

#[cfg(test)]
mod note_test;

pub use block::{Block, BlockType};
pub use note::{validate_forest, DeleteResult, Note, NoteMetadata, ValidationError};
pub use outline::{Outline, OutlineLine};
pub use projection::{
    project_forest_to_tree, project_to_graph_node, project_to_tree_node, GraphAttributes,
    GraphNode, TreeNode,
};
