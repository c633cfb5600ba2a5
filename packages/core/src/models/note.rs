//! Note Data Structures
//!
//! This module defines the `Note` struct, its metadata, and the validation
//! rules applied before a note is accepted into the model (on import and when
//! building a notebook from stored data).
//!
//! # Ownership
//!
//! - A `Note` exclusively owns its `content` blocks and its `children` subtree
//! - Block ids are unique within one note
//! - Note ids are unique across the whole forest (persistence key, tree key)
//!
//! # Examples
//!
//! ```rust
//! use nexus_notes_core::models::Note;
//!
//! let mut note = Note::new("Welcome".to_string());
//! note.set_body_text("Start typing your notes here".to_string());
//! assert_eq!(note.metadata.word_count, 5);
//!
//! assert!(note.add_tag("welcome"));
//! assert!(!note.add_tag("welcome"));
//! ```

use crate::models::block::{Block, BlockType};
use crate::models::text;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

/// Validation errors for Note values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Duplicate block id '{block_id}' in note '{note_id}'")]
    DuplicateBlockId { note_id: String, block_id: String },

    #[error("Duplicate note id: {0}")]
    DuplicateNoteId(String),

    #[error("Duplicate tag '{tag}' in note '{note_id}'")]
    DuplicateTag { note_id: String, tag: String },

    #[error("Empty tag in note '{0}'")]
    EmptyTag(String),
}

/// Descriptive metadata kept alongside a note
///
/// `word_count` and `character_count` are derived from the note's content and
/// recomputed on every content change. `created` is never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteMetadata {
    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,

    pub word_count: usize,

    pub character_count: usize,

    /// Insertion ordered, no duplicates
    #[serde(default)]
    pub tags: Vec<String>,

    /// Emoji or URL shown next to the title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

impl NoteMetadata {
    /// Fresh metadata with `created == modified == at`
    pub fn new_at(at: DateTime<Utc>) -> Self {
        Self {
            created: at,
            modified: at,
            word_count: 0,
            character_count: 0,
            tags: Vec::new(),
            favicon: None,
            cover_image: None,
        }
    }

    /// Comma-joined tags for display; never parsed back
    pub fn tag_list(&self) -> String {
        self.tags.join(", ")
    }
}

/// A note: title, ordered content blocks, metadata and an optional subtree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,

    pub title: String,

    pub content: Vec<Block>,

    pub metadata: NoteMetadata,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Note>>,
}

impl Note {
    /// Create a note with a fresh UUID, default metadata and one empty text block
    pub fn new(title: String) -> Self {
        Self::new_with_id(Uuid::new_v4().to_string(), title)
    }

    /// Create a note with an explicit id
    pub fn new_with_id(id: String, title: String) -> Self {
        Self {
            id,
            title,
            content: vec![Block::empty_text()],
            metadata: NoteMetadata::new_at(Utc::now()),
            children: None,
        }
    }

    /// Content of the active text block (the first `text` block)
    pub fn body_text(&self) -> &str {
        self.content
            .iter()
            .find(|block| block.block_type == BlockType::Text)
            .map(|block| block.content.as_str())
            .unwrap_or("")
    }

    /// Replace the active text block's content
    ///
    /// A text block is appended when the note has none.
    pub fn set_body_text(&mut self, body: String) {
        match self
            .content
            .iter_mut()
            .find(|block| block.block_type == BlockType::Text)
        {
            Some(block) => block.content = body,
            None => self.content.push(Block::new(BlockType::Text, body)),
        }
        self.content_changed();
    }

    /// Every block's content joined with newlines
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(|block| block.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Append a block and return its id
    pub fn push_block(&mut self, block_type: BlockType, content: String) -> String {
        let block = Block::new(block_type, content);
        let id = block.id.clone();
        self.content.push(block);
        self.content_changed();
        id
    }

    /// Update a block's content; `false` when no block has that id
    pub fn update_block(&mut self, block_id: &str, content: String) -> bool {
        match self.content.iter_mut().find(|block| block.id == block_id) {
            Some(block) => {
                block.content = content;
                self.content_changed();
                true
            }
            None => false,
        }
    }

    /// Remove a block; `None` when no block has that id
    pub fn remove_block(&mut self, block_id: &str) -> Option<Block> {
        let index = self.content.iter().position(|block| block.id == block_id)?;
        let removed = self.content.remove(index);
        self.content_changed();
        Some(removed)
    }

    pub fn set_title(&mut self, title: String) {
        if self.title != title {
            self.title = title;
            self.touch();
        }
    }

    /// Add a tag (trimmed)
    ///
    /// Returns `false` and leaves the set untouched when the tag is empty or
    /// already present (exact, case-sensitive match).
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.metadata.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.metadata.tags.push(tag.to_string());
        self.touch();
        true
    }

    /// Remove a tag; `false` when it was not present
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.metadata.tags.len();
        self.metadata.tags.retain(|t| t != tag);
        if self.metadata.tags.len() == before {
            return false;
        }
        self.touch();
        true
    }

    pub fn set_favicon(&mut self, favicon: Option<String>) {
        if self.metadata.favicon != favicon {
            self.metadata.favicon = favicon;
            self.touch();
        }
    }

    pub fn set_cover_image(&mut self, cover_image: Option<String>) {
        if self.metadata.cover_image != cover_image {
            self.metadata.cover_image = cover_image;
            self.touch();
        }
    }

    /// Append a child note
    pub fn add_child(&mut self, child: Note) {
        self.children.get_or_insert_with(Vec::new).push(child);
        self.touch();
    }

    /// Number of direct children
    pub fn child_count(&self) -> usize {
        self.children.as_ref().map_or(0, Vec::len)
    }

    /// Levels in this subtree; a note without children has depth 1
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(&Note, usize)> = vec![(self, 1)];
        while let Some((note, level)) = stack.pop() {
            deepest = deepest.max(level);
            if let Some(children) = &note.children {
                stack.extend(children.iter().map(|child| (child, level + 1)));
            }
        }
        deepest
    }

    /// Number of notes below this one, at any depth
    pub fn descendant_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&Note> = vec![self];
        while let Some(note) = stack.pop() {
            if let Some(children) = &note.children {
                count += children.len();
                stack.extend(children.iter());
            }
        }
        count
    }

    /// Validate this note and its subtree
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if:
    /// - `id` is empty
    /// - a block id is empty or repeated inside one note
    /// - a tag is empty or repeated
    ///
    /// Note-id uniqueness across notes is checked by [`validate_forest`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut stack: Vec<&Note> = vec![self];
        while let Some(note) = stack.pop() {
            note.validate_shallow()?;
            if let Some(children) = &note.children {
                stack.extend(children.iter());
            }
        }
        Ok(())
    }

    fn validate_shallow(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::MissingField("id".to_string()));
        }

        let mut block_ids = HashSet::new();
        for block in &self.content {
            if block.id.is_empty() {
                return Err(ValidationError::MissingField(format!(
                    "content[].id in note '{}'",
                    self.id
                )));
            }
            if !block_ids.insert(block.id.as_str()) {
                return Err(ValidationError::DuplicateBlockId {
                    note_id: self.id.clone(),
                    block_id: block.id.clone(),
                });
            }
        }

        let mut tags = HashSet::new();
        for tag in &self.metadata.tags {
            if tag.trim().is_empty() {
                return Err(ValidationError::EmptyTag(self.id.clone()));
            }
            if !tags.insert(tag.as_str()) {
                return Err(ValidationError::DuplicateTag {
                    note_id: self.id.clone(),
                    tag: tag.clone(),
                });
            }
        }

        Ok(())
    }

    fn content_changed(&mut self) {
        let plain = self.plain_text();
        self.metadata.word_count = text::word_count(&plain);
        self.metadata.character_count = text::character_count(&plain);
        self.touch();
    }

    fn touch(&mut self) {
        self.metadata.modified = Utc::now();
    }
}

impl Drop for Note {
    fn drop(&mut self) {
        dismantle(self.children.take(), |note| note.children.take());
    }
}

/// Drop a subtree one node at a time
///
/// Each node's children are detached before the node itself is dropped, so
/// the compiler-generated drop never recurses more than one level.
pub(crate) fn dismantle<T>(
    children: Option<Vec<T>>,
    detach: fn(&mut T) -> Option<Vec<T>>,
) {
    let mut stack = children.unwrap_or_default();
    while let Some(mut node) = stack.pop() {
        if let Some(grandchildren) = detach(&mut node) {
            stack.extend(grandchildren);
        }
    }
}

/// Validate a forest of notes, including global note-id uniqueness
pub fn validate_forest(notes: &[Note]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    let mut stack: Vec<&Note> = notes.iter().collect();
    while let Some(note) = stack.pop() {
        note.validate_shallow()?;
        if !seen.insert(note.id.as_str()) {
            return Err(ValidationError::DuplicateNoteId(note.id.clone()));
        }
        if let Some(children) = &note.children {
            stack.extend(children.iter());
        }
    }
    Ok(())
}

/// Result of a delete operation
///
/// Deleting an absent note is not an error; `existed` tells the caller
/// whether anything was removed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteResult {
    pub existed: bool,
}

impl DeleteResult {
    pub fn existed() -> Self {
        Self { existed: true }
    }

    pub fn not_found() -> Self {
        Self { existed: false }
    }
}
