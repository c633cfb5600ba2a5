//! Editor content controller
//!
//! Owns the title and the flattened body text of the note being edited,
//! keeps the derived word/character counts current, detects the slash
//! trigger, and splices markdown fragments into the body.
//!
//! # Examples
//!
//! ```rust
//! use nexus_notes_core::editor::{EditorController, MonospaceMetrics, SurfaceBounds};
//! use nexus_notes_core::models::BlockType;
//!
//! let metrics = MonospaceMetrics {
//!     char_width: 8.0,
//!     line_height: 20.0,
//!     bounds: SurfaceBounds::default(),
//! };
//!
//! let mut editor = EditorController::new(String::new(), String::new());
//! assert!(editor.on_content_change("Hello /".to_string(), 7, &metrics));
//!
//! editor.select_command(BlockType::Heading1);
//! assert_eq!(editor.content(), "Hello # ");
//! ```

use crate::commands::{CommandMenu, MenuPosition};
use crate::editor::caret::{caret_position, CaretMetrics};
use crate::editor::format::{fill_template, MarkdownFormat};
use crate::models::{text, BlockType, Note};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Character that opens the command menu
pub const TRIGGER_CHAR: char = '/';

/// Title/content snapshot handed to the application shell (auto-save, notebook)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSnapshot {
    pub title: String,
    pub content: String,
    pub word_count: usize,
    pub character_count: usize,
}

#[derive(Debug, Clone)]
pub struct EditorController {
    title: String,
    content: String,
    word_count: usize,
    character_count: usize,
    menu: Option<CommandMenu>,
    /// UTF-16 caret offset recorded when the menu opened
    trigger_offset: usize,
}

impl EditorController {
    pub fn new(title: String, content: String) -> Self {
        let mut editor = Self {
            title,
            content: String::new(),
            word_count: 0,
            character_count: 0,
            menu: None,
            trigger_offset: 0,
        };
        editor.set_content(content);
        editor
    }

    /// Start editing a note's title and active text block
    pub fn from_note(note: &Note) -> Self {
        Self::new(note.title.clone(), note.body_text().to_string())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn character_count(&self) -> usize {
        self.character_count
    }

    pub fn set_title(&mut self, title: String) {
        self.title = title;
    }

    /// Handle an edit of the body text
    ///
    /// `caret` is the UTF-16 caret offset after the edit. When the character
    /// just before it is the trigger, the command menu opens below the caret
    /// (an already open menu is re-targeted with a fresh query). Returns
    /// whether the menu was opened by this edit.
    pub fn on_content_change(
        &mut self,
        content: String,
        caret: usize,
        metrics: &dyn CaretMetrics,
    ) -> bool {
        self.set_content(content);

        let caret_byte = text::byte_index(&self.content, caret);
        if self.content[..caret_byte].chars().next_back() != Some(TRIGGER_CHAR) {
            return false;
        }

        let position = caret_position(&self.content, caret, metrics);
        tracing::debug!(
            caret,
            top = position.top,
            left = position.left,
            "Slash trigger opened command menu"
        );
        self.trigger_offset = text::utf16_offset(&self.content, caret_byte);
        self.menu = Some(CommandMenu::open(position));
        true
    }

    /// The open command menu, if any
    pub fn menu(&self) -> Option<&CommandMenu> {
        self.menu.as_ref()
    }

    /// Mutable access for forwarding query and navigation input
    pub fn menu_mut(&mut self) -> Option<&mut CommandMenu> {
        self.menu.as_mut()
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu.as_ref().is_some_and(CommandMenu::is_open)
    }

    pub fn menu_position(&self) -> Option<MenuPosition> {
        self.menu.as_ref().map(CommandMenu::position)
    }

    /// Confirm the menu's current selection and insert its fragment
    ///
    /// Returns the inserted type, or `None` when no menu is open or nothing
    /// matches the query (the menu then stays open).
    pub fn confirm_command(&mut self) -> Option<BlockType> {
        let block_type = self.menu.as_mut()?.confirm_selection()?;
        self.insert_block(block_type);
        Some(block_type)
    }

    /// Insert a command picked with the pointer
    ///
    /// No-op when the menu is not open.
    pub fn select_command(&mut self, block_type: BlockType) -> bool {
        if !self.is_menu_open() {
            return false;
        }
        self.insert_block(block_type);
        true
    }

    /// Escape or loss of focus
    pub fn dismiss_menu(&mut self) {
        if let Some(mut menu) = self.menu.take() {
            menu.close();
        }
    }

    /// Splice a `$1` template at the selection bounds
    ///
    /// `selection` is a UTF-16 range; an empty range inserts at the caret with
    /// an empty substitution. Independent of the command menu.
    pub fn insert_markdown(&mut self, template: &str, selection: Range<usize>) {
        let start = text::byte_index(&self.content, selection.start.min(selection.end));
        let end = text::byte_index(&self.content, selection.start.max(selection.end));

        let filled = fill_template(template, &self.content[start..end]);
        let mut next = String::with_capacity(self.content.len() + filled.len());
        next.push_str(&self.content[..start]);
        next.push_str(&filled);
        next.push_str(&self.content[end..]);
        self.set_content(next);
    }

    /// Apply a toolbar format to the selection
    pub fn apply_format(&mut self, format: MarkdownFormat, selection: Range<usize>) {
        self.insert_markdown(format.template(), selection);
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            title: self.title.clone(),
            content: self.content.clone(),
            word_count: self.word_count,
            character_count: self.character_count,
        }
    }

    fn insert_block(&mut self, block_type: BlockType) {
        let start = text::byte_index(&self.content, self.trigger_offset);
        let (before, after) = self.content.split_at(start);
        let before = before.strip_suffix(TRIGGER_CHAR).unwrap_or(before);

        let fragment = block_type.markdown_fragment();
        let next = format!("{before}{fragment}{after}");

        tracing::debug!(block_type = %block_type, "Inserted block fragment");
        self.set_content(next);
        self.dismiss_menu();
    }

    fn set_content(&mut self, content: String) {
        self.word_count = text::word_count(&content);
        self.character_count = text::character_count(&content);
        self.content = content;
    }
}
