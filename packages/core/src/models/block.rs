//! Block Data Structures
//!
//! A `Block` is one content unit of a note (paragraph, heading, list, ...),
//! tagged with a closed `BlockType`. Each block type maps to exactly one
//! markdown fragment that the editor inserts when the type is picked from the
//! slash-command menu.
//!
//! # Examples
//!
//! ```rust
//! use nexus_notes_core::models::{Block, BlockType};
//!
//! let block = Block::new(BlockType::Heading1, "Project Plan".to_string());
//! assert_eq!(block.block_type.markdown_fragment(), "# ");
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Closed enumeration of block kinds
///
/// Serialized in snake_case (`"bullet_list"`, `"grid_view"`, ...) which is also
/// the name used inside custom-block fences (`:::grid_view`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Text,
    Heading1,
    Heading2,
    Heading3,
    BulletList,
    NumberedList,
    TaskList,
    Code,
    Table,
    Image,
    Database,
    GridView,
    GalleryView,
    ListView,
}

const TABLE_FRAGMENT: &str = "| Column 1 | Column 2 | Column 3 |\n\
                              | -------- | -------- | -------- |\n\
                              |          |          |          |\n\
                              |          |          |          |";

impl BlockType {
    /// Every block type, in command registry order
    pub const ALL: [BlockType; 14] = [
        BlockType::Heading1,
        BlockType::Heading2,
        BlockType::Heading3,
        BlockType::Text,
        BlockType::BulletList,
        BlockType::NumberedList,
        BlockType::TaskList,
        BlockType::Code,
        BlockType::Table,
        BlockType::Image,
        BlockType::Database,
        BlockType::GridView,
        BlockType::GalleryView,
        BlockType::ListView,
    ];

    /// Wire name of the type (matches the serde representation)
    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Text => "text",
            BlockType::Heading1 => "heading1",
            BlockType::Heading2 => "heading2",
            BlockType::Heading3 => "heading3",
            BlockType::BulletList => "bullet_list",
            BlockType::NumberedList => "numbered_list",
            BlockType::TaskList => "task_list",
            BlockType::Code => "code",
            BlockType::Table => "table",
            BlockType::Image => "image",
            BlockType::Database => "database",
            BlockType::GridView => "grid_view",
            BlockType::GalleryView => "gallery_view",
            BlockType::ListView => "list_view",
        }
    }

    /// Whether the type has a plain-markdown representation
    ///
    /// Types without one are inserted as fenced custom blocks.
    pub fn is_custom_block(self) -> bool {
        matches!(
            self,
            BlockType::Database | BlockType::GridView | BlockType::GalleryView | BlockType::ListView
        )
    }

    /// Markdown fragment inserted for this type
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nexus_notes_core::models::BlockType;
    ///
    /// assert_eq!(BlockType::BulletList.markdown_fragment(), "- ");
    /// assert_eq!(BlockType::GridView.markdown_fragment(), ":::grid_view\n\n:::");
    /// ```
    pub fn markdown_fragment(self) -> String {
        match self {
            BlockType::Text => String::new(),
            BlockType::Heading1 => "# ".to_string(),
            BlockType::Heading2 => "## ".to_string(),
            BlockType::Heading3 => "### ".to_string(),
            BlockType::BulletList => "- ".to_string(),
            BlockType::NumberedList => "1. ".to_string(),
            BlockType::TaskList => "- [ ] ".to_string(),
            BlockType::Code => "```\n\n```".to_string(),
            BlockType::Table => TABLE_FRAGMENT.to_string(),
            BlockType::Image => "![Image description](image_url)".to_string(),
            BlockType::Database
            | BlockType::GridView
            | BlockType::GalleryView
            | BlockType::ListView => format!(":::{}\n\n:::", self.as_str()),
        }
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One content unit of a note
///
/// `id` is generated once and never changes. `properties` carries
/// type-specific data (table cells, view settings) as an open JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,

    #[serde(rename = "type")]
    pub block_type: BlockType,

    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<serde_json::Map<String, serde_json::Value>>,
}

impl Block {
    /// Create a block with a fresh UUID and no properties
    pub fn new(block_type: BlockType, content: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            block_type,
            content,
            properties: None,
        }
    }

    /// Create an empty `text` block
    pub fn empty_text() -> Self {
        Self::new(BlockType::Text, String::new())
    }

    /// Attach type-specific properties
    pub fn with_properties(
        mut self,
        properties: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        self.properties = Some(properties);
        self
    }
}
