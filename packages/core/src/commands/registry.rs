//! Static catalog of insertable block commands
//!
//! One descriptor per `BlockType`, in display order. The table is a read-only
//! module level static; nothing mutates it at runtime.

use crate::models::BlockType;
use serde::Serialize;

/// A command shown in the slash menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandDescriptor {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub icon: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub group: &'static str,
}

impl CommandDescriptor {
    /// Case-insensitive substring match against label or description
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.label.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

pub const GROUP_BASIC: &str = "Basic Formatting";
pub const GROUP_LISTS: &str = "Lists";
pub const GROUP_CONTENT: &str = "Content";
pub const GROUP_VIEWS: &str = "Views";

/// Group names in display order
pub const GROUPS: [&str; 4] = [GROUP_BASIC, GROUP_LISTS, GROUP_CONTENT, GROUP_VIEWS];

const fn command(
    block_type: BlockType,
    icon: &'static str,
    label: &'static str,
    description: &'static str,
    group: &'static str,
) -> CommandDescriptor {
    CommandDescriptor {
        block_type,
        icon,
        label,
        description,
        group,
    }
}

/// Every command, grouped and ordered for display
pub static COMMANDS: [CommandDescriptor; 14] = [
    command(BlockType::Heading1, "H1", "Heading 1", "Large heading", GROUP_BASIC),
    command(BlockType::Heading2, "H2", "Heading 2", "Medium heading", GROUP_BASIC),
    command(BlockType::Heading3, "H3", "Heading 3", "Small heading", GROUP_BASIC),
    command(BlockType::Text, "¶", "Text", "Plain text", GROUP_BASIC),
    command(BlockType::BulletList, "•", "Bullet List", "Unordered list", GROUP_LISTS),
    command(BlockType::NumberedList, "1.", "Numbered List", "Ordered list", GROUP_LISTS),
    command(BlockType::TaskList, "☐", "Task List", "Checklist", GROUP_LISTS),
    command(
        BlockType::Code,
        "<>",
        "Code Block",
        "Code with syntax highlighting",
        GROUP_CONTENT,
    ),
    command(BlockType::Table, "▦", "Table", "Data in rows and columns", GROUP_CONTENT),
    command(BlockType::Image, "🖼", "Image", "Insert an image", GROUP_CONTENT),
    command(BlockType::Database, "🗄", "Database", "Structured data", GROUP_VIEWS),
    command(BlockType::GridView, "▤", "Grid View", "Card-based grid layout", GROUP_VIEWS),
    command(BlockType::GalleryView, "🖼", "Gallery View", "Image-focused grid", GROUP_VIEWS),
    command(BlockType::ListView, "📋", "List View", "Compact list layout", GROUP_VIEWS),
];

/// Look up the descriptor for a block type
pub fn descriptor_for(block_type: BlockType) -> &'static CommandDescriptor {
    let index = match block_type {
        BlockType::Heading1 => 0,
        BlockType::Heading2 => 1,
        BlockType::Heading3 => 2,
        BlockType::Text => 3,
        BlockType::BulletList => 4,
        BlockType::NumberedList => 5,
        BlockType::TaskList => 6,
        BlockType::Code => 7,
        BlockType::Table => 8,
        BlockType::Image => 9,
        BlockType::Database => 10,
        BlockType::GridView => 11,
        BlockType::GalleryView => 12,
        BlockType::ListView => 13,
    };
    &COMMANDS[index]
}
