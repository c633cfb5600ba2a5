//! Slash-command palette
//!
//! - [`registry`] - the static catalog of insertable block types
//! - [`menu`] - the filter/selection controller behind the palette overlay

pub mod menu;
pub mod registry;

pub use menu::{CommandGroup, CommandMenu, Direction, MenuPosition, MenuState};
pub use registry::{descriptor_for, CommandDescriptor, COMMANDS, GROUPS};
