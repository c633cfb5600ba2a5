//! Slash-command menu controller
//!
//! Owns the filter query, the selected index and the open/closed state of the
//! command palette. The presentation layer renders `filtered_grouped()` at
//! `position()` and forwards keyboard/pointer input back through
//! `set_query`, `move_selection`, `hover`, `confirm_selection` and `close`.
//!
//! # State machine
//!
//! ```text
//! Open(query, selected) --set_query / move_selection / hover--> Open
//! Open --close / confirm_selection (with a match)-------------> Closed
//! ```
//!
//! `Closed` is terminal: every call on a closed menu is a no-op.

use crate::commands::registry::{CommandDescriptor, COMMANDS, GROUPS};
use crate::models::BlockType;
use serde::{Deserialize, Serialize};

/// Overlay coordinates in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MenuPosition {
    pub top: f64,
    pub left: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuState {
    Open { query: String, selected: usize },
    Closed,
}

/// One non-empty group of matching commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandGroup {
    pub name: &'static str,
    pub entries: Vec<&'static CommandDescriptor>,
}

#[derive(Debug, Clone)]
pub struct CommandMenu {
    state: MenuState,
    position: MenuPosition,
}

impl CommandMenu {
    /// Open a menu at the given overlay position with an empty query
    pub fn open(position: MenuPosition) -> Self {
        Self {
            state: MenuState::Open {
                query: String::new(),
                selected: 0,
            },
            position,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, MenuState::Open { .. })
    }

    pub fn state(&self) -> &MenuState {
        &self.state
    }

    pub fn position(&self) -> MenuPosition {
        self.position
    }

    /// Current query; empty when closed
    pub fn query(&self) -> &str {
        match &self.state {
            MenuState::Open { query, .. } => query,
            MenuState::Closed => "",
        }
    }

    /// Index into the flattened filtered list; `None` when closed
    pub fn selected_index(&self) -> Option<usize> {
        match self.state {
            MenuState::Open { selected, .. } => Some(selected),
            MenuState::Closed => None,
        }
    }

    /// Update the filter; the selection resets to the first match
    pub fn set_query(&mut self, text: &str) {
        if let MenuState::Open { query, selected } = &mut self.state {
            if query != text {
                *query = text.to_string();
                *selected = 0;
            }
        }
    }

    /// Matching commands in registry order
    ///
    /// Empty when the menu is closed.
    pub fn filtered(&self) -> Vec<&'static CommandDescriptor> {
        match &self.state {
            MenuState::Open { query, .. } => filter_commands(query),
            MenuState::Closed => Vec::new(),
        }
    }

    /// Matching commands grouped by registry group, empty groups omitted
    pub fn filtered_grouped(&self) -> Vec<CommandGroup> {
        let filtered = self.filtered();
        GROUPS
            .iter()
            .filter_map(|&name| {
                let entries: Vec<_> = filtered
                    .iter()
                    .copied()
                    .filter(|c| c.group == name)
                    .collect();
                (!entries.is_empty()).then_some(CommandGroup { name, entries })
            })
            .collect()
    }

    /// Move the selection one step, clamped to the filtered range
    pub fn move_selection(&mut self, direction: Direction) {
        let count = self.filtered().len();
        if let MenuState::Open { selected, .. } = &mut self.state {
            if count == 0 {
                return;
            }
            *selected = match direction {
                Direction::Up => selected.saturating_sub(1),
                Direction::Down => (*selected + 1).min(count - 1),
            };
        }
    }

    /// Pointer hover over the entry at `index` in the flattened list
    pub fn hover(&mut self, index: usize) {
        let count = self.filtered().len();
        if let MenuState::Open { selected, .. } = &mut self.state {
            if index < count {
                *selected = index;
            }
        }
    }

    /// Confirm the selected entry and close
    ///
    /// With no matching entries this returns `None` and the menu stays open.
    pub fn confirm_selection(&mut self) -> Option<BlockType> {
        let selected = self.selected_index()?;
        let block_type = self.filtered().get(selected)?.block_type;
        self.close();
        Some(block_type)
    }

    /// Terminal transition
    pub fn close(&mut self) {
        if self.is_open() {
            tracing::debug!("Command menu closed");
        }
        self.state = MenuState::Closed;
    }
}

fn filter_commands(query: &str) -> Vec<&'static CommandDescriptor> {
    let needle = query.to_lowercase();
    COMMANDS
        .iter()
        .filter(|c| c.matches_lowercase(&needle))
        .collect()
}
