//! Collapsible ASCII outline of projected tree nodes
//!
//! Every node starts expanded. Nodes with children get a `[-]`/`[+]` toggle,
//! nested nodes get a `├──`/`└──` connector, and collapsed subtrees are
//! hidden from the rendered lines.

use crate::models::projection::TreeNode;
use std::collections::HashSet;

const EXPANDED: &str = "[-]";
const COLLAPSED: &str = "[+]";
const BRANCH: &str = "├";
const LAST_BRANCH: &str = "└";
const HORIZONTAL: &str = "──";

/// One visible row of the outline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineLine {
    pub id: String,
    pub depth: usize,
    pub text: String,
}

/// Expand/collapse state keyed by note id
#[derive(Debug, Clone, Default)]
pub struct Outline {
    collapsed: HashSet<String>,
}

impl Outline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        !self.collapsed.contains(id)
    }

    /// Flip a node between expanded and collapsed; returns the new expanded state
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.collapsed.remove(id) {
            true
        } else {
            self.collapsed.insert(id.to_string());
            false
        }
    }

    pub fn collapse(&mut self, id: &str) {
        self.collapsed.insert(id.to_string());
    }

    pub fn expand_all(&mut self) {
        self.collapsed.clear();
    }

    /// Render the visible rows in display order
    pub fn render(&self, roots: &[TreeNode]) -> Vec<OutlineLine> {
        let mut lines = Vec::new();
        // (node, depth, is_last_sibling)
        let mut stack: Vec<(&TreeNode, usize, bool)> = roots
            .iter()
            .enumerate()
            .rev()
            .map(|(i, node)| (node, 0, i + 1 == roots.len()))
            .collect();

        while let Some((node, depth, is_last)) = stack.pop() {
            let children = node.children.as_deref().unwrap_or(&[]);
            let expanded = self.is_expanded(&node.id);

            let mut text = String::new();
            if !children.is_empty() {
                text.push_str(if expanded { EXPANDED } else { COLLAPSED });
            }
            if depth > 0 {
                text.push_str(if is_last { LAST_BRANCH } else { BRANCH });
                text.push_str(HORIZONTAL);
            }
            if let Some(favicon) = node.favicon.as_deref().filter(|f| !f.is_empty()) {
                text.push_str(favicon);
                text.push(' ');
            }
            text.push_str(&node.title);

            lines.push(OutlineLine {
                id: node.id.clone(),
                depth,
                text,
            });

            if expanded {
                let count = children.len();
                stack.extend(
                    children
                        .iter()
                        .enumerate()
                        .rev()
                        .map(|(i, child)| (child, depth + 1, i + 1 == count)),
                );
            }
        }

        lines
    }
}
