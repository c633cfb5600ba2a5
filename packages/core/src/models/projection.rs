//! Tree and graph projections of a note forest
//!
//! Projections are read-only views computed on demand for the collapsible
//! outline and the relationship graph. Both preserve node count, order and
//! the `children` shape of the input (`None` stays `None`, an empty list stays
//! empty).
//!
//! The traversal uses an explicit work stack, so arbitrarily deep trees are
//! limited by heap rather than by the call stack.

use crate::models::note::{dismantle, Note};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outline node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

/// Attributes shown on a graph node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphAttributes {
    pub id: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    pub tag_list: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub favicon: String,
    pub cover_image: String,
}

/// Force-directed graph node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub name: String,
    pub attributes: GraphAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<GraphNode>>,
}

impl Drop for TreeNode {
    fn drop(&mut self) {
        dismantle(self.children.take(), |node| node.children.take());
    }
}

impl Drop for GraphNode {
    fn drop(&mut self) {
        dismantle(self.children.take(), |node| node.children.take());
    }
}

/// Node type reported for every graph node
pub const GRAPH_NODE_TYPE: &str = "note";

/// Project a note and its subtree into outline nodes
pub fn project_to_tree_node(note: &Note) -> TreeNode {
    let mut node = tree_leaf(note);
    if let Some(children) = &note.children {
        node.children = Some(project_forest(children, tree_leaf, attach_tree));
    }
    node
}

/// Project every root of a forest into outline nodes
pub fn project_forest_to_tree(notes: &[Note]) -> Vec<TreeNode> {
    project_forest(notes, tree_leaf, attach_tree)
}

/// Project a note and its subtree into graph nodes
pub fn project_to_graph_node(note: &Note) -> GraphNode {
    let mut node = graph_leaf(note);
    if let Some(children) = &note.children {
        node.children = Some(project_forest(children, graph_leaf, attach_graph));
    }
    node
}

fn tree_leaf(note: &Note) -> TreeNode {
    TreeNode {
        id: note.id.clone(),
        title: note.title.clone(),
        favicon: note.metadata.favicon.clone(),
        children: None,
    }
}

fn attach_tree(node: &mut TreeNode, children: Vec<TreeNode>) {
    node.children = Some(children);
}

fn graph_leaf(note: &Note) -> GraphNode {
    GraphNode {
        name: note.title.clone(),
        attributes: GraphAttributes {
            id: note.id.clone(),
            created: note.metadata.created,
            modified: note.metadata.modified,
            tag_list: note.metadata.tag_list(),
            node_type: GRAPH_NODE_TYPE.to_string(),
            favicon: note.metadata.favicon.clone().unwrap_or_default(),
            cover_image: note.metadata.cover_image.clone().unwrap_or_default(),
        },
        children: None,
    }
}

fn attach_graph(node: &mut GraphNode, children: Vec<GraphNode>) {
    node.children = Some(children);
}

enum Frame<'a> {
    Enter(&'a Note),
    Exit(&'a Note),
}

/// Post-order projection of a list of sibling notes
///
/// Finished nodes are pushed onto `done`; when a note exits, its children are
/// the last `child_count` entries there, already in sibling order.
fn project_forest<T>(
    notes: &[Note],
    leaf: fn(&Note) -> T,
    attach: fn(&mut T, Vec<T>),
) -> Vec<T> {
    let mut stack: Vec<Frame<'_>> = notes.iter().rev().map(Frame::Enter).collect();
    let mut done: Vec<T> = Vec::with_capacity(notes.len());

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Enter(note) => {
                stack.push(Frame::Exit(note));
                if let Some(children) = &note.children {
                    stack.extend(children.iter().rev().map(Frame::Enter));
                }
            }
            Frame::Exit(note) => {
                let mut node = leaf(note);
                if let Some(children) = &note.children {
                    let kids = done.split_off(done.len() - children.len());
                    attach(&mut node, kids);
                }
                done.push(node);
            }
        }
    }

    done
}
