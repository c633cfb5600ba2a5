//! Notebook - in-memory forest of notes
//!
//! The notebook owns every root note (and through them, every nested note)
//! plus the id of the note open in the editor. All lookups walk the forest
//! with an explicit stack, so arbitrarily deep nesting never recurses.
//!
//! Persistence happens at root granularity: a nested note is stored inside
//! its root, so callers save [`Notebook::root_of`] after an edit.

use crate::editor::EditorSnapshot;
use crate::models::{
    project_forest_to_tree, project_to_graph_node, validate_forest, DeleteResult, GraphNode, Note,
    TreeNode,
};
use crate::services::error::{NotebookError, Result};
use crate::store::NoteStore;
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct Notebook {
    roots: Vec<Note>,
    active: Option<String>,
}

impl Notebook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a notebook from root notes, validating the whole forest
    pub fn from_notes(roots: Vec<Note>) -> Result<Self> {
        validate_forest(&roots)?;
        Ok(Self {
            roots,
            active: None,
        })
    }

    /// Build a notebook from everything in `store`
    pub async fn load(store: &dyn NoteStore) -> Result<Self> {
        let roots = store.list().await?;
        tracing::info!("Loaded {} root notes", roots.len());
        Self::from_notes(roots)
    }

    /// Create a root note and make it active
    pub fn create_note(&mut self, title: String) -> String {
        let note = Note::new(title);
        let id = note.id.clone();
        self.roots.push(note);
        self.active = Some(id.clone());
        tracing::debug!("Created note {}", id);
        id
    }

    /// Create a note under `parent_id`
    pub fn create_child(&mut self, parent_id: &str, title: String) -> Result<String> {
        let parent = self.note_mut(parent_id)?;
        let child = Note::new(title);
        let id = child.id.clone();
        parent.add_child(child);
        tracing::debug!("Created note {} under {}", id, parent_id);
        Ok(id)
    }

    /// Add an existing note (and its subtree) as a root
    ///
    /// # Errors
    ///
    /// - `DuplicateNote` if any id in the subtree is already in the notebook
    /// - `ValidationFailed` if the subtree itself is invalid
    pub fn insert(&mut self, note: Note) -> Result<()> {
        validate_forest(std::slice::from_ref(&note))?;

        let existing = self.ids();
        let mut stack: Vec<&Note> = vec![&note];
        while let Some(current) = stack.pop() {
            if existing.contains(current.id.as_str()) {
                return Err(NotebookError::duplicate_note(current.id.clone()));
            }
            if let Some(children) = &current.children {
                stack.extend(children.iter());
            }
        }

        self.roots.push(note);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        let mut stack: Vec<&Note> = self.roots.iter().rev().collect();
        while let Some(note) = stack.pop() {
            if note.id == id {
                return Some(note);
            }
            if let Some(children) = &note.children {
                stack.extend(children.iter().rev());
            }
        }
        None
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Note> {
        let mut stack: Vec<&mut Note> = self.roots.iter_mut().collect();
        while let Some(note) = stack.pop() {
            if note.id == id {
                return Some(note);
            }
            if let Some(children) = &mut note.children {
                stack.extend(children.iter_mut());
            }
        }
        None
    }

    /// The root note whose subtree contains `id`
    pub fn root_of(&self, id: &str) -> Option<&Note> {
        self.roots.iter().find(|root| contains(root, id))
    }

    /// Remove a note and its subtree wherever it sits
    ///
    /// Clears the active note if it was inside the removed subtree.
    pub fn delete(&mut self, id: &str) -> DeleteResult {
        let Some(removed) = self.detach(id) else {
            return DeleteResult::not_found();
        };

        if let Some(active) = self.active.as_deref() {
            if contains(&removed, active) {
                self.active = None;
            }
        }

        tracing::debug!(
            "Deleted note {} and {} descendants",
            id,
            removed.descendant_count()
        );
        DeleteResult::existed()
    }

    pub fn set_active(&mut self, id: &str) -> Result<()> {
        if self.get(id).is_none() {
            return Err(NotebookError::note_not_found(id));
        }
        self.active = Some(id.to_string());
        Ok(())
    }

    pub fn active(&self) -> Option<&Note> {
        self.active.as_deref().and_then(|id| self.get(id))
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn roots(&self) -> &[Note] {
        &self.roots
    }

    /// Total number of notes at any depth
    pub fn len(&self) -> usize {
        self.roots.len()
            + self
                .roots
                .iter()
                .map(Note::descendant_count)
                .sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Copy the editor's title and body into a note
    pub fn apply_snapshot(&mut self, id: &str, snapshot: &EditorSnapshot) -> Result<()> {
        let note = self.note_mut(id)?;
        note.set_title(snapshot.title.clone());
        if note.body_text() != snapshot.content {
            note.set_body_text(snapshot.content.clone());
        }
        Ok(())
    }

    /// `Ok(false)` when the tag was empty or already present
    pub fn add_tag(&mut self, id: &str, tag: &str) -> Result<bool> {
        Ok(self.note_mut(id)?.add_tag(tag))
    }

    /// `Ok(false)` when the tag was not present
    pub fn remove_tag(&mut self, id: &str, tag: &str) -> Result<bool> {
        Ok(self.note_mut(id)?.remove_tag(tag))
    }

    pub fn set_favicon(&mut self, id: &str, favicon: Option<String>) -> Result<()> {
        self.note_mut(id)?.set_favicon(favicon);
        Ok(())
    }

    pub fn set_cover_image(&mut self, id: &str, cover_image: Option<String>) -> Result<()> {
        self.note_mut(id)?.set_cover_image(cover_image);
        Ok(())
    }

    /// Tree projection of the whole forest
    pub fn tree(&self) -> Vec<TreeNode> {
        project_forest_to_tree(&self.roots)
    }

    /// Graph projection of one note's subtree
    pub fn graph(&self, id: &str) -> Option<GraphNode> {
        self.get(id).map(project_to_graph_node)
    }

    fn note_mut(&mut self, id: &str) -> Result<&mut Note> {
        self.get_mut(id)
            .ok_or_else(|| NotebookError::note_not_found(id))
    }

    fn ids(&self) -> HashSet<&str> {
        let mut ids = HashSet::new();
        let mut stack: Vec<&Note> = self.roots.iter().collect();
        while let Some(note) = stack.pop() {
            ids.insert(note.id.as_str());
            if let Some(children) = &note.children {
                stack.extend(children.iter());
            }
        }
        ids
    }

    /// Unlink a note from its parent (or the root list) and return it
    fn detach(&mut self, id: &str) -> Option<Note> {
        if let Some(index) = self.roots.iter().position(|note| note.id == id) {
            return Some(self.roots.remove(index));
        }

        let mut stack: Vec<&mut Note> = self.roots.iter_mut().collect();
        while let Some(parent) = stack.pop() {
            let Some(mut children) = parent.children.take() else {
                continue;
            };
            if let Some(index) = children.iter().position(|note| note.id == id) {
                let removed = children.remove(index);
                if !children.is_empty() {
                    parent.children = Some(children);
                }
                return Some(removed);
            }
            stack.extend(parent.children.insert(children).iter_mut());
        }
        None
    }
}

fn contains(root: &Note, id: &str) -> bool {
    let mut stack: Vec<&Note> = vec![root];
    while let Some(note) = stack.pop() {
        if note.id == id {
            return true;
        }
        if let Some(children) = &note.children {
            stack.extend(children.iter());
        }
    }
    false
}
