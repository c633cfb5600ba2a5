//! Tests for Notebook

#[cfg(test)]
mod tests {
    use crate::editor::EditorSnapshot;
    use crate::models::{DeleteResult, Note, ValidationError};
    use crate::services::{Notebook, NotebookError};
    use crate::store::{KeyValueNoteStore, MemoryBackend, NoteStore};

    fn note(id: &str) -> Note {
        Note::new_with_id(id.to_string(), format!("Note {id}"))
    }

    /// root -> a -> a1, root -> b
    fn sample() -> Notebook {
        let mut a = note("a");
        a.add_child(note("a1"));
        let mut root = note("root");
        root.add_child(a);
        root.add_child(note("b"));
        Notebook::from_notes(vec![root, note("other")]).unwrap()
    }

    #[test]
    fn test_create_note_becomes_active() {
        let mut notebook = Notebook::new();
        let id = notebook.create_note("First".to_string());

        assert_eq!(notebook.len(), 1);
        assert_eq!(notebook.active_id(), Some(id.as_str()));
        assert_eq!(notebook.active().unwrap().title, "First");
    }

    #[test]
    fn test_create_child() {
        let mut notebook = sample();
        let id = notebook.create_child("a1", "Deep".to_string()).unwrap();

        assert_eq!(notebook.get(&id).unwrap().title, "Deep");
        assert_eq!(notebook.root_of(&id).unwrap().id, "root");
        assert_eq!(notebook.len(), 6);
    }

    #[test]
    fn test_create_child_of_missing_parent() {
        let mut notebook = sample();
        let err = notebook.create_child("nope", "x".to_string()).unwrap_err();
        assert!(matches!(err, NotebookError::NoteNotFound { id } if id == "nope"));
    }

    #[test]
    fn test_get_finds_nested_notes() {
        let notebook = sample();
        assert_eq!(notebook.get("a1").unwrap().id, "a1");
        assert!(notebook.get("missing").is_none());
        assert_eq!(notebook.roots().len(), 2);
    }

    #[test]
    fn test_get_mut_edits_nested_note() {
        let mut notebook = sample();
        notebook.get_mut("a1").unwrap().set_title("Edited".to_string());
        assert_eq!(notebook.get("a1").unwrap().title, "Edited");
    }

    #[test]
    fn test_insert_rejects_duplicate_ids() {
        let mut notebook = sample();

        let err = notebook.insert(note("b")).unwrap_err();
        assert!(matches!(err, NotebookError::DuplicateNote { id } if id == "b"));

        let mut fresh = note("fresh");
        fresh.add_child(note("a1"));
        assert!(notebook.insert(fresh).is_err());
        assert!(notebook.get("fresh").is_none());

        notebook.insert(note("new")).unwrap();
        assert_eq!(notebook.roots().len(), 3);
    }

    #[test]
    fn test_from_notes_rejects_duplicate_ids() {
        let mut root = note("x");
        root.add_child(note("x"));

        let err = Notebook::from_notes(vec![root]).unwrap_err();
        assert!(matches!(
            err,
            NotebookError::ValidationFailed(ValidationError::DuplicateNoteId(_))
        ));
    }

    #[test]
    fn test_delete_nested_removes_subtree() {
        let mut notebook = sample();
        notebook.set_active("a1").unwrap();

        assert_eq!(notebook.delete("a"), DeleteResult::existed());
        assert!(notebook.get("a").is_none());
        assert!(notebook.get("a1").is_none());
        assert!(notebook.active().is_none());
        assert_eq!(notebook.get("root").unwrap().child_count(), 1);

        assert_eq!(notebook.delete("a"), DeleteResult::not_found());
    }

    #[test]
    fn test_delete_last_child_clears_children() {
        let mut notebook = sample();
        notebook.delete("a1");
        assert!(notebook.get("a").unwrap().children.is_none());
    }

    #[test]
    fn test_delete_root_keeps_unrelated_active() {
        let mut notebook = sample();
        notebook.set_active("other").unwrap();

        notebook.delete("root");
        assert_eq!(notebook.roots().len(), 1);
        assert_eq!(notebook.active_id(), Some("other"));
    }

    #[test]
    fn test_set_active_missing() {
        let mut notebook = sample();
        assert!(notebook.set_active("missing").is_err());
        assert!(notebook.active().is_none());
    }

    #[test]
    fn test_apply_snapshot() {
        let mut notebook = sample();
        let snapshot = EditorSnapshot {
            title: "Renamed".to_string(),
            content: "three small words".to_string(),
            word_count: 3,
            character_count: 17,
        };

        notebook.apply_snapshot("a1", &snapshot).unwrap();
        let note = notebook.get("a1").unwrap();
        assert_eq!(note.title, "Renamed");
        assert_eq!(note.body_text(), "three small words");
        assert_eq!(note.metadata.word_count, 3);
        assert_eq!(note.metadata.character_count, 17);

        assert!(notebook.apply_snapshot("missing", &snapshot).is_err());
    }

    #[test]
    fn test_metadata_operations() {
        let mut notebook = sample();

        assert!(notebook.add_tag("b", " work ").unwrap());
        assert!(!notebook.add_tag("b", "work").unwrap());
        assert!(!notebook.add_tag("b", "   ").unwrap());
        assert!(notebook.remove_tag("b", "work").unwrap());
        assert!(!notebook.remove_tag("b", "work").unwrap());

        notebook.set_favicon("b", Some("📝".to_string())).unwrap();
        notebook
            .set_cover_image("b", Some("https://example.com/c.png".to_string()))
            .unwrap();
        let meta = &notebook.get("b").unwrap().metadata;
        assert_eq!(meta.favicon.as_deref(), Some("📝"));
        assert_eq!(meta.cover_image.as_deref(), Some("https://example.com/c.png"));

        assert!(matches!(
            notebook.add_tag("missing", "x"),
            Err(NotebookError::NoteNotFound { .. })
        ));
        assert!(notebook.set_favicon("missing", None).is_err());
        assert!(notebook.set_cover_image("missing", None).is_err());
    }

    #[test]
    fn test_tree_and_graph_projections() {
        let notebook = sample();

        let tree = notebook.tree();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].id, "root");
        let children = tree[0].children.as_ref().unwrap();
        assert_eq!(children[0].id, "a");
        assert_eq!(children[1].id, "b");

        let graph = notebook.graph("a").unwrap();
        assert_eq!(graph.name, "Note a");
        assert_eq!(graph.children.as_ref().map(Vec::len), Some(1));
        assert!(notebook.graph("missing").is_none());
    }

    #[tokio::test]
    async fn test_load_from_store() {
        let store = KeyValueNoteStore::new(MemoryBackend::new());
        let notebook = sample();
        for root in notebook.roots() {
            store.save(root).await.unwrap();
        }

        let loaded = Notebook::load(&store).await.unwrap();
        assert_eq!(loaded.len(), notebook.len());
        assert_eq!(loaded.roots(), notebook.roots());
    }
}
