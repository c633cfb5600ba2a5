//! Notebook Flow Tests
//!
//! End-to-end tests of the editing path:
//! - slash command insertion in the editor
//! - snapshot applied to the notebook
//! - persistence through the key-value store (memory and file backends)
//! - export/import round trip and rejected imports
//! - debounced auto-save of edited notes

#[cfg(test)]
mod notebook_flow_tests {
    use anyhow::Result;
    use nexus_notes_core::editor::{EditorController, MonospaceMetrics, SurfaceBounds};
    use nexus_notes_core::models::{BlockType, Note, Outline};
    use nexus_notes_core::services::{AutoSaver, Notebook};
    use nexus_notes_core::store::{
        FileBackend, KeyValueBackend, KeyValueNoteStore, MemoryBackend, NoteStore, StoreError,
    };
    use nexus_notes_core::NotesConfig;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;

    fn metrics() -> MonospaceMetrics {
        MonospaceMetrics {
            char_width: 8.0,
            line_height: 20.0,
            bounds: SurfaceBounds {
                top: 0.0,
                left: 0.0,
            },
        }
    }

    /// Welcome -> Getting Started, Welcome -> Ideas
    fn seeded_notebook() -> Notebook {
        let mut notebook = Notebook::new();
        let welcome = notebook.create_note("Welcome".to_string());
        notebook
            .create_child(&welcome, "Getting Started".to_string())
            .unwrap();
        notebook.create_child(&welcome, "Ideas".to_string()).unwrap();
        notebook
    }

    fn ids(notes: &[Note]) -> HashSet<String> {
        let mut ids = HashSet::new();
        let mut stack: Vec<&Note> = notes.iter().collect();
        while let Some(note) = stack.pop() {
            ids.insert(note.id.clone());
            if let Some(children) = &note.children {
                stack.extend(children.iter());
            }
        }
        ids
    }

    #[tokio::test]
    async fn test_edit_insert_and_persist() -> Result<()> {
        let store = KeyValueNoteStore::new(MemoryBackend::new());
        let mut notebook = seeded_notebook();
        let id = notebook.active_id().unwrap().to_string();

        let mut editor = EditorController::from_note(notebook.active().unwrap());
        editor.on_content_change("Plan /".to_string(), 6, &metrics());
        editor.menu_mut().unwrap().set_query("task");
        assert_eq!(editor.confirm_command(), Some(BlockType::TaskList));
        assert_eq!(editor.content(), "Plan - [ ] ");

        notebook.apply_snapshot(&id, &editor.snapshot())?;
        store.save(notebook.root_of(&id).unwrap()).await?;

        let reloaded = Notebook::load(&store).await?;
        let note = reloaded.get(&id).unwrap();
        assert_eq!(note.body_text(), "Plan - [ ] ");
        assert_eq!(note.metadata.word_count, 4);
        assert_eq!(reloaded.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_export_import_round_trip() -> Result<()> {
        let source = KeyValueNoteStore::new(MemoryBackend::new());
        let mut notebook = seeded_notebook();
        let second = notebook.create_note("Second".to_string());
        notebook.add_tag(&second, "work")?;
        for root in notebook.roots() {
            source.save(root).await?;
        }

        let exported = source.export_all().await?;

        let target = KeyValueNoteStore::new(MemoryBackend::new());
        assert_eq!(target.import_all(&exported).await?, 2);

        let imported = target.list().await?;
        assert_eq!(ids(&imported), ids(notebook.roots()));
        let tagged = imported.iter().find(|n| n.id == second).unwrap();
        assert_eq!(tagged.metadata.tags, vec!["work".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn test_rejected_import_writes_nothing() -> Result<()> {
        let store = KeyValueNoteStore::new(MemoryBackend::new());
        let existing = Note::new_with_id("keep".to_string(), "Keep me".to_string());
        store.save(&existing).await?;

        let mut dup_parent = Note::new_with_id("p".to_string(), "Parent".to_string());
        dup_parent.add_child(Note::new_with_id("p".to_string(), "Clash".to_string()));
        let batch = serde_json::to_string(&vec![
            Note::new_with_id("fresh".to_string(), "Fresh".to_string()),
            dup_parent,
        ])?;

        let err = store.import_all(&batch).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidImport(_)));

        let remaining = store.list().await?;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, "keep");
        assert_eq!(store.load("fresh").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_file_backend_survives_reopen() -> Result<()> {
        let root = TempDir::new()?;
        let config = NotesConfig::default();
        let notebook = seeded_notebook();

        {
            let backend = FileBackend::open(root.path(), &config.store_name).await?;
            let store = KeyValueNoteStore::with_config(backend, config.clone());
            for note in notebook.roots() {
                store.save(note).await?;
            }
        }

        let backend = FileBackend::open(root.path(), &config.store_name).await?;
        assert!(backend.get_item(&config.notes_list_key).await?.is_some());
        let store = KeyValueNoteStore::with_config(backend, config);
        let reloaded = Notebook::load(&store).await?;
        assert_eq!(reloaded.roots(), notebook.roots());

        let lines: Vec<String> = Outline::new()
            .render(&reloaded.tree())
            .into_iter()
            .map(|line| line.text)
            .collect();
        assert_eq!(
            lines,
            vec!["[-]Welcome", "├──Getting Started", "└──Ideas"]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_autosave_persists_latest_edit() -> Result<()> {
        let store = Arc::new(KeyValueNoteStore::new(MemoryBackend::new()));
        let saver = AutoSaver::spawn(store.clone(), Duration::from_millis(20));
        let mut notebook = seeded_notebook();
        let id = notebook.active_id().unwrap().to_string();

        let mut editor = EditorController::from_note(notebook.active().unwrap());
        for text in ["d", "dr", "draft"] {
            editor.on_content_change(text.to_string(), text.len(), &metrics());
            notebook.apply_snapshot(&id, &editor.snapshot())?;
            saver.schedule(notebook.root_of(&id).unwrap().clone());
        }

        tokio::time::sleep(Duration::from_millis(200)).await;
        let saved = store.load(&id).await?.unwrap();
        assert_eq!(saved.body_text(), "draft");

        saver.shutdown().await;
        Ok(())
    }
}
