//! NoteStore Trait - Persistence Abstraction Layer
//!
//! `NoteStore` is the boundary between the notes core and wherever notes are
//! kept. The layout mirrors browser local storage:
//!
//! - `notes-list` - JSON array of note ids, in save order
//! - `note-<id>` - one JSON-serialized `Note` per key
//!
//! Export produces a JSON array of notes; import accepts the same format and
//! is all-or-nothing: the whole batch is parsed and validated against the
//! stored forest before the first write.
//!
//! # Examples
//!
//! ```rust
//! use nexus_notes_core::models::Note;
//! use nexus_notes_core::store::{KeyValueNoteStore, MemoryBackend, NoteStore};
//!
//! # tokio_test::block_on(async {
//! let store = KeyValueNoteStore::new(MemoryBackend::new());
//! let note = Note::new("Groceries".to_string());
//! store.save(&note).await.unwrap();
//!
//! assert_eq!(store.load(&note.id).await.unwrap(), Some(note));
//! # });
//! ```

use crate::config::NotesConfig;
use crate::models::{validate_forest, DeleteResult, Note};
use crate::store::backend::KeyValueBackend;
use crate::store::error::{Result, StoreError};
use async_trait::async_trait;
use std::collections::HashSet;

/// Deepest JSON nesting a stored note may have
///
/// serde_json refuses input nested 128 levels or more; one level is kept
/// free for the array that wraps notes in an export.
pub const MAX_JSON_NESTING: usize = 126;

/// Persistence operations for notes
///
/// Callers treat saves as fire-and-forget: the editor never waits for a save
/// before accepting the next edit.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Insert or replace a note
    async fn save(&self, note: &Note) -> Result<()>;

    /// `None` when no note has that id
    async fn load(&self, id: &str) -> Result<Option<Note>>;

    /// All notes in save order
    async fn list(&self) -> Result<Vec<Note>>;

    /// Idempotent delete
    async fn delete(&self, id: &str) -> Result<DeleteResult>;

    /// Every note as a JSON array
    async fn export_all(&self) -> Result<String>;

    /// Parse, validate and save a JSON array of notes
    ///
    /// Returns the number of notes written. A rejected batch writes nothing;
    /// a backend failure part way through restores the previous values.
    async fn import_all(&self, serialized: &str) -> Result<usize>;
}

/// `NoteStore` over any string key-value backend
pub struct KeyValueNoteStore<B: KeyValueBackend> {
    backend: B,
    config: NotesConfig,
}

impl<B: KeyValueBackend> KeyValueNoteStore<B> {
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, NotesConfig::default())
    }

    pub fn with_config(backend: B, config: NotesConfig) -> Self {
        Self { backend, config }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &NotesConfig {
        &self.config
    }

    async fn read_index(&self) -> Result<Vec<String>> {
        match self.backend.get_item(&self.config.notes_list_key).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    async fn write_index(&self, ids: &[String]) -> Result<()> {
        let raw = serde_json::to_string(ids)?;
        self.backend
            .set_item(&self.config.notes_list_key, raw)
            .await?;
        Ok(())
    }

    /// Serialize a note, refusing anything `load` could not parse again
    fn encode(note: &Note) -> Result<String> {
        // two levels per note (object and `children`), the leaf's metadata last
        let lower_bound = 2 * note.depth();
        if lower_bound > MAX_JSON_NESTING {
            return Err(StoreError::TooDeep {
                id: note.id.clone(),
                nesting: lower_bound,
                max: MAX_JSON_NESTING,
            });
        }

        let raw = serde_json::to_string(note)?;
        let nesting = json_nesting(&raw);
        if nesting > MAX_JSON_NESTING {
            return Err(StoreError::TooDeep {
                id: note.id.clone(),
                nesting,
                max: MAX_JSON_NESTING,
            });
        }
        Ok(raw)
    }

    /// Restore the previous value of every written key, newest first
    async fn rollback(&self, written: Vec<(String, Option<String>)>) {
        for (key, previous) in written.into_iter().rev() {
            let restored = match previous {
                Some(raw) => self.backend.set_item(&key, raw).await,
                None => self.backend.remove_item(&key).await,
            };
            if let Err(e) = restored {
                tracing::warn!("Failed to roll back {} after import error: {}", key, e);
            }
        }
    }
}

#[async_trait]
impl<B: KeyValueBackend> NoteStore for KeyValueNoteStore<B> {
    async fn save(&self, note: &Note) -> Result<()> {
        note.validate()?;
        let raw = Self::encode(note)?;

        self.backend
            .set_item(&self.config.note_key(&note.id), raw)
            .await?;
        let mut index = self.read_index().await?;
        if !index.contains(&note.id) {
            index.push(note.id.clone());
            self.write_index(&index).await?;
        }

        tracing::debug!("Saved note {}", note.id);
        Ok(())
    }

    async fn load(&self, id: &str) -> Result<Option<Note>> {
        match self.backend.get_item(&self.config.note_key(id)).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Note>> {
        let index = self.read_index().await?;
        let mut notes = Vec::with_capacity(index.len());
        for id in &index {
            match self.load(id).await? {
                Some(note) => notes.push(note),
                None => tracing::warn!("Note {} is indexed but missing from storage", id),
            }
        }
        Ok(notes)
    }

    async fn delete(&self, id: &str) -> Result<DeleteResult> {
        let mut index = self.read_index().await?;
        let before = index.len();
        index.retain(|existing| existing != id);
        let indexed = index.len() != before;
        if indexed {
            self.write_index(&index).await?;
        }

        let key = self.config.note_key(id);
        let stored = self.backend.get_item(&key).await?.is_some();
        self.backend.remove_item(&key).await?;

        tracing::debug!("Deleted note {} (existed: {})", id, indexed || stored);
        Ok(if indexed || stored {
            DeleteResult::existed()
        } else {
            DeleteResult::not_found()
        })
    }

    async fn export_all(&self) -> Result<String> {
        let notes = self.list().await?;
        let serialized = if self.config.export_pretty {
            serde_json::to_string_pretty(&notes)?
        } else {
            serde_json::to_string(&notes)?
        };
        tracing::info!("Exported {} notes", notes.len());
        Ok(serialized)
    }

    async fn import_all(&self, serialized: &str) -> Result<usize> {
        let reject = |message: String| {
            tracing::warn!("Rejected import: {}", message);
            StoreError::invalid_import(message)
        };

        let batch: Vec<Note> = serde_json::from_str(serialized)
            .map_err(|e| reject(format!("Invalid notes data format: {}", e)))?;
        let count = batch.len();

        // Stored roots with an incoming id are replaced; the rest must not
        // share any id with the batch at any depth.
        let incoming: HashSet<String> = batch.iter().map(|note| note.id.clone()).collect();
        let mut forest: Vec<Note> = self
            .list()
            .await?
            .into_iter()
            .filter(|note| !incoming.contains(&note.id))
            .collect();
        let kept = forest.len();
        forest.extend(batch);
        validate_forest(&forest).map_err(|e| reject(e.to_string()))?;

        let mut encoded = Vec::with_capacity(count);
        for note in &forest[kept..] {
            let raw = Self::encode(note).map_err(|e| reject(e.to_string()))?;
            encoded.push((self.config.note_key(&note.id), raw));
        }

        let mut index = self.read_index().await?;
        let mut previous = Vec::with_capacity(count);
        for (key, _) in &encoded {
            previous.push(self.backend.get_item(key).await?);
        }

        let mut written = Vec::with_capacity(count);
        for ((key, raw), old) in encoded.into_iter().zip(previous) {
            if let Err(e) = self.backend.set_item(&key, raw).await {
                self.rollback(written).await;
                return Err(e.into());
            }
            written.push((key, old));
        }

        for note in &forest[kept..] {
            if !index.contains(&note.id) {
                index.push(note.id.clone());
            }
        }
        if let Err(e) = self.write_index(&index).await {
            self.rollback(written).await;
            return Err(e);
        }

        tracing::info!("Imported {} notes", count);
        Ok(count)
    }
}

/// Deepest `{`/`[` nesting in a JSON document, ignoring string contents
fn json_nesting(raw: &str) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for byte in raw.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    deepest
}
