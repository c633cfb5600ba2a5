//! Configuration for the notes core
//!
//! Every field has a serde default so partial or older config files load
//! without error.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// Storage and auto-save settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotesConfig {
    /// Namespace of the key-value store (directory name for the file backend)
    pub store_name: String,

    /// Key holding the ordered list of note ids
    pub notes_list_key: String,

    /// Prefix of each per-note key (`note-<id>`)
    pub note_key_prefix: String,

    /// Quiet period before pending edits are saved
    pub autosave_debounce_ms: u64,

    /// Pretty-print exported JSON with two-space indentation
    pub export_pretty: bool,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            store_name: "nexus-notes".to_string(),
            notes_list_key: "notes-list".to_string(),
            note_key_prefix: "note-".to_string(),
            autosave_debounce_ms: 2000,
            export_pretty: true,
        }
    }
}

impl NotesConfig {
    /// Key under which a note is stored
    pub fn note_key(&self, id: &str) -> String {
        format!("{}{}", self.note_key_prefix, id)
    }

    pub fn autosave_debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.autosave_debounce_ms)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.store_name.trim().is_empty() {
            return Err("store_name cannot be empty".to_string());
        }

        if self.notes_list_key.is_empty() {
            return Err("notes_list_key cannot be empty".to_string());
        }

        if self.note_key_prefix.is_empty() {
            return Err("note_key_prefix cannot be empty".to_string());
        }

        // A note id equal to the suffix would otherwise overwrite the index
        if self.notes_list_key.starts_with(&self.note_key_prefix) {
            return Err(format!(
                "notes_list_key '{}' collides with note_key_prefix '{}'",
                self.notes_list_key, self.note_key_prefix
            ));
        }

        if self.autosave_debounce_ms == 0 {
            return Err("autosave_debounce_ms must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Load configuration from a JSON file
    ///
    /// Returns defaults when the file does not exist.
    pub async fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !fs::try_exists(path).await? {
            tracing::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).await?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate().map_err(anyhow::Error::msg)?;
        Ok(config)
    }
}
