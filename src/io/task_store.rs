use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::io::kv::{KeyValueStore, StoreError};
use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::model::task::Task;

/// Persists the whole task list under one key of a [`KeyValueStore`].
#[derive(Debug)]
pub struct TaskStore<S> {
    kv: S,
    key: String,
}

impl<S: KeyValueStore> TaskStore<S> {
    pub fn new(kv: S, key: impl Into<String>) -> Self {
        TaskStore {
            kv,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    pub fn kv_mut(&mut self) -> &mut S {
        &mut self.kv
    }

    /// Load the stored task list. Missing or unusable data gives an empty list.
    pub fn load(&self) -> Vec<Task> {
        let key = self.key.clone();
        self.load_value(&key).unwrap_or_default()
    }

    /// Replace the stored task list with `tasks`.
    pub fn save(&mut self, tasks: &[Task]) -> Result<(), StoreError> {
        let key = self.key.clone();
        self.save_value(&key, tasks)
    }

    /// Decode the JSON value under `key`. Absent → None. Unreadable or
    /// malformed → None, with a warning, a `.bak` copy and a recovery entry.
    pub fn load_value<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.kv.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, "could not read stored value: {}", e);
                self.record(
                    RecoveryEntry::new(RecoveryCategory::Read, "stored value unreadable")
                        .field("Key", key)
                        .field("Error", e.to_string()),
                );
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                let bak = self.kv.backup(key);
                tracing::warn!(
                    key,
                    backup = ?bak,
                    "stored value is not valid, starting empty: {}",
                    e
                );
                let mut entry =
                    RecoveryEntry::new(RecoveryCategory::Read, "stored value could not be parsed")
                        .field("Key", key)
                        .field("Error", e.to_string());
                if let Some(bak) = bak {
                    entry = entry.field("Backup", bak.display().to_string());
                }
                self.record(entry.body(raw));
                None
            }
        }
    }

    /// Encode `value` as JSON and replace whatever `key` held.
    /// On a failed write the encoded content goes to the recovery log.
    pub fn save_value<T: Serialize + ?Sized>(
        &mut self,
        key: &str,
        value: &T,
    ) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(value)?;
        if let Err(e) = self.kv.set(key, &content) {
            self.record(
                RecoveryEntry::new(RecoveryCategory::Write, "save failed")
                    .field("Key", key)
                    .field("Error", e.to_string())
                    .body(content),
            );
            return Err(e);
        }
        tracing::debug!(key, bytes = content.len(), "saved");
        Ok(())
    }

    /// Keep a copy of a deleted task in the recovery log.
    pub fn log_deletion(&self, task: &Task) {
        let body = serde_json::to_string_pretty(task).unwrap_or_default();
        self.record(
            RecoveryEntry::new(
                RecoveryCategory::Delete,
                format!("task {} deleted", task.id),
            )
            .field("Title", task.title.clone())
            .body(body),
        );
    }

    fn record(&self, entry: RecoveryEntry) {
        if let Some(dir) = self.kv.data_dir() {
            recovery::log_recovery(dir, entry);
        }
    }
}
