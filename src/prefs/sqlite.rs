/// SQLite-backed preference store
///
/// `put` only stages a value. Staged values shadow the table on `get` and
/// are written in a single transaction on `flush`.

use crate::db::Database;
use crate::error::{Result, StoreError};
use crate::prefs::PreferenceStore;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use tracing::debug;

pub struct SqlitePreferences {
    db: Database,
    staged: Mutex<BTreeMap<String, String>>,
}

impl SqlitePreferences {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            staged: Mutex::new(BTreeMap::new()),
        }
    }

    /// Number of values not yet flushed
    #[cfg(test)]
    fn pending(&self) -> usize {
        self.staged.lock().len()
    }
}

#[async_trait]
impl PreferenceStore for SqlitePreferences {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let staged = self.staged.lock().get(key).cloned();
        if staged.is_some() {
            return Ok(staged);
        }

        self.db
            .get_preference(key)
            .await
            .map_err(|e| StoreError::Persistence(e.to_string()))
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        self.staged
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        let changes: Vec<(String, String)> = self
            .staged
            .lock()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        if changes.is_empty() {
            return Ok(());
        }

        self.db
            .apply_preferences(&changes)
            .await
            .map_err(|e| StoreError::Flush(e.to_string()))?;

        // Drop only what was written; anything staged meanwhile stays queued
        let mut staged = self.staged.lock();
        for (key, value) in &changes {
            if staged.get(key) == Some(value) {
                staged.remove(key);
            }
        }

        debug!(count = changes.len(), "flushed preferences");
        Ok(())
    }
}
