/// In-process preference store
///
/// Nothing here outlives the process. Useful for tests and throwaway sessions.

use crate::error::Result;
use crate::prefs::PreferenceStore;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `key` already set
    pub fn with_value(key: &str, value: &str) -> Self {
        let prefs = Self::new();
        prefs.values.write().insert(key.to_string(), value.to_string());
        prefs
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferences {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        self.values.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get() {
        let prefs = MemoryPreferences::new();
        assert_eq!(prefs.get("k").await.unwrap(), None);

        prefs.put("k", "v").await.unwrap();
        assert_eq!(prefs.get("k").await.unwrap(), Some("v".to_string()));

        prefs.put("k", "w").await.unwrap();
        assert_eq!(prefs.get("k").await.unwrap(), Some("w".to_string()));
    }

    #[tokio::test]
    async fn test_with_value() {
        let prefs = MemoryPreferences::with_value("k", "seeded");
        prefs.flush().await.unwrap();
        assert_eq!(prefs.get("k").await.unwrap(), Some("seeded".to_string()));
    }
}
