/// Store configuration
///
/// Works out where preferences live on disk.

use crate::error::{Result, StoreError};
use std::env;
use std::path::{Path, PathBuf};

/// Overrides the data directory when set
pub const HOME_ENV: &str = "TUNNEL_COMMANDS_HOME";

const DATA_DIR_NAME: &str = ".tunnel-commands";
const DB_FILE_NAME: &str = "preferences.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
}

impl StoreConfig {
    /// Resolve from the environment
    ///
    /// `$TUNNEL_COMMANDS_HOME` if set, otherwise `~/.tunnel-commands`.
    pub fn from_env() -> Result<Self> {
        if let Ok(dir) = env::var(HOME_ENV) {
            if !dir.trim().is_empty() {
                return Ok(Self::with_data_dir(dir));
            }
        }

        let home = dirs::home_dir()
            .ok_or_else(|| StoreError::Config("Could not determine home directory".to_string()))?;

        Ok(Self::with_data_dir(home.join(DATA_DIR_NAME)))
    }

    pub fn with_data_dir<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    /// SQLite file backing the preference store
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_path() {
        let config = StoreConfig::with_data_dir("/tmp/tc");
        assert_eq!(config.db_path(), PathBuf::from("/tmp/tc/preferences.db"));
    }

    #[test]
    fn test_from_env_resolves_somewhere() {
        // Either the override or the home directory; should not panic
        if let Ok(config) = StoreConfig::from_env() {
            assert!(config.db_path().ends_with(DB_FILE_NAME));
        }
    }
}
