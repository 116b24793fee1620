/// Error types for tunnel-commands
///
/// This module defines all possible errors that can occur in the store.
/// Uses thiserror for ergonomic error handling.

use thiserror::Error;

/// Main error type for tunnel command store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O errors (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted catalog could not be decoded.
    ///
    /// Only raised by codecs. The store recovers from it by re-seeding.
    #[error("Could not read tunnel commands: {0}")]
    Deserialize(String),

    /// In-memory catalog could not be encoded; nothing was written
    #[error("Could not serialize tunnel commands: {source}")]
    Serialize {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Preference backend accepted a value but could not make it durable
    #[error("Failed to flush preferences: {0}")]
    Flush(String),

    /// Any other failure while reading or writing preference data
    #[error("Preference store error: {0}")]
    Persistence(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No command set for the given vendor
    #[error("No service with vendor id: {0}")]
    ServiceNotFound(String),

    /// Invalid command definition
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

impl StoreError {
    /// Wrap any encoder failure as a serialize error
    pub fn serialize<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        StoreError::Serialize {
            source: Box::new(source),
        }
    }

    /// Convert StoreError to a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            StoreError::Database(e) => {
                format!("Database error occurred. Please try again. Details: {}", e)
            }
            StoreError::Io(e) => {
                format!("File system error. Check permissions. Details: {}", e)
            }
            StoreError::Deserialize(msg) => {
                format!("Stored tunnel commands are unreadable: {}", msg)
            }
            StoreError::Serialize { source } => {
                format!("Tunnel commands could not be saved: {}", source)
            }
            StoreError::Flush(msg) => {
                format!("Changes may not survive a restart: {}", msg)
            }
            StoreError::Persistence(msg) => {
                format!("Could not access saved preferences: {}", msg)
            }
            StoreError::Config(msg) => {
                format!("Configuration issue: {}", msg)
            }
            StoreError::ServiceNotFound(vendor) => {
                format!("Service '{}' is not in the command catalog", vendor)
            }
            StoreError::InvalidCommand(reason) => {
                format!("Invalid command: {}", reason)
            }
            StoreError::Generic(msg) => msg.clone(),
        }
    }
}

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_user_messages() {
        let err = StoreError::ServiceNotFound("mongodb".to_string());
        assert!(err.user_message().contains("mongodb"));

        let err = StoreError::Flush("disk full".to_string());
        assert!(err.user_message().contains("restart"));
    }

    #[test]
    fn test_serialize_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "encoder broke");
        let err = StoreError::serialize(io);

        let display = format!("{}", err);
        assert!(display.contains("Could not serialize"));
        assert!(display.contains("encoder broke"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_error_display() {
        let err = StoreError::InvalidCommand("empty name".to_string());
        let display = format!("{}", err);
        assert!(display.contains("Invalid command"));
    }
}
