/// Durable preference stores
///
/// A preference store is a named key -> string store. Writes land in memory
/// first and only become durable on `flush`, which may fail without losing
/// the in-memory value.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryPreferences;
pub use sqlite::SqlitePreferences;

use crate::error::Result;
use async_trait::async_trait;

/// Key/value preference backend used by the command store
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Current value for `key`, including unflushed writes
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stage a value for `key`
    async fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Persist everything staged so far
    ///
    /// A failure leaves staged values in place so a later flush can retry.
    async fn flush(&self) -> Result<()>;
}
