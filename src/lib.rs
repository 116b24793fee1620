/// tunnel-commands library
///
/// Cached store for per-service tunnel commands, persisted as one JSON
/// document in a key/value preference store.

pub mod catalog;
pub mod config;
pub mod core;
pub mod db;
pub mod error;
pub mod logging;
pub mod prefs;
pub mod terminal;

// Re-exports for convenience
pub use catalog::{CatalogView, CommandCatalog, ServiceCommand};
pub use crate::core::CommandStore;
pub use db::Database;
pub use error::{Result, StoreError};
