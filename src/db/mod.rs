/// Database module for tunnel-commands
///
/// Handles the SQLite preference table using sqlx.
/// Implements connection pooling for performance.

pub mod connection;
pub mod models;
pub mod queries;

pub use connection::Database;
pub use models::*;
