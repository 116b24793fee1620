/// Data models for database entities

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single stored preference
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Preference {
    pub key: String,
    pub value: String,
    pub updated_at: String, // ISO 8601 format
}
