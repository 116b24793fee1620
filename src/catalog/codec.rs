/// Catalog serialization
///
/// The store only talks to a `CatalogCodec`; the JSON codec is the one used
/// in practice.

use crate::catalog::models::CommandCatalog;
use crate::error::{Result, StoreError};

/// Turns a catalog into text and back
pub trait CatalogCodec: Send + Sync {
    /// Encode a catalog. Failures are `StoreError::Serialize`.
    fn encode(&self, catalog: &CommandCatalog) -> Result<String>;

    /// Decode a catalog. Failures are `StoreError::Deserialize`.
    fn decode(&self, text: &str) -> Result<CommandCatalog>;
}

/// Compact JSON via serde_json
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl CatalogCodec for JsonCodec {
    fn encode(&self, catalog: &CommandCatalog) -> Result<String> {
        serde_json::to_string(catalog).map_err(StoreError::serialize)
    }

    fn decode(&self, text: &str) -> Result<CommandCatalog> {
        serde_json::from_str(text).map_err(|e| StoreError::Deserialize(e.to_string()))
    }
}
