// Tunnel command store
//
// Owns the one cached catalog and is the only thing that reads or writes it
// in the preference store. Every public call holds the same lock for its
// whole duration, preference I/O included.

use crate::catalog::{
    seed_catalog, CatalogCodec, CatalogView, CommandCatalog, JsonCodec, PredefinedCommandSource,
    ServiceCommand,
};
use crate::error::{Result, StoreError};
use crate::prefs::PreferenceStore;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

pub const PLUGIN_ID: &str = "tunnel-commands";

/// Preference key holding the serialized catalog
pub const SERVICE_COMMANDS_PREF: &str = "tunnel-commands.service.tunnel.commands";

struct Cache {
    loaded: bool,
    catalog: Option<Arc<CommandCatalog>>,
}

/// Cached, single-writer store for tunnel commands
///
/// Build one when the application starts and hand it to whoever needs it.
pub struct CommandStore {
    prefs: Arc<dyn PreferenceStore>,
    codec: Arc<dyn CatalogCodec>,
    predefined: Option<Arc<dyn PredefinedCommandSource>>,
    cache: Mutex<Cache>,
}

impl CommandStore {
    /// Create a store over `prefs` with the JSON codec and no predefined commands
    pub fn new(prefs: Arc<dyn PreferenceStore>) -> Self {
        Self {
            prefs,
            codec: Arc::new(JsonCodec),
            predefined: None,
            cache: Mutex::new(Cache {
                loaded: false,
                catalog: None,
            }),
        }
    }

    /// Layer predefined commands over the catalog and seed from them
    pub fn with_predefined(mut self, predefined: Arc<dyn PredefinedCommandSource>) -> Self {
        self.predefined = Some(predefined);
        self
    }

    pub fn with_codec(mut self, codec: Arc<dyn CatalogCodec>) -> Self {
        self.codec = codec;
        self
    }

    /// Current catalog as a view
    ///
    /// Loads from the preference store on first use. The view wraps the
    /// predefined commands when the store was given some.
    pub async fn view(&self) -> Result<CatalogView> {
        let mut cache = self.cache.lock().await;
        if !cache.loaded {
            self.load(&mut cache).await?;
        }

        Ok(match (&cache.catalog, &self.predefined) {
            (Some(catalog), Some(predefined)) => CatalogView::WithPredefined {
                catalog: Arc::clone(catalog),
                predefined: Arc::clone(predefined),
            },
            (Some(catalog), None) => CatalogView::Pure(Arc::clone(catalog)),
            (None, _) => CatalogView::Empty,
        })
    }

    /// Re-read the catalog from the preference store
    ///
    /// A missing or unreadable value is replaced by a freshly seeded catalog.
    /// Only a failing preference read is returned as an error.
    pub async fn reload(&self) -> Result<()> {
        let mut cache = self.cache.lock().await;
        self.load(&mut cache).await
    }

    /// Persist the catalog held by `view`
    ///
    /// Any predefined overlay is dropped first, so only the catalog itself is
    /// written. An `Empty` view keeps whatever is cached. Returns the text
    /// that was written, or `None` if there was nothing to write.
    ///
    /// Encoding failures abort before anything is written. A failed flush is
    /// logged and otherwise ignored; the value stays in the preference store
    /// and goes out with its next flush.
    pub async fn save(&self, view: CatalogView) -> Result<Option<String>> {
        let mut cache = self.cache.lock().await;

        if let Some(catalog) = view.into_persisted() {
            cache.catalog = Some(catalog);
            cache.loaded = true;
        }

        self.persist(&cache).await
    }

    /// Commands stored for `vendor_id`
    ///
    /// Matches the first service whose vendor id is exactly `vendor_id`.
    /// Loads on first use like `view`. Empty when nothing matches.
    pub async fn commands_for_vendor(
        &self,
        vendor_id: &str,
        force_reload: bool,
    ) -> Result<Vec<ServiceCommand>> {
        let mut cache = self.cache.lock().await;
        if force_reload || !cache.loaded {
            self.load(&mut cache).await?;
        }

        Ok(cache
            .catalog
            .as_ref()
            .and_then(|c| c.commands_for_vendor(vendor_id))
            .map(<[ServiceCommand]>::to_vec)
            .unwrap_or_default())
    }

    /// Throw away the stored catalog and start over from the seed
    pub async fn reset(&self) -> Result<Option<String>> {
        let mut cache = self.cache.lock().await;
        cache.catalog = Some(Arc::new(self.seed()));
        cache.loaded = true;

        self.persist(&cache).await
    }

    async fn persist(&self, cache: &Cache) -> Result<Option<String>> {
        let catalog = match &cache.catalog {
            Some(catalog) => catalog,
            None => return Ok(None),
        };

        let serialized = self.codec.encode(catalog)?;

        self.prefs
            .put(SERVICE_COMMANDS_PREF, &serialized)
            .await
            .map_err(into_persistence)?;

        if let Err(e) = self.prefs.flush().await {
            error!(error = %e, "failed to flush tunnel commands, keeping them queued");
        }

        info!(services = catalog.services.len(), "saved tunnel commands");
        Ok(Some(serialized))
    }

    async fn load(&self, cache: &mut Cache) -> Result<()> {
        let stored = self
            .prefs
            .get(SERVICE_COMMANDS_PREF)
            .await
            .map_err(into_persistence)?;

        let catalog = match stored {
            Some(text) => match self.codec.decode(&text) {
                Ok(catalog) => {
                    debug!(services = catalog.services.len(), "loaded tunnel commands");
                    catalog
                }
                Err(e) => {
                    warn!(error = %e, "stored tunnel commands are unreadable, starting fresh");
                    self.seed()
                }
            },
            None => {
                debug!("no stored tunnel commands, seeding defaults");
                self.seed()
            }
        };

        cache.catalog = Some(Arc::new(catalog));
        cache.loaded = true;
        Ok(())
    }

    fn seed(&self) -> CommandCatalog {
        seed_catalog(self.predefined.as_deref())
    }
}

fn into_persistence(e: StoreError) -> StoreError {
    match e {
        StoreError::Persistence(_) => e,
        other => StoreError::Persistence(other.to_string()),
    }
}
