/// Read view over the cached catalog
///
/// A view either holds the persisted catalog alone or pairs it with the
/// predefined command source. Saving a view always keeps just the catalog.

use crate::catalog::models::{CommandCatalog, CommandTerminal, ServiceCommand};
use crate::catalog::predefined::PredefinedCommandSource;
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub enum CatalogView {
    /// No catalog loaded
    Empty,
    /// The persisted catalog on its own
    Pure(Arc<CommandCatalog>),
    /// The persisted catalog with predefined commands as a read fallback
    WithPredefined {
        catalog: Arc<CommandCatalog>,
        predefined: Arc<dyn PredefinedCommandSource>,
    },
}

impl CatalogView {
    pub fn pure(catalog: CommandCatalog) -> Self {
        CatalogView::Pure(Arc::new(catalog))
    }

    /// The persisted layer, if there is one
    pub fn catalog(&self) -> Option<&CommandCatalog> {
        match self {
            CatalogView::Empty => None,
            CatalogView::Pure(catalog) | CatalogView::WithPredefined { catalog, .. } => {
                Some(catalog.as_ref())
            }
        }
    }

    /// Edit the persisted layer
    ///
    /// Copy-on-write: other holders of the same snapshot don't see the edit.
    pub fn catalog_mut(&mut self) -> Option<&mut CommandCatalog> {
        match self {
            CatalogView::Empty => None,
            CatalogView::Pure(catalog) | CatalogView::WithPredefined { catalog, .. } => {
                Some(Arc::make_mut(catalog))
            }
        }
    }

    /// Drop the overlay and keep what gets persisted
    pub fn into_persisted(self) -> Option<Arc<CommandCatalog>> {
        match self {
            CatalogView::Empty => None,
            CatalogView::Pure(catalog) | CatalogView::WithPredefined { catalog, .. } => {
                Some(catalog)
            }
        }
    }

    pub fn has_predefined(&self) -> bool {
        matches!(self, CatalogView::WithPredefined { .. })
    }

    /// Stored default terminal. Predefined commands never supply one.
    pub fn default_terminal(&self) -> Option<&CommandTerminal> {
        self.catalog().and_then(|c| c.default_terminal.as_ref())
    }

    /// Commands for a vendor
    ///
    /// A persisted entry is returned as-is. Only a vendor missing from the
    /// catalog falls back to the predefined source.
    pub fn commands_for_vendor(&self, vendor_id: &str) -> Vec<ServiceCommand> {
        match self {
            CatalogView::Empty => Vec::new(),
            CatalogView::Pure(catalog) => catalog
                .commands_for_vendor(vendor_id)
                .map(<[ServiceCommand]>::to_vec)
                .unwrap_or_default(),
            CatalogView::WithPredefined {
                catalog,
                predefined,
            } => match catalog.commands_for_vendor(vendor_id) {
                Some(commands) => commands.to_vec(),
                None => predefined.commands_for_vendor(vendor_id),
            },
        }
    }
}

impl fmt::Debug for CatalogView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogView::Empty => write!(f, "Empty"),
            CatalogView::Pure(catalog) => f.debug_tuple("Pure").field(catalog).finish(),
            CatalogView::WithPredefined { catalog, .. } => f
                .debug_struct("WithPredefined")
                .field("catalog", catalog)
                .finish_non_exhaustive(),
        }
    }
}
