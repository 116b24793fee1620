/// Command catalog module
///
/// The persisted data model, its default seed, its codec and the read view
/// that layers predefined commands on top.

pub mod codec;
pub mod models;
pub mod predefined;
pub mod seed;
pub mod view;

pub use codec::{CatalogCodec, JsonCodec};
pub use models::*;
pub use predefined::{PredefinedCommandSource, StandardCommands, StaticCommands};
pub use seed::seed_catalog;
pub use view::CatalogView;
