/// Core functionality modules
///
/// Contains the command store: loading, seeding, saving and vendor lookup.

pub mod store;

pub use store::{CommandStore, PLUGIN_ID, SERVICE_COMMANDS_PREF};
