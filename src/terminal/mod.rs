/// Terminal integration module
///
/// Picks the platform terminal that newly seeded catalogs default to.

pub mod detector;

pub use detector::{Platform, TerminalDetector};
