// Logging setup

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize tracing
///
/// `RUST_LOG` controls the level, default is `info`. Logs go to stderr so
/// command output stays clean.
pub fn init_logging() -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| format!("Log system initialization failed: {}", e))
}
