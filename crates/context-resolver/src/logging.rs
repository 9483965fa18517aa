//! Logging setup for hosts that do not install their own subscriber.

use tracing_subscriber::EnvFilter;

use context_types::{ContextIndexError, ResolverSettings};

/// Install a global `fmt` subscriber.
///
/// `RUST_LOG` takes precedence over the configured log level.
pub fn init_logging(settings: &ResolverSettings) -> Result<(), ContextIndexError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| ContextIndexError::Config(format!("Failed to set tracing subscriber: {e}")))
}
