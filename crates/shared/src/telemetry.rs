//! Tracing subscriber bootstrap.
//!
//! Library crates only emit events through the `tracing` facade. A hosting
//! application calls [`init_tracing`] once at startup to install a subscriber.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::error::{AppError, AppResult};

/// Builds the filter from `RUST_LOG`, falling back to the configured directive.
#[must_use]
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| config.default_directive.as_str().into())
}

/// Installs a global `fmt` subscriber filtered by [`env_filter`].
///
/// # Errors
///
/// Returns an error if a global subscriber has already been installed.
pub fn init_tracing(config: &LoggingConfig) -> AppResult<()> {
    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| AppError::Internal(format!("failed to install tracing subscriber: {e}")))
}
