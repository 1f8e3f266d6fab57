//! Logging subscriber initialisation.
//!
//! Logs go to stderr so they never interleave with the shop's conversation on stdout.

use std::io;

use clap::ValueEnum;
use thiserror::Error;
use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt},
    util::{SubscriberInitExt, TryInitError},
};

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// A global subscriber is already installed.
    #[error("failed to install log subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human readable single line events
    #[default]
    Compact,

    /// One JSON object per event
    Json,
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `log_level` when it is set.
///
/// # Errors
///
/// Returns [`LoggingError::Init`] if a global subscriber has already been installed.
pub fn init_subscriber(log_level: &str, log_format: LogFormat) -> Result<(), LoggingError> {
    match log_format {
        LogFormat::Compact => init_with_layer(
            log_level,
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_writer(io::stderr),
        ),
        LogFormat::Json => init_with_layer(
            log_level,
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_target(true)
                .with_writer(io::stderr),
        ),
    }
}

fn build_env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}

fn init_with_layer<L>(log_level: &str, fmt_layer: L) -> Result<(), LoggingError>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(build_env_filter(log_level))
        .try_init()?;

    Ok(())
}
