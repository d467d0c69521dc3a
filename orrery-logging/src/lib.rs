//! Tracing initialization for the orrery tool.
//!
//! Uses the standard `RUST_LOG` environment variable for filtering:
//! - `RUST_LOG=debug` - Set global level
//! - `RUST_LOG=orrery_provision=debug` - Set per-crate levels
//!
//! Uses `RUST_LOG_FORMAT` for output format (optional):
//! - `pretty` - Pretty formatted output (default)
//! - `compact` - Compact single-line output
//! - `json` - JSON formatted output
//!
//! Events are written to stderr; stdout belongs to user-facing output.

use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Error, Debug)]
#[error("Failed to initialize tracing: {0}")]
pub struct LoggingError(String);

/// Output format of the fmt layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Compact,
    Json,
}

impl LogFormat {
    /// Parse a `RUST_LOG_FORMAT` value. Unknown values fall back to pretty.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            "compact" => LogFormat::Compact,
            _ => LogFormat::Pretty,
        }
    }

    fn from_env() -> Self {
        std::env::var("RUST_LOG_FORMAT")
            .map(|v| LogFormat::parse(&v))
            .unwrap_or(LogFormat::Pretty)
    }
}

/// Initialize with `warn` as the default filter.
pub fn init() -> Result<(), LoggingError> {
    init_with_defaults("warn")
}

/// Initialize with a default filter if `RUST_LOG` is not set.
///
/// # Arguments
/// * `default_filter` - The filter string to use if RUST_LOG is not set (e.g., "info", "debug")
pub fn init_with_defaults(default_filter: &str) -> Result<(), LoggingError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match LogFormat::from_env() {
        LogFormat::Json => registry
            .with(fmt::layer().with_ansi(false).with_writer(std::io::stderr).json())
            .try_init(),
        LogFormat::Compact => registry
            .with(fmt::layer().with_writer(std::io::stderr).compact())
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr).pretty())
            .try_init(),
    };

    result.map_err(|e| LoggingError(e.to_string()))
}

/// Initialize for testing, routing output through the test harness.
pub fn init_for_testing() -> Result<(), LoggingError> {
    tracing_subscriber::registry()
        .with(EnvFilter::new("debug"))
        .with(fmt::layer().with_test_writer())
        .try_init()
        .map_err(|e| LoggingError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{debug, info_span, warn};

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse(" Compact "), LogFormat::Compact);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("fancy"), LogFormat::Pretty);
    }

    #[test]
    fn test_tracing_initialization() {
        // Only one subscriber can be installed per process; a second call
        // must report an error rather than panic.
        let _ = init_for_testing();
        assert!(init_for_testing().is_err());

        let span = info_span!("provision", dependency = "freeglut");
        let _enter = span.enter();
        debug!("inside span");
        warn!("still inside span");
    }
}
