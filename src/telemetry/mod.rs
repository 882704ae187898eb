//! Logging and tracing setup for the AccessGate client
//!
//! Thin wrapper over `tracing-subscriber`: console output with an
//! environment-driven filter, optionally JSON-formatted for structured log
//! shipping by the embedding application.

use tracing_subscriber::EnvFilter;

/// Telemetry configuration
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Enable console logging
    pub enable_console: bool,
    /// Emit logs as JSON lines
    pub json_format: bool,
    /// Default log level filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enable_console: true,
            json_format: false,
            log_level: "info".to_string(),
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `config.log_level`. Safe to call more
/// than once; later calls are no-ops.
pub fn init_telemetry(config: &TelemetryConfig) {
    if !config.enable_console {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    if config.json_format {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }
}
