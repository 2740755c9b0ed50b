//! Process-wide log output for binaries and tests.
//!
//! The library only emits `tracing` events; nothing is printed until a
//! subscriber is installed, either here or by the embedding application.

mod errors;

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

pub use errors::TelemetryError;

static INSTALLED: OnceLock<Result<(), TelemetryError>> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `gauntlet=debug`.
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

pub fn init() -> Result<(), TelemetryError> {
    init_with_config(&LogConfig::default())
}

/// Install the global subscriber.
///
/// The first call that gets past filter parsing decides the outcome, and
/// every later call returns it. If another subscriber is already the global
/// default, nothing is installed and the call succeeds.
pub fn init_with_config(config: &LogConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| TelemetryError::InvalidFilter {
            filter: config.level.clone(),
            message: e.to_string(),
        })?,
    };
    let format = config.format;

    INSTALLED.get_or_init(|| install(filter, format)).clone()
}

fn install(filter: EnvFilter, format: LogFormat) -> Result<(), TelemetryError> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }
    let installed = match format {
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init(),
    };
    installed.map_err(|e| TelemetryError::Install(e.to_string()))
}
