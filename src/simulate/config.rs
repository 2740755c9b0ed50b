use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use crate::telemetry::LogConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameRunConfig {
    pub num_games: usize,
    /// Search budget handed unchanged to the acting agent on every turn.
    /// Written as whole milliseconds in config files.
    #[serde(rename = "time_allowed_ms", with = "millis")]
    pub time_allowed: Duration,
}

impl GameRunConfig {
    pub fn new(num_games: usize, time_allowed: Duration) -> Self {
        Self {
            num_games,
            time_allowed,
        }
    }
}

impl Default for GameRunConfig {
    fn default() -> Self {
        Self {
            num_games: 1,
            time_allowed: Duration::from_secs(1),
        }
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let ms = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(ms)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrialRunConfig {
    pub num_trials: usize,
}

impl TrialRunConfig {
    pub fn new(num_trials: usize) -> Self {
        Self { num_trials }
    }
}

impl Default for TrialRunConfig {
    fn default() -> Self {
        Self { num_trials: 1 }
    }
}

/// Settings for a whole experiment, usually read from a JSON file.
///
/// ```json
/// {
///   "games": { "num_games": 20, "time_allowed_ms": 250 },
///   "trials": { "num_trials": 500 },
///   "logging": { "level": "debug", "format": "json" }
/// }
/// ```
///
/// Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExperimentConfig {
    pub games: GameRunConfig,
    pub trials: TrialRunConfig,
    pub logging: LogConfig,
}

impl ExperimentConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}
