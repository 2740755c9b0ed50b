//! The two drivers: turn-based games and MDP trials.
//!
//! Both are single-threaded and strictly sequential. Each call gets a fresh
//! run id, reported through the observer, the tracing span and the returned
//! report.

mod config;
mod errors;
mod games;
mod report;
mod trials;

pub use config::{ExperimentConfig, GameRunConfig, TrialRunConfig};
pub use errors::{ConfigError, SimulationError};
pub use games::{run_games, run_games_with};
pub use report::{GameRunReport, GameSummary, TrialRunReport, TrialSummary};
pub use trials::{run_mdp, run_mdp_with};
