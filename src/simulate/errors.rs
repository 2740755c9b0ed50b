use std::path::PathBuf;

use thiserror::Error;

use crate::game::GameError;
use crate::mdp::MdpError;

/// Reasons a driver stops before finishing all episodes.
#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Incorrect number of agents for game: expected {expected}, got {actual}")]
    PlayerCountMismatch { expected: usize, actual: usize },

    #[error("Game reported current agent {index}, but only {agents} agents are playing")]
    AgentIndexOutOfRange { index: usize, agents: usize },

    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    Mdp(#[from] MdpError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
