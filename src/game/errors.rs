use thiserror::Error;

/// Failure raised by a game or by one of its agents.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("Game error: {0}")]
    GameError(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl GameError {
    pub fn msg(message: impl Into<String>) -> Self {
        let message: String = message.into();
        GameError::GameError(message.into())
    }
}
