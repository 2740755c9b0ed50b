use thiserror::Error;

/// Failure raised by an MDP or by the agent learning it.
#[derive(Error, Debug)]
pub enum MdpError {
    #[error("MDP error: {0}")]
    MdpError(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl MdpError {
    pub fn msg(message: impl Into<String>) -> Self {
        let message: String = message.into();
        MdpError::MdpError(message.into())
    }
}
