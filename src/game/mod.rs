mod errors;
mod traits;

pub use errors::GameError;
pub use traits::{Game, GameAgent};
