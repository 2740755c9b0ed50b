use std::fmt::{Debug, Display};
use std::time::Duration;

use super::errors::GameError;

/// A turn-based game played by a fixed number of agents.
///
/// The driver only ever hands agents a [`snapshot`](Game::snapshot) of the
/// game. Because a snapshot is an owned value, nothing the driver later does
/// to the live game can reach it.
///
/// `Display` is the human-readable state used in log output.
pub trait Game: Clone + Display {
    /// Action consumed by [`take_action`](Game::take_action). Opaque to the driver.
    type Action: Clone + Debug;

    /// Number of agents the game needs. Constant for a given game.
    fn player_count(&self) -> usize;

    /// Index of the agent whose turn it is.
    fn current_agent_id(&self) -> usize;

    /// Return the game to its initial state, discarding the previous episode.
    fn reset(&mut self) -> Result<(), GameError>;

    fn is_terminal(&self) -> bool;

    /// Apply an action for the current agent.
    fn take_action(&mut self, action: &Self::Action) -> Result<(), GameError>;

    /// Id of the winning agent once the game is terminal, `None` if nobody won.
    fn winning_id(&self) -> Option<usize>;

    /// Independent deep copy of the current state.
    fn snapshot(&self) -> Self {
        self.clone()
    }
}

/// An agent playing a [`Game`].
///
/// `Debug` is the representation written to the logs, so implementations
/// should keep it to what is worth reading after each move.
pub trait GameAgent<G: Game>: Debug {
    fn agent_id(&self) -> usize;

    /// Discard all per-episode state. Learned state may be kept.
    fn reset(&mut self) -> Result<(), GameError>;

    /// Choose an action for `game`, which is a snapshot owned by the agent.
    ///
    /// `time_allowed` is a soft budget: the driver neither enforces nor
    /// cancels it, it only reports overruns.
    fn search(&mut self, game: G, time_allowed: Duration) -> Result<G::Action, GameError>;

    /// Called for every action applied to the game. `is_own_action` is true
    /// only for the agent sitting at index `current_agent_id()` of the agent
    /// slice, i.e. the one whose `search` produced the action. The value
    /// returned by [`agent_id`](GameAgent::agent_id) plays no part in it.
    fn take_action(&mut self, action: &G::Action, is_own_action: bool) -> Result<(), GameError>;
}
