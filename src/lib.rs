//! # gauntlet
//!
//! Runs decision-making agents against environments for a number of
//! episodes and reports what happened.
//!
//! - [`simulate::run_games`] plays a turn-based [`Game`] with one agent per
//!   seat. Each turn the acting agent searches a snapshot of the game, the
//!   action is applied to the live game, and every agent is told about it.
//! - [`simulate::run_mdp`] runs a learning [`MdpAgent`] through an [`Mdp`],
//!   feeding each transition back through `update`.
//!
//! Agents never see the live environment, only owned snapshots. Logging
//! happens through an observer ([`observe::LogObserver`] by default), so the
//! drivers run the same with or without a subscriber installed.
//!
//! ```text
//!   reset ─▶ search(snapshot) ─▶ take_action ─▶ notify all ─┐
//!              ▲                                             │
//!              └──────────────── until terminal ◀────────────┘
//! ```

pub mod game;
pub mod mdp;
pub mod observe;
pub mod simulate;
pub mod telemetry;

#[doc(hidden)]
pub mod test_utils;

pub use game::{Game, GameAgent, GameError};
pub use mdp::{Mdp, MdpAgent, MdpError};
pub use simulate::{SimulationError, run_games, run_mdp};
