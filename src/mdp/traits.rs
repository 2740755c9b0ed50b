use std::fmt::Debug;

use super::errors::MdpError;

/// A sequential decision process with a single agent.
///
/// The MDP keeps its own bookkeeping: [`total_reward`](Mdp::total_reward)
/// and [`timesteps`](Mdp::timesteps) cover the current trial and are
/// cleared by [`reset`](Mdp::reset).
pub trait Mdp: Clone {
    type Action: Clone + Debug;

    fn reset(&mut self) -> Result<(), MdpError>;

    fn is_terminal(&self) -> bool;

    /// Advance one timestep. Returns the reward and whether the new state is terminal.
    fn step(&mut self, action: &Self::Action) -> Result<(f64, bool), MdpError>;

    /// Reward accumulated since the last reset.
    fn total_reward(&self) -> f64;

    /// Steps taken since the last reset.
    fn timesteps(&self) -> usize;

    /// Independent deep copy of the current state.
    fn snapshot(&self) -> Self {
        self.clone()
    }
}

/// A learning agent for an [`Mdp`].
pub trait MdpAgent<M: Mdp> {
    /// Learned parameters, exposed for diagnostics only.
    type Weights: Debug;

    fn get_next_action(&mut self, mdp: M) -> Result<M::Action, MdpError>;

    /// Learning step for one transition. `prev_state` is the snapshot taken
    /// before the step, `mdp` is the live process after it.
    fn update(
        &mut self,
        prev_state: &M,
        mdp: &M,
        reward: f64,
        action: &M::Action,
        terminal: bool,
    ) -> Result<(), MdpError>;

    fn weights(&self) -> &Self::Weights;
}
