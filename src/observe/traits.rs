use std::fmt::Debug;
use std::time::Duration;

use uuid::Uuid;

use crate::game::{Game, GameAgent};
use crate::mdp::Mdp;
use crate::simulate::{GameRunReport, GameSummary, TrialRunReport, TrialSummary};

/// Checkpoints of a game run, in the order the driver reaches them:
///
/// 1. `on_run_start`
/// 2. per game: `on_game_start`, `on_agent_reset` for every agent, then per
///    turn `on_search` (and `on_budget_exceeded` on overrun) followed by
///    `on_action`, and finally `on_game_end`
/// 3. `on_run_end`
///
/// Observers cannot influence the run. Every method defaults to a no-op.
pub trait GameObserver<G: Game> {
    fn on_run_start(&mut self, _run_id: Uuid, _num_games: usize) {}

    /// `game_num` is 1-based.
    fn on_game_start(&mut self, _game_num: usize, _num_games: usize) {}

    /// Called after the agent has been reset.
    fn on_agent_reset(&mut self, _agent: &dyn GameAgent<G>) {}

    /// Called once the acting agent has returned from `search`.
    fn on_search(&mut self, _agent: &dyn GameAgent<G>, _elapsed: Duration) {}

    fn on_budget_exceeded(&mut self, _agent_id: usize, _elapsed: Duration, _time_allowed: Duration) {
    }

    /// Called before the action is applied to the game.
    fn on_action(&mut self, _agent_index: usize, _action: &G::Action) {}

    fn on_game_end(&mut self, _summary: &GameSummary, _final_state: &G) {}

    fn on_run_end(&mut self, _report: &GameRunReport) {}
}

/// Checkpoints of an MDP run: `on_run_start`, then per trial
/// `on_trial_start`, `on_step` for every step and `on_trial_end`, and
/// finally `on_run_end` with the agent's learned weights.
pub trait TrialObserver<M: Mdp> {
    fn on_run_start(&mut self, _run_id: Uuid, _num_trials: usize) {}

    /// `trial_num` is 1-based.
    fn on_trial_start(&mut self, _trial_num: usize, _num_trials: usize) {}

    /// Called after the agent's update for the step.
    fn on_step(&mut self, _action: &M::Action, _reward: f64, _terminal: bool) {}

    fn on_trial_end(&mut self, _summary: &TrialSummary) {}

    fn on_run_end(&mut self, _report: &TrialRunReport, _weights: &dyn Debug) {}
}

impl<G: Game, O: GameObserver<G> + ?Sized> GameObserver<G> for &mut O {
    fn on_run_start(&mut self, run_id: Uuid, num_games: usize) {
        (**self).on_run_start(run_id, num_games)
    }

    fn on_game_start(&mut self, game_num: usize, num_games: usize) {
        (**self).on_game_start(game_num, num_games)
    }

    fn on_agent_reset(&mut self, agent: &dyn GameAgent<G>) {
        (**self).on_agent_reset(agent)
    }

    fn on_search(&mut self, agent: &dyn GameAgent<G>, elapsed: Duration) {
        (**self).on_search(agent, elapsed)
    }

    fn on_budget_exceeded(&mut self, agent_id: usize, elapsed: Duration, time_allowed: Duration) {
        (**self).on_budget_exceeded(agent_id, elapsed, time_allowed)
    }

    fn on_action(&mut self, agent_index: usize, action: &G::Action) {
        (**self).on_action(agent_index, action)
    }

    fn on_game_end(&mut self, summary: &GameSummary, final_state: &G) {
        (**self).on_game_end(summary, final_state)
    }

    fn on_run_end(&mut self, report: &GameRunReport) {
        (**self).on_run_end(report)
    }
}

impl<G: Game, A: GameObserver<G>, B: GameObserver<G>> GameObserver<G> for (A, B) {
    fn on_run_start(&mut self, run_id: Uuid, num_games: usize) {
        self.0.on_run_start(run_id, num_games);
        self.1.on_run_start(run_id, num_games);
    }

    fn on_game_start(&mut self, game_num: usize, num_games: usize) {
        self.0.on_game_start(game_num, num_games);
        self.1.on_game_start(game_num, num_games);
    }

    fn on_agent_reset(&mut self, agent: &dyn GameAgent<G>) {
        self.0.on_agent_reset(agent);
        self.1.on_agent_reset(agent);
    }

    fn on_search(&mut self, agent: &dyn GameAgent<G>, elapsed: Duration) {
        self.0.on_search(agent, elapsed);
        self.1.on_search(agent, elapsed);
    }

    fn on_budget_exceeded(&mut self, agent_id: usize, elapsed: Duration, time_allowed: Duration) {
        self.0.on_budget_exceeded(agent_id, elapsed, time_allowed);
        self.1.on_budget_exceeded(agent_id, elapsed, time_allowed);
    }

    fn on_action(&mut self, agent_index: usize, action: &G::Action) {
        self.0.on_action(agent_index, action);
        self.1.on_action(agent_index, action);
    }

    fn on_game_end(&mut self, summary: &GameSummary, final_state: &G) {
        self.0.on_game_end(summary, final_state);
        self.1.on_game_end(summary, final_state);
    }

    fn on_run_end(&mut self, report: &GameRunReport) {
        self.0.on_run_end(report);
        self.1.on_run_end(report);
    }
}

impl<M: Mdp, O: TrialObserver<M> + ?Sized> TrialObserver<M> for &mut O {
    fn on_run_start(&mut self, run_id: Uuid, num_trials: usize) {
        (**self).on_run_start(run_id, num_trials)
    }

    fn on_trial_start(&mut self, trial_num: usize, num_trials: usize) {
        (**self).on_trial_start(trial_num, num_trials)
    }

    fn on_step(&mut self, action: &M::Action, reward: f64, terminal: bool) {
        (**self).on_step(action, reward, terminal)
    }

    fn on_trial_end(&mut self, summary: &TrialSummary) {
        (**self).on_trial_end(summary)
    }

    fn on_run_end(&mut self, report: &TrialRunReport, weights: &dyn Debug) {
        (**self).on_run_end(report, weights)
    }
}

impl<M: Mdp, A: TrialObserver<M>, B: TrialObserver<M>> TrialObserver<M> for (A, B) {
    fn on_run_start(&mut self, run_id: Uuid, num_trials: usize) {
        self.0.on_run_start(run_id, num_trials);
        self.1.on_run_start(run_id, num_trials);
    }

    fn on_trial_start(&mut self, trial_num: usize, num_trials: usize) {
        self.0.on_trial_start(trial_num, num_trials);
        self.1.on_trial_start(trial_num, num_trials);
    }

    fn on_step(&mut self, action: &M::Action, reward: f64, terminal: bool) {
        self.0.on_step(action, reward, terminal);
        self.1.on_step(action, reward, terminal);
    }

    fn on_trial_end(&mut self, summary: &TrialSummary) {
        self.0.on_trial_end(summary);
        self.1.on_trial_end(summary);
    }

    fn on_run_end(&mut self, report: &TrialRunReport, weights: &dyn Debug) {
        self.0.on_run_end(report, weights);
        self.1.on_run_end(report, weights);
    }
}

/// Observer that ignores every checkpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl<G: Game> GameObserver<G> for NoopObserver {}

impl<M: Mdp> TrialObserver<M> for NoopObserver {}
