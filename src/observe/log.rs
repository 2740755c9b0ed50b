use std::fmt::Debug;
use std::time::Duration;

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::traits::{GameObserver, TrialObserver};
use crate::game::{Game, GameAgent};
use crate::mdp::Mdp;
use crate::simulate::{GameRunReport, GameSummary, TrialRunReport, TrialSummary};

/// Default observer: writes every checkpoint as a `tracing` event.
///
/// Episode boundaries, winners and run completion are `info`; per-agent and
/// per-action detail is `debug`; budget overruns are `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl<G: Game> GameObserver<G> for LogObserver {
    fn on_run_start(&mut self, run_id: Uuid, num_games: usize) {
        debug!(%run_id, num_games, "Starting games");
    }

    fn on_game_start(&mut self, game_num: usize, num_games: usize) {
        info!(game = game_num, "Game {}/{}", game_num, num_games);
    }

    fn on_agent_reset(&mut self, agent: &dyn GameAgent<G>) {
        debug!(agent_id = agent.agent_id(), "Agent {} start {:?}", agent.agent_id(), agent);
    }

    fn on_search(&mut self, agent: &dyn GameAgent<G>, elapsed: Duration) {
        let elapsed_ms = elapsed.as_millis() as u64;
        debug!(
            agent_id = agent.agent_id(),
            elapsed_ms,
            "Agent {} {:?}",
            agent.agent_id(),
            agent
        );
    }

    fn on_budget_exceeded(&mut self, agent_id: usize, elapsed: Duration, time_allowed: Duration) {
        let elapsed_ms = elapsed.as_millis() as u64;
        let allowed_ms = time_allowed.as_millis() as u64;
        warn!(
            agent_id,
            elapsed_ms,
            allowed_ms,
            "Agent {} exceeded its search budget",
            agent_id
        );
    }

    fn on_action(&mut self, agent_index: usize, action: &G::Action) {
        debug!(agent_id = agent_index, "Agent {} action {:?}", agent_index, action);
    }

    fn on_game_end(&mut self, summary: &GameSummary, final_state: &G) {
        match summary.winner {
            Some(winner) => info!(game = summary.game_num, winner, "Winning agent is {}", winner),
            None => info!(game = summary.game_num, "No winning agent"),
        }
        debug!("Final state\n{}", final_state);
    }

    fn on_run_end(&mut self, report: &GameRunReport) {
        info!(
            games = report.games_played(),
            transitions = report.total_transitions(),
            "Games complete"
        );
    }
}

impl<M: Mdp> TrialObserver<M> for LogObserver {
    fn on_run_start(&mut self, run_id: Uuid, num_trials: usize) {
        debug!(%run_id, num_trials, "Starting trials");
    }

    fn on_trial_start(&mut self, trial_num: usize, num_trials: usize) {
        info!(trial = trial_num, "Trial {}/{}", trial_num, num_trials);
    }

    fn on_trial_end(&mut self, summary: &TrialSummary) {
        debug!(
            trial = summary.trial_num,
            reward = summary.total_reward,
            timesteps = summary.timesteps,
            "reward:{}; timesteps:{}",
            summary.total_reward,
            summary.timesteps
        );
    }

    fn on_run_end(&mut self, report: &TrialRunReport, weights: &dyn Debug) {
        debug!("Final agent weights: {:?}", weights);
        info!(trials = report.trials_run(), "Trials complete.");
    }
}
