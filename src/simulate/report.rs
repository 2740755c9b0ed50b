use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of one finished game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    /// 1-based position of the game within its run.
    pub game_num: usize,
    /// Winning agent id, `None` if the game ended without a winner.
    pub winner: Option<usize>,
    /// Actions applied before the game became terminal.
    pub transitions: usize,
}

/// Result of a [`run_games`](crate::simulate::run_games) call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRunReport {
    pub run_id: Uuid,
    pub games: Vec<GameSummary>,
    /// Searches that took longer than the time allowed.
    pub budget_overruns: usize,
}

impl GameRunReport {
    pub(crate) fn new(run_id: Uuid) -> Self {
        Self {
            run_id,
            games: Vec::new(),
            budget_overruns: 0,
        }
    }

    pub fn games_played(&self) -> usize {
        self.games.len()
    }

    pub fn total_transitions(&self) -> usize {
        self.games.iter().map(|g| g.transitions).sum()
    }

    pub fn wins_for(&self, agent_id: usize) -> usize {
        self.games
            .iter()
            .filter(|g| g.winner == Some(agent_id))
            .count()
    }

    /// Games that ended without a winner.
    pub fn no_winner(&self) -> usize {
        self.games.iter().filter(|g| g.winner.is_none()).count()
    }

    pub fn win_counts(&self) -> BTreeMap<usize, usize> {
        let mut counts = BTreeMap::new();
        for winner in self.games.iter().filter_map(|g| g.winner) {
            *counts.entry(winner).or_insert(0) += 1;
        }
        counts
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Outcome of one finished MDP trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialSummary {
    /// 1-based position of the trial within its run.
    pub trial_num: usize,
    /// As reported by the MDP at the end of the trial.
    pub total_reward: f64,
    /// As reported by the MDP at the end of the trial.
    pub timesteps: usize,
    /// `step` calls made by the driver.
    pub steps: usize,
}

/// Result of a [`run_mdp`](crate::simulate::run_mdp) call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialRunReport {
    pub run_id: Uuid,
    pub trials: Vec<TrialSummary>,
}

impl TrialRunReport {
    pub(crate) fn new(run_id: Uuid) -> Self {
        Self {
            run_id,
            trials: Vec::new(),
        }
    }

    pub fn trials_run(&self) -> usize {
        self.trials.len()
    }

    pub fn total_steps(&self) -> usize {
        self.trials.iter().map(|t| t.steps).sum()
    }

    /// Mean of the per-trial rewards, 0.0 for an empty run.
    pub fn mean_reward(&self) -> f64 {
        if self.trials.is_empty() {
            return 0.0;
        }
        self.trials.iter().map(|t| t.total_reward).sum::<f64>() / self.trials.len() as f64
    }

    pub fn mean_timesteps(&self) -> f64 {
        if self.trials.is_empty() {
            return 0.0;
        }
        self.trials.iter().map(|t| t.timesteps as f64).sum::<f64>() / self.trials.len() as f64
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
