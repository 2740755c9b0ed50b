use std::fmt::Debug;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::traits::{GameObserver, TrialObserver};
use crate::game::{Game, GameAgent};
use crate::mdp::Mdp;
use crate::simulate::{GameRunReport, GameSummary, TrialRunReport, TrialSummary};

/// One checkpoint as seen by a [`RecordingObserver`].
///
/// Run ids and wall-clock timings are left out so two runs of the same
/// deterministic setup produce equal transcripts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    RunStart {
        episodes: usize,
    },
    EpisodeStart {
        episode: usize,
    },
    AgentReset {
        agent_id: usize,
        agent: String,
    },
    Search {
        agent_id: usize,
        agent: String,
    },
    BudgetExceeded {
        agent_id: usize,
    },
    Action {
        agent_index: usize,
        action: String,
    },
    GameEnd {
        winner: Option<usize>,
        transitions: usize,
        final_state: String,
    },
    Step {
        action: String,
        reward: f64,
        terminal: bool,
    },
    TrialEnd {
        total_reward: f64,
        timesteps: usize,
        steps: usize,
    },
    RunEnd {
        episodes: usize,
        weights: Option<String>,
    },
}

/// Keeps every checkpoint in memory, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Vec<Event>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events grouped by episode, without the `EpisodeStart` markers and
    /// without run-level events.
    pub fn episodes(&self) -> Vec<Vec<Event>> {
        let mut episodes: Vec<Vec<Event>> = Vec::new();
        for event in &self.events {
            match event {
                Event::EpisodeStart { .. } => episodes.push(Vec::new()),
                Event::RunStart { .. } | Event::RunEnd { .. } => {}
                other => {
                    if let Some(current) = episodes.last_mut() {
                        current.push(other.clone());
                    }
                }
            }
        }
        episodes
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.events)
    }

    fn push(&mut self, event: Event) {
        self.events.push(event);
    }
}

impl<G: Game> GameObserver<G> for RecordingObserver {
    fn on_run_start(&mut self, _run_id: Uuid, num_games: usize) {
        self.push(Event::RunStart {
            episodes: num_games,
        });
    }

    fn on_game_start(&mut self, game_num: usize, _num_games: usize) {
        self.push(Event::EpisodeStart { episode: game_num });
    }

    fn on_agent_reset(&mut self, agent: &dyn GameAgent<G>) {
        self.push(Event::AgentReset {
            agent_id: agent.agent_id(),
            agent: format!("{:?}", agent),
        });
    }

    fn on_search(&mut self, agent: &dyn GameAgent<G>, _elapsed: Duration) {
        self.push(Event::Search {
            agent_id: agent.agent_id(),
            agent: format!("{:?}", agent),
        });
    }

    fn on_budget_exceeded(&mut self, agent_id: usize, _elapsed: Duration, _time_allowed: Duration) {
        self.push(Event::BudgetExceeded { agent_id });
    }

    fn on_action(&mut self, agent_index: usize, action: &G::Action) {
        self.push(Event::Action {
            agent_index,
            action: format!("{:?}", action),
        });
    }

    fn on_game_end(&mut self, summary: &GameSummary, final_state: &G) {
        self.push(Event::GameEnd {
            winner: summary.winner,
            transitions: summary.transitions,
            final_state: final_state.to_string(),
        });
    }

    fn on_run_end(&mut self, report: &GameRunReport) {
        self.push(Event::RunEnd {
            episodes: report.games_played(),
            weights: None,
        });
    }
}

impl<M: Mdp> TrialObserver<M> for RecordingObserver {
    fn on_run_start(&mut self, _run_id: Uuid, num_trials: usize) {
        self.push(Event::RunStart {
            episodes: num_trials,
        });
    }

    fn on_trial_start(&mut self, trial_num: usize, _num_trials: usize) {
        self.push(Event::EpisodeStart { episode: trial_num });
    }

    fn on_step(&mut self, action: &M::Action, reward: f64, terminal: bool) {
        self.push(Event::Step {
            action: format!("{:?}", action),
            reward,
            terminal,
        });
    }

    fn on_trial_end(&mut self, summary: &TrialSummary) {
        self.push(Event::TrialEnd {
            total_reward: summary.total_reward,
            timesteps: summary.timesteps,
            steps: summary.steps,
        });
    }

    fn on_run_end(&mut self, report: &TrialRunReport, weights: &dyn Debug) {
        self.push(Event::RunEnd {
            episodes: report.trials_run(),
            weights: Some(format!("{:?}", weights)),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn episodes_split_on_start_markers() {
        let mut recorder = RecordingObserver::new();
        recorder.push(Event::RunStart { episodes: 2 });
        recorder.push(Event::EpisodeStart { episode: 1 });
        recorder.push(Event::BudgetExceeded { agent_id: 0 });
        recorder.push(Event::EpisodeStart { episode: 2 });
        recorder.push(Event::BudgetExceeded { agent_id: 1 });
        recorder.push(Event::BudgetExceeded { agent_id: 0 });
        recorder.push(Event::RunEnd {
            episodes: 2,
            weights: None,
        });

        let episodes = recorder.episodes();
        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[0], vec![Event::BudgetExceeded { agent_id: 0 }]);
        assert_eq!(episodes[1].len(), 2);
    }

    #[test]
    fn events_serialize_with_tag() {
        let mut recorder = RecordingObserver::new();
        recorder.push(Event::Step {
            action: "Left".to_string(),
            reward: 1.0,
            terminal: false,
        });

        let json = recorder.to_json().unwrap();
        assert!(json.contains("\"event\": \"step\""));
        let back: Vec<Event> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, recorder.events());
    }
}
