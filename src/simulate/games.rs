use std::time::{Duration, Instant};

use tracing::info_span;
use uuid::Uuid;

use super::config::GameRunConfig;
use super::errors::SimulationError;
use super::report::{GameRunReport, GameSummary};
use crate::game::{Game, GameAgent};
use crate::observe::{GameObserver, LogObserver};

/// Play `agents` through `num_games` games, logging through [`LogObserver`].
///
/// The number of agents must equal `game.player_count()`; otherwise the call
/// fails before any game or agent method runs. Errors from the game or an
/// agent end the whole run.
pub fn run_games<G: Game>(
    game: &mut G,
    agents: &mut [Box<dyn GameAgent<G>>],
    time_allowed: Duration,
    num_games: usize,
) -> Result<GameRunReport, SimulationError> {
    let config = GameRunConfig::new(num_games, time_allowed);
    run_games_with(game, agents, &config, &mut LogObserver)
}

/// [`run_games`] with an explicit config and observer.
pub fn run_games_with<G, O>(
    game: &mut G,
    agents: &mut [Box<dyn GameAgent<G>>],
    config: &GameRunConfig,
    observer: &mut O,
) -> Result<GameRunReport, SimulationError>
where
    G: Game,
    O: GameObserver<G> + ?Sized,
{
    let expected = game.player_count();
    if agents.len() != expected {
        return Err(SimulationError::PlayerCountMismatch {
            expected,
            actual: agents.len(),
        });
    }

    let run_id = Uuid::new_v4();
    let span = info_span!("run_games", %run_id);
    let _enter = span.enter();

    let num_games = config.num_games;
    let time_allowed = config.time_allowed;
    let mut report = GameRunReport::new(run_id);
    observer.on_run_start(run_id, num_games);

    for game_num in 1..=num_games {
        observer.on_game_start(game_num, num_games);
        let (summary, overruns) = play_game(game, agents, time_allowed, game_num, observer)?;
        report.budget_overruns += overruns;
        report.games.push(summary);
    }

    observer.on_run_end(&report);
    Ok(report)
}

/// Reset everything, then take turns until the game is over.
/// Returns the game's summary and the number of budget overruns.
fn play_game<G, O>(
    game: &mut G,
    agents: &mut [Box<dyn GameAgent<G>>],
    time_allowed: Duration,
    game_num: usize,
    observer: &mut O,
) -> Result<(GameSummary, usize), SimulationError>
where
    G: Game,
    O: GameObserver<G> + ?Sized,
{
    game.reset()?;
    for agent in agents.iter_mut() {
        agent.reset()?;
        observer.on_agent_reset(&**agent);
    }

    let mut transitions = 0;
    let mut overruns = 0;
    while !game.is_terminal() {
        let index = game.current_agent_id();
        let num_agents = agents.len();
        let agent = agents
            .get_mut(index)
            .ok_or(SimulationError::AgentIndexOutOfRange {
                index,
                agents: num_agents,
            })?;

        let started = Instant::now();
        let action = agent.search(game.snapshot(), time_allowed)?;
        let elapsed = started.elapsed();
        observer.on_search(&**agent, elapsed);
        if elapsed > time_allowed {
            overruns += 1;
            observer.on_budget_exceeded(agent.agent_id(), elapsed, time_allowed);
        }

        advance_by_action(game, agents, index, &action, observer)?;
        transitions += 1;
    }

    let summary = GameSummary {
        game_num,
        winner: game.winning_id(),
        transitions,
    };
    observer.on_game_end(&summary, game);
    Ok((summary, overruns))
}

/// Apply `action` to the game, then tell every agent about it.
fn advance_by_action<G, O>(
    game: &mut G,
    agents: &mut [Box<dyn GameAgent<G>>],
    acting_index: usize,
    action: &G::Action,
    observer: &mut O,
) -> Result<(), SimulationError>
where
    G: Game,
    O: GameObserver<G> + ?Sized,
{
    observer.on_action(acting_index, action);
    game.take_action(action)?;
    for (index, agent) in agents.iter_mut().enumerate() {
        agent.take_action(action, index == acting_index)?;
    }
    Ok(())
}
