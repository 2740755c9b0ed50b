//! Driver-level properties of `run_games`, exercised with deterministic stubs.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gauntlet::observe::{Event, LogObserver, NoopObserver, RecordingObserver};
use gauntlet::simulate::{GameRunConfig, SimulationError, run_games, run_games_with};
use gauntlet::test_utils::{AgentLog, ScriptedAgent, TurnGame, agent_log, journal};
use gauntlet::{Game, GameAgent};

fn seat(id: usize) -> (Box<dyn GameAgent<TurnGame>>, Rc<RefCell<AgentLog>>) {
    let log = agent_log();
    let agent: Box<dyn GameAgent<TurnGame>> = Box::new(ScriptedAgent::new(id, log.clone()));
    (agent, log)
}

fn seats(n: usize) -> (Vec<Box<dyn GameAgent<TurnGame>>>, Vec<Rc<RefCell<AgentLog>>>) {
    (0..n).map(seat).unzip()
}

fn config(num_games: usize) -> GameRunConfig {
    GameRunConfig::new(num_games, Duration::from_secs(5))
}

#[test]
fn too_many_agents_fails_before_any_call() {
    let calls = journal();
    let mut game = TurnGame::new(2, 3, Some(0), calls.clone());
    let (mut agents, logs) = seats(3);

    let err = run_games(&mut game, &mut agents, Duration::from_secs(1), 5).unwrap_err();

    assert!(matches!(
        err,
        SimulationError::PlayerCountMismatch {
            expected: 2,
            actual: 3
        }
    ));
    assert!(calls.borrow().is_empty());
    for log in &logs {
        let log = log.borrow();
        assert_eq!(log.resets, 0);
        assert_eq!(log.searches, 0);
        assert!(log.notifications.is_empty());
    }
}

#[test]
fn too_few_agents_fails_before_any_call() {
    let calls = journal();
    let mut game = TurnGame::new(3, 3, None, calls.clone());
    let (mut agents, logs) = seats(1);

    let err = run_games_with(&mut game, &mut agents, &config(1), &mut NoopObserver).unwrap_err();

    assert!(matches!(
        err,
        SimulationError::PlayerCountMismatch {
            expected: 3,
            actual: 1
        }
    ));
    assert!(calls.borrow().is_empty());
    assert_eq!(logs[0].borrow().resets, 0);
}

#[test]
fn three_move_game_between_two_agents() {
    let mut game = TurnGame::new(2, 3, Some(1), journal());
    let (mut agents, logs) = seats(2);

    let report = run_games_with(&mut game, &mut agents, &config(1), &mut NoopObserver).unwrap();

    assert_eq!(report.games_played(), 1);
    assert_eq!(report.games[0].transitions, 3);
    assert_eq!(report.games[0].winner, Some(1));
    assert_eq!(game.history(), &[0, 101, 2]);

    let first = logs[0].borrow();
    let second = logs[1].borrow();
    assert_eq!(first.notifications, vec![(0, true), (101, false), (2, true)]);
    assert_eq!(second.notifications, vec![(0, false), (101, true), (2, false)]);
    assert_eq!(first.searches, 2);
    assert_eq!(second.searches, 1);
}

#[test]
fn exactly_one_own_notification_per_transition() {
    let mut game = TurnGame::new(3, 7, None, journal());
    let (mut agents, logs) = seats(3);

    let report = run_games_with(&mut game, &mut agents, &config(4), &mut NoopObserver).unwrap();
    assert_eq!(report.total_transitions(), 28);

    let logs: Vec<_> = logs.iter().map(|l| l.borrow()).collect();
    for log in &logs {
        assert_eq!(log.notifications.len(), report.total_transitions());
    }
    for transition in 0..report.total_transitions() {
        let own = logs
            .iter()
            .filter(|log| log.notifications[transition].1)
            .count();
        assert_eq!(own, 1, "transition {transition}");

        let action = logs[0].notifications[transition].0;
        assert!(logs.iter().all(|log| log.notifications[transition].0 == action));
    }
}

#[test]
fn own_flag_follows_the_seat_not_the_reported_id() {
    let mut game = TurnGame::new(2, 2, None, journal());
    let first_log = agent_log();
    let second_log = agent_log();
    // Seats 0 and 1 claim ids 1 and 0.
    let mut agents: Vec<Box<dyn GameAgent<TurnGame>>> = vec![
        Box::new(ScriptedAgent::new(1, first_log.clone())),
        Box::new(ScriptedAgent::new(0, second_log.clone())),
    ];

    run_games_with(&mut game, &mut agents, &config(1), &mut NoopObserver).unwrap();

    assert_eq!(game.history(), &[100, 1]);
    assert_eq!(first_log.borrow().notifications, vec![(100, true), (1, false)]);
    assert_eq!(second_log.borrow().notifications, vec![(100, false), (1, true)]);
}

#[test]
fn every_game_starts_from_a_reset() {
    let mut game = TurnGame::new(2, 4, Some(0), journal());
    let (mut agents, logs) = seats(2);
    let mut recorder = RecordingObserver::new();

    run_games_with(&mut game, &mut agents, &config(2), &mut recorder).unwrap();

    let episodes = recorder.episodes();
    assert_eq!(episodes.len(), 2);
    assert_eq!(episodes[0], episodes[1]);
    assert!(matches!(
        episodes[0].last(),
        Some(Event::GameEnd {
            winner: Some(0),
            transitions: 4,
            ..
        })
    ));
    for log in &logs {
        assert_eq!(log.borrow().resets, 2);
    }
}

#[test]
fn snapshots_are_isolated_from_the_live_game() {
    let mut game = TurnGame::new(2, 3, Some(0), journal());
    let (mut agents, logs) = seats(2);

    run_games_with(&mut game, &mut agents, &config(1), &mut NoopObserver).unwrap();

    assert_eq!(game.history().len(), 3);
    let first = logs[0].borrow();
    let seen: Vec<usize> = first.snapshots.iter().map(|s| s.history().len()).collect();
    assert_eq!(seen, vec![0, 2]);
    assert_eq!(first.snapshots[1].history(), &[0, 101]);
}

#[test]
fn mutating_the_live_game_leaves_a_snapshot_alone() {
    let mut game = TurnGame::new(2, 5, None, journal());
    game.take_action(&7).unwrap();
    let snapshot = game.snapshot();

    game.take_action(&8).unwrap();
    game.reset().unwrap();

    assert_eq!(snapshot.history(), &[7]);
    assert!(game.history().is_empty());
}

#[test]
fn agent_failure_ends_the_run() {
    let mut game = TurnGame::new(2, 3, Some(0), journal());
    let first_log = agent_log();
    let second_log = agent_log();
    let mut agents: Vec<Box<dyn GameAgent<TurnGame>>> = vec![
        Box::new(ScriptedAgent::new(0, first_log.clone())),
        Box::new(ScriptedAgent::new(1, second_log.clone()).failing_on_search(1)),
    ];

    let err = run_games_with(&mut game, &mut agents, &config(3), &mut NoopObserver).unwrap_err();

    assert!(matches!(err, SimulationError::Game(_)));
    assert_eq!(err.to_string(), "Game error: agent 1 gave up");
    assert_eq!(first_log.borrow().searches, 1);
    assert_eq!(first_log.borrow().resets, 1);
    assert_eq!(game.history(), &[0]);
}

#[test]
fn budget_overruns_are_reported_not_enforced() {
    let mut game = TurnGame::new(2, 3, Some(1), journal());
    let slow_log = agent_log();
    let mut agents: Vec<Box<dyn GameAgent<TurnGame>>> = vec![
        Box::new(ScriptedAgent::new(0, slow_log.clone()).with_delay(Duration::from_millis(40))),
        Box::new(ScriptedAgent::new(1, agent_log())),
    ];
    let mut recorder = RecordingObserver::new();

    let report = run_games_with(
        &mut game,
        &mut agents,
        &GameRunConfig::new(1, Duration::from_millis(20)),
        &mut recorder,
    )
    .unwrap();

    assert_eq!(report.games[0].transitions, 3);
    assert_eq!(report.budget_overruns, 2);
    let overruns: Vec<&Event> = recorder
        .events()
        .iter()
        .filter(|e| matches!(e, Event::BudgetExceeded { .. }))
        .collect();
    assert_eq!(overruns, vec![&Event::BudgetExceeded { agent_id: 0 }; 2]);
}

#[test]
fn agents_receive_the_budget_exactly_as_given() {
    let budget = Duration::from_micros(500);
    let mut game = TurnGame::new(2, 3, None, journal());
    let (mut agents, logs) = seats(2);

    run_games(&mut game, &mut agents, budget, 1).unwrap();

    assert_eq!(logs[0].borrow().budgets, vec![budget, budget]);
    assert_eq!(logs[1].borrow().budgets, vec![budget]);
}

#[test]
fn logging_and_recording_together() {
    gauntlet::telemetry::init().unwrap();

    let mut game = TurnGame::new(2, 2, None, journal());
    let (mut agents, _logs) = seats(2);
    let mut recorder = RecordingObserver::new();

    let report = run_games_with(
        &mut game,
        &mut agents,
        &config(2),
        &mut (LogObserver, &mut recorder),
    )
    .unwrap();

    assert_eq!(report.no_winner(), 2);
    assert_eq!(
        recorder.events().last(),
        Some(&Event::RunEnd {
            episodes: 2,
            weights: None
        })
    );
}
