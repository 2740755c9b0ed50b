//! Deterministic stand-ins for games, agents and MDPs, used by the test suites.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::game::{Game, GameAgent, GameError};
use crate::mdp::{Mdp, MdpAgent, MdpError};

/// Names of the game methods called, in call order. Shared by a game and all
/// of its snapshots.
pub type Journal = Rc<RefCell<Vec<&'static str>>>;

pub fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

/// A game where agents take turns in seat order and the game ends after a
/// fixed number of moves with a preset winner.
#[derive(Debug, Clone)]
pub struct TurnGame {
    players: usize,
    length: usize,
    winner: Option<usize>,
    seat_offset: usize,
    history: Vec<u32>,
    journal: Journal,
}

impl TurnGame {
    pub fn new(players: usize, length: usize, winner: Option<usize>, journal: Journal) -> Self {
        Self {
            players,
            length,
            winner,
            seat_offset: 0,
            history: Vec::new(),
            journal,
        }
    }

    /// Shift every reported seat by `offset`, without wrapping.
    pub fn with_seat_offset(mut self, offset: usize) -> Self {
        self.seat_offset = offset;
        self
    }

    /// Actions applied since the last reset.
    pub fn history(&self) -> &[u32] {
        &self.history
    }

    fn record(&self, call: &'static str) {
        self.journal.borrow_mut().push(call);
    }
}

impl fmt::Display for TurnGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "moves {:?} of {}", self.history, self.length)
    }
}

impl Game for TurnGame {
    type Action = u32;

    fn player_count(&self) -> usize {
        self.players
    }

    fn current_agent_id(&self) -> usize {
        self.record("current_agent_id");
        self.seat_offset + self.history.len() % self.players
    }

    fn reset(&mut self) -> Result<(), GameError> {
        self.record("reset");
        self.history.clear();
        Ok(())
    }

    fn is_terminal(&self) -> bool {
        self.record("is_terminal");
        self.history.len() >= self.length
    }

    fn take_action(&mut self, action: &u32) -> Result<(), GameError> {
        self.record("take_action");
        if self.history.len() >= self.length {
            return Err(GameError::msg("game is already over"));
        }
        self.history.push(*action);
        Ok(())
    }

    fn winning_id(&self) -> Option<usize> {
        self.record("winning_id");
        if self.history.len() >= self.length {
            self.winner
        } else {
            None
        }
    }
}

/// What a [`ScriptedAgent`] saw, kept outside the agent so tests can read
/// it after the agent has been boxed.
#[derive(Debug, Default)]
pub struct AgentLog {
    pub resets: usize,
    pub searches: usize,
    /// `time_allowed` as received by every search.
    pub budgets: Vec<Duration>,
    /// `(action, is_own_action)` for every notification.
    pub notifications: Vec<(u32, bool)>,
    /// Every snapshot handed to `search`, as received.
    pub snapshots: Vec<TurnGame>,
}

pub fn agent_log() -> Rc<RefCell<AgentLog>> {
    Rc::new(RefCell::new(AgentLog::default()))
}

/// Picks `100 * id + moves so far`, so every action names its agent and turn.
pub struct ScriptedAgent {
    id: usize,
    own_moves: Vec<u32>,
    delay: Duration,
    fail_on_search: Option<usize>,
    log: Rc<RefCell<AgentLog>>,
}

impl ScriptedAgent {
    pub fn new(id: usize, log: Rc<RefCell<AgentLog>>) -> Self {
        Self {
            id,
            own_moves: Vec::new(),
            delay: Duration::ZERO,
            fail_on_search: None,
            log,
        }
    }

    /// Sleep this long in every search.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Fail the `n`th search (1-based, counted across games).
    pub fn failing_on_search(mut self, n: usize) -> Self {
        self.fail_on_search = Some(n);
        self
    }
}

impl fmt::Debug for ScriptedAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptedAgent")
            .field("id", &self.id)
            .field("own_moves", &self.own_moves)
            .finish()
    }
}

impl GameAgent<TurnGame> for ScriptedAgent {
    fn agent_id(&self) -> usize {
        self.id
    }

    fn reset(&mut self) -> Result<(), GameError> {
        self.own_moves.clear();
        self.log.borrow_mut().resets += 1;
        Ok(())
    }

    fn search(&mut self, game: TurnGame, time_allowed: Duration) -> Result<u32, GameError> {
        let mut log = self.log.borrow_mut();
        log.searches += 1;
        log.budgets.push(time_allowed);
        if self.fail_on_search == Some(log.searches) {
            return Err(GameError::msg(format!("agent {} gave up", self.id)));
        }
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        let action = 100 * self.id as u32 + game.history().len() as u32;
        log.snapshots.push(game);
        Ok(action)
    }

    fn take_action(&mut self, action: &u32, is_own_action: bool) -> Result<(), GameError> {
        if is_own_action {
            self.own_moves.push(*action);
        }
        self.log
            .borrow_mut()
            .notifications
            .push((*action, is_own_action));
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stride {
    Forward,
}

/// Walks forward one cell per step, paying a constant reward, and ends after
/// `length` steps.
#[derive(Debug, Clone)]
pub struct Corridor {
    length: usize,
    reward: f64,
    position: usize,
    total_reward: f64,
    timesteps: usize,
}

impl Corridor {
    pub fn new(length: usize, reward: f64) -> Self {
        Self {
            length,
            reward,
            position: 0,
            total_reward: 0.0,
            timesteps: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

impl Mdp for Corridor {
    type Action = Stride;

    fn reset(&mut self) -> Result<(), MdpError> {
        self.position = 0;
        self.total_reward = 0.0;
        self.timesteps = 0;
        Ok(())
    }

    fn is_terminal(&self) -> bool {
        self.position >= self.length
    }

    fn step(&mut self, action: &Stride) -> Result<(f64, bool), MdpError> {
        if self.is_terminal() {
            return Err(MdpError::msg("corridor already finished"));
        }
        match action {
            Stride::Forward => self.position += 1,
        }
        self.timesteps += 1;
        self.total_reward += self.reward;
        Ok((self.reward, self.is_terminal()))
    }

    fn total_reward(&self) -> f64 {
        self.total_reward
    }

    fn timesteps(&self) -> usize {
        self.timesteps
    }
}

/// One call to [`CorridorLearner::update`].
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub prev_position: usize,
    pub prev_timesteps: usize,
    pub position: usize,
    pub timesteps: usize,
    pub reward: f64,
    pub action: Stride,
    pub terminal: bool,
}

/// Always walks forward and keeps a per-cell sum of rewards as its weights.
#[derive(Debug, Default)]
pub struct CorridorLearner {
    weights: Vec<f64>,
    updates: Vec<Update>,
    observed: Vec<usize>,
    fail_on_update: Option<usize>,
}

impl CorridorLearner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the `n`th update (1-based, counted across trials).
    pub fn failing_on_update(mut self, n: usize) -> Self {
        self.fail_on_update = Some(n);
        self
    }

    pub fn updates(&self) -> &[Update] {
        &self.updates
    }

    /// Positions of the snapshots handed to `get_next_action`.
    pub fn observed(&self) -> &[usize] {
        &self.observed
    }
}

impl MdpAgent<Corridor> for CorridorLearner {
    type Weights = Vec<f64>;

    fn get_next_action(&mut self, mdp: Corridor) -> Result<Stride, MdpError> {
        self.observed.push(mdp.position());
        Ok(Stride::Forward)
    }

    fn update(
        &mut self,
        prev_state: &Corridor,
        mdp: &Corridor,
        reward: f64,
        action: &Stride,
        terminal: bool,
    ) -> Result<(), MdpError> {
        if self.fail_on_update == Some(self.updates.len() + 1) {
            return Err(MdpError::msg("weights diverged"));
        }
        let cell = prev_state.position();
        if self.weights.len() <= cell {
            self.weights.resize(cell + 1, 0.0);
        }
        self.weights[cell] += reward;
        self.updates.push(Update {
            prev_position: prev_state.position(),
            prev_timesteps: prev_state.timesteps(),
            position: mdp.position(),
            timesteps: mdp.timesteps(),
            reward,
            action: *action,
            terminal,
        });
        Ok(())
    }

    fn weights(&self) -> &Vec<f64> {
        &self.weights
    }
}
