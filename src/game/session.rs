//! Control surface of a running game.
//!
//! [`GameSession`] is the single owner of the [`GameState`]. Ticks and player
//! commands both go through `&mut self`, so a command can only ever land
//! between two ticks. Every phase change is queued as a [`GameEvent`] for the
//! presentation layer to poll.

use std::time::Duration;

use anyhow::Result;
use log::{debug, info};
use rand::Rng;
use rand::rngs::StdRng;

use super::{
    action::{Command, Direction},
    engine::{GameEngine, StepResult},
    state::{CollisionType, GamePhase, GameState, Snapshot},
};

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Paused,
    Resumed,
    FoodEaten { score: u32, speed_ms: u64 },
    GameOver { score: u32, collision: CollisionType },
    Restarted,
}

pub struct GameSession<R = StdRng> {
    engine: GameEngine<R>,
    state: GameState,
    events: Vec<GameEvent>,
}

impl<R: Rng> GameSession<R> {
    /// Start the first game of the session
    pub fn new(mut engine: GameEngine<R>) -> Result<Self> {
        let state = engine.reset()?;
        info!(
            "game started on a {0}x{0} grid, speed {1}ms",
            state.grid_size, state.speed_ms
        );
        Ok(Self {
            engine,
            state,
            events: Vec::new(),
        })
    }

    /// Wrap an existing state, e.g. a hand-built position in tests
    pub fn from_state(engine: GameEngine<R>, state: GameState) -> Self {
        Self {
            engine,
            state,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Interval until the next tick should fire
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.state.speed_ms)
    }

    /// Advance one tick; a no-op while paused or over
    pub fn tick(&mut self) -> Result<StepResult> {
        let result = self.engine.step(&mut self.state)?;

        if result.ate_food {
            debug!(
                "food eaten: score {}, speed {}ms",
                self.state.score, self.state.speed_ms
            );
            self.events.push(GameEvent::FoodEaten {
                score: self.state.score,
                speed_ms: self.state.speed_ms,
            });
        }

        if let Some(collision) = result.collision_type {
            info!(
                "game over ({:?}) after {} ticks, score {}",
                collision, self.state.ticks, self.state.score
            );
            self.events.push(GameEvent::GameOver {
                score: self.state.score,
                collision,
            });
        }

        Ok(result)
    }

    /// Steer the snake. Ignored unless running, and ignored for a reversal.
    /// Returns whether the direction changed.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.state.phase != GamePhase::Running {
            return false;
        }
        if self.state.snake.direction.is_opposite(direction) {
            return false;
        }
        self.state.snake.direction = direction;
        true
    }

    /// Running <-> Paused. Ignored once the game is over.
    pub fn toggle_pause(&mut self) -> bool {
        let (phase, event) = match self.state.phase {
            GamePhase::Running => (GamePhase::Paused, GameEvent::Paused),
            GamePhase::Paused => (GamePhase::Running, GameEvent::Resumed),
            GamePhase::GameOver => return false,
        };
        info!("{:?} -> {:?}", self.state.phase, phase);
        self.state.phase = phase;
        self.events.push(event);
        true
    }

    /// Start a brand new game. Only honoured after a game over.
    pub fn restart(&mut self) -> Result<bool> {
        if self.state.phase != GamePhase::GameOver {
            return Ok(false);
        }
        self.state = self.engine.reset()?;
        info!("game restarted");
        self.events.push(GameEvent::Restarted);
        Ok(true)
    }

    /// Dispatch a player command
    pub fn apply(&mut self, command: Command) -> Result<bool> {
        match command {
            Command::ChangeDirection(direction) => Ok(self.request_direction(direction)),
            Command::TogglePause => Ok(self.toggle_pause()),
            Command::Restart => self.restart(),
        }
    }

    /// Take every event queued since the last call, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
