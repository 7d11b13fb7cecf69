//! Self-rearming tick timer.
//!
//! After every tick the next deadline is computed from the interval the game
//! has *now*, so a speed-up takes effect from the following tick. Once the
//! game is over the timer is disarmed and stays silent until a restart arms
//! it again.

use std::future;
use std::time::Duration;

use tokio::time::{Instant, sleep_until};

use super::state::GamePhase;

#[derive(Debug, Default)]
pub struct TickScheduler {
    deadline: Option<Instant>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer to fire `interval` from now
    pub fn start(&mut self, interval: Duration) {
        self.deadline = Some(Instant::now() + interval);
    }

    /// Disarm the timer
    pub fn stop(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Call after each tick with the phase and interval the game ended up in
    pub fn reschedule(&mut self, phase: GamePhase, interval: Duration) {
        match phase {
            GamePhase::GameOver => self.stop(),
            GamePhase::Running | GamePhase::Paused => self.start(interval),
        }
    }

    /// Resolves when the deadline passes; never resolves while disarmed.
    ///
    /// Safe to drop and recreate (e.g. inside `tokio::select!`): the deadline
    /// is fixed when the timer is armed, not when this future is created.
    pub async fn wait(&self) {
        match self.deadline {
            Some(deadline) => sleep_until(deadline).await,
            None => future::pending().await,
        }
    }
}
