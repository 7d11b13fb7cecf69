use std::time::{Duration, Instant};

use crate::game::GameEvent;

/// Per-process play statistics shown next to the grid.
///
/// The clock only runs while a game is actually being played: it holds still
/// while paused and freezes on game over.
pub struct GameMetrics {
    start_time: Instant,
    paused_at: Option<Instant>,
    paused_total: Duration,
    finished: bool,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    pub food_eaten: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            paused_at: None,
            paused_total: Duration::ZERO,
            finished: false,
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            food_eaten: 0,
        }
    }

    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    fn update_at(&mut self, now: Instant) {
        if self.finished {
            return;
        }
        let until = self.paused_at.unwrap_or(now);
        self.elapsed_time = until
            .saturating_duration_since(self.start_time)
            .saturating_sub(self.paused_total);
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.paused_at = None;
        self.paused_total = Duration::ZERO;
        self.finished = false;
        self.elapsed_time = Duration::ZERO;
        self.food_eaten = 0;
    }

    pub fn on_pause(&mut self) {
        if self.paused_at.is_none() {
            self.paused_at = Some(Instant::now());
        }
    }

    pub fn on_resume(&mut self) {
        if let Some(paused_at) = self.paused_at.take() {
            self.paused_total += paused_at.elapsed();
        }
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.update();
        self.finished = true;
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    /// Feed a session event into the statistics
    pub fn observe(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::Paused => self.on_pause(),
            GameEvent::Resumed => self.on_resume(),
            GameEvent::FoodEaten { .. } => self.food_eaten += 1,
            GameEvent::GameOver { score, .. } => self.on_game_over(score),
            GameEvent::Restarted => self.on_game_start(),
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
