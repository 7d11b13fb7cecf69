use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

/// Largest grid side the terminal renderer can lay out
pub const MAX_GRID_SIZE: usize = 100;

/// Configuration for a game session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the square grid, in cells
    pub grid_size: usize,
    /// Number of obstacles placed at session start
    pub obstacle_count: usize,

    // Difficulty curve
    /// Tick interval at session start, in milliseconds
    pub initial_speed_ms: u64,
    /// Lower bound for the tick interval
    pub min_speed_ms: u64,
    /// How much faster each food makes the game
    pub speed_step_ms: u64,

    /// Points awarded per food
    pub food_score: u32,
    /// Upper bound on rejection-sampling attempts for a single free cell
    pub max_placement_attempts: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            obstacle_count: 10,
            initial_speed_ms: 200,
            min_speed_ms: 50,
            speed_step_ms: 5,
            food_score: 10,
            max_placement_attempts: 10_000,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size and obstacle count
    pub fn new(grid_size: usize, obstacle_count: usize) -> Self {
        Self {
            grid_size,
            obstacle_count,
            ..Default::default()
        }
    }

    /// Create a small grid without obstacles for testing
    pub fn small() -> Self {
        Self::new(10, 0)
    }

    /// Total number of cells on the grid
    pub fn capacity(&self) -> usize {
        self.grid_size * self.grid_size
    }

    /// Starting cell of the snake: the centre of the grid
    pub fn center(&self) -> i32 {
        (self.grid_size / 2) as i32
    }

    /// Reject configurations the engine cannot run with.
    ///
    /// The grid must hold the initial snake, every obstacle and one food cell.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.grid_size > 0, "grid size must be positive");
        ensure!(
            self.grid_size <= MAX_GRID_SIZE,
            "grid size {} is larger than the maximum of {}",
            self.grid_size,
            MAX_GRID_SIZE
        );
        ensure!(
            self.capacity() >= self.obstacle_count + 2,
            "a {0}x{0} grid cannot hold the snake, {1} obstacles and food",
            self.grid_size,
            self.obstacle_count
        );
        ensure!(self.min_speed_ms > 0, "minimum speed must be positive");
        ensure!(
            self.initial_speed_ms >= self.min_speed_ms,
            "initial speed {}ms is below the floor of {}ms",
            self.initial_speed_ms,
            self.min_speed_ms
        );
        ensure!(
            self.max_placement_attempts > 0,
            "placement needs at least one attempt"
        );
        Ok(())
    }
}
