use std::collections::HashSet;

use super::action::Direction;

/// A cell on the game grid.
///
/// Coordinates are signed so that a head which just left the grid
/// (x = -1, say) can still be represented and reported as a wall hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0. Never empty.
    body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// A single-segment snake
    pub fn new(head: Position, direction: Direction) -> Self {
        Self {
            body: vec![head],
            direction,
        }
    }

    /// Build a snake from explicit segments, head first.
    ///
    /// Returns `None` for an empty body.
    pub fn from_body(body: Vec<Position>, direction: Direction) -> Option<Self> {
        if body.is_empty() {
            return None;
        }
        Some(Self { body, direction })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// All segments, head first
    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Put a new head in front of the current one. The tail is left alone;
    /// call [`Snake::drop_tail`] when the snake did not grow.
    pub fn push_head(&mut self, head: Position) {
        self.body.insert(0, head);
    }

    /// Remove the last segment. A one-segment snake is never emptied.
    pub fn drop_tail(&mut self) -> Option<Position> {
        if self.body.len() > 1 {
            self.body.pop()
        } else {
            None
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Which rule ended the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the grid
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// Snake hit an obstacle
    Obstacle,
}

/// Phase of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Running,
    Paused,
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub obstacles: Vec<Position>,
    pub grid_size: usize,
    pub score: u32,
    /// Current tick interval in milliseconds
    pub speed_ms: u64,
    pub phase: GamePhase,
    /// Ticks advanced while running
    pub ticks: u32,
    /// Set once the game is over
    pub collision: Option<CollisionType>,
}

impl GameState {
    /// Create a new running game state
    pub fn new(
        snake: Snake,
        food: Position,
        obstacles: Vec<Position>,
        grid_size: usize,
        speed_ms: u64,
    ) -> Self {
        Self {
            snake,
            food,
            obstacles,
            grid_size,
            score: 0,
            speed_ms,
            phase: GamePhase::Running,
            ticks: 0,
            collision: None,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let size = self.grid_size as i32;
        pos.x >= 0 && pos.x < size && pos.y >= 0 && pos.y < size
    }

    pub fn is_obstacle(&self, pos: Position) -> bool {
        self.obstacles.contains(&pos)
    }

    /// Cells food may not be placed on
    pub fn occupied_cells(&self) -> HashSet<Position> {
        self.snake
            .segments()
            .iter()
            .chain(self.obstacles.iter())
            .copied()
            .collect()
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Immutable copy for the presentation layer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.segments().to_vec(),
            direction: self.snake.direction,
            food: self.food,
            obstacles: self.obstacles.clone(),
            grid_size: self.grid_size,
            score: self.score,
            speed_ms: self.speed_ms,
            phase: self.phase,
            collision: self.collision,
            ticks: self.ticks,
        }
    }
}

/// Read-only view of a game, taken after a tick or a control change
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Head first
    pub snake: Vec<Position>,
    pub direction: Direction,
    pub food: Position,
    pub obstacles: Vec<Position>,
    pub grid_size: usize,
    pub score: u32,
    pub speed_ms: u64,
    pub phase: GamePhase,
    pub collision: Option<CollisionType>,
    /// Moves made this game
    pub ticks: u32,
}

impl Snapshot {
    /// Display level: one level per 20 points, rounded up
    pub fn level(&self) -> u32 {
        self.score.div_ceil(20)
    }

    pub fn head(&self) -> Position {
        self.snake[0]
    }
}
