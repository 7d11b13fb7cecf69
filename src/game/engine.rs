use std::collections::HashSet;

use anyhow::{Context, Result};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    action::Direction,
    config::GameConfig,
    placement::{generate_obstacles, random_unoccupied_cell},
    state::{CollisionType, GamePhase, GameState, Position, Snake},
};

/// Outcome of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepResult {
    /// Whether the snake moved at all (false when not running)
    pub advanced: bool,
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

impl StepResult {
    pub fn terminated(&self) -> bool {
        self.collision_type.is_some()
    }
}

/// The game engine that handles all game logic.
///
/// Generic over the random source so placement can be replayed from a seed.
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create an engine seeded from OS entropy
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose placements are reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self> {
        config.validate().context("Invalid game configuration")?;
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a fresh session: centred one-cell snake heading right, new food,
    /// new obstacles, baseline score and speed.
    pub fn reset(&mut self) -> Result<GameState> {
        let center = self.config.center();
        let snake = Snake::new(Position::new(center, center), Direction::Right);

        let snake_cells: HashSet<Position> = snake.segments().iter().copied().collect();
        let food = random_unoccupied_cell(
            &mut self.rng,
            self.config.grid_size,
            &snake_cells,
            self.config.max_placement_attempts,
        )
        .context("Failed to place food")?;

        let mut reserved = snake.segments().to_vec();
        reserved.push(food);
        let obstacles = generate_obstacles(
            &mut self.rng,
            self.config.grid_size,
            self.config.obstacle_count,
            &reserved,
            self.config.max_placement_attempts,
        )
        .context("Failed to place obstacles")?;

        debug!(
            "new session: head {:?}, food {:?}, {} obstacles",
            snake.head(),
            food,
            obstacles.len()
        );

        Ok(GameState::new(
            snake,
            food,
            obstacles,
            self.config.grid_size,
            self.config.initial_speed_ms,
        ))
    }

    /// Advance the game by one tick. Does nothing unless the game is running.
    pub fn step(&mut self, state: &mut GameState) -> Result<StepResult> {
        if state.phase != GamePhase::Running {
            return Ok(StepResult::default());
        }

        // Calculate new head position and put it in front
        let new_head = state.snake.head().moved_in_direction(state.snake.direction);
        state.snake.push_head(new_head);

        // Grow on food, otherwise keep the length constant
        let ate_food = new_head == state.food;
        if ate_food {
            state.food = random_unoccupied_cell(
                &mut self.rng,
                self.config.grid_size,
                &state.occupied_cells(),
                self.config.max_placement_attempts,
            )
            .context("No room left for new food")?;
            state.score += self.config.food_score;
            state.speed_ms = self.next_speed(state.speed_ms);
        } else {
            state.snake.drop_tail();
        }

        state.ticks += 1;

        // Collisions are judged on the resolved body
        let collision_type = self.check_collision(state, new_head);
        if collision_type.is_some() {
            state.phase = GamePhase::GameOver;
            state.collision = collision_type;
        }

        Ok(StepResult {
            advanced: true,
            ate_food,
            collision_type,
        })
    }

    /// Speed after one more food: a bit faster, never below the floor
    pub fn next_speed(&self, speed_ms: u64) -> u64 {
        speed_ms
            .saturating_sub(self.config.speed_step_ms)
            .max(self.config.min_speed_ms)
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        // Check wall collision
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        // Check self-collision
        if state.snake.collides_with_body(pos) {
            return Some(CollisionType::SelfCollision);
        }

        if state.is_obstacle(pos) {
            return Some(CollisionType::Obstacle);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(config: GameConfig) -> GameEngine {
        GameEngine::with_seed(config, 1234).unwrap()
    }

    fn state_with(snake: &[(i32, i32)], direction: Direction, food: (i32, i32)) -> GameState {
        let body = snake.iter().map(|&(x, y)| Position::new(x, y)).collect();
        GameState::new(
            Snake::from_body(body, direction).unwrap(),
            Position::new(food.0, food.1),
            Vec::new(),
            20,
            200,
        )
    }

    #[test]
    fn test_reset() {
        let mut engine = engine(GameConfig::default());
        let state = engine.reset().unwrap();

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed_ms, 200);
        assert_eq!(state.snake.segments(), &[Position::new(10, 10)]);
        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.obstacles.len(), 10);

        let obstacles: HashSet<_> = state.obstacles.iter().copied().collect();
        assert_eq!(obstacles.len(), 10);
        assert!(!obstacles.contains(&state.food));
        assert!(!obstacles.contains(&Position::new(10, 10)));
        assert_ne!(state.food, Position::new(10, 10));
    }

    #[test]
    fn test_filling_the_board_reports_a_full_board() {
        let mut engine = engine(GameConfig::new(2, 0));
        let mut state = state_with(&[(1, 1), (0, 1), (0, 0)], Direction::Up, (1, 0));
        state.grid_size = 2;

        let err = engine.step(&mut state).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("No room left for new food"));
        assert!(message.contains("board is full"));
        assert!(!message.contains("misconfigured"));
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(GameEngine::new(GameConfig::new(2, 5)).is_err());
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = engine(GameConfig::default());
        let mut state = state_with(&[(5, 5), (4, 5), (3, 5)], Direction::Right, (15, 15));

        let result = engine.step(&mut state).unwrap();

        assert!(result.advanced);
        assert!(!result.ate_food);
        assert!(!result.terminated());
        assert_eq!(state.ticks, 1);
        assert_eq!(
            state.snake.segments(),
            &[Position::new(6, 5), Position::new(5, 5), Position::new(4, 5)]
        );
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = engine(GameConfig::default());
        let mut state = state_with(&[(5, 5)], Direction::Right, (6, 5));
        state.obstacles = vec![Position::new(0, 0)];

        let result = engine.step(&mut state).unwrap();

        assert!(result.ate_food);
        assert_eq!(state.score, 10);
        assert_eq!(state.speed_ms, 195);
        assert_eq!(state.snake.len(), 2);
        assert!(!state.snake.contains(state.food));
        assert!(!state.is_obstacle(state.food));
        assert!(state.is_in_bounds(state.food));
    }

    #[test]
    fn test_speed_floor() {
        let engine = engine(GameConfig::default());
        assert_eq!(engine.next_speed(200), 195);
        assert_eq!(engine.next_speed(55), 50);
        assert_eq!(engine.next_speed(50), 50);
        assert_eq!(engine.next_speed(52), 50);
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = engine(GameConfig::default());
        let mut state = state_with(&[(0, 5), (1, 5)], Direction::Left, (5, 5));

        let result = engine.step(&mut state).unwrap();

        assert!(result.terminated());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(result.collision_type, Some(CollisionType::Wall));
        assert_eq!(state.snake.head(), Position::new(-1, 5));
    }

    #[test]
    fn test_obstacle_collision() {
        let mut engine = engine(GameConfig::default());
        let mut state = state_with(&[(5, 5)], Direction::Down, (15, 15));
        state.obstacles = vec![Position::new(5, 6)];

        let result = engine.step(&mut state).unwrap();

        assert_eq!(result.collision_type, Some(CollisionType::Obstacle));
        assert_eq!(state.collision, Some(CollisionType::Obstacle));
        assert!(state.is_game_over());
    }

    #[test]
    fn test_self_collision() {
        let mut engine = engine(GameConfig::default());

        // Head at (5,5) turning up into its own body:
        // (5,5) (6,5) (6,4) (5,4) (4,4)
        let mut state = state_with(
            &[(5, 5), (6, 5), (6, 4), (5, 4), (4, 4)],
            Direction::Up,
            (15, 15),
        );

        let result = engine.step(&mut state).unwrap();

        assert!(result.terminated());
        assert_eq!(
            result.collision_type,
            Some(CollisionType::SelfCollision)
        );
    }

    #[test]
    fn test_moving_into_the_vacated_tail_is_safe() {
        let mut engine = engine(GameConfig::default());

        // A 2x2 loop: the head steps onto the cell the tail leaves this tick
        let mut state = state_with(&[(5, 5), (5, 4), (6, 4), (6, 5)], Direction::Right, (15, 15));

        let result = engine.step(&mut state).unwrap();

        assert!(!result.terminated());
        assert_eq!(state.snake.head(), Position::new(6, 5));
        assert_eq!(state.snake.len(), 4);
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = engine(GameConfig::default());
        let mut state = state_with(&[(5, 5)], Direction::Right, (15, 15));
        state.phase = GamePhase::GameOver;
        let before = state.clone();

        let result = engine.step(&mut state).unwrap();

        assert!(!result.advanced);
        assert_eq!(state, before);
    }

    #[test]
    fn test_paused_game_no_update() {
        let mut engine = engine(GameConfig::default());
        let mut state = state_with(&[(5, 5)], Direction::Right, (15, 15));
        state.phase = GamePhase::Paused;
        let before = state.clone();

        engine.step(&mut state).unwrap();

        assert_eq!(state, before);
    }

    #[test]
    fn test_same_seed_same_session() {
        let mut a = engine(GameConfig::default());
        let mut b = engine(GameConfig::default());
        assert_eq!(a.reset().unwrap(), b.reset().unwrap());
    }
}
