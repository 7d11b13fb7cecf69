use std::collections::HashSet;

use grid_snake::game::{
    CollisionType, Direction, GameConfig, GameEngine, GamePhase, GameSession, GameState, Position,
    Snake,
};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn session_with(body: &[(i32, i32)], direction: Direction, food: (i32, i32)) -> GameSession {
    let engine = GameEngine::with_seed(GameConfig::default(), 2024).unwrap();
    let body = body.iter().map(|&(x, y)| Position::new(x, y)).collect();
    let state = GameState::new(
        Snake::from_body(body, direction).unwrap(),
        Position::new(food.0, food.1),
        vec![Position::new(3, 3), Position::new(17, 2)],
        20,
        200,
    );
    GameSession::from_state(engine, state)
}

#[test]
fn food_five_cells_ahead_is_eaten_on_the_fifth_tick() {
    let mut session = session_with(&[(10, 10)], Direction::Right, (15, 10));

    for tick in 1..=4 {
        session.tick().unwrap();
        assert_eq!(session.state().snake.head(), Position::new(10 + tick, 10));
        assert_eq!(session.state().score, 0);
    }

    let result = session.tick().unwrap();
    let state = session.state();

    assert!(result.ate_food);
    assert_eq!(state.snake.head(), Position::new(15, 10));
    assert_eq!(state.snake.len(), 2);
    assert_eq!(state.score, 10);
    assert_eq!(state.speed_ms, 195);
    assert_ne!(state.food, Position::new(15, 10));
    assert!(!state.snake.contains(state.food));
    assert!(!state.is_obstacle(state.food));
    assert_eq!(state.phase, GamePhase::Running);
}

#[test]
fn stepping_off_the_left_edge_ends_the_game() {
    let mut session = session_with(&[(0, 5), (1, 5)], Direction::Left, (10, 10));

    let result = session.tick().unwrap();

    assert_eq!(result.collision_type, Some(CollisionType::Wall));
    assert_eq!(session.state().snake.head(), Position::new(-1, 5));
    assert_eq!(session.phase(), GamePhase::GameOver);
}

#[test]
fn every_edge_is_a_wall() {
    let cases = [
        ((19, 5), Direction::Right),
        ((5, 0), Direction::Up),
        ((5, 19), Direction::Down),
        ((0, 5), Direction::Left),
    ];

    for ((x, y), direction) in cases {
        let mut session = session_with(&[(x, y)], direction, (10, 10));
        session.tick().unwrap();
        assert_eq!(session.phase(), GamePhase::GameOver, "{direction:?} from ({x},{y})");
    }
}

#[test]
fn restart_after_game_over_starts_from_scratch() {
    let mut session = session_with(&[(4, 3)], Direction::Left, (10, 10));
    session.tick().unwrap();
    assert_eq!(session.state().collision, Some(CollisionType::Obstacle));

    assert!(session.restart().unwrap());
    let state = session.state();

    assert_eq!(state.phase, GamePhase::Running);
    assert_eq!(state.score, 0);
    assert_eq!(state.speed_ms, 200);
    assert_eq!(state.snake.segments(), &[Position::new(10, 10)]);
    assert_eq!(state.snake.direction, Direction::Right);
    assert_eq!(state.collision, None);

    let obstacles: HashSet<_> = state.obstacles.iter().copied().collect();
    assert_eq!(obstacles.len(), 10);
    assert!(!obstacles.contains(&Position::new(10, 10)));
    assert!(!obstacles.contains(&state.food));
}

/// Play many random games and check the invariants after every tick
#[test]
fn random_play_keeps_invariants() {
    for seed in 0..40 {
        let engine = GameEngine::with_seed(GameConfig::default(), seed).unwrap();
        let mut session = GameSession::new(engine).unwrap();
        let mut steering = StdRng::seed_from_u64(seed ^ 0xfeed);
        let directions = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

        let mut last_speed = session.state().speed_ms;

        for _ in 0..400 {
            if session.phase() == GamePhase::GameOver {
                break;
            }

            let before = session.state().clone();
            let requested = directions[steering.gen_range(0..4)];
            let accepted = session.request_direction(requested);
            if before.snake.direction.is_opposite(requested) {
                assert!(!accepted);
                assert_eq!(session.state().snake.direction, before.snake.direction);
            }

            let result = session.tick().unwrap();
            let after = session.state();

            if result.ate_food {
                assert_eq!(after.snake.len(), before.snake.len() + 1);
                assert_eq!(after.score, before.score + 10);
                assert!(!after.snake.contains(after.food));
                assert!(!after.is_obstacle(after.food));
            } else {
                assert_eq!(after.snake.len(), before.snake.len());
                assert_eq!(after.score, before.score);
                assert_eq!(
                    after.snake.body_segments(),
                    &before.snake.segments()[..before.snake.len() - 1]
                );
            }

            assert!(after.speed_ms <= last_speed);
            assert!(after.speed_ms >= 50);
            last_speed = after.speed_ms;

            assert_eq!(after.obstacles, before.obstacles);

            if after.phase == GamePhase::Running {
                let cells: HashSet<_> = after.snake.segments().iter().collect();
                assert_eq!(cells.len(), after.snake.len());
                assert!(after.is_in_bounds(after.snake.head()));
            }
        }
    }
}

#[test]
fn speed_bottoms_out_at_fifty() {
    let mut engine = GameEngine::with_seed(GameConfig::new(20, 0), 9).unwrap();
    let mut state = GameState::new(
        Snake::new(Position::new(5, 5), Direction::Right),
        Position::new(6, 5),
        Vec::new(),
        20,
        200,
    );
    let mut speeds = Vec::new();

    // Keep feeding a fresh one-cell snake so only the speed carries over
    for _ in 0..40 {
        state.snake = Snake::new(Position::new(5, 5), Direction::Right);
        state.food = Position::new(6, 5);
        assert!(engine.step(&mut state).unwrap().ate_food);
        speeds.push(state.speed_ms);
    }

    assert_eq!(speeds[0], 195);
    assert_eq!(speeds[28], 55);
    assert_eq!(speeds[29], 50);
    assert!(speeds[29..].iter().all(|&speed| speed == 50));
    assert!(speeds.windows(2).all(|w| w[1] <= w[0]));
    assert_eq!(state.score, 400);
}
