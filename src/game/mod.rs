//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies,
//! apart from the tokio timer used by the scheduler.

pub mod action;
pub mod config;
pub mod engine;
pub mod placement;
pub mod scheduler;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use config::{GameConfig, MAX_GRID_SIZE};
pub use engine::{GameEngine, StepResult};
pub use placement::{generate_obstacles, random_unoccupied_cell};
pub use scheduler::TickScheduler;
pub use session::{GameEvent, GameSession};
pub use state::{CollisionType, GamePhase, GameState, Position, Snake, Snapshot};
