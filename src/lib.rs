//! Grid Snake - a terminal snake game with obstacles and a speed-up curve
//!
//! This library provides:
//! - Core game logic: placement, tick engine, control surface and tick scheduler (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering with light/dark and colorblind palettes (render module)
//! - Session statistics (metrics module)
//! - The persisted colorblind preference (prefs module)
//! - The interactive terminal mode (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod prefs;
pub mod render;
