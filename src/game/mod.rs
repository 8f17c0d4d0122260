//! Core game logic module for Snake
//!
//! This module contains the simulation engine without any I/O or rendering
//! dependencies. Hosts drive it with timestamps and direction inputs and read
//! back snapshots.

pub mod action;
pub mod clock;
pub mod config;
pub mod engine;
pub mod food;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{FOOD_REWARD, GameSettings, SettingsError};
pub use engine::{GameEngine, TickOutcome};
pub use food::{FoodPlacement, MAX_FOOD_ATTEMPTS, place_food};
pub use state::{CollisionType, GameOver, GameSnapshot, Phase, Position, Snake};
