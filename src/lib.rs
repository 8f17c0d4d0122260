//! Snake Rank - a Snake game with a ranked leaderboard
//!
//! This library provides:
//! - Core simulation engine (game module)
//! - Player identity and leaderboard (scoring module)
//! - Terminal front end: input mapping, rendering and the interactive mode

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod scoring;
