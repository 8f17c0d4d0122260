//! Scoring collaborator: player identity and the ranked leaderboard
//!
//! The engine knows nothing about players. When a run ends the host hands the
//! [`GameOver`](crate::game::GameOver) event to a [`ScoreSink`] together with
//! the current [`Player`].

pub mod leaderboard;
pub mod player;

pub use leaderboard::{
    DEFAULT_TOP, Leaderboard, LeaderboardEntry, MAX_ENTRIES, ScoreReceipt, ScoreSink,
};
pub use player::{ANONYMOUS, Player};
