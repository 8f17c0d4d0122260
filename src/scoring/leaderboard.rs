use serde::{Deserialize, Serialize};
use tracing::info;

use super::player::{Player, display_name, random_suffix, unix_millis};
use crate::game::GameOver;

/// Entries kept after each insertion
pub const MAX_ENTRIES: usize = 100;

/// Entries shown when no limit is given
pub const DEFAULT_TOP: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: String,
    pub player_id: String,
    pub player_name: String,
    pub score: u32,
    pub length: usize,
    /// Unix milliseconds
    pub timestamp: u64,
}

/// What a [`ScoreSink`] reports back after recording a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreReceipt {
    pub entry: LeaderboardEntry,
    /// 1-based position among recorded scores
    pub rank: usize,
    /// Player's best before this run, 0 if none
    pub previous_best: u32,
    pub is_new_record: bool,
}

/// Consumer of finished runs
pub trait ScoreSink {
    fn record(&mut self, player: &Player, game_over: &GameOver) -> ScoreReceipt;
}

/// In-memory ranking of recorded scores, highest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a score.
    ///
    /// Beating a personal best removes the player's older entries, so each
    /// player holds at most one entry above their previous best.
    pub fn add_entry(
        &mut self,
        player_id: &str,
        player_name: &str,
        score: u32,
        length: usize,
    ) -> LeaderboardEntry {
        let timestamp = unix_millis();
        let entry = LeaderboardEntry {
            id: format!("{}-{}", timestamp, random_suffix()),
            player_id: player_id.to_string(),
            player_name: display_name(player_name),
            score,
            length,
            timestamp,
        };

        if score > self.player_best_score(player_id) {
            self.entries.retain(|e| e.player_id != player_id);
        }

        self.entries.push(entry.clone());
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_ENTRIES);

        entry
    }

    pub fn update_player_name(&mut self, player_id: &str, new_name: &str) {
        let name = display_name(new_name);
        for entry in self.entries.iter_mut().filter(|e| e.player_id == player_id) {
            entry.player_name = name.clone();
        }
    }

    pub fn top_entries(&self, limit: usize) -> &[LeaderboardEntry] {
        &self.entries[..limit.min(self.entries.len())]
    }

    pub fn player_entries(&self, player_id: &str) -> Vec<&LeaderboardEntry> {
        self.entries
            .iter()
            .filter(|e| e.player_id == player_id)
            .collect()
    }

    pub fn player_best_score(&self, player_id: &str) -> u32 {
        self.entries
            .iter()
            .filter(|e| e.player_id == player_id)
            .map(|e| e.score)
            .max()
            .unwrap_or(0)
    }

    /// Rank a score would take: one more than the number of strictly higher scores
    pub fn rank(&self, score: u32) -> usize {
        self.entries.iter().filter(|e| e.score > score).count() + 1
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ScoreSink for Leaderboard {
    fn record(&mut self, player: &Player, game_over: &GameOver) -> ScoreReceipt {
        let previous_best = self.player_best_score(&player.id);
        let entry = self.add_entry(&player.id, &player.name, game_over.score, game_over.length);
        let rank = self.rank(entry.score);
        let is_new_record = entry.score > previous_best;

        info!(
            player = %entry.player_name,
            score = entry.score,
            rank,
            is_new_record,
            "score recorded"
        );

        ScoreReceipt {
            entry,
            rank,
            previous_best,
            is_new_record,
        }
    }
}
