use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Name recorded for players who never entered one
pub const ANONYMOUS: &str = "Anonymous";

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Identity attached to submitted scores
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
}

impl Player {
    /// Create a player with a freshly generated id
    pub fn new(name: &str) -> Self {
        Self {
            id: format!("player_{}_{}", unix_millis(), random_suffix()),
            name: display_name(name),
        }
    }

    /// Change the name; blank names are ignored
    pub fn rename(&mut self, new_name: &str) -> bool {
        let trimmed = new_name.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.name = trimmed.to_string();
        true
    }
}

/// Trimmed name, or [`ANONYMOUS`] when nothing is left
pub fn display_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        ANONYMOUS.to_string()
    } else {
        trimmed.to_string()
    }
}

pub(crate) fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Nine random base-36 characters
pub(crate) fn random_suffix() -> String {
    let mut rng = rand::thread_rng();
    (0..9)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}
