use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::state::Position;

/// Points awarded for each food eaten
pub const FOOD_REWARD: u32 = 10;

/// Snake segments every run starts with, head first
pub const INITIAL_SNAKE: [Position; 3] = [
    Position { x: 10, y: 10 },
    Position { x: 9, y: 10 },
    Position { x: 8, y: 10 },
];

/// Food position every run starts with
pub const INITIAL_FOOD: Position = Position { x: 15, y: 15 };

/// Reasons a [`GameSettings`] value cannot drive a game
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("grid_size must be positive")]
    ZeroGridSize,

    #[error("board of {width}x{height} cells cannot hold the starting snake and food")]
    BoardTooSmall { width: u32, height: u32 },

    #[error("min_speed_ms must be positive")]
    ZeroMinSpeed,

    #[error("initial_speed_ms ({initial}) cannot be below min_speed_ms ({min})")]
    InitialBelowMin { initial: u64, min: u64 },
}

/// Immutable configuration for a game
///
/// Board dimensions are given in pixels and divided by `grid_size` to get the
/// number of cells. Speeds are tick intervals in milliseconds, so a smaller
/// value means a faster snake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Size of one grid cell in pixels
    pub grid_size: u32,
    /// Board width in pixels
    pub canvas_width: u32,
    /// Board height in pixels
    pub canvas_height: u32,
    /// Tick interval at the start of a run
    pub initial_speed_ms: u64,
    /// How much the tick interval shrinks per food eaten
    pub speed_decrement_ms: u64,
    /// Floor for the tick interval
    pub min_speed_ms: u64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            grid_size: 20,
            canvas_width: 600,
            canvas_height: 400,
            initial_speed_ms: 150,
            speed_decrement_ms: 5,
            min_speed_ms: 80,
        }
    }
}

impl GameSettings {
    /// Number of cells along the x axis
    pub fn grid_width(&self) -> u32 {
        self.canvas_width.checked_div(self.grid_size).unwrap_or(0)
    }

    /// Number of cells along the y axis
    pub fn grid_height(&self) -> u32 {
        self.canvas_height.checked_div(self.grid_size).unwrap_or(0)
    }

    /// Tick interval after one more food is eaten at `current_ms`
    pub fn next_speed(&self, current_ms: u64) -> u64 {
        current_ms
            .saturating_sub(self.speed_decrement_ms)
            .max(self.min_speed_ms)
    }

    /// Check that the settings describe a playable board
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.grid_size == 0 {
            return Err(SettingsError::ZeroGridSize);
        }

        let (width, height) = (self.grid_width(), self.grid_height());
        let fits = |p: &Position| {
            p.x >= 0 && p.y >= 0 && (p.x as u32) < width && (p.y as u32) < height
        };
        if !INITIAL_SNAKE.iter().chain([&INITIAL_FOOD]).all(fits) {
            return Err(SettingsError::BoardTooSmall { width, height });
        }

        if self.min_speed_ms == 0 {
            return Err(SettingsError::ZeroMinSpeed);
        }

        if self.initial_speed_ms < self.min_speed_ms {
            return Err(SettingsError::InitialBelowMin {
                initial: self.initial_speed_ms,
                min: self.min_speed_ms,
            });
        }

        Ok(())
    }

    /// Load settings from a JSON file; missing fields take their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        let settings: GameSettings =
            serde_json::from_str(&json).context("Failed to parse settings")?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = GameSettings::default();
        assert_eq!(settings.grid_width(), 30);
        assert_eq!(settings.grid_height(), 20);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_grid_uses_floor_division() {
        let settings = GameSettings {
            canvas_width: 619,
            canvas_height: 439,
            ..Default::default()
        };
        assert_eq!(settings.grid_width(), 30);
        assert_eq!(settings.grid_height(), 21);
    }

    #[test]
    fn test_next_speed_saturates_at_min() {
        let settings = GameSettings::default();
        assert_eq!(settings.next_speed(150), 145);
        assert_eq!(settings.next_speed(82), 80);
        assert_eq!(settings.next_speed(80), 80);

        let steep = GameSettings {
            speed_decrement_ms: 500,
            ..Default::default()
        };
        assert_eq!(steep.next_speed(150), 80);
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let zero = GameSettings {
            grid_size: 0,
            ..Default::default()
        };
        assert_eq!(zero.validate(), Err(SettingsError::ZeroGridSize));

        let small = GameSettings {
            canvas_width: 200,
            canvas_height: 200,
            ..Default::default()
        };
        assert_eq!(
            small.validate(),
            Err(SettingsError::BoardTooSmall {
                width: 10,
                height: 10
            })
        );

        let inverted = GameSettings {
            initial_speed_ms: 50,
            ..Default::default()
        };
        assert!(matches!(
            inverted.validate(),
            Err(SettingsError::InitialBelowMin { .. })
        ));

        let no_floor = GameSettings {
            min_speed_ms: 0,
            ..Default::default()
        };
        assert_eq!(no_floor.validate(), Err(SettingsError::ZeroMinSpeed));
    }

    #[test]
    fn test_load_partial_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "initial_speed_ms": 200, "canvas_width": 800 }"#).unwrap();

        let settings = GameSettings::from_json_file(&path).unwrap();
        assert_eq!(settings.initial_speed_ms, 200);
        assert_eq!(settings.canvas_width, 800);
        assert_eq!(settings.grid_size, 20);
        assert_eq!(settings.min_speed_ms, 80);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let result = GameSettings::from_json_file(&dir.path().join("nope.json"));
        assert!(result.is_err());
    }
}
