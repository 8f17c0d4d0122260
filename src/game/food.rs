use rand::Rng;
use tracing::warn;

use super::state::{Position, Snake};

/// Candidate cells sampled before giving up on finding a free one
pub const MAX_FOOD_ATTEMPTS: u32 = 100;

/// Where food landed and how hard it was to find a spot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodPlacement {
    pub position: Position,
    pub attempts: u32,
    /// True when the retry budget ran out and the food sits on the snake
    pub overlaps_snake: bool,
}

/// Pick a food cell by uniform rejection sampling over the whole grid.
///
/// After [`MAX_FOOD_ATTEMPTS`] occupied candidates the last one is kept
/// anyway, so placement never fails on a crowded board.
pub fn place_food<R: Rng>(
    rng: &mut R,
    snake: &Snake,
    grid_width: u32,
    grid_height: u32,
) -> FoodPlacement {
    let mut attempts = 0;
    loop {
        let position = Position::new(
            rng.gen_range(0..grid_width) as i32,
            rng.gen_range(0..grid_height) as i32,
        );
        attempts += 1;

        let occupied = snake.occupies(position);
        if !occupied || attempts >= MAX_FOOD_ATTEMPTS {
            if occupied {
                warn!(
                    x = position.x,
                    y = position.y,
                    snake_len = snake.len(),
                    "food placement exhausted retries, placing on snake"
                );
            }
            return FoodPlacement {
                position,
                attempts,
                overlaps_snake: occupied,
            };
        }
    }
}
