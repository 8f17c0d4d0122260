use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    pub fn is_within(&self, grid_width: u32, grid_height: u32) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as u32) < grid_width && (self.y as u32) < grid_height
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Direction applied on the last tick
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let (dx, dy) = direction.delta();
        for i in 1..length.max(1) {
            let prev = body[i - 1];
            body.push(prev.moved_by(-dx, -dy));
        }

        Self { body, direction }
    }

    pub fn from_segments(segments: &[Position], direction: Direction) -> Self {
        debug_assert!(!segments.is_empty(), "snake needs a head");
        Self {
            body: segments.to_vec(),
            direction,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// True when `pos` lies on any segment other than the head
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Move snake one cell in its direction, keeping the tail when growing
    pub fn move_snake(&mut self, should_grow: bool) {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.insert(0, new_head);

        if !should_grow {
            self.body.pop();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (never true for a snake built by the engine)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Coarse game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Ready,
    Playing,
    Paused,
    Ended,
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionType {
    /// Snake left the board
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

/// Terminal event emitted when a run ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOver {
    pub score: u32,
    /// Number of snake segments, colliding head included
    pub length: usize,
    /// `None` when the run was ended on request rather than by a crash
    pub collision: Option<CollisionType>,
}

/// Read-only view of the engine handed to render collaborators once per frame
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub snake: Vec<Position>,
    pub food: Position,
    pub direction: Direction,
    pub score: u32,
    pub tick_interval_ms: u64,
    pub grid_width: u32,
    pub grid_height: u32,
}

impl GameSnapshot {
    pub fn head(&self) -> Position {
        self.snake[0]
    }

    pub fn length(&self) -> usize {
        self.snake.len()
    }

    /// Moves per second, rounded to one decimal
    pub fn moves_per_second(&self) -> f64 {
        if self.tick_interval_ms == 0 {
            return 0.0;
        }
        (10_000.0 / self.tick_interval_ms as f64).round() / 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_bounds_checking() {
        assert!(Position::new(0, 0).is_within(30, 20));
        assert!(Position::new(29, 19).is_within(30, 20));
        assert!(!Position::new(-1, 0).is_within(30, 20));
        assert!(!Position::new(30, 0).is_within(30, 20));
        assert!(!Position::new(0, 20).is_within(30, 20));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(10, 10), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(
            snake.body,
            vec![
                Position::new(10, 10),
                Position::new(9, 10),
                Position::new(8, 10)
            ]
        );
    }

    #[test]
    fn test_snake_movement() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        snake.move_snake(false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));

        snake.move_snake(true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(7, 5));
    }

    #[test]
    fn test_collision_ignores_head() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert!(!snake.collides_with_body(Position::new(5, 5)));
        assert!(snake.collides_with_body(Position::new(4, 5)));
        assert!(!snake.collides_with_body(Position::new(10, 10)));
        assert!(snake.occupies(Position::new(5, 5)));
    }

    #[test]
    fn test_moves_per_second() {
        let snapshot = GameSnapshot {
            phase: Phase::Ready,
            snake: vec![Position::new(1, 1)],
            food: Position::new(2, 2),
            direction: Direction::Right,
            score: 0,
            tick_interval_ms: 150,
            grid_width: 30,
            grid_height: 20,
        };
        assert_eq!(snapshot.moves_per_second(), 6.7);
        assert_eq!(
            GameSnapshot {
                tick_interval_ms: 80,
                ..snapshot
            }
            .moves_per_second(),
            12.5
        );
    }
}
