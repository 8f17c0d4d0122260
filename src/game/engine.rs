use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, trace};

use super::{
    action::{Action, Direction},
    clock::{Clock, MonotonicClock},
    config::{FOOD_REWARD, GameSettings, INITIAL_FOOD, INITIAL_SNAKE},
    food::place_food,
    state::{CollisionType, GameOver, GameSnapshot, Phase, Position, Snake},
};

/// Result of a call to [`GameEngine::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing, or not enough time has passed for a tick
    Idle,
    /// The snake moved one cell
    Moved { ate_food: bool },
    /// The tick ended the run
    GameOver(GameOver),
}

/// Fixed-timestep snake simulation
///
/// The host calls [`advance`](Self::advance) once per rendered frame; the
/// engine runs at most one tick per call and only when the current tick
/// interval has elapsed since the previous one. Operations that are not valid
/// in the current phase do nothing.
pub struct GameEngine<C: Clock = MonotonicClock> {
    settings: GameSettings,
    clock: C,
    rng: StdRng,
    phase: Phase,
    snake: Snake,
    pending_direction: Direction,
    food: Position,
    score: u32,
    tick_interval_ms: u64,
    last_tick_ms: u64,
}

impl GameEngine<MonotonicClock> {
    /// Create an engine driven by the wall clock
    pub fn new(settings: GameSettings) -> Self {
        Self::with_clock(settings, MonotonicClock::new())
    }
}

impl<C: Clock> GameEngine<C> {
    pub fn with_clock(settings: GameSettings, clock: C) -> Self {
        let tick_interval_ms = settings.initial_speed_ms;
        Self {
            settings,
            clock,
            rng: StdRng::from_entropy(),
            phase: Phase::Ready,
            snake: Snake::from_segments(&INITIAL_SNAKE, Direction::Right),
            pending_direction: Direction::Right,
            food: INITIAL_FOOD,
            score: 0,
            tick_interval_ms,
            last_tick_ms: 0,
        }
    }

    /// Use a deterministic food sequence
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn start(&mut self) {
        if self.phase == Phase::Ready {
            self.last_tick_ms = self.clock.now_ms();
            self.set_phase(Phase::Playing);
        }
    }

    pub fn pause(&mut self) {
        if self.phase == Phase::Playing {
            self.set_phase(Phase::Paused);
        }
    }

    /// Resume a paused run; time spent paused never counts toward the next tick
    pub fn resume(&mut self) {
        if self.phase == Phase::Paused {
            self.last_tick_ms = self.clock.now_ms();
            self.set_phase(Phase::Playing);
        }
    }

    /// Reset everything to the starting state, from any phase
    pub fn restart(&mut self) {
        self.snake = Snake::from_segments(&INITIAL_SNAKE, Direction::Right);
        self.pending_direction = Direction::Right;
        self.food = INITIAL_FOOD;
        self.score = 0;
        self.tick_interval_ms = self.settings.initial_speed_ms;
        self.last_tick_ms = 0;
        self.set_phase(Phase::Ready);
    }

    /// Abandon a run in progress
    pub fn end(&mut self) -> Option<GameOver> {
        if self.phase != Phase::Playing {
            return None;
        }
        let game_over = self.finish(None);
        Some(game_over)
    }

    /// Queue a heading for the next tick.
    ///
    /// Reversals are judged against the heading applied on the last tick, not
    /// against a still-pending one.
    pub fn set_direction(&mut self, direction: Direction) {
        if !self.snake.direction.is_opposite(direction) {
            self.pending_direction = direction;
        }
    }

    /// Dispatch an input action to the matching operation
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Turn(direction) => self.set_direction(direction),
            Action::Start => self.start(),
            Action::Pause => self.pause(),
            Action::Resume => self.resume(),
            Action::TogglePause => match self.phase {
                Phase::Playing => self.pause(),
                Phase::Paused => self.resume(),
                Phase::Ready | Phase::Ended => {}
            },
            Action::Restart => self.restart(),
        }
    }

    /// Advance using the engine's own clock
    pub fn advance_now(&mut self) -> TickOutcome {
        let now = self.clock.now_ms();
        self.advance(now)
    }

    /// Run one tick if the tick interval has elapsed since the last one
    pub fn advance(&mut self, current_time_ms: u64) -> TickOutcome {
        if self.phase != Phase::Playing {
            return TickOutcome::Idle;
        }

        let elapsed = current_time_ms.saturating_sub(self.last_tick_ms);
        if elapsed < self.tick_interval_ms {
            return TickOutcome::Idle;
        }

        self.snake.direction = self.pending_direction;
        let new_head = self.snake.head().moved_in_direction(self.snake.direction);
        let ate_food = new_head == self.food;
        self.snake.move_snake(ate_food);

        if ate_food {
            self.score += FOOD_REWARD;
            self.tick_interval_ms = self.settings.next_speed(self.tick_interval_ms);
            self.food = place_food(
                &mut self.rng,
                &self.snake,
                self.settings.grid_width(),
                self.settings.grid_height(),
            )
            .position;
        }

        self.last_tick_ms = current_time_ms;
        trace!(x = new_head.x, y = new_head.y, ate_food, "tick");

        // The colliding head stays in the body so renderers can show the crash
        if let Some(collision) = self.check_collision() {
            return TickOutcome::GameOver(self.finish(Some(collision)));
        }

        TickOutcome::Moved { ate_food }
    }

    fn check_collision(&self) -> Option<CollisionType> {
        let head = self.snake.head();

        if !head.is_within(self.settings.grid_width(), self.settings.grid_height()) {
            return Some(CollisionType::Wall);
        }

        if self.snake.collides_with_body(head) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    fn finish(&mut self, collision: Option<CollisionType>) -> GameOver {
        self.set_phase(Phase::Ended);
        let game_over = GameOver {
            score: self.score,
            length: self.snake.len(),
            collision,
        };
        info!(
            score = game_over.score,
            length = game_over.length,
            ?collision,
            "game over"
        );
        game_over
    }

    fn set_phase(&mut self, phase: Phase) {
        debug!(from = ?self.phase, to = ?phase, "phase change");
        self.phase = phase;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            snake: self.snake.body.clone(),
            food: self.food,
            direction: self.snake.direction,
            score: self.score,
            tick_interval_ms: self.tick_interval_ms,
            grid_width: self.settings.grid_width(),
            grid_height: self.settings.grid_height(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    #[cfg(test)]
    pub(crate) fn place_food_at(&mut self, food: Position) {
        self.food = food;
    }

    #[cfg(test)]
    pub(crate) fn replace_snake(&mut self, snake: Snake) {
        self.pending_direction = snake.direction;
        self.snake = snake;
    }
}
