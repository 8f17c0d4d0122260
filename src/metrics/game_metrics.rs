use std::time::{Duration, Instant};

/// Per-session statistics shown alongside the board
pub struct GameMetrics {
    run_started: Option<Instant>,
    paused_at: Option<Instant>,
    paused_total: Duration,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            run_started: None,
            paused_at: None,
            paused_total: Duration::ZERO,
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
        }
    }

    /// Refresh `elapsed_time`; frozen while paused or between runs
    pub fn update(&mut self) {
        if let (Some(started), None) = (self.run_started, self.paused_at) {
            self.elapsed_time = started.elapsed().saturating_sub(self.paused_total);
        }
    }

    pub fn on_game_start(&mut self) {
        self.run_started = Some(Instant::now());
        self.paused_at = None;
        self.paused_total = Duration::ZERO;
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_pause(&mut self) {
        if self.run_started.is_some() && self.paused_at.is_none() {
            self.update();
            self.paused_at = Some(Instant::now());
        }
    }

    pub fn on_resume(&mut self) {
        if let Some(paused_at) = self.paused_at.take() {
            self.paused_total += paused_at.elapsed();
        }
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.update();
        self.run_started = None;
        self.paused_at = None;
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    /// Forget the current run's clock without counting it as played
    pub fn on_restart(&mut self) {
        self.run_started = None;
        self.paused_at = None;
        self.paused_total = Duration::ZERO;
        self.elapsed_time = Duration::ZERO;
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
