use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::debug;

use crate::game::{
    Action, Clock, GameEngine, GameOver, GameSettings, MonotonicClock, Phase, TickOutcome,
};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::scoring::{Leaderboard, Player, ScoreReceipt, ScoreSink};

/// Roughly one frame at 60 Hz
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Interactive terminal session: one engine, one player, one leaderboard
pub struct PlayMode<C: Clock = MonotonicClock> {
    engine: GameEngine<C>,
    leaderboard: Leaderboard,
    player: Player,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    last_receipt: Option<ScoreReceipt>,
    should_quit: bool,
}

impl PlayMode<MonotonicClock> {
    pub fn new(settings: GameSettings, player: Player) -> Self {
        Self::with_engine(GameEngine::new(settings), player)
    }
}

impl<C: Clock> PlayMode<C> {
    pub fn with_engine(engine: GameEngine<C>, player: Player) -> Self {
        Self {
            engine,
            leaderboard: Leaderboard::new(),
            player,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            last_receipt: None,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // The engine throttles itself, so every frame may call advance
        let mut frame_timer = interval(FRAME_INTERVAL);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Advance and render one frame
                _ = frame_timer.tick() => {
                    self.update_frame();
                    let snapshot = self.engine.snapshot();
                    terminal.draw(|frame| {
                        self.renderer.render(
                            frame,
                            &snapshot,
                            &self.metrics,
                            &self.leaderboard,
                            self.last_receipt.as_ref(),
                        );
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::GameAction(action) => self.apply_action(action),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    fn apply_action(&mut self, action: Action) {
        // Direction keys only steer a live run
        if matches!(action, Action::Turn(_)) && self.engine.phase() != Phase::Playing {
            return;
        }

        let before = self.engine.phase();
        self.engine.apply(action);
        let after = self.engine.phase();

        if before != after {
            debug!(?action, from = ?before, to = ?after, "input changed phase");
            match (before, after) {
                (Phase::Ready, Phase::Playing) => self.metrics.on_game_start(),
                (Phase::Playing, Phase::Paused) => self.metrics.on_pause(),
                (Phase::Paused, Phase::Playing) => self.metrics.on_resume(),
                (_, Phase::Ready) => {
                    self.metrics.on_restart();
                    self.last_receipt = None;
                }
                _ => {}
            }
        } else if action == Action::Restart {
            // Restart from Ready still clears a stale receipt
            self.last_receipt = None;
        }
    }

    fn update_frame(&mut self) {
        self.metrics.update();

        if let TickOutcome::GameOver(game_over) = self.engine.advance_now() {
            self.on_game_over(game_over);
        }
    }

    fn on_game_over(&mut self, game_over: GameOver) {
        self.metrics.on_game_over(game_over.score);

        // Empty runs never reach the leaderboard
        if game_over.score > 0 {
            let receipt = self.leaderboard.record(&self.player, &game_over);
            self.last_receipt = Some(receipt);
        }
    }

    pub fn engine(&self) -> &GameEngine<C> {
        &self.engine
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
