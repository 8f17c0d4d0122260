use anyhow::{Context, Result};
use clap::Parser;
use snake_rank::game::{GameEngine, GameSettings};
use snake_rank::modes::PlayMode;
use snake_rank::scoring::Player;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake_rank")]
#[command(version, about = "Snake with a ranked leaderboard")]
struct Cli {
    /// Player name shown on the leaderboard
    #[arg(long, default_value = "")]
    name: String,

    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cell size in pixels
    #[arg(long)]
    grid_size: Option<u32>,

    /// Board width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Board height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Starting tick interval in milliseconds
    #[arg(long)]
    initial_speed: Option<u64>,

    /// Tick interval reduction per food, in milliseconds
    #[arg(long)]
    speed_decrement: Option<u64>,

    /// Fastest allowed tick interval in milliseconds
    #[arg(long)]
    min_speed: Option<u64>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn settings(&self) -> Result<GameSettings> {
        let mut settings = match &self.config {
            Some(path) => GameSettings::from_json_file(path)?,
            None => GameSettings::default(),
        };

        if let Some(v) = self.grid_size {
            settings.grid_size = v;
        }
        if let Some(v) = self.width {
            settings.canvas_width = v;
        }
        if let Some(v) = self.height {
            settings.canvas_height = v;
        }
        if let Some(v) = self.initial_speed {
            settings.initial_speed_ms = v;
        }
        if let Some(v) = self.speed_decrement {
            settings.speed_decrement_ms = v;
        }
        if let Some(v) = self.min_speed {
            settings.min_speed_ms = v;
        }

        settings.validate().context("Invalid game settings")?;
        Ok(settings)
    }
}

/// The TUI owns the terminal, so logs only go to a file when asked for
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("snake_rank=info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let settings = cli.settings()?;
    let player = Player::new(&cli.name);
    info!(player = %player.name, ?settings, "starting session");

    let mut mode = match cli.seed {
        Some(seed) => PlayMode::with_engine(GameEngine::new(settings).with_seed(seed), player),
        None => PlayMode::new(settings, player),
    };
    mode.run().await?;

    Ok(())
}
