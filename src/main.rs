mod game;
mod input;
mod term;

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use snake::{GameConfig, Session};

use crate::game::SnakeGame;
use crate::term::TermManager;

#[derive(Parser)]
#[command(name = "snake")]
#[command(version, about = "Snake on a wrapping grid, played in the terminal")]
struct Cli {
    /// Grid width in cells
    #[arg(long, default_value_t = 40)]
    width: u16,

    /// Grid height in cells
    #[arg(long, default_value_t = 30)]
    height: u16,

    /// Simulation steps per second
    #[arg(long, default_value_t = 10)]
    ticks_per_second: u32,

    /// Length gained per food eaten
    #[arg(long, default_value_t = 1)]
    growth_per_food: usize,

    /// Points gained per food eaten
    #[arg(long, default_value_t = 10)]
    score_per_food: u32,

    /// Seed for snake headings and food placement; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// JSON game config; overrides the grid and scoring flags
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file. Nothing is logged otherwise, since the
    /// terminal is taken by the game.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Most verbose level written to the log file
    #[arg(long, default_value = "debug")]
    log_level: tracing::Level,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        if let Some(path) = &self.config {
            return load_config(path);
        }

        Ok(GameConfig {
            width: self.width,
            height: self.height,
            ticks_per_second: self.ticks_per_second,
            growth_per_food: self.growth_per_food,
            score_per_food: self.score_per_food,
        })
    }
}

fn load_config(path: &Path) -> Result<GameConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

fn init_logging(path: &Path, level: tracing::Level) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path, cli.log_level)?;
    }

    let config = cli.game_config()?;
    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(seed, ?config, "starting session");

    let session = Session::seeded(config, seed)?;
    let term = TermManager::new().context("failed to query terminal size")?;

    // The game loop takes care of restoring the terminal on its way out
    let mut game = SnakeGame::new(session, term)?;
    game.run()
}
