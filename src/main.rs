use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::game::{GameConfig, GameEngine};
use grid_snake::logging::init_file_logger;
use grid_snake::modes::HumanMode;
use grid_snake::prefs::PreferenceStore;
use grid_snake::render::ThemeMode;
use log::info;
use simplelog::LevelFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a grid with obstacles")]
struct Cli {
    /// Side length of the square grid
    #[arg(long, default_value = "20")]
    grid_size: usize,

    /// Number of obstacles per game
    #[arg(long, default_value = "10")]
    obstacles: usize,

    /// Seed for food and obstacle placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Where the colorblind preference is kept
    #[arg(long, default_value = ".snake_prefs.json")]
    prefs: PathBuf,

    /// Log file (the terminal is taken by the game)
    #[arg(long, default_value = "snake.log")]
    log_file: PathBuf,

    /// Log verbosity
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Start with the light theme
    #[arg(long)]
    light: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_file_logger(&cli.log_file, cli.log_level)?;

    // Create game configuration from CLI arguments
    let config = GameConfig::new(cli.grid_size, cli.obstacles);
    let engine = match cli.seed {
        Some(seed) => {
            info!("using placement seed {}", seed);
            GameEngine::with_seed(config, seed)
        }
        None => GameEngine::new(config),
    }
    .context("Cannot start a game with these settings")?;

    let theme_mode = if cli.light {
        ThemeMode::Light
    } else {
        ThemeMode::Dark
    };

    let mut human_mode = HumanMode::new(engine, PreferenceStore::new(cli.prefs), theme_mode)?;
    human_mode.run().await?;

    Ok(())
}
