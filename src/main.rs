use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use torus_snake::game::GameConfig;
use torus_snake::metrics::HighScoreStore;
use torus_snake::modes::{grid_dims, HumanMode};

#[derive(Parser)]
#[command(name = "torus-snake")]
#[command(version, about = "Snake on a wrap-around grid")]
struct Cli {
    /// Grid width in cells (default: derived from the terminal size)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells (default: derived from the terminal size)
    #[arg(long)]
    height: Option<usize>,

    /// Tick interval at speed 1.0, in milliseconds
    #[arg(long, default_value = "300")]
    tick_ms: u64,

    /// File the high score is persisted to
    #[arg(long, default_value = "torus-snake-scores.json")]
    scores_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();

    // Grid dimensions come from the viewport unless given explicitly.
    let (term_cols, term_rows) =
        crossterm::terminal::size().context("Failed to query terminal size")?;
    let (derived_width, derived_height) = grid_dims(term_cols, term_rows);

    let config = GameConfig {
        grid_width: cli.width.unwrap_or(derived_width),
        grid_height: cli.height.unwrap_or(derived_height),
        base_tick_ms: cli.tick_ms,
        ..Default::default()
    };

    // Fail fast on a degenerate grid before taking over the terminal.
    config.validate()?;

    let store = HighScoreStore::new(&cli.scores_file);
    let mut mode = HumanMode::new(config, store)?;
    mode.run().await
}
