use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use neon_snake::game::GameConfig;
use neon_snake::modes::PlayMode;
use neon_snake::scores::FileStore;

#[derive(Parser)]
#[command(name = "neon_snake")]
#[command(version, about = "Neon-styled terminal Snake with daily top scores")]
struct Cli {
    /// Grid width in cells
    #[arg(long, default_value = "20")]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value = "20")]
    height: usize,

    /// Simulation ticks per second
    #[arg(long, default_value = "15")]
    tick_rate: u32,

    /// Score file path (defaults to the platform data directory)
    #[arg(long)]
    scores: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = GameConfig {
        grid_width: cli.width,
        grid_height: cli.height,
        tick_hz: cli.tick_rate,
        ..Default::default()
    };

    let store = match cli.scores {
        Some(path) => FileStore::open(path),
        None => FileStore::open_default(),
    };

    let mut play_mode = PlayMode::new(config, store);
    play_mode.run().await
}
