mod config;
mod game;
mod input;
mod render;
mod snake;
mod state;
mod term;

use std::fs::File;

use anyhow::{Context, Result};
use log::info;
use simplelog::{Config, WriteLogger};

use config::GameConfig;

pub type TermInt = u16;
pub type Cell = (i32, i32);

fn main() -> Result<()> {
    let config = GameConfig::from_env()?;
    init_logging(&config)?;

    let mut game = game::SnakeGame::new(config);
    let score = game.run()?;

    info!("exiting, final score {}", score);
    Ok(())
}

// The terminal belongs to the game, so logs only ever go to a file
fn init_logging(config: &GameConfig) -> Result<()> {
    if let Some(path) = &config.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        WriteLogger::init(config.log_level, Config::default(), file)
            .context("failed to initialize logger")?;
    }
    Ok(())
}
