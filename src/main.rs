use std::fs::File;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use snake404::game::SnakeGame;
use snake404::{Config, FileStore};

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    config.validate()?;

    if let Some(path) = &config.log_file {
        let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }

    let store = FileStore::new(&config.highscore_file);
    let mut game = SnakeGame::new(&config, store).context("setting up the terminal")?;

    // The game loop takes care of restoring the terminal on the way out
    game.play().context("running the game")
}
