mod config;
mod donut;
mod error;
mod game;
mod grid;
mod input;
mod maze;
mod menu;
mod playfield;
mod scene;
mod snake;
mod stage;
mod term;

use std::fs::File;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use simplelog::WriteLogger;

use crate::config::{Args, Config};

fn main() -> Result<()> {
    let args = Args::parse();

    // stdout belongs to the game screen, so logs go to a file
    let log_file = File::create(&args.log_file)
        .with_context(|| format!("cannot create log file {}", args.log_file.display()))?;
    WriteLogger::init(args.log_level, simplelog::Config::default(), log_file)
        .context("cannot initialize logging")?;

    let config = Config::from(&args);
    info!("starting with {:?}", config);

    let mut game = game::SnakeGame::new(config).context("cannot open terminal")?;
    game.initialize().context("cannot set up terminal")?;

    // The terminal must be restored before any error gets printed
    let res = game.run();
    let restored = game.shutdown();
    finish(res, restored)
}

/// A failed game outranks a failed terminal restore.
fn finish(res: error::Result, restored: error::Result) -> Result<()> {
    if let Err(e) = &res {
        error!("game aborted: {}", e);
    }
    res.context("game aborted")?;
    restored.context("cannot restore terminal")
}
