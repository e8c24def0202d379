use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use simplelog::LevelFilter;

use crate::grid::Grid;
use crate::playfield::{Difficulty, PlayerCount};

/// A donut stays put for this many seconds before it jumps elsewhere.
const DONUT_LIFETIME_SECS: u32 = 9;

/// Command-line options for a round of snake through the mazes.
#[derive(Debug, Parser)]
#[command(author, version, about = "Guide one or two snakes through the mazes and eat donuts", long_about = None)]
pub struct Args {
    /// Terminal columns per grid cell.
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u16).range(1..=3))]
    pub scale: u16,

    /// Skip the players menu.
    #[arg(long, value_enum)]
    pub players: Option<PlayerCount>,

    /// Skip the difficulty menu.
    #[arg(long, value_enum)]
    pub difficulty: Option<Difficulty>,

    /// Number of levels; level N plays maze N.
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    pub levels: u32,

    /// Directory holding maze1.txt, maze2.txt, ...
    #[arg(long, value_name = "DIR", default_value = "mazes")]
    pub maze_dir: PathBuf,

    /// Simulation ticks per second.
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..=60))]
    pub fps: u32,

    /// Seed for donut placement, for reproducible games.
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, value_name = "PATH", default_value = "snake.log")]
    pub log_file: PathBuf,

    #[arg(long, value_name = "LEVEL", default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub grid: Grid,
    pub scale: u16,
    pub players: Option<PlayerCount>,
    pub difficulty: Option<Difficulty>,
    pub levels: u32,
    pub maze_dir: PathBuf,
    pub fps: u32,
    pub seed: Option<u64>,
}

impl Config {
    pub fn frame(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }

    /// The first tick of a level lingers so players can get their bearings.
    pub fn first_frame(&self) -> Duration {
        self.frame() * 5
    }

    pub fn intro_duration(&self) -> Duration {
        self.frame() * 10
    }

    pub fn outro_duration(&self, last_level: bool) -> Duration {
        if last_level { self.frame() * 10 } else { self.frame() * 5 }
    }

    pub fn donut_lifetime(&self) -> u32 {
        self.fps * DONUT_LIFETIME_SECS
    }
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        Config {
            grid: Grid::default(),
            scale: args.scale,
            players: args.players,
            difficulty: args.difficulty,
            levels: args.levels,
            maze_dir: args.maze_dir.clone(),
            fps: args.fps,
            seed: args.seed,
        }
    }
}
