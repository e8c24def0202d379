use std::{io, path::PathBuf, result};

use thiserror::Error;

use crate::snake::Player;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal error: {0}")]
    Terminal(#[from] crossterm::ErrorKind),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("could not read maze file {}: {source}", .path.display())]
    MazeUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("maze file has no rows")]
    EmptyMaze,

    #[error("wall at ({x}, {y}) lies outside the {width}x{height} grid")]
    WallOutsideGrid { x: usize, y: usize, width: u16, height: u16 },

    #[error("maze wall at ({x}, {y}) blocks the start of player {player:?}")]
    BlockedStart { player: Player, x: u16, y: u16 },

    #[error("no free cell left to place a donut")]
    NoFreeCell,

    #[error("terminal is {width}x{height}, the game needs at least {min_width}x{min_height}")]
    TerminalTooSmall { width: u16, height: u16, min_width: u16, min_height: u16 },
}

pub type Result<T = ()> = result::Result<T, GameError>;
