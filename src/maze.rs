use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GameError, Result};
use crate::grid::{Grid, GridPosition};
use crate::scene::{Costume, Sprite};

pub const WALL_CHAR: char = '#';

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MazeCell {
    position: GridPosition,
}

impl Sprite for MazeCell {
    fn position(&self) -> GridPosition {
        self.position
    }

    fn costume(&self) -> Costume {
        Costume::MazeCell
    }
}

/// The walls of one level. Never changes once loaded.
#[derive(Clone, Debug, Default)]
pub struct Maze {
    cells: Vec<MazeCell>,
    blocked: HashSet<GridPosition>,
}

impl Maze {
    pub fn empty() -> Self {
        Maze::default()
    }

    pub fn file_path(dir: &Path, level: u32) -> PathBuf {
        dir.join(format!("maze{}.txt", level))
    }

    pub fn load(dir: &Path, level: u32, grid: &Grid) -> Result<Self> {
        let path = Maze::file_path(dir, level);
        let text = fs::read_to_string(&path).map_err(|source| GameError::MazeUnreadable { path, source })?;
        Maze::parse(&text, grid)
    }

    /// Reads one row per line. Anything but the wall char is open floor,
    /// short rows are padded with floor, open cells past the grid are ignored.
    pub fn parse(text: &str, grid: &Grid) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(GameError::EmptyMaze);
        }

        let mut cells = vec![];
        for (y, row) in text.lines().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch != WALL_CHAR {
                    continue;
                }
                if x >= grid.width() as usize || y >= grid.height() as usize {
                    return Err(GameError::WallOutsideGrid { x, y, width: grid.width(), height: grid.height() });
                }
                cells.push(MazeCell { position: GridPosition::new(x as u16, y as u16) });
            }
        }

        let blocked = cells.iter().map(|cell| cell.position).collect();
        Ok(Maze { cells, blocked })
    }

    pub fn cells(&self) -> &[MazeCell] {
        &self.cells
    }

    pub fn blocked(&self) -> &HashSet<GridPosition> {
        &self.blocked
    }

    pub fn is_blocked(&self, pos: GridPosition) -> bool {
        self.blocked.contains(&pos)
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}
