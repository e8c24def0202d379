use Direction::*;

/// The mazes are drawn for this size; changing it means redrawing them.
pub const GRID_WIDTH: u16 = 31;
pub const GRID_HEIGHT: u16 = 23;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub const ALL: [Direction; 4] = [Up, Down, Left, Right];

    pub fn opposite(self) -> Self {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPosition {
    pub x: u16,
    pub y: u16,
}

impl GridPosition {
    pub const fn new(x: u16, y: u16) -> Self {
        GridPosition { x, y }
    }
}

/// Toroidal playing field: leaving one edge enters at the opposite one.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
}

impl Grid {
    pub const fn new(width: u16, height: u16) -> Self {
        Grid { width, height }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn center(&self) -> GridPosition {
        GridPosition::new(self.width / 2, self.height / 2)
    }

    pub fn contains(&self, pos: GridPosition) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn cells(&self) -> impl Iterator<Item = GridPosition> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| GridPosition::new(x, y)))
    }

    /// The cell one step away from `pos`, wrapping around at the borders.
    pub fn step(&self, pos: GridPosition, direction: Direction) -> GridPosition {
        let GridPosition { x, y } = pos;

        match direction {
            Up => GridPosition::new(x, if y == 0 { self.height - 1 } else { y - 1 }),
            Down => GridPosition::new(x, if y + 1 >= self.height { 0 } else { y + 1 }),
            Left => GridPosition::new(if x == 0 { self.width - 1 } else { x - 1 }, y),
            Right => GridPosition::new(if x + 1 >= self.width { 0 } else { x + 1 }, y),
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid::new(GRID_WIDTH, GRID_HEIGHT)
    }
}
