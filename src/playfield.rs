use std::collections::HashSet;

use clap::ValueEnum;
use log::{debug, info};
use rand::Rng;

use crate::donut::Donut;
use crate::error::{GameError, Result};
use crate::grid::{Direction, Grid, GridPosition};
use crate::maze::Maze;
use crate::scene::{Scene, Sound, Sprite};
use crate::snake::{Player, Snake};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlayerCount {
    One,
    Two,
}

impl PlayerCount {
    pub const ALL: [PlayerCount; 2] = [PlayerCount::One, PlayerCount::Two];

    pub fn count(self) -> usize {
        match self {
            PlayerCount::One => 1,
            PlayerCount::Two => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlayerCount::One => "One player",
            PlayerCount::Two => "Two players",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Points the players need together to finish a level.
    pub fn threshold(self) -> u32 {
        match self {
            Difficulty::Easy => 60,
            Difficulty::Medium => 120,
            Difficulty::Hard => 180,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Where each snake starts a level, and facing which way.
pub fn start_positions(players: PlayerCount, grid: &Grid) -> Vec<(Player, GridPosition, Direction)> {
    let mid = grid.center();

    match players {
        PlayerCount::One => vec![(Player::One, mid, Direction::Right)],
        PlayerCount::Two => vec![
            (Player::One, GridPosition::new(mid.x + 1, mid.y), Direction::Right),
            (Player::Two, GridPosition::new(mid.x - 1, mid.y), Direction::Left),
        ],
    }
}

/// Everything that lives on the grid during a level: the maze, the snakes
/// and one donut per player.
pub struct Playfield<R: Rng> {
    grid: Grid,
    maze: Maze,
    snakes: Vec<Snake>,
    donuts: Vec<Donut>,
    level: u32,
    threshold: u32,
    paused: bool,
    rng: R,
}

impl<R: Rng> Playfield<R> {
    pub fn new(grid: Grid, players: PlayerCount, difficulty: Difficulty, donut_lifetime: u32, rng: R) -> Self {
        let snakes = start_positions(players, &grid)
            .into_iter()
            .map(|(player, start, dir)| Snake::new(player, start, dir, grid))
            .collect();
        let donuts = (0..players.count()).map(|_| Donut::new(donut_lifetime)).collect();

        Playfield {
            grid,
            maze: Maze::empty(),
            snakes,
            donuts,
            level: 0,
            threshold: difficulty.threshold(),
            paused: false,
            rng,
        }
    }

    pub fn start_level(&mut self, level: u32, maze: Maze) -> Result<()> {
        for snake in &self.snakes {
            let start = snake.start();
            let step = self.grid.step(start, snake.start_direction());
            let blocked = [start, step].into_iter().find(|&pos| maze.is_blocked(pos));
            if let Some(cell) = blocked {
                return Err(GameError::BlockedStart { player: snake.player(), x: cell.x, y: cell.y });
            }
        }

        info!("level {} starts with {} maze cells", level, maze.cell_count());
        self.level = level;
        self.maze = maze;
        self.paused = false;

        for snake in &mut self.snakes {
            snake.reset();
        }
        for donut in &mut self.donuts {
            donut.mark_eaten();
        }
        self.respawn_donuts()
    }

    pub fn score(&self) -> u32 {
        self.snakes.iter().map(|s| s.score()).sum()
    }

    pub fn is_complete(&self) -> bool {
        self.score() >= self.threshold
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        info!("game {}", if self.paused { "paused" } else { "resumed" });
    }

    /// Buffers a turn for the given player. Ignored while paused.
    pub fn queue_turn(&mut self, player: Player, direction: Direction) {
        if self.paused {
            return;
        }
        if let Some(snake) = self.snakes.iter_mut().find(|s| s.player() == player) {
            snake.queue_turn(direction);
        }
    }

    /// One simulation step: move, age, resolve collisions, replace donuts.
    pub fn tick(&mut self) -> Result<Vec<Sound>> {
        if self.paused {
            return Ok(vec![]);
        }

        for snake in &mut self.snakes {
            snake.move_tick();
        }
        for donut in &mut self.donuts {
            donut.tick();
        }

        let sounds = self.check_collisions();
        self.respawn_donuts()?;
        Ok(sounds)
    }

    fn check_collisions(&mut self) -> Vec<Sound> {
        let mut sounds = vec![];

        for i in 0..self.snakes.len() {
            let eaten = self.snakes[i].eat(&mut self.donuts);
            for value in eaten {
                debug!("{:?} ate a donut worth {}", self.snakes[i].player(), value);
                sounds.push(Sound::Eat);
            }

            // Rebuilt per snake: an earlier reset in this loop moves obstacles
            let obstacles = self.obstacles();
            if self.snakes[i].collides_with(&obstacles) {
                let snake = &mut self.snakes[i];
                info!("{:?} crashed at {:?} with score {}", snake.player(), snake.head_position(), snake.score());
                snake.reset();
                sounds.push(Sound::Collide);
            }
        }

        sounds
    }

    /// Maze walls plus every tail on the field. Heads are not obstacles.
    fn obstacles(&self) -> HashSet<GridPosition> {
        let mut cells = self.maze.blocked().clone();
        for snake in &self.snakes {
            cells.extend(snake.tail_positions());
        }
        cells
    }

    fn respawn_donuts(&mut self) -> Result<()> {
        for i in 0..self.donuts.len() {
            if !self.donuts[i].needs_respawn() {
                continue;
            }
            if self.donuts[i].age() > 0 {
                debug!("donut {} replaced at age {}", i, self.donuts[i].age());
            }

            let mut occupied = self.maze.blocked().clone();
            for snake in &self.snakes {
                occupied.extend(snake.body_positions());
            }
            for (j, other) in self.donuts.iter().enumerate() {
                if j != i && !other.needs_respawn() {
                    occupied.insert(other.position());
                }
            }

            self.donuts[i].respawn(&mut self.rng, &self.grid, &occupied)?;
        }
        Ok(())
    }

    pub fn scene(&self) -> Scene {
        let mut scene = Scene { score: self.score(), threshold: self.threshold, level: self.level, ..Scene::default() };

        scene.extend(self.maze.cells());
        scene.extend(&self.donuts);
        for snake in &self.snakes {
            scene.extend(snake.tail());
        }
        for snake in &self.snakes {
            scene.push(snake.head());
        }
        scene
    }
}
