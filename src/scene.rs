//! What the simulation hands to the terminal each tick. Nothing here is
//! read back by the simulation.

use crate::grid::{Direction, GridPosition};
use crate::snake::Player;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Costume {
    MazeCell,
    Donut { value: u32 },
    Segment(Player),
    Head(Player, Direction),
}

/// Anything that occupies a single grid cell and can be drawn there.
pub trait Sprite {
    fn position(&self) -> GridPosition;
    fn costume(&self) -> Costume;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VisibleSprite {
    pub position: GridPosition,
    pub costume: Costume,
}

/// Named sound effects; the sink decides how (and whether) to play them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sound {
    Intro,
    Menu,
    Tick,
    Eat,
    Collide,
    LevelComplete,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scene {
    pub sprites: Vec<VisibleSprite>,
    pub score: u32,
    pub threshold: u32,
    pub level: u32,
}

impl Scene {
    pub fn push(&mut self, sprite: &impl Sprite) {
        self.sprites.push(VisibleSprite { position: sprite.position(), costume: sprite.costume() });
    }

    pub fn extend<'a, S: Sprite + 'a>(&mut self, sprites: impl IntoIterator<Item = &'a S>) {
        for sprite in sprites {
            self.push(sprite);
        }
    }

    pub fn score_text(&self) -> String {
        format!("Score: {} / {}", self.score, self.threshold)
    }

    pub fn level_text(&self) -> String {
        format!("Level: {}", self.level)
    }
}
