use std::collections::HashSet;

use log::warn;
use rand::Rng;

use crate::error::{GameError, Result};
use crate::grid::{Grid, GridPosition};
use crate::scene::{Costume, Sprite};

pub const DONUT_VALUES: [u32; 3] = [6, 9, 12];

/// Random probes before falling back to scanning the whole grid.
pub const MAX_SPAWN_ATTEMPTS: u32 = 10_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Donut {
    position: GridPosition,
    value: u32,
    age: u32,
    lifetime: u32,
    needs_respawn: bool,
}

impl Donut {
    /// A donut that still has to be placed.
    pub fn new(lifetime: u32) -> Self {
        Donut {
            position: GridPosition::new(0, 0),
            value: DONUT_VALUES[0],
            age: 0,
            lifetime,
            needs_respawn: true,
        }
    }

    #[cfg(test)]
    pub fn placed(position: GridPosition, value: u32, lifetime: u32) -> Self {
        Donut { position, value, age: 0, lifetime, needs_respawn: false }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn needs_respawn(&self) -> bool {
        self.needs_respawn
    }

    pub fn mark_eaten(&mut self) {
        self.needs_respawn = true;
    }

    pub fn tick(&mut self) {
        self.age += 1;
        if self.age >= self.lifetime {
            self.needs_respawn = true;
        }
    }

    /// Picks a fresh value and moves to a random cell outside `occupied`.
    pub fn respawn<R: Rng>(&mut self, rng: &mut R, grid: &Grid, occupied: &HashSet<GridPosition>) -> Result<()> {
        let position = free_cell(rng, grid, occupied)?;

        self.position = position;
        self.value = DONUT_VALUES[rng.gen_range(0..DONUT_VALUES.len())];
        self.age = 0;
        self.needs_respawn = false;
        Ok(())
    }
}

impl Sprite for Donut {
    fn position(&self) -> GridPosition {
        self.position
    }

    fn costume(&self) -> Costume {
        Costume::Donut { value: self.value }
    }
}

fn free_cell<R: Rng>(rng: &mut R, grid: &Grid, occupied: &HashSet<GridPosition>) -> Result<GridPosition> {
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let pos = GridPosition::new(rng.gen_range(0..grid.width()), rng.gen_range(0..grid.height()));
        if !occupied.contains(&pos) {
            return Ok(pos);
        }
    }

    warn!("no free cell after {} random probes, scanning the grid", MAX_SPAWN_ATTEMPTS);

    let free: Vec<GridPosition> = grid.cells().filter(|pos| !occupied.contains(pos)).collect();
    if free.is_empty() {
        return Err(GameError::NoFreeCell);
    }
    Ok(free[rng.gen_range(0..free.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    const RNG_SEED: u64 = 0x5eed_d0_0047;

    #[test]
    fn ages_until_lifetime() {
        let mut donut = Donut::placed(GridPosition::new(1, 1), 6, 3);

        donut.tick();
        donut.tick();
        assert!(!donut.needs_respawn());
        donut.tick();
        assert!(donut.needs_respawn());
        assert_eq!(donut.age(), 3);
    }

    #[test]
    fn respawn_avoids_occupied_cells() {
        let mut rng = StdRng::seed_from_u64(RNG_SEED);
        let grid = Grid::new(6, 4);
        let occupied: HashSet<_> = grid.cells().filter(|p| (p.x + p.y) % 3 != 0).collect();

        let mut donut = Donut::new(45);
        for _ in 0..200 {
            donut.respawn(&mut rng, &grid, &occupied).unwrap();
            assert!(!occupied.contains(&donut.position()));
            assert!(grid.contains(donut.position()));
            assert!(DONUT_VALUES.contains(&donut.value()));
            assert_eq!(donut.age(), 0);
            assert!(!donut.needs_respawn());
        }
    }

    #[test]
    fn finds_the_last_free_cell() {
        let mut rng = StdRng::seed_from_u64(RNG_SEED);
        let grid = Grid::new(31, 23);
        let last = GridPosition::new(30, 22);
        let occupied: HashSet<_> = grid.cells().filter(|p| *p != last).collect();

        let mut donut = Donut::new(45);
        donut.respawn(&mut rng, &grid, &occupied).unwrap();
        assert_eq!(donut.position(), last);
    }

    #[test]
    fn full_grid_is_reported() {
        let mut rng = StdRng::seed_from_u64(RNG_SEED);
        let grid = Grid::new(3, 3);
        let occupied: HashSet<_> = grid.cells().collect();

        let mut donut = Donut::new(45);
        assert!(matches!(donut.respawn(&mut rng, &grid, &occupied), Err(GameError::NoFreeCell)));
        assert!(donut.needs_respawn());
    }
}
