use std::collections::{HashSet, VecDeque};
use std::iter::repeat;

use crate::donut::Donut;
use crate::grid::{Direction, Grid, GridPosition};
use crate::scene::{Costume, Sprite};

/// Segments every snake gets for free at the start of a level.
pub const INITIAL_TAIL_LENGTH: u32 = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Head {
    position: GridPosition,
    direction: Direction,
    player: Player,
}

impl Head {
    fn advance(&mut self, grid: &Grid) {
        self.position = grid.step(self.position, self.direction);
    }
}

impl Sprite for Head {
    fn position(&self) -> GridPosition {
        self.position
    }

    fn costume(&self) -> Costume {
        Costume::Head(self.player, self.direction)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    position: GridPosition,
    player: Player,
}

impl Segment {
    fn follow(&mut self, ahead: GridPosition) {
        self.position = ahead;
    }
}

impl Sprite for Segment {
    fn position(&self) -> GridPosition {
        self.position
    }

    fn costume(&self) -> Costume {
        Costume::Segment(self.player)
    }
}

/// A head dragging its tail around the grid.
///
/// The tail is stored rear first: `tail[0]` is the newest, rearmost segment
/// and the last element sits right behind the head.
#[derive(Clone, Debug)]
pub struct Snake {
    head: Head,
    tail: Vec<Segment>,
    score: u32,
    turns: VecDeque<Direction>,
    start: GridPosition,
    start_direction: Direction,
    grid: Grid,
}

impl Snake {
    pub fn new(player: Player, start: GridPosition, direction: Direction, grid: Grid) -> Self {
        let head = Head { position: start, direction, player };
        let mut snake = Snake {
            head,
            tail: vec![],
            score: 0,
            turns: VecDeque::new(),
            start,
            start_direction: direction,
            grid,
        };
        snake.reset();
        snake
    }

    pub fn player(&self) -> Player {
        self.head.player
    }

    pub fn head(&self) -> &Head {
        &self.head
    }

    pub fn head_position(&self) -> GridPosition {
        self.head.position
    }

    pub fn direction(&self) -> Direction {
        self.head.direction
    }

    pub fn tail(&self) -> &[Segment] {
        &self.tail
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn start(&self) -> GridPosition {
        self.start
    }

    pub fn start_direction(&self) -> Direction {
        self.start_direction
    }

    /// The cell a reset puts the head on.
    pub fn reset_position(&self) -> GridPosition {
        self.grid.step(self.start, self.start_direction)
    }

    pub fn tail_positions(&self) -> impl Iterator<Item = GridPosition> + '_ {
        self.tail.iter().map(|segment| segment.position)
    }

    /// Every cell this snake covers, head included.
    pub fn body_positions(&self) -> impl Iterator<Item = GridPosition> + '_ {
        self.tail_positions().chain(Some(self.head.position))
    }

    /// Buffers a key press; it is applied on one of the following ticks.
    pub fn queue_turn(&mut self, direction: Direction) {
        self.turns.push_back(direction);
    }

    #[cfg(test)]
    pub fn pending_turns(&self) -> usize {
        self.turns.len()
    }

    /// Turning back onto the own neck is silently refused.
    pub fn turn(&mut self, new_direction: Direction) {
        if new_direction != self.head.direction.opposite() {
            self.head.direction = new_direction;
        }
    }

    pub fn move_tick(&mut self) {
        if let Some(dir) = self.turns.pop_front() {
            self.turn(dir);
        }

        // Rear to front, so every segment still sees where its successor was
        for i in 1..self.tail.len() {
            let ahead = self.tail[i].position;
            self.tail[i - 1].follow(ahead);
        }

        if let Some(front) = self.tail.last_mut() {
            front.follow(self.head.position);
        }

        self.head.advance(&self.grid);
    }

    /// New segments pile up on the rear end and unfurl over the next ticks.
    /// Only growth of a snake that already has a tail is scored.
    pub fn grow(&mut self, amount: u32) {
        let origin = match self.tail.first() {
            Some(rear) => {
                self.score += amount;
                rear.position
            },
            None => self.head.position,
        };

        let segment = Segment { position: origin, player: self.head.player };
        self.tail.splice(0..0, repeat(segment).take(amount as usize));
    }

    pub fn reset(&mut self) {
        self.head.direction = self.start_direction;
        self.head.position = self.start;
        self.tail.clear();
        self.grow(INITIAL_TAIL_LENGTH);
        self.score = 0;
        self.turns.clear();

        // Step off the start cell so the head does not land on its own tail
        self.head.position = self.reset_position();
    }

    pub fn collides_with(&self, obstacles: &HashSet<GridPosition>) -> bool {
        obstacles.contains(&self.head.position)
    }

    /// Eats every donut under the head and returns the values eaten.
    pub fn eat(&mut self, donuts: &mut [Donut]) -> Vec<u32> {
        let head = self.head.position;
        let mut eaten = vec![];

        for donut in donuts.iter_mut().filter(|d| d.position() == head) {
            self.grow(donut.value());
            donut.mark_eaten();
            eaten.push(donut.value());
        }

        eaten
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Direction::*;
    use pretty_assertions::assert_eq;

    fn snake() -> Snake {
        Snake::new(Player::One, GridPosition::new(15, 11), Right, Grid::default())
    }

    #[test]
    fn fresh_snake_has_free_tail() {
        let s = snake();

        assert_eq!(s.head_position(), GridPosition::new(16, 11));
        assert_eq!(s.tail().len(), INITIAL_TAIL_LENGTH as usize);
        assert!(s.tail_positions().all(|p| p == GridPosition::new(15, 11)));
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn refuses_to_reverse() {
        for dir in Direction::ALL {
            let mut s = Snake::new(Player::One, GridPosition::new(5, 5), dir, Grid::default());
            s.turn(dir.opposite());
            assert_eq!(s.direction(), dir);
        }
    }

    #[test]
    fn turns_sideways() {
        let mut s = snake();
        s.turn(Up);
        assert_eq!(s.direction(), Up);
        s.turn(Left);
        assert_eq!(s.direction(), Left);
    }

    #[test]
    fn buffered_turns_apply_one_per_tick() {
        let mut s = snake();
        s.queue_turn(Up);
        s.queue_turn(Left);

        s.move_tick();
        assert_eq!(s.direction(), Up);
        assert_eq!(s.pending_turns(), 1);

        s.move_tick();
        assert_eq!(s.direction(), Left);
        assert_eq!(s.head_position(), GridPosition::new(15, 10));
    }

    #[test]
    fn buffered_reverse_is_dropped() {
        let mut s = snake();
        s.queue_turn(Left);
        s.move_tick();

        assert_eq!(s.direction(), Right);
        assert_eq!(s.pending_turns(), 0);
    }

    #[test]
    fn growth_of_empty_tail_is_free() {
        let mut s = snake();
        s.tail.clear();
        s.grow(5);

        assert_eq!(s.score(), 0);
        assert_eq!(s.tail().len(), 5);
        assert!(s.tail_positions().all(|p| p == s.head_position()));
    }

    #[test]
    fn growth_of_existing_tail_scores() {
        let mut s = snake();
        s.grow(9);

        assert_eq!(s.score(), 9);
        assert_eq!(s.tail().len(), 11);
    }

    #[test]
    fn chain_follows_the_head() {
        let mut s = snake();
        s.grow(3);
        for dir in [Right, Down, Down, Left, Down] {
            s.queue_turn(dir);
            s.move_tick();
        }

        let before: Vec<_> = s.tail_positions().collect();
        let head_before = s.head_position();
        s.move_tick();
        let after: Vec<_> = s.tail_positions().collect();

        assert_eq!(after.len(), before.len());
        assert_eq!(&after[..after.len() - 1], &before[1..]);
        assert_eq!(after[after.len() - 1], head_before);
    }

    #[test]
    fn grown_segments_unfurl() {
        let mut s = snake();
        s.move_tick();
        s.grow(3);
        let rear = s.tail()[0].position();
        assert!(s.tail()[..4].iter().all(|seg| seg.position() == rear));

        s.move_tick();
        let positions: Vec<_> = s.tail_positions().collect();
        assert_eq!(positions[3], GridPosition::new(16, 11));
        assert_eq!(positions[2], rear);
    }

    #[test]
    fn reset_restores_level_start() {
        let mut s = snake();
        s.grow(6);
        s.queue_turn(Down);
        s.queue_turn(Left);
        s.move_tick();
        s.reset();

        assert_eq!(s.head_position(), GridPosition::new(16, 11));
        assert_eq!(s.direction(), Right);
        assert_eq!(s.tail().len(), 2);
        assert_eq!(s.score(), 0);
        assert_eq!(s.pending_turns(), 0);
    }

    #[test]
    fn reset_position_ignores_current_heading() {
        let mut s = snake();
        s.queue_turn(Up);
        s.move_tick();

        assert_eq!(s.direction(), Up);
        assert_eq!(s.start_direction(), Right);
        assert_eq!(s.reset_position(), GridPosition::new(16, 11));
        s.reset();
        assert_eq!(s.head_position(), s.reset_position());
    }

    #[test]
    fn collision_is_positional() {
        let s = snake();
        let mut obstacles: HashSet<_> = s.tail_positions().collect();
        assert!(!s.collides_with(&obstacles));

        obstacles.insert(GridPosition::new(16, 11));
        assert!(s.collides_with(&obstacles));
    }

    #[test]
    fn eats_donut_under_head() {
        let mut s = snake();
        let mut donuts = [Donut::placed(GridPosition::new(16, 11), 6, 45), Donut::placed(GridPosition::new(3, 3), 9, 45)];

        assert_eq!(s.eat(&mut donuts), vec![6]);
        assert_eq!(s.score(), 6);
        assert_eq!(s.tail().len(), 8);
        assert!(donuts[0].needs_respawn());
        assert!(!donuts[1].needs_respawn());
    }
}
