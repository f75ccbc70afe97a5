use std::collections::VecDeque;

use rand::Rng;
use strum::{EnumIter, VariantArray};

use crate::grid::{Cell, Grid};

/// Occupied cells, head first
pub type Body = VecDeque<Cell>;

/// Compass heading, declared in clockwise order
#[derive(EnumIter, VariantArray, Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Dir {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Dir {
    /// Unit step for this heading, y grows downward
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Dir::Up => (0, -1),
            Dir::Right => (1, 0),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
        }
    }

    /// One step clockwise
    pub fn clockwise(self) -> Self {
        Self::VARIANTS[(self as usize + 1) % 4]
    }

    /// One step counterclockwise
    pub fn counterclockwise(self) -> Self {
        Self::VARIANTS[(self as usize + 3) % 4]
    }

    /// Heading after taking a relative action
    pub fn turn(self, action: Action) -> Self {
        match action {
            Action::Straight => self,
            Action::Right => self.clockwise(),
            Action::Left => self.counterclockwise(),
        }
    }
}

/// A move relative to the current heading
///
/// Declaration order is the tie-break order for greedy selection.
#[derive(EnumIter, VariantArray, Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Action {
    Straight = 0,
    Right = 1,
    Left = 2,
}

impl Action {
    pub const COUNT: usize = 3;

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Uniformly random action
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::VARIANTS[rng.gen_range(0..Self::COUNT)]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Snake {
    body: Body,
    dir: Dir,
}

impl Snake {
    /// A snake of length 1 at `head`
    pub fn new(head: Cell, dir: Dir) -> Self {
        Self {
            body: VecDeque::from([head]),
            dir,
        }
    }

    /// A snake with an explicit body, head first
    ///
    /// **Panics** if `body` is empty
    pub fn from_body(body: impl IntoIterator<Item = Cell>, dir: Dir) -> Self {
        let body = Body::from_iter(body);
        assert!(!body.is_empty(), "Snake body must not be empty.");
        Self { body, dir }
    }

    /// A single-cell snake at the grid center with a random heading
    pub fn spawn<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Self {
        let mut snake = Self::new(grid.center(), Dir::Up);
        snake.reset(grid, rng);
        snake
    }

    pub fn reset<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R) {
        self.body.clear();
        self.body.push_back(grid.center());
        self.dir = Dir::VARIANTS[rng.gen_range(0..4)];
    }

    pub fn head(&self) -> Cell {
        *self.body.front().expect("body is not empty")
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn dir(&self) -> Dir {
        self.dir
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Turn by `action`, push the new head and drop the tail
    pub fn advance(&mut self, action: Action) {
        self.dir = self.dir.turn(action);
        let new_head = self.head().offset(self.dir.delta());
        self.body.push_front(new_head);
        self.body.pop_back();
    }

    /// Duplicate the tail so the next [`advance`](Self::advance) keeps it
    pub fn grow(&mut self) {
        let tail = *self.body.back().expect("body is not empty");
        self.body.push_back(tail);
    }

    /// Whether the head left the grid or ran into the rest of the body
    pub fn is_collided(&self, grid: &Grid) -> bool {
        let head = self.head();
        !grid.in_bounds(head) || self.body.iter().skip(1).any(|&c| c == head)
    }
}
