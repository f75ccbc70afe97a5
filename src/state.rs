use crate::{
    food::Food,
    grid::{Cell, Grid},
    snake::{Dir, Snake},
};

/// Number of boolean features in a [`StateVector`]
pub const FEATURE_COUNT: usize = 11;

/// Number of distinct state vectors
pub const STATE_COUNT: usize = 1 << FEATURE_COUNT;

/// Snapshot of the snake's surroundings as 11 boolean features
///
/// `[danger_ahead, danger_right, danger_left, moving_left, moving_right, moving_up, moving_down, food_left, food_right, food_up, food_down]`
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct StateVector([bool; FEATURE_COUNT]);

impl StateVector {
    pub const fn new(features: [bool; FEATURE_COUNT]) -> Self {
        Self(features)
    }

    pub const fn features(&self) -> [bool; FEATURE_COUNT] {
        self.0
    }

    /// Features as `0`/`1`
    pub fn bits(&self) -> [u8; FEATURE_COUNT] {
        self.0.map(u8::from)
    }

    /// Packed index, bit `i` holds feature `i`
    pub fn index(&self) -> usize {
        self.0
            .iter()
            .enumerate()
            .fold(0, |acc, (i, &f)| acc | (usize::from(f) << i))
    }

    /// Inverse of [`index`](Self::index), higher bits are ignored
    pub fn from_index(index: usize) -> Self {
        Self(std::array::from_fn(|i| (index >> i) & 1 == 1))
    }
}

/// Encode the state seen from the snake's head
pub fn encode(grid: &Grid, snake: &Snake, food: &Food) -> StateVector {
    let head = snake.head();
    let dir = snake.dir();
    let target = food.position();

    let danger = |d: Dir| is_dangerous(grid, snake, head.offset(d.delta()));

    StateVector([
        danger(dir),
        danger(dir.clockwise()),
        danger(dir.counterclockwise()),
        dir == Dir::Left,
        dir == Dir::Right,
        dir == Dir::Up,
        dir == Dir::Down,
        target.x < head.x,
        target.x > head.x,
        target.y < head.y,
        target.y > head.y,
    ])
}

/// Out of bounds or covered by any body cell, head included
fn is_dangerous(grid: &Grid, snake: &Snake, cell: Cell) -> bool {
    !grid.in_bounds(cell) || snake.body().contains(&cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_of_small_grid() {
        let grid = Grid::new(2, 2);
        let snake = Snake::new(Cell::new(1, 1), Dir::Right);
        let food = Food::at(Cell::new(0, 0));

        let state = encode(&grid, &snake, &food);
        assert_eq!(
            state.bits(),
            [1, 1, 0, 0, 1, 0, 0, 1, 0, 1, 0],
            "Walls ahead and right, food up-left"
        );
    }

    #[test]
    fn relative_danger_from_body() {
        let grid = Grid::new(10, 10);
        // heading up, body wraps around the right side of the head
        let snake = Snake::from_body(
            [
                Cell::new(4, 4),
                Cell::new(4, 5),
                Cell::new(5, 5),
                Cell::new(5, 4),
                Cell::new(5, 3),
            ],
            Dir::Up,
        );
        let food = Food::at(Cell::new(4, 8));

        let state = encode(&grid, &snake, &food);
        assert_eq!(
            state.bits(),
            [0, 1, 0, 0, 0, 1, 0, 0, 0, 0, 1],
            "Danger right, food straight below"
        );
    }

    #[test]
    fn food_ties_are_false() {
        let grid = Grid::new(5, 5);
        let snake = Snake::new(Cell::new(2, 2), Dir::Down);
        let food = Food::at(Cell::new(2, 2));

        let features = encode(&grid, &snake, &food).features();
        assert!(features[7..].iter().all(|&f| !f), "No food direction on tie");
        assert!(features[6], "Moving down");
        assert_eq!(
            features[3..7].iter().filter(|&&f| f).count(),
            1,
            "Exactly one heading flag"
        );
    }

    #[test]
    fn index_packing() {
        let state = StateVector::new([
            true, false, false, false, false, false, false, false, false, false, true,
        ]);
        assert_eq!(state.index(), 1 | 1 << 10);
        assert_eq!(StateVector::from_index(state.index()), state);
        assert_eq!(StateVector::default().index(), 0);
        assert_eq!(StateVector::new([true; FEATURE_COUNT]).index(), STATE_COUNT - 1);
    }
}
