use rand::Rng;

use crate::{
    grid::{Cell, Grid},
    snake::Body,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Food {
    position: Cell,
}

impl Food {
    pub const fn at(position: Cell) -> Self {
        Self { position }
    }

    /// Food placed on a random cell not covered by `occupied`
    pub fn spawn<R: Rng + ?Sized>(grid: &Grid, occupied: &Body, rng: &mut R) -> Self {
        let mut food = Self::at(Cell::default());
        food.respawn(grid, occupied, rng);
        food
    }

    pub const fn position(&self) -> Cell {
        self.position
    }

    /// Rejection-sample a uniformly random free cell
    ///
    /// Never returns if every cell is occupied.
    pub fn respawn<R: Rng + ?Sized>(&mut self, grid: &Grid, occupied: &Body, rng: &mut R) {
        loop {
            let cell = Cell::new(
                rng.gen_range(0..grid.width()),
                rng.gen_range(0..grid.height()),
            );
            if !occupied.contains(&cell) {
                self.position = cell;
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn never_spawns_on_body() {
        let grid = Grid::new(3, 3);
        let mut rng = StdRng::seed_from_u64(11);
        let occupied = Body::from_iter(
            (0..3)
                .flat_map(|x| (0..3).map(move |y| Cell::new(x, y)))
                .filter(|&c| c != Cell::new(2, 1)),
        );

        let mut food = Food::spawn(&grid, &occupied, &mut rng);
        for _ in 0..20 {
            assert_eq!(food.position(), Cell::new(2, 1), "Only free cell chosen");
            food.respawn(&grid, &occupied, &mut rng);
        }
    }

    #[test]
    fn spawns_in_bounds() {
        let grid = Grid::new(5, 4);
        let mut rng = StdRng::seed_from_u64(5);
        let occupied = Body::from([Cell::new(2, 2), Cell::new(2, 3)]);
        let mut food = Food::at(Cell::new(2, 2));
        for _ in 0..200 {
            food.respawn(&grid, &occupied, &mut rng);
            assert!(grid.in_bounds(food.position()), "Food in bounds");
            assert!(!occupied.contains(&food.position()), "Food off the body");
        }
    }
}
