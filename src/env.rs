use std::ops::Index;

use rand::Rng;

use crate::{
    food::Food,
    grid::Grid,
    snake::{Action, Snake},
    state::{self, StateVector},
};

/// Reward for running into a wall or the snake's own body
pub const COLLISION_REWARD: f32 = -100.0;
/// Reward for eating food
pub const FOOD_REWARD: f32 = 50.0;
/// Reward for any other move
pub const STEP_REWARD: f32 = -1.0;

/// Result of a single environment step
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    /// The episode goes on
    Continue { reward: f32 },
    /// The snake collided, the episode is over
    Terminate { reward: f32 },
}

impl Outcome {
    pub fn reward(&self) -> f32 {
        match *self {
            Outcome::Continue { reward } | Outcome::Terminate { reward } => reward,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Outcome::Terminate { .. })
    }
}

/// Named per-episode metrics, accumulated while an episode runs
#[derive(Debug, Clone)]
pub struct Report {
    keys: Vec<&'static str>,
    values: Vec<f64>,
}

impl Report {
    pub fn new(keys: Vec<&'static str>) -> Self {
        let values = vec![0.0; keys.len()];
        Self { keys, values }
    }

    pub fn keys(&self) -> &[&'static str] {
        &self.keys
    }

    /// Mutable access to a metric
    ///
    /// **Panics** if `key` was not registered
    pub fn entry(&mut self, key: &str) -> &mut f64 {
        let i = self.position(key);
        &mut self.values[i]
    }

    /// Return the metrics in key order and zero them
    pub fn take(&mut self) -> Vec<f64> {
        let zeros = vec![0.0; self.values.len()];
        std::mem::replace(&mut self.values, zeros)
    }

    fn position(&self, key: &str) -> usize {
        self.keys
            .iter()
            .position(|&k| k == key)
            .unwrap_or_else(|| panic!("Unknown report key `{key}`."))
    }
}

impl Index<&str> for Report {
    type Output = f64;

    fn index(&self, key: &str) -> &Self::Output {
        &self.values[self.position(key)]
    }
}

/// A field for the game of snake with a single piece of food
pub struct SnakeEnv {
    grid: Grid,
    snake: Snake,
    food: Food,
    score: u32,
    pub report: Report,
}

impl SnakeEnv {
    /// Fresh snake at the grid center and food on a free cell
    pub fn new<R: Rng + ?Sized>(grid: Grid, rng: &mut R) -> Self {
        let snake = Snake::spawn(&grid, rng);
        let food = Food::spawn(&grid, snake.body(), rng);
        Self::from_parts(grid, snake, food)
    }

    /// Environment in an explicit configuration
    pub fn from_parts(grid: Grid, snake: Snake, food: Food) -> Self {
        Self {
            grid,
            snake,
            food,
            score: 0,
            report: Report::new(vec!["score", "reward", "steps"]),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    /// Food eaten this episode
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Encode the current state
    pub fn observe(&self) -> StateVector {
        state::encode(&self.grid, &self.snake, &self.food)
    }

    /// Move the snake and settle collisions and food
    pub fn step<R: Rng + ?Sized>(&mut self, action: Action, rng: &mut R) -> Outcome {
        *self.report.entry("steps") += 1.0;
        self.snake.advance(action);

        let outcome = if self.snake.is_collided(&self.grid) {
            log::debug!("collision at {:?}", self.snake.head());
            Outcome::Terminate {
                reward: COLLISION_REWARD,
            }
        } else if self.snake.head() == self.food.position() {
            self.snake.grow();
            self.food.respawn(&self.grid, self.snake.body(), rng);
            self.score += 1;
            *self.report.entry("score") += 1.0;
            log::debug!("food eaten, score {}", self.score);
            Outcome::Continue {
                reward: FOOD_REWARD,
            }
        } else {
            Outcome::Continue {
                reward: STEP_REWARD,
            }
        };

        *self.report.entry("reward") += f64::from(outcome.reward());
        outcome
    }

    /// Start a new episode
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.snake.reset(&self.grid, rng);
        self.food.respawn(&self.grid, self.snake.body(), rng);
        self.score = 0;
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use crate::{grid::Cell, snake::Dir};

    use super::*;

    #[test]
    fn snake_actions() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut env = SnakeEnv::from_parts(
            Grid::new(6, 6),
            Snake::new(Cell::new(1, 1), Dir::Down),
            Food::at(Cell::new(2, 2)),
        );

        let outcome = env.step(Action::Straight, &mut rng);
        assert_eq!(outcome, Outcome::Continue { reward: STEP_REWARD });
        assert_eq!(env.snake().head(), Cell::new(1, 2), "Down action works");

        let outcome = env.step(Action::Left, &mut rng);
        assert_eq!(outcome, Outcome::Continue { reward: FOOD_REWARD });
        assert_eq!(env.snake().head(), Cell::new(2, 2), "Turned right");
        assert_eq!(env.score(), 1, "Score counts food");
        assert_ne!(
            env.food().position(),
            Cell::new(2, 2),
            "Food was moved after being eaten"
        );
        assert!(
            !env.snake().body().contains(&env.food().position()),
            "Food respawned off the body"
        );
        env.food = Food::at(Cell::new(5, 5));

        env.step(Action::Straight, &mut rng);
        assert_eq!(env.snake().len(), 2, "Grew by one");

        assert_eq!(env.report["steps"], 3.0, "Report steps correct");
        assert_eq!(env.report["score"], 1.0, "Report score correct");
    }

    #[test]
    fn collision_terminates() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut env = SnakeEnv::from_parts(
            Grid::new(3, 3),
            Snake::new(Cell::new(0, 0), Dir::Up),
            Food::at(Cell::new(2, 2)),
        );

        let outcome = env.step(Action::Straight, &mut rng);
        assert!(outcome.is_terminal());
        assert_eq!(outcome.reward(), COLLISION_REWARD);
        assert_eq!(env.report.take(), vec![0.0, -100.0, 1.0]);
        assert_eq!(env.report.take(), vec![0.0, 0.0, 0.0], "Take zeroes");
    }

    #[test]
    fn reset_restores_initial_conditions() {
        let mut rng = StdRng::seed_from_u64(9);
        let grid = Grid::new(5, 5);
        let mut env = SnakeEnv::from_parts(
            grid,
            Snake::from_body([Cell::new(1, 1), Cell::new(1, 2)], Dir::Up),
            Food::at(Cell::new(2, 2)),
        );
        env.score = 4;

        env.reset(&mut rng);
        assert_eq!(env.score(), 0);
        assert_eq!(env.snake().body().len(), 1);
        assert_eq!(env.snake().head(), grid.center());
        assert_ne!(env.food().position(), grid.center(), "Food off the new head");
    }
}
