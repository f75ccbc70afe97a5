/// Q-learning agent and its value table
pub mod algo;

/// Implementations of strategies for time-decaying hyperparameters
pub mod decay;

/// Snake environment, step outcomes and episode reports
pub mod env;

/// Exploration policies
pub mod exploration;

/// Food placement
pub mod food;

/// Playing field geometry
pub mod grid;

/// Snake body, headings and relative actions
pub mod snake;

/// Discrete state encoding
pub mod state;

/// Training loop and its rendering/input seams
pub mod train;

/// Terminal front end
#[cfg(feature = "viz")]
pub mod viz;

mod util;

pub use algo::{QLearningAgent, QLearningAgentConfig};
pub use env::{Outcome, SnakeEnv};
pub use grid::{Cell, Grid};
pub use snake::{Action, Dir};
pub use state::StateVector;
pub use train::{InputSource, Renderer, Trainer, TrainerConfig};
