pub mod q_table;

pub use q_table::{QLearningAgent, QLearningAgentConfig, QTable};
