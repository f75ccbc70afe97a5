use std::error::Error;

use log::LevelFilter;
use snake_q::{
    algo::QLearningAgent,
    grid::Grid,
    train::{Trainer, TrainerConfig},
    viz::{self, TerminalRenderer},
};

fn main() -> Result<(), Box<dyn Error>> {
    viz::init_logger(LevelFilter::Info)?;

    let agent: QLearningAgent = QLearningAgent::default();
    let config = TrainerConfig {
        tick_rate: 90, // raise for faster training
        ..Default::default()
    };
    let mut trainer = Trainer::new(Grid::default(), agent, rand::thread_rng(), config);

    let mut ui = TerminalRenderer::new()?;
    trainer.run(&mut ui)?;

    Ok(())
}
