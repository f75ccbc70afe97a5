use std::{error::Error, fs, io, path::Path};

use rand::{rngs::StdRng, SeedableRng};
use snake_q::{
    algo::QLearningAgent,
    grid::Grid,
    train::{EpisodeStats, Frame, Renderer, Trainer, TrainerConfig},
};

const NUM_EPISODES: u32 = 2000;
const SEED: u64 = 7;

/// Writes one CSV row per finished episode
struct CsvReport {
    wtr: csv::Writer<fs::File>,
    best: f64,
}

impl Renderer for CsvReport {
    fn render(&mut self, _frame: Frame<'_>) -> io::Result<()> {
        Ok(())
    }

    fn episode_end(&mut self, stats: &EpisodeStats) -> io::Result<()> {
        if stats.episode == 0 {
            let mut header = vec!["episode"];
            header.extend(&stats.keys);
            self.wtr.write_record(&header)?;
        }
        self.best = self.best.max(stats.data[0]);

        let mut record = vec![stats.episode.to_string()];
        record.extend(stats.data.iter().map(f64::to_string));
        self.wtr.write_record(&record)?;
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let path = Path::new("demos/headless_snake/out");
    fs::create_dir_all(path)?;

    let mut report = CsvReport {
        wtr: csv::Writer::from_path(path.join("episodes.csv"))?,
        best: 0.0,
    };

    let agent: QLearningAgent = QLearningAgent::default();
    let mut trainer = Trainer::new(
        Grid::default(),
        agent,
        StdRng::seed_from_u64(SEED),
        TrainerConfig::default(),
    );

    while trainer.deaths() < NUM_EPISODES {
        trainer.tick(&mut report)?;
    }
    report.wtr.flush()?;

    println!(
        "{} episodes, best score {}, epsilon {:.3}, {} learned state-action pairs",
        trainer.deaths(),
        report.best,
        trainer.agent().epsilon(),
        trainer.agent().q_table().len(),
    );

    Ok(())
}
