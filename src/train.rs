use std::{
    io, thread,
    time::{Duration, Instant},
};

use rand::Rng;

use crate::{
    algo::QLearningAgent,
    decay::{self, Decay},
    env::{Outcome, SnakeEnv},
    grid::{Cell, Grid},
    snake::Body,
};

/// Pacing of [`Trainer::run`]
#[derive(Debug, Clone, PartialEq)]
pub struct TrainerConfig {
    /// Upper bound on ticks per second
    ///
    /// **Default**: `90`
    pub tick_rate: u32,
    /// Pause after every collision
    ///
    /// **Default**: `200ms`
    pub cooldown: Duration,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            tick_rate: 90,
            cooldown: Duration::from_millis(200),
        }
    }
}

/// Read-only view of the game handed to a [`Renderer`] once per tick
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub grid: &'a Grid,
    pub body: &'a Body,
    pub food: Cell,
    pub score: u32,
    pub deaths: u32,
}

/// Metrics of a finished episode, in the order of [`EpisodeStats::keys`]
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeStats {
    pub episode: u32,
    pub keys: Vec<&'static str>,
    pub data: Vec<f64>,
}

/// Draws the game
pub trait Renderer {
    fn render(&mut self, frame: Frame<'_>) -> io::Result<()>;

    /// Called once per finished episode
    fn episode_end(&mut self, _stats: &EpisodeStats) -> io::Result<()> {
        Ok(())
    }
}

/// Non-blocking source of the quit signal
pub trait InputSource {
    fn quit_requested(&mut self) -> io::Result<bool>;
}

impl<R: Renderer, I> Renderer for (R, I) {
    fn render(&mut self, frame: Frame<'_>) -> io::Result<()> {
        self.0.render(frame)
    }

    fn episode_end(&mut self, stats: &EpisodeStats) -> io::Result<()> {
        self.0.episode_end(stats)
    }
}

impl<R, I: InputSource> InputSource for (R, I) {
    fn quit_requested(&mut self) -> io::Result<bool> {
        self.1.quit_requested()
    }
}

/// A renderer that draws nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _frame: Frame<'_>) -> io::Result<()> {
        Ok(())
    }
}

/// Drives the snake environment and the learning agent one tick at a time
pub struct Trainer<R: Rng, D: Decay = decay::Geometric> {
    env: SnakeEnv,
    agent: QLearningAgent<D>,
    rng: R,
    deaths: u32,
    config: TrainerConfig,
}

impl<R: Rng, D: Decay> Trainer<R, D> {
    /// Start from a fresh environment on `grid`
    pub fn new(grid: Grid, agent: QLearningAgent<D>, mut rng: R, config: TrainerConfig) -> Self {
        let env = SnakeEnv::new(grid, &mut rng);
        Self::with_env(env, agent, rng, config)
    }

    /// Start from an explicit environment
    pub fn with_env(
        env: SnakeEnv,
        agent: QLearningAgent<D>,
        rng: R,
        config: TrainerConfig,
    ) -> Self {
        Self {
            env,
            agent,
            rng,
            deaths: 0,
            config,
        }
    }

    pub fn env(&self) -> &SnakeEnv {
        &self.env
    }

    pub fn agent(&self) -> &QLearningAgent<D> {
        &self.agent
    }

    /// Finished episodes
    pub fn deaths(&self) -> u32 {
        self.deaths
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// One step: act, learn from the transition, render, reset on collision
    ///
    /// Does not sleep, the collision cooldown is left to [`run`](Self::run).
    pub fn tick(&mut self, renderer: &mut impl Renderer) -> io::Result<Outcome> {
        let state = self.env.observe();
        let action = self.agent.choose_action(state, &mut self.rng);
        let outcome = self.env.step(action, &mut self.rng);
        let next_state = self.env.observe();
        self.agent.learn(state, action, outcome.reward(), next_state);

        renderer.render(Frame {
            grid: self.env.grid(),
            body: self.env.snake().body(),
            food: self.env.food().position(),
            score: self.env.score(),
            deaths: self.deaths,
        })?;

        if outcome.is_terminal() {
            self.finish_episode(renderer)?;
        }

        Ok(outcome)
    }

    fn finish_episode(&mut self, renderer: &mut impl Renderer) -> io::Result<()> {
        log::info!(
            "episode {} score {} steps {} reward {} epsilon {:.3} learned {}",
            self.agent.episode(),
            self.env.score(),
            self.env.report["steps"],
            self.env.report["reward"],
            self.agent.epsilon(),
            self.agent.q_table().len(),
        );
        let stats = EpisodeStats {
            episode: self.agent.episode(),
            keys: self.env.report.keys().to_vec(),
            data: self.env.report.take(),
        };

        self.env.reset(&mut self.rng);
        self.deaths += 1;
        self.agent.decay();

        renderer.episode_end(&stats)
    }

    /// Tick until the front end asks to quit, pacing to the configured tick rate
    ///
    /// A separate renderer and input source can be passed as a tuple.
    pub fn run(&mut self, frontend: &mut (impl Renderer + InputSource)) -> io::Result<()> {
        let period = Duration::from_secs(1) / self.config.tick_rate.max(1);
        let mut next_tick = Instant::now() + period;

        loop {
            if self.tick(&mut *frontend)?.is_terminal() {
                thread::sleep(self.config.cooldown);
            }

            if frontend.quit_requested()? {
                log::info!("quit after {} episodes", self.deaths);
                return Ok(());
            }

            let now = Instant::now();
            if next_tick > now {
                thread::sleep(next_tick - now);
                next_tick += period;
            } else {
                next_tick = now + period;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use crate::{
        algo::QLearningAgentConfig,
        env::{COLLISION_REWARD, STEP_REWARD},
        exploration::EpsilonGreedy,
        food::Food,
        snake::{Action, Dir, Snake},
    };

    use super::*;

    #[derive(Default)]
    struct Recorder {
        frames: Vec<(Vec<Cell>, Cell, u32, u32)>,
        episodes: Vec<EpisodeStats>,
    }

    impl Renderer for Recorder {
        fn render(&mut self, frame: Frame<'_>) -> io::Result<()> {
            self.frames.push((
                frame.body.iter().copied().collect(),
                frame.food,
                frame.score,
                frame.deaths,
            ));
            Ok(())
        }

        fn episode_end(&mut self, stats: &EpisodeStats) -> io::Result<()> {
            self.episodes.push(stats.clone());
            Ok(())
        }
    }

    struct QuitAfter(u32);

    impl InputSource for QuitAfter {
        fn quit_requested(&mut self) -> io::Result<bool> {
            self.0 = self.0.saturating_sub(1);
            Ok(self.0 == 0)
        }
    }

    fn greedy_agent() -> QLearningAgent<decay::Constant> {
        QLearningAgent::new(QLearningAgentConfig {
            exploration: EpsilonGreedy::new(decay::Constant::new(0.0)),
            alpha: 0.1,
            gamma: 0.9,
        })
    }

    fn trainer(env: SnakeEnv) -> Trainer<StdRng, decay::Constant> {
        Trainer::with_env(
            env,
            greedy_agent(),
            StdRng::seed_from_u64(42),
            TrainerConfig::default(),
        )
    }

    #[test]
    fn collision_resets_episode() {
        let grid = Grid::new(2, 2);
        let env = SnakeEnv::from_parts(
            grid,
            Snake::new(Cell::new(1, 1), Dir::Right),
            Food::at(Cell::new(0, 0)),
        );
        let state = env.observe();
        let mut trainer = trainer(env);
        let mut recorder = Recorder::default();

        let outcome = trainer.tick(&mut recorder).unwrap();
        assert_eq!(outcome, Outcome::Terminate { reward: COLLISION_REWARD });
        assert_eq!(trainer.deaths(), 1, "Death counted");
        assert_eq!(trainer.env().score(), 0, "Score reset");
        assert_eq!(trainer.env().snake().len(), 1);
        assert_eq!(trainer.env().snake().head(), grid.center());
        assert_eq!(trainer.agent().episode(), 1, "Exploration decayed once");
        // 0 + 0.1 * (-100 + 0.9 * 0 - 0)
        assert_eq!(trainer.agent().get_q(state, Action::Straight), -10.0);

        let (body, _, score, deaths) = &recorder.frames[0];
        assert_eq!(body, &vec![Cell::new(2, 1)], "Rendered before reset");
        assert_eq!((*score, *deaths), (0, 0));

        assert_eq!(recorder.episodes.len(), 1);
        assert_eq!(recorder.episodes[0].episode, 0);
        assert_eq!(recorder.episodes[0].data, vec![0.0, -100.0, 1.0]);
    }

    #[test]
    fn next_state_sees_respawned_food() {
        let grid = Grid::new(8, 8);
        let env = SnakeEnv::from_parts(
            grid,
            Snake::new(Cell::new(3, 3), Dir::Right),
            Food::at(Cell::new(4, 3)),
        );
        let state = env.observe();
        let mut trainer = trainer(env);

        let outcome = trainer.tick(&mut NullRenderer).unwrap();
        assert!(!outcome.is_terminal());
        assert_eq!(trainer.env().score(), 1);
        assert_eq!(trainer.agent().get_q(state, Action::Straight), 5.0);

        let next = trainer.env().observe();
        let food = trainer.env().food().position();
        assert_eq!(next.features()[7], food.x < 4, "Food flags track the new food");
        assert_eq!(next.features()[8], food.x > 4, "Food flags track the new food");
    }

    #[test]
    fn plain_move_costs_one() {
        let env = SnakeEnv::from_parts(
            Grid::new(8, 8),
            Snake::new(Cell::new(3, 3), Dir::Up),
            Food::at(Cell::new(7, 7)),
        );
        let state = env.observe();
        let mut trainer = trainer(env);

        let outcome = trainer.tick(&mut NullRenderer).unwrap();
        assert_eq!(outcome, Outcome::Continue { reward: STEP_REWARD });
        assert!((trainer.agent().get_q(state, Action::Straight) + 0.1).abs() < 1e-6);
        assert_eq!(trainer.deaths(), 0);
    }

    #[test]
    fn run_stops_on_quit() {
        let mut trainer = Trainer::new(
            Grid::new(6, 6),
            greedy_agent(),
            StdRng::seed_from_u64(1),
            TrainerConfig {
                tick_rate: 10_000,
                cooldown: Duration::ZERO,
            },
        );
        let mut frontend = (Recorder::default(), QuitAfter(25));

        trainer.run(&mut frontend).unwrap();
        let recorder = frontend.0;
        assert_eq!(recorder.frames.len(), 25, "One frame per tick");
        assert_eq!(
            recorder.episodes.len() as u32,
            trainer.deaths(),
            "One summary per death"
        );
    }
}
