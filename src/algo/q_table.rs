use rand::Rng;
use strum::VariantArray;

use crate::{
    assert_interval,
    decay::{self, Decay},
    exploration::{Choice, EpsilonGreedy},
    snake::Action,
    state::{StateVector, STATE_COUNT},
};

/// Dense table of action values for every encodable state
///
/// Entries start at `0.0`. Writes are tracked so [`len`](Self::len) reports how many
/// state-action pairs have actually been learned.
#[derive(Debug, Clone)]
pub struct QTable {
    values: Box<[[f32; Action::COUNT]]>,
    written: Box<[u8]>,
    len: usize,
}

impl QTable {
    pub fn new() -> Self {
        Self {
            values: vec![[0.0; Action::COUNT]; STATE_COUNT].into_boxed_slice(),
            written: vec![0; STATE_COUNT].into_boxed_slice(),
            len: 0,
        }
    }

    pub fn get(&self, state: StateVector, action: Action) -> f32 {
        self.values[state.index()][action.index()]
    }

    pub fn set(&mut self, state: StateVector, action: Action, value: f32) {
        let (s, a) = (state.index(), action.index());
        if self.written[s] & (1 << a) == 0 {
            self.written[s] |= 1 << a;
            self.len += 1;
        }
        self.values[s][a] = value;
    }

    /// All action values of a state, in [`Action`] order
    pub fn row(&self, state: StateVector) -> &[f32; Action::COUNT] {
        &self.values[state.index()]
    }

    /// Highest action value of a state
    pub fn max(&self, state: StateVector) -> f32 {
        self.row(state)
            .iter()
            .copied()
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Greedy action, ties go to the earliest [`Action`] variant
    pub fn argmax(&self, state: StateVector) -> Action {
        let row = self.row(state);
        let mut best = 0;
        for (i, &value) in row.iter().enumerate().skip(1) {
            if value > row[best] {
                best = i;
            }
        }
        Action::VARIANTS[best]
    }

    /// Number of learned state-action pairs
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for QTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for the [`QLearningAgent`]
#[derive(Debug, Clone)]
pub struct QLearningAgentConfig<D: Decay = decay::Geometric> {
    /// Exploration schedule, evaluated at the number of finished episodes
    ///
    /// **Default**: start at `1.0`, multiply by `0.995` per episode, floor `0.01`
    pub exploration: EpsilonGreedy<D>,
    /// Learning rate
    ///
    /// **Default**: `0.1`
    pub alpha: f32,
    /// Discount factor
    ///
    /// **Default**: `0.9`
    pub gamma: f32,
}

impl Default for QLearningAgentConfig {
    fn default() -> Self {
        Self {
            exploration: EpsilonGreedy::new(decay::Geometric::default()),
            alpha: 0.1,
            gamma: 0.9,
        }
    }
}

/// One-step tabular Q-learning agent for the snake state encoding
pub struct QLearningAgent<D: Decay = decay::Geometric> {
    q_table: QTable,
    exploration: EpsilonGreedy<D>,
    alpha: f32,   // learning rate
    gamma: f32,   // discount factor
    episode: u32, // finished episodes
}

impl<D: Decay> QLearningAgent<D> {
    /// Initialize a new agent with an empty table
    ///
    /// **Panics** if `alpha` or `gamma` is not in the interval `[0,1]`
    pub fn new(config: QLearningAgentConfig<D>) -> Self {
        assert_interval!(config.alpha, 0.0, 1.0);
        assert_interval!(config.gamma, 0.0, 1.0);
        Self {
            q_table: QTable::new(),
            exploration: config.exploration,
            alpha: config.alpha,
            gamma: config.gamma,
            episode: 0,
        }
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Current value estimate, `0.0` for untouched pairs
    pub fn get_q(&self, state: StateVector, action: Action) -> f32 {
        self.q_table.get(state, action)
    }

    /// Current exploration rate
    pub fn epsilon(&self) -> f32 {
        self.exploration.epsilon(self.episode)
    }

    /// Number of finished episodes
    pub fn episode(&self) -> u32 {
        self.episode
    }

    /// Epsilon-greedy action selection
    pub fn choose_action<R: Rng + ?Sized>(&self, state: StateVector, rng: &mut R) -> Action {
        match self.exploration.choose(self.episode, rng) {
            Choice::Explore => {
                let action = Action::random(rng);
                log::trace!("explore {action:?}");
                action
            }
            Choice::Exploit => self.q_table.argmax(state),
        }
    }

    /// Move `Q(state, action)` toward `reward + gamma * max_a Q(next_state, a)`
    pub fn learn(
        &mut self,
        state: StateVector,
        action: Action,
        reward: f32,
        next_state: StateVector,
    ) {
        let q_value = self.get_q(state, action);
        let max_next_q = self.q_table.max(next_state);
        let target = reward + self.gamma * max_next_q;
        self.q_table.set(state, action, q_value + self.alpha * (target - q_value));
    }

    /// Advance the exploration schedule by one episode
    pub fn decay(&mut self) {
        self.episode += 1;
    }
}

impl Default for QLearningAgent {
    fn default() -> Self {
        Self::new(QLearningAgentConfig::default())
    }
}
