//! Configuration of [`OnlineCollector`](super::OnlineCollector).
use crate::{error::CollectorError, replay_buffer::FrameReplayBufferConfig, reward::RewardShaperConfig};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`OnlineCollector`](super::OnlineCollector).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct CollectorConfig {
    /// Number of decision steps per batch, also the number of sampled transitions.
    pub batch_size: usize,

    /// Number of raw frames per decision step. The action of a step is repeated
    /// on the `frame_skip - 1` frames before the next decision.
    pub frame_skip: usize,

    /// Initial exploration rate.
    pub epsilon: f64,

    /// Multiplier applied to epsilon every `epsilon_decay_interval` batches.
    pub epsilon_decay: f64,

    /// Interval of epsilon annealing in batches.
    pub epsilon_decay_interval: usize,

    /// Reward shaping.
    pub reward: RewardShaperConfig,

    /// Replay buffer.
    pub replay_buffer: FrameReplayBufferConfig,

    /// Random seed for action selection.
    pub seed: u64,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            batch_size: 10,
            frame_skip: 4,
            epsilon: 0.05,
            epsilon_decay: 0.9,
            epsilon_decay_interval: 100,
            reward: RewardShaperConfig::default(),
            replay_buffer: FrameReplayBufferConfig::default(),
            seed: 42,
        }
    }
}

impl CollectorConfig {
    /// Sets the batch size.
    pub fn batch_size(mut self, v: usize) -> Self {
        self.batch_size = v;
        self
    }

    /// Sets the number of raw frames per decision step.
    pub fn frame_skip(mut self, v: usize) -> Self {
        self.frame_skip = v;
        self
    }

    /// Sets the initial exploration rate.
    pub fn epsilon(mut self, v: f64) -> Self {
        self.epsilon = v;
        self
    }

    /// Sets the annealing factor of epsilon.
    pub fn epsilon_decay(mut self, v: f64) -> Self {
        self.epsilon_decay = v;
        self
    }

    /// Sets the annealing interval in batches.
    pub fn epsilon_decay_interval(mut self, v: usize) -> Self {
        self.epsilon_decay_interval = v;
        self
    }

    /// Sets the configuration of reward shaping.
    pub fn reward(mut self, v: RewardShaperConfig) -> Self {
        self.reward = v;
        self
    }

    /// Sets the configuration of the replay buffer.
    pub fn replay_buffer(mut self, v: FrameReplayBufferConfig) -> Self {
        self.replay_buffer = v;
        self
    }

    /// Sets the random seed.
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    /// Checks the consistency of the parameters.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| -> Result<(), CollectorError> {
            Err(CollectorError::InvalidConfig(msg.to_string()))
        };
        if self.batch_size == 0 {
            invalid("batch_size must be positive")?;
        }
        if self.frame_skip == 0 {
            invalid("frame_skip must be positive")?;
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            invalid("epsilon must be in [0, 1]")?;
        }
        if self.epsilon_decay_interval == 0 {
            invalid("epsilon_decay_interval must be positive")?;
        }
        if self.replay_buffer.capacity <= self.batch_size {
            invalid("replay buffer capacity must exceed batch_size")?;
        }
        Ok(())
    }

    /// Constructs [`CollectorConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`CollectorConfig`] as a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
