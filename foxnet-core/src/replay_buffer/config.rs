//! Configuration of [`FrameReplayBuffer`](super::FrameReplayBuffer).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    default::Default,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`FrameReplayBuffer`](super::FrameReplayBuffer).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct FrameReplayBufferConfig {
    /// The maximum number of frames resident in the buffer.
    pub capacity: usize,

    /// The number of frames stacked into a single observation.
    pub frames_per_state: usize,

    /// Random seed for sampling.
    pub seed: u64,
}

impl Default for FrameReplayBufferConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            frames_per_state: 1,
            seed: 42,
        }
    }
}

impl FrameReplayBufferConfig {
    /// Sets the capacity of the replay buffer.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the number of frames per stacked observation.
    pub fn frames_per_state(mut self, frames_per_state: usize) -> Self {
        self.frames_per_state = frames_per_state;
        self
    }

    /// Sets the random seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Constructs [`FrameReplayBufferConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`FrameReplayBufferConfig`] as a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_serde_replay_buffer_config() -> Result<()> {
        let config = FrameReplayBufferConfig::default()
            .capacity(500)
            .frames_per_state(4)
            .seed(7);

        let dir = TempDir::new("replay_buffer_config")?;
        let path = dir.path().join("replay_buffer.yaml");
        config.save(&path)?;
        let config_ = FrameReplayBufferConfig::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }
}
