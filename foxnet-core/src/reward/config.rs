//! Configuration of [`RewardShaper`](super::RewardShaper).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`RewardShaper`](super::RewardShaper).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct RewardShaperConfig {
    /// Multiplier of the health reading.
    pub health_weight: f32,

    /// Health component of the reward on the step where health drops to zero.
    pub death_penalty: f32,

    /// Largest accepted change between two consecutive positive scores.
    pub max_score_jump: u32,
}

impl Default for RewardShaperConfig {
    fn default() -> Self {
        Self {
            health_weight: 10.0,
            death_penalty: -100.0,
            max_score_jump: 6,
        }
    }
}

impl RewardShaperConfig {
    /// Sets the weight of the health reading.
    pub fn health_weight(mut self, v: f32) -> Self {
        self.health_weight = v;
        self
    }

    /// Sets the death penalty.
    pub fn death_penalty(mut self, v: f32) -> Self {
        self.death_penalty = v;
        self
    }

    /// Sets the largest accepted score change.
    pub fn max_score_jump(mut self, v: u32) -> Self {
        self.max_score_jump = v;
        self
    }

    /// Constructs [`RewardShaperConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`RewardShaperConfig`] as a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
