//! Configuration of a collection run.
use anyhow::Result;
use foxnet_core::CollectorConfig;
use foxnet_emulator_env::EmulatorEnvConfig;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

/// Configuration of a collection run.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct CollectConfig {
    /// Emulator and action sets.
    pub env: EmulatorEnvConfig,

    /// Collection loop, reward shaping and replay buffer.
    pub collector: CollectorConfig,

    /// Image of the health bar at full health.
    pub health_template: PathBuf,

    /// Directory of the digit templates.
    pub digit_templates: PathBuf,
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            env: EmulatorEnvConfig::default(),
            collector: CollectorConfig::default(),
            health_template: PathBuf::from("data/health/healthbar.png"),
            digit_templates: PathBuf::from("data/reward/templates"),
        }
    }
}

impl CollectConfig {
    /// Constructs [`CollectConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`CollectConfig`] as a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
