//! Configuration of [`EmulatorEnv`](super::EmulatorEnv).
use crate::{error::EmulatorEnvError, ActionSymbol, ChannelConfig};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`EmulatorEnv`](super::EmulatorEnv).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct EmulatorEnvConfig {
    /// Connection to the emulator.
    pub channel: ChannelConfig,

    /// Width of the frames stored in the replay buffer.
    pub state_width: usize,

    /// Height of the frames stored in the replay buffer.
    pub state_height: usize,

    /// Actions the policy chooses from, in the order of the action values.
    pub available_actions: Vec<ActionSymbol>,

    /// Actions used to leave menus and other non-gameplay screens.
    pub recovery_actions: Vec<ActionSymbol>,
}

impl Default for EmulatorEnvConfig {
    fn default() -> Self {
        use ActionSymbol::*;
        Self {
            channel: ChannelConfig::default(),
            state_width: 64,
            state_height: 48,
            available_actions: vec![Up, Left, Down, Right, Fire, Back, Noop],
            recovery_actions: vec![Fire, Noop],
        }
    }
}

impl EmulatorEnvConfig {
    /// Sets the configuration of the connection.
    pub fn channel(mut self, channel: ChannelConfig) -> Self {
        self.channel = channel;
        self
    }

    /// Sets the size of the frames stored in the replay buffer.
    pub fn state_size(mut self, width: usize, height: usize) -> Self {
        self.state_width = width;
        self.state_height = height;
        self
    }

    /// Sets the available actions.
    pub fn available_actions(mut self, acts: Vec<ActionSymbol>) -> Self {
        self.available_actions = acts;
        self
    }

    /// Sets the recovery actions.
    pub fn recovery_actions(mut self, acts: Vec<ActionSymbol>) -> Self {
        self.recovery_actions = acts;
        self
    }

    /// Checks the consistency of the parameters.
    pub fn validate(&self) -> Result<()> {
        let dims = &self.channel.dims;
        if dims.is_empty() || self.state_width == 0 || self.state_height == 0 {
            Err(EmulatorEnvError::InvalidConfig(
                "frame and state sizes must be positive".to_string(),
            ))?;
        }
        if dims.depth != 3 {
            Err(EmulatorEnvError::InvalidConfig(format!(
                "frames must have 3 channels, got depth {}",
                dims.depth
            )))?;
        }
        if self.available_actions.is_empty() || self.recovery_actions.is_empty() {
            Err(EmulatorEnvError::InvalidConfig(
                "action lists must not be empty".to_string(),
            ))?;
        }
        Ok(())
    }

    /// Constructs [`EmulatorEnvConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`EmulatorEnvConfig`] as a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FrameDims;
    use tempdir::TempDir;

    #[test]
    fn test_serde_env_config() -> Result<()> {
        let config = EmulatorEnvConfig::default()
            .channel(ChannelConfig::default().port(12345))
            .state_size(32, 24)
            .recovery_actions(vec![ActionSymbol::Start]);

        let dir = TempDir::new("env_config")?;
        let path = dir.path().join("env.yaml");
        config.save(&path)?;
        let config_ = EmulatorEnvConfig::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }

    #[test]
    fn test_validate() {
        assert!(EmulatorEnvConfig::default().validate().is_ok());
        let config = EmulatorEnvConfig::default()
            .channel(ChannelConfig::default().dims(FrameDims::new(4, 4, 4)));
        assert!(config.validate().is_err());
        let config = EmulatorEnvConfig::default().recovery_actions(vec![]);
        assert!(config.validate().is_err());
    }
}
