mod config;
use crate::{ActionSymbol, FrameChannel};
use anyhow::{Context, Result};
pub use config::EmulatorEnvConfig;
use foxnet_core::{Env, Frame, Observation};
use image::{
    imageops::{resize, FilterType::Triangle},
    ImageBuffer, Rgb,
};
use ndarray::Array3;
use std::{
    io::{Read, Write},
    net::TcpStream,
};

/// Resizes a three-channel frame.
pub fn resize_frame(frame: &Frame, width: usize, height: usize) -> Result<Frame> {
    let (h, w, _) = frame.dim();
    let raw = frame.as_standard_layout().into_owned().into_raw_vec();
    let img = ImageBuffer::<Rgb<u8>, _>::from_raw(w as u32, h as u32, raw)
        .context("Frame is not a three-channel image")?;
    let img = resize(&img, width as u32, height as u32, Triangle);
    Ok(Array3::from_shape_vec((height, width, 3), img.into_raw())?)
}

/// The game running in the emulator.
///
/// Each observation holds the frame as received and the frame resized to the
/// state size.
pub struct EmulatorEnv<S = TcpStream> {
    channel: FrameChannel<S>,
    config: EmulatorEnvConfig,
}

impl EmulatorEnv<TcpStream> {
    /// Connects to the emulator and builds the environment.
    pub fn build(config: &EmulatorEnvConfig) -> Result<Self> {
        config.validate()?;
        let channel = FrameChannel::connect(&config.channel)?;
        Self::from_channel(channel, config.clone())
    }
}

impl<S: Read + Write> EmulatorEnv<S> {
    /// Constructs the environment on an established channel.
    pub fn from_channel(channel: FrameChannel<S>, config: EmulatorEnvConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { channel, config })
    }

    /// Returns the channel.
    pub fn channel(&self) -> &FrameChannel<S> {
        &self.channel
    }

    fn observe(&mut self) -> Result<Observation> {
        let full = self.channel.read_frame()?;
        let (h, w, _) = full.dim();
        let (width, height) = (self.config.state_width, self.config.state_height);
        if (w, h) == (width, height) {
            Ok(Observation::from_full(full))
        } else {
            let state = resize_frame(&full, width, height)?;
            Ok(Observation { full, state })
        }
    }
}

impl<S: Read + Write> Env for EmulatorEnv<S> {
    type Act = ActionSymbol;

    fn read_observation(&mut self) -> Result<Observation> {
        self.observe()
    }

    fn send_action(&mut self, act: &Self::Act) -> Result<()> {
        self.channel.send_action(*act)
    }

    fn available_actions(&self) -> &[Self::Act] {
        &self.config.available_actions
    }

    fn recovery_actions(&self) -> &[Self::Act] {
        &self.config.recovery_actions
    }
}
