//! Emulator environment for [`foxnet-core`](foxnet_core).
//!
//! The emulator runs the game and a plugin that serves screen frames over TCP.
//! [`FrameChannel`] receives the frames and sends controller inputs,
//! [`EmulatorEnv`] implements [`Env`](foxnet_core::Env) on top of it, and the
//! readers in [`reward`] extract the score and the health from the frames.
//!
//! Here is an example of playing with random actions.
//!
//! ```no_run
//! use anyhow::Result;
//! use foxnet_core::Env as _;
//! use foxnet_emulator_env::{EmulatorEnv, EmulatorEnvConfig};
//!
//! fn main() -> Result<()> {
//! #     env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
//!     let config = EmulatorEnvConfig::default();
//!     let mut env = EmulatorEnv::build(&config)?;
//!     let acts = env.available_actions().to_vec();
//!
//!     for i in 0..100 {
//!         let obs = env.read_observation()?;
//!         assert_eq!(obs.state.dim(), (48, 64, 3));
//!         env.send_action(&acts[i % acts.len()])?;
//!     }
//!
//!     Ok(())
//! }
//! ```
mod act;
pub mod channel;
mod env;
pub mod error;
pub mod reward;
pub use act::ActionSymbol;
pub use channel::{decode_frame, encode_frame, ChannelConfig, FrameChannel, FrameDims};
pub use env::{resize_frame, EmulatorEnv, EmulatorEnvConfig};
pub use reward::{DigitTemplateReader, HealthBarReader};
