#![warn(missing_docs)]
//! Online collection of game-play transitions for training action-value models.
//!
//! The crate provides the pieces between a running game and a learning agent:
//!
//! * [`FrameReplayBuffer`] stores single frames in a ring and serves stacked
//!   observations and batches of transitions.
//! * [`RewardShaper`](reward::RewardShaper) turns score and health readings of
//!   consecutive frames into rewards.
//! * [`OnlineCollector`] runs the decision loop: frame skipping, epsilon-greedy,
//!   override and recovery action selection, and storing transitions.
//!
//! The game itself is behind the [`Env`] trait and the model behind [`Policy`]
//! and [`Agent`].
pub mod collector;
pub mod error;
pub mod record;
pub mod replay_buffer;
pub mod reward;

mod base;
pub use base::{
    frame_shape, Act, Agent, Batch, Env, Frame, Observation, Policy, ReplayBufferBase,
    StackedFrames, StackedFramesBatch,
};
pub use collector::{CollectorConfig, Decision, OnlineCollector};
pub use replay_buffer::{FrameBatch, FrameReplayBuffer, FrameReplayBufferConfig};
