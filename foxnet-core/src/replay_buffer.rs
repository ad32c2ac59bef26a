//! Replay buffer of single frames serving stacked observations.
mod base;
mod batch;
mod config;
pub use base::FrameReplayBuffer;
pub use batch::FrameBatch;
pub use config::FrameReplayBufferConfig;
