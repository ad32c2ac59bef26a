//! Reward shaping from game screens.
//!
//! The in-game score and the health bar are read from the full-resolution frame
//! by a [`ScoreReader`] and a [`HealthReader`]. [`RewardShaper`] combines both
//! readings into a [`ShapedReward`], smoothing score outliers and penalizing
//! deaths.
mod base;
mod config;
mod shaper;
pub use base::{HealthReader, ScoreReader, ScoreReading};
pub use config::RewardShaperConfig;
pub use shaper::{RewardShaper, ShapedReward};
