//! Online collection of FoxNet transitions from a running emulator.
//!
//! The `foxnet-collect` binary connects to the emulator, plays with an agent
//! and hands batches of transitions to it. This library holds its parts.
pub mod agent;
pub mod config;
pub mod keyboard;
pub use agent::RandomAgent;
pub use config::CollectConfig;
pub use keyboard::{parse_override_line, spawn_stdin_override};
