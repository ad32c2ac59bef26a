//! Core functionalities.
mod agent;
mod batch;
mod env;
mod frame;
mod replay_buffer;
pub use agent::{Agent, Policy};
pub use batch::Batch;
pub use env::Env;
pub use frame::{frame_shape, Frame, Observation, StackedFrames, StackedFramesBatch};
pub use replay_buffer::ReplayBufferBase;
use std::fmt::Debug;

/// An action of the environment.
///
/// The collector records actions as indices into [`Env::available_actions`],
/// so the only requirement on the action type itself is a distinguished
/// no-op, which is recorded in place of actions that should not be credited
/// with the following reward.
pub trait Act: Clone + Debug + PartialEq {
    /// Returns the action that does nothing.
    fn noop() -> Self;
}
