//! Environment.
use super::{Act, Observation};
use anyhow::Result;

/// Represents a remote game the agent interacts with frame by frame.
///
/// The interaction is strictly synchronous: one frame is read, one action is
/// sent, and the next frame is read. Implementations are not expected to retry
/// failed reads or writes. Construction is up to the implementations.
pub trait Env {
    /// Action of the environment.
    type Act: Act;

    /// Blocks until the next frame arrives.
    fn read_observation(&mut self) -> Result<Observation>;

    /// Sends an action to the emulator.
    fn send_action(&mut self, act: &Self::Act) -> Result<()>;

    /// Actions the policy chooses from. The i-th action value returned by a
    /// [`Policy`](crate::Policy) corresponds to the i-th action in this slice.
    fn available_actions(&self) -> &[Self::Act];

    /// Actions used to leave non-gameplay screens such as menus.
    fn recovery_actions(&self) -> &[Self::Act];
}
