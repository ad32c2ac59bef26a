//! Policy and agent.
use super::{ReplayBufferBase, StackedFrames};
use crate::record::Record;
use anyhow::Result;

/// An action-value function.
///
/// Given the stacked observation, it returns one value per available action.
/// The collector takes the argmax of the values with probability `1 - epsilon`.
pub trait Policy {
    /// Evaluates the action values for the stacked observation.
    fn evaluate(&mut self, obs: &StackedFrames) -> Result<Vec<f32>>;
}

/// Represents a trainable policy.
pub trait Agent<R: ReplayBufferBase>: Policy {
    /// Performs an optimization step with a batch sampled from the replay
    /// buffer and returns some information.
    fn opt_with_record(&mut self, batch: R::Batch) -> Result<Record>;
}
