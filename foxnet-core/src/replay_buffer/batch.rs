//! Batch of transitions sampled from [`FrameReplayBuffer`](super::FrameReplayBuffer).
use crate::{Batch, StackedFramesBatch};

/// Transitions `(o_t, a_t, o_t+1, r_t, is_terminated_t)` with stacked frame observations.
#[derive(Debug, Clone)]
pub struct FrameBatch {
    /// Observations, `(batch, frames_per_state, height, width, 3)`.
    pub obs: StackedFramesBatch,

    /// Indices of the actions in the available action list.
    pub act: Vec<usize>,

    /// Next observations, same shape as `obs`.
    pub next_obs: StackedFramesBatch,

    /// Rewards.
    pub reward: Vec<f32>,

    /// Termination flags.
    pub is_terminated: Vec<i8>,

    /// Sampled slot indices.
    pub ix_sample: Vec<usize>,
}

impl Batch for FrameBatch {
    type ObsBatch = StackedFramesBatch;
    type ActBatch = Vec<usize>;

    fn unpack(self) -> (Self::ObsBatch, Self::ActBatch, Self::ObsBatch, Vec<f32>, Vec<i8>) {
        (
            self.obs,
            self.act,
            self.next_obs,
            self.reward,
            self.is_terminated,
        )
    }

    fn len(&self) -> usize {
        self.reward.len()
    }

    fn reward(&self) -> &Vec<f32> {
        &self.reward
    }
}
