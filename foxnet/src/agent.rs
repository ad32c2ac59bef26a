//! An agent acting at random.
use anyhow::Result;
use foxnet_core::{
    record::{Record, RecordValue},
    Agent, Batch, FrameBatch, FrameReplayBuffer, Policy, StackedFrames,
};

/// Returns random action values and learns nothing.
///
/// Used to exercise the collection loop before a model is plugged in. The
/// record of each batch holds its mean reward.
pub struct RandomAgent {
    n_actions: usize,
    rng: fastrand::Rng,
}

impl RandomAgent {
    /// Constructs the agent.
    pub fn new(n_actions: usize, seed: u64) -> Self {
        Self {
            n_actions,
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Policy for RandomAgent {
    fn evaluate(&mut self, _obs: &StackedFrames) -> Result<Vec<f32>> {
        Ok((0..self.n_actions).map(|_| self.rng.f32()).collect())
    }
}

impl Agent<FrameReplayBuffer> for RandomAgent {
    fn opt_with_record(&mut self, batch: FrameBatch) -> Result<Record> {
        let n = batch.len().max(1) as f32;
        let mean = batch.reward().iter().sum::<f32>() / n;
        Ok(Record::from_slice(&[("mean_reward", RecordValue::Scalar(mean))]))
    }
}
