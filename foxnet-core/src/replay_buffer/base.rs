//! Ring buffer of frames with lagged transition effects.
use super::{FrameBatch, FrameReplayBufferConfig};
use crate::{
    error::ReplayBufferError, frame_shape, Frame, ReplayBufferBase, StackedFrames,
};
use anyhow::{bail, Result};
use log::trace;
use ndarray::{stack, Axis};
use rand::{rngs::StdRng, seq::index, SeedableRng};

/// A fixed-capacity ring of single frames.
///
/// Every frame is written in two phases. [`store_frame`] puts the frame into the
/// slot at `next_write` and returns the slot index. The action taken in response
/// to that frame and the reward that followed are known only later, and are
/// attached with [`store_effect`] using the same index.
///
/// Observations are stacks of `frames_per_state` consecutive frames ending at a
/// given slot. Walking backward from that slot stops at the oldest resident frame
/// and at a slot flagged as terminal, so that a stack never spans two episodes.
/// Missing frames are padded by repeating the oldest frame found.
///
/// Old frames are overwritten in insertion order.
///
/// [`store_frame`]: FrameReplayBuffer::store_frame
/// [`store_effect`]: FrameReplayBuffer::store_effect
pub struct FrameReplayBuffer {
    /// Maximum number of frames.
    capacity: usize,

    /// Number of frames in a stacked observation.
    frames_per_state: usize,

    /// Slot written by the next call of `store_frame`.
    i: usize,

    /// Number of resident frames.
    size: usize,

    /// Shape of the resident frames, fixed by the first stored frame.
    shape: Option<[usize; 3]>,

    frames: Vec<Option<Frame>>,
    act: Vec<usize>,
    reward: Vec<f32>,
    is_terminated: Vec<i8>,
    has_effect: Vec<bool>,

    /// Random number generator for sampling.
    rng: StdRng,
}

impl FrameReplayBuffer {
    /// Returns the number of resident frames.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if no frame has been stored.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the slot that the next call of [`store_frame`](Self::store_frame) writes.
    pub fn next_write(&self) -> usize {
        self.i
    }

    /// Returns the frame in the given slot, if any.
    pub fn get_frame(&self, ix: usize) -> Option<&Frame> {
        self.frames.get(ix).and_then(|f| f.as_ref())
    }

    /// Slot of the oldest resident frame.
    #[inline]
    fn oldest(&self) -> usize {
        if self.size < self.capacity {
            0
        } else {
            self.i
        }
    }

    /// Slot of the most recently stored frame.
    #[inline]
    fn newest(&self) -> Option<usize> {
        match self.size {
            0 => None,
            _ => Some((self.i + self.capacity - 1) % self.capacity),
        }
    }

    /// Logical position of a slot counted from the oldest resident frame.
    #[inline]
    fn age(&self, ix: usize) -> usize {
        (ix + self.capacity - self.oldest()) % self.capacity
    }

    fn check_resident(&self, ix: usize) -> Result<(), ReplayBufferError> {
        if ix >= self.capacity || self.age(ix) >= self.size {
            Err(ReplayBufferError::InvalidIndex {
                index: ix,
                capacity: self.capacity,
                count_filled: self.size,
            })
        } else {
            Ok(())
        }
    }

    fn frame(&self, ix: usize) -> Result<&Frame> {
        self.check_resident(ix)?;
        match self.frames[ix].as_ref() {
            Some(frame) => Ok(frame),
            None => bail!(ReplayBufferError::InvalidIndex {
                index: ix,
                capacity: self.capacity,
                count_filled: self.size,
            }),
        }
    }

    /// Stores a frame and returns the index of its slot.
    ///
    /// The effect of the frame has to be attached later with
    /// [`store_effect`](Self::store_effect).
    pub fn store_frame(&mut self, frame: Frame) -> Result<usize> {
        let given = frame_shape(&frame);
        match self.shape {
            Some(expected) if expected != given => {
                bail!(ReplayBufferError::FrameShapeMismatch { expected, given })
            }
            Some(_) => {}
            None => self.shape = Some(given),
        }

        let ix = self.i;
        self.frames[ix] = Some(frame);
        self.act[ix] = 0;
        self.reward[ix] = 0.0;
        self.is_terminated[ix] = 0;
        self.has_effect[ix] = false;

        self.i = (self.i + 1) % self.capacity;
        self.size = (self.size + 1).min(self.capacity);
        trace!("Stored frame in slot {}, {} frames resident", ix, self.size);

        Ok(ix)
    }

    /// Attaches the action, reward and terminal flag to the frame in slot `ix`.
    pub fn store_effect(
        &mut self,
        ix: usize,
        action: usize,
        reward: f32,
        terminal: bool,
    ) -> Result<()> {
        self.check_resident(ix)?;
        if self.has_effect[ix] {
            bail!(ReplayBufferError::EffectAlreadyStored(ix));
        }

        self.act[ix] = action;
        self.reward[ix] = reward;
        self.is_terminated[ix] = terminal as i8;
        self.has_effect[ix] = true;

        Ok(())
    }

    /// Returns the stacked observation ending at slot `ix`.
    pub fn encode_observation(&self, ix: usize) -> Result<StackedFrames> {
        self.check_resident(ix)?;

        // Walk backward, newest first
        let mut ixs = vec![ix];
        let mut cur = ix;
        let mut age = self.age(ix);
        while ixs.len() < self.frames_per_state && age > 0 {
            let prev = (cur + self.capacity - 1) % self.capacity;
            if self.is_terminated[prev] == 1 {
                break;
            }
            ixs.push(prev);
            cur = prev;
            age -= 1;
        }

        // Pad with the oldest frame found
        while ixs.len() < self.frames_per_state {
            ixs.push(cur);
        }
        ixs.reverse();

        let frames = ixs
            .iter()
            .map(|&j| self.frame(j).map(|f| f.view()))
            .collect::<Result<Vec<_>>>()?;
        Ok(stack(Axis(0), &frames)?)
    }

    /// Returns the stacked observation ending at the most recently stored frame.
    pub fn encode_recent_observation(&self) -> Result<StackedFrames> {
        match self.newest() {
            Some(ix) => self.encode_observation(ix),
            None => bail!(ReplayBufferError::Empty),
        }
    }

    /// Returns `true` if enough frames were stored to sample `batch_size` transitions.
    pub fn can_sample(&self, batch_size: usize) -> bool {
        self.size >= batch_size + 1
    }

    /// Slots that can be sampled: the effect is stored and the next frame exists.
    fn candidates(&self) -> Vec<usize> {
        let oldest = self.oldest();
        (0..self.size.saturating_sub(1))
            .map(|age| (oldest + age) % self.capacity)
            .filter(|&ix| self.has_effect[ix])
            .collect()
    }

    /// Samples `batch_size` distinct transitions uniformly at random.
    pub fn sample(&mut self, batch_size: usize) -> Result<FrameBatch> {
        if batch_size == 0 {
            bail!("Batch size must be positive");
        }

        let candidates = self.candidates();
        if candidates.len() < batch_size {
            bail!(ReplayBufferError::NotEnoughSamples {
                requested: batch_size,
                available: candidates.len(),
            });
        }

        let ixs = index::sample(&mut self.rng, candidates.len(), batch_size)
            .into_iter()
            .map(|p| candidates[p])
            .collect::<Vec<_>>();

        let obs = ixs
            .iter()
            .map(|&ix| self.encode_observation(ix))
            .collect::<Result<Vec<_>>>()?;
        let next_obs = ixs
            .iter()
            .map(|&ix| self.encode_observation((ix + 1) % self.capacity))
            .collect::<Result<Vec<_>>>()?;
        let obs = stack(Axis(0), &obs.iter().map(|o| o.view()).collect::<Vec<_>>())?;
        let next_obs = stack(
            Axis(0),
            &next_obs.iter().map(|o| o.view()).collect::<Vec<_>>(),
        )?;

        Ok(FrameBatch {
            obs,
            act: ixs.iter().map(|&ix| self.act[ix]).collect(),
            next_obs,
            reward: ixs.iter().map(|&ix| self.reward[ix]).collect(),
            is_terminated: ixs.iter().map(|&ix| self.is_terminated[ix]).collect(),
            ix_sample: ixs,
        })
    }
}

impl ReplayBufferBase for FrameReplayBuffer {
    type Config = FrameReplayBufferConfig;
    type Batch = FrameBatch;

    fn build(config: &Self::Config) -> Result<Self> {
        let capacity = config.capacity;
        if capacity == 0 {
            bail!(ReplayBufferError::InvalidConfig(
                "capacity must be positive".to_string()
            ));
        }
        if config.frames_per_state == 0 {
            bail!(ReplayBufferError::InvalidConfig(
                "frames_per_state must be positive".to_string()
            ));
        }

        Ok(Self {
            capacity,
            frames_per_state: config.frames_per_state,
            i: 0,
            size: 0,
            shape: None,
            frames: vec![None; capacity],
            act: vec![0; capacity],
            reward: vec![0.; capacity],
            is_terminated: vec![0; capacity],
            has_effect: vec![false; capacity],
            rng: StdRng::seed_from_u64(config.seed),
        })
    }

    fn batch(&mut self, size: usize) -> Result<Self::Batch> {
        self.sample(size)
    }
}
