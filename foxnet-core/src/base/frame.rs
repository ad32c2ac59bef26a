//! Frames and observations.
use ndarray::{Array3, Array4, Array5};

/// A decoded screen image of shape `(height, width, 3)`, top-left origin.
///
/// Frames from the emulator carry their channels in BGR order.
pub type Frame = Array3<u8>;

/// Frames stacked along the first axis, oldest first: `(frames_per_state, height, width, 3)`.
pub type StackedFrames = Array4<u8>;

/// A batch of stacked frames: `(batch, frames_per_state, height, width, 3)`.
pub type StackedFramesBatch = Array5<u8>;

/// Returns the shape of a frame as an array.
pub fn frame_shape(frame: &Frame) -> [usize; 3] {
    let s = frame.shape();
    [s[0], s[1], s[2]]
}

/// What an environment delivers for a single emulator frame.
#[derive(Debug, Clone)]
pub struct Observation {
    /// The frame as decoded from the emulator. Rewards are read from it.
    pub full: Frame,

    /// The frame downsampled to the state size. This is what the replay buffer stores.
    pub state: Frame,
}

impl Observation {
    /// Creates an observation whose state is the full frame itself.
    pub fn from_full(full: Frame) -> Self {
        Self {
            state: full.clone(),
            full,
        }
    }
}
