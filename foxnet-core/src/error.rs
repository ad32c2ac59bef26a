//! Errors in the library.
use thiserror::Error;

/// Errors raised when accessing a [`Record`](crate::record::Record).
#[derive(Error, Debug)]
pub enum RecordError {
    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),
}

/// Errors raised by [`FrameReplayBuffer`](crate::replay_buffer::FrameReplayBuffer).
#[derive(Error, Debug, PartialEq)]
pub enum ReplayBufferError {
    /// The buffer holds no frame yet.
    #[error("The replay buffer is empty")]
    Empty,

    /// The index does not point to a resident frame.
    #[error("Index {index} does not hold a frame (capacity {capacity}, filled {count_filled})")]
    InvalidIndex {
        /// The given index.
        index: usize,
        /// Capacity of the buffer.
        capacity: usize,
        /// Number of resident frames.
        count_filled: usize,
    },

    /// `store_effect` was called twice for the same stored frame.
    #[error("The effect of index {0} has already been stored")]
    EffectAlreadyStored(usize),

    /// A frame with a different shape from the resident frames was stored.
    #[error("Frame shape {given:?} differs from the stored frames {expected:?}")]
    FrameShapeMismatch {
        /// Shape of the resident frames.
        expected: [usize; 3],
        /// Shape of the given frame.
        given: [usize; 3],
    },

    /// Not enough transitions with a stored effect and a following frame.
    #[error("Requested {requested} samples but only {available} transitions can be sampled")]
    NotEnoughSamples {
        /// Requested batch size.
        requested: usize,
        /// Number of valid indices.
        available: usize,
    },

    /// Invalid configuration.
    #[error("Invalid replay buffer configuration: {0}")]
    InvalidConfig(String),
}

/// Errors raised by [`OnlineCollector`](crate::collector::OnlineCollector).
#[derive(Error, Debug, PartialEq)]
pub enum CollectorError {
    /// The policy returned a value vector of unexpected length.
    #[error("The policy returned {given} action values for {expected} actions")]
    ActionValueLen {
        /// Number of available actions.
        expected: usize,
        /// Length of the returned vector.
        given: usize,
    },

    /// The no-op action is not included in the available actions.
    #[error("The available actions do not include the no-op action")]
    NoopNotAvailable,

    /// The environment exposes no action to choose from.
    #[error("The environment exposes no {0} actions")]
    NoActions(&'static str),

    /// Invalid configuration.
    #[error("Invalid collector configuration: {0}")]
    InvalidConfig(String),
}
