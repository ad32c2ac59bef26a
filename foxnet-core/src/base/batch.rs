//! Batch.

/// Represents a batch of transitions.
pub trait Batch {
    /// A set of observations in a batch.
    type ObsBatch;

    /// A set of actions in a batch.
    type ActBatch;

    /// Unpack the data `(o_t, a_t, o_t+1, r_t, is_terminated_t)`.
    fn unpack(self) -> (Self::ObsBatch, Self::ActBatch, Self::ObsBatch, Vec<f32>, Vec<i8>);

    /// Returns the number of transitions.
    fn len(&self) -> usize;

    /// Returns `r_t`.
    fn reward(&self) -> &Vec<f32>;
}
