use crate::Act;
use log::warn;

/// Choice of the action at a decision step.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision<A> {
    /// Leave a non-gameplay screen with one of the recovery actions.
    Recover(A),

    /// Action given by the manual override input.
    Override(A),

    /// Index of the action with the largest value.
    Greedy(usize),

    /// Index of a uniformly drawn action.
    Explore(usize),
}

impl<A: Act> Decision<A> {
    /// Returns the action to send.
    ///
    /// `Greedy` and `Explore` indices must be valid for `available`.
    pub fn action(&self, available: &[A]) -> Option<A> {
        match self {
            Self::Recover(a) | Self::Override(a) => Some(a.clone()),
            Self::Greedy(ix) | Self::Explore(ix) => available.get(*ix).cloned(),
        }
    }

    /// Returns the action index stored in the replay buffer.
    ///
    /// Recovery actions are not credited with the following reward and are
    /// stored as the no-op. So is an override outside of `available`.
    pub fn recorded_index(&self, available: &[A], noop_ix: usize) -> usize {
        match self {
            Self::Recover(_) => noop_ix,
            Self::Override(a) => match available.iter().position(|b| b == a) {
                Some(ix) => ix,
                None => {
                    warn!("Override action {:?} is not available, stored as no-op", a);
                    noop_ix
                }
            },
            Self::Greedy(ix) | Self::Explore(ix) => *ix,
        }
    }

    /// Short name of the decision kind.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Recover(_) => "recover",
            Self::Override(_) => "override",
            Self::Greedy(_) => "greedy",
            Self::Explore(_) => "explore",
        }
    }
}

/// Index of the largest value, the first one on ties.
pub(super) fn argmax(values: &[f32]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f32::NEG_INFINITY), |(ix_max, v_max), (ix, &v)| {
            if v > v_max {
                (ix, v)
            } else {
                (ix_max, v_max)
            }
        })
        .0
}
