use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use log::debug;

/// Source of manually chosen actions that take precedence over the policy.
pub trait OverrideInput<A> {
    /// Returns an action if one is pending. Must not block.
    fn poll(&mut self) -> Option<A>;
}

/// No manual override.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOverride;

impl<A> OverrideInput<A> for NoOverride {
    fn poll(&mut self) -> Option<A> {
        None
    }
}

/// Override actions sent from another thread, e.g. a keyboard reader.
///
/// Only the most recent pending action is used; older ones are dropped.
pub struct ChannelOverride<A> {
    receiver: Receiver<A>,
    connected: bool,
}

impl<A> ChannelOverride<A> {
    /// Wraps a receiver.
    pub fn new(receiver: Receiver<A>) -> Self {
        Self {
            receiver,
            connected: true,
        }
    }

    /// Creates an unbounded channel and returns its sender with the override.
    pub fn unbounded() -> (Sender<A>, Self) {
        let (s, r) = unbounded();
        (s, Self::new(r))
    }
}

impl<A> OverrideInput<A> for ChannelOverride<A> {
    fn poll(&mut self) -> Option<A> {
        let mut latest = None;
        while self.connected {
            match self.receiver.try_recv() {
                Ok(a) => latest = Some(a),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    debug!("Override input disconnected");
                    self.connected = false;
                }
            }
        }
        latest
    }
}
