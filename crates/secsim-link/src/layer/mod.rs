//! Protocol layers.
//!
//! Each layer wraps exactly one transport beneath it and is itself a
//! [`Transport`](crate::Transport), so layers stack in any order:
//!
//! ```text
//! Actor -> AuthenticationLayer -> EncryptionLayer -> Channel
//! ```
//!
//! Sender and receiver must build symmetric stacks. Layers that detect a
//! problem without being able to recover a transform (integrity, replay)
//! record a [`Verdict`] and still deliver the payload.

mod authentication;
mod encryption;
mod replay;

pub use authentication::AuthenticationLayer;
pub use encryption::EncryptionLayer;
pub use replay::{AntiReplayLayer, ReplayPolicy, COUNTER_SIZE};

/// Outcome of the most recent receive on a checking layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The frame passed the layer's check.
    Accepted,

    /// The authentication code did not verify.
    Rejected,

    /// The frame's counter was not greater than the last accepted one.
    Replayed { counter: u64, last: u64 },

    /// The frame skipped counters under a contiguous replay policy.
    OutOfOrder { expected: u64, got: u64 },
}

impl Verdict {
    /// Whether the frame passed.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}
