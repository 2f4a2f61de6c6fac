//! Anti-replay layer.

use std::cell::Cell;

use crate::error::{LinkError, Result};
use crate::layer::Verdict;
use crate::transport::Transport;

/// Size of the big-endian counter header.
pub const COUNTER_SIZE: usize = 8;

/// How strictly received counters must follow each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplayPolicy {
    /// Any counter greater than the last accepted one is accepted; gaps are fine.
    #[default]
    Monotonic,
    /// Only the immediate successor of the last accepted counter is accepted.
    Contiguous,
}

/// Numbers outbound messages and flags stale or out-of-order inbound ones.
///
/// Frame layout: `counter (u64 big-endian) || payload`. Sent counters start
/// at 0 and increase by one per send. The receive side remembers the last
/// accepted counter; it only moves forward, on accepted frames.
pub struct AntiReplayLayer<'t> {
    transport: &'t dyn Transport,
    policy: ReplayPolicy,
    next_counter: Cell<u64>,
    last_accepted: Cell<Option<u64>>,
    last_verdict: Cell<Option<Verdict>>,
    flagged: Cell<usize>,
}

impl<'t> AntiReplayLayer<'t> {
    /// Layer over `transport` with the default monotonic policy.
    pub fn new(transport: &'t dyn Transport) -> Self {
        Self::with_policy(transport, ReplayPolicy::default())
    }

    /// Layer over `transport` with an explicit policy.
    pub fn with_policy(transport: &'t dyn Transport, policy: ReplayPolicy) -> Self {
        Self {
            transport,
            policy,
            next_counter: Cell::new(0),
            last_accepted: Cell::new(None),
            last_verdict: Cell::new(None),
            flagged: Cell::new(0),
        }
    }

    /// The active policy.
    pub fn policy(&self) -> ReplayPolicy {
        self.policy
    }

    /// Highest counter accepted so far.
    pub fn last_accepted(&self) -> Option<u64> {
        self.last_accepted.get()
    }

    /// Outcome of the most recent receive, if any.
    pub fn last_verdict(&self) -> Option<Verdict> {
        self.last_verdict.get()
    }

    /// Number of received frames that were flagged.
    pub fn flagged_count(&self) -> usize {
        self.flagged.get()
    }

    fn judge(&self, counter: u64) -> Verdict {
        match self.last_accepted.get() {
            Some(last) if counter <= last => Verdict::Replayed { counter, last },
            Some(last) if self.policy == ReplayPolicy::Contiguous && counter != last + 1 => {
                Verdict::OutOfOrder {
                    expected: last + 1,
                    got: counter,
                }
            }
            None if self.policy == ReplayPolicy::Contiguous && counter != 0 => {
                Verdict::OutOfOrder {
                    expected: 0,
                    got: counter,
                }
            }
            _ => Verdict::Accepted,
        }
    }
}

impl Transport for AntiReplayLayer<'_> {
    fn send(&self, data: &[u8]) -> Result<()> {
        let counter = self.next_counter.get();
        self.next_counter.set(counter + 1);

        let mut frame = Vec::with_capacity(COUNTER_SIZE + data.len());
        frame.extend_from_slice(&counter.to_be_bytes());
        frame.extend_from_slice(data);
        self.transport.send(&frame)
    }

    fn receive(&self) -> Result<Vec<u8>> {
        let frame = self.transport.receive()?;
        if frame.len() < COUNTER_SIZE {
            return Err(LinkError::Truncated {
                needed: COUNTER_SIZE,
                got: frame.len(),
            });
        }

        let (header, payload) = frame.split_at(COUNTER_SIZE);
        let mut counter_bytes = [0u8; COUNTER_SIZE];
        counter_bytes.copy_from_slice(header);
        let counter = u64::from_be_bytes(counter_bytes);

        let verdict = self.judge(counter);
        match verdict {
            Verdict::Accepted => self.last_accepted.set(Some(counter)),
            Verdict::Replayed { last, .. } => {
                tracing::warn!(layer = "anti-replay", counter, last, "replayed message");
                self.flagged.set(self.flagged.get() + 1);
            }
            Verdict::OutOfOrder { expected, got } => {
                tracing::warn!(layer = "anti-replay", expected, got, "out-of-order message");
                self.flagged.set(self.flagged.get() + 1);
            }
            Verdict::Rejected => {}
        }
        self.last_verdict.set(Some(verdict));

        Ok(payload.to_vec())
    }
}
