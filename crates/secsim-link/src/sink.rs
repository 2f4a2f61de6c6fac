//! Traffic sinks.
//!
//! Every actor reports what it sends and receives to a sink. The default
//! sink emits `tracing` events; tests use a [`Transcript`] to assert on
//! traffic directly.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use secsim_crypto::printable;

/// Which way a payload moved relative to the actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Sent,
    Received,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Sent => write!(f, "sent"),
            Direction::Received => write!(f, "received"),
        }
    }
}

/// One observed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrafficEntry {
    pub actor: String,
    pub direction: Direction,
    pub data: Vec<u8>,
}

impl fmt::Display for TrafficEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} bytes: {}",
            self.actor,
            self.direction,
            self.data.len(),
            printable(&self.data)
        )
    }
}

/// Destination for actor traffic reports.
pub trait TrafficSink {
    fn record(&self, entry: TrafficEntry);
}

/// Emits each entry as an `info` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TrafficSink for TracingSink {
    fn record(&self, entry: TrafficEntry) {
        tracing::info!(
            actor = %entry.actor,
            direction = %entry.direction,
            len = entry.data.len(),
            payload = %printable(&entry.data),
        );
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TrafficSink for NullSink {
    fn record(&self, _entry: TrafficEntry) {}
}

/// In-memory record of traffic.
///
/// Clones share the same log, so a test keeps one handle while actors
/// write through others.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Rc<RefCell<Vec<TrafficEntry>>>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every entry so far.
    pub fn entries(&self) -> Vec<TrafficEntry> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Payloads `actor` moved in `direction`, oldest first.
    pub fn payloads(&self, actor: &str, direction: Direction) -> Vec<Vec<u8>> {
        self.entries
            .borrow()
            .iter()
            .filter(|e| e.actor == actor && e.direction == direction)
            .map(|e| e.data.clone())
            .collect()
    }

    /// Most recent entry.
    pub fn last(&self) -> Option<TrafficEntry> {
        self.entries.borrow().last().cloned()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl TrafficSink for Transcript {
    fn record(&self, entry: TrafficEntry) {
        self.entries.borrow_mut().push(entry);
    }
}
