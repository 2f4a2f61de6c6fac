//! Named participants.

use std::rc::Rc;

use crate::error::Result;
use crate::sink::{Direction, TracingSink, TrafficEntry, TrafficSink};
use crate::transport::Transport;

/// A named party that sends and receives through any transport.
///
/// Actors hold no keys; capabilities live in the layers they are handed.
/// Quiet actors still move bytes, they just do not report them.
#[derive(Clone)]
pub struct Actor {
    name: String,
    quiet: bool,
    sink: Rc<dyn TrafficSink>,
}

impl Actor {
    /// A non-quiet actor reporting to `tracing`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quiet: false,
            sink: Rc::new(TracingSink),
        }
    }

    /// Set whether traffic is reported.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Report traffic to `sink` instead of `tracing`.
    pub fn with_sink(mut self, sink: impl TrafficSink + 'static) -> Self {
        self.sink = Rc::new(sink);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Report and forward `data` into `transport`.
    pub fn send(&self, transport: &dyn Transport, data: &[u8]) -> Result<()> {
        self.report(Direction::Sent, data);
        transport.send(data)
    }

    /// Receive from `transport` and report what arrived.
    pub fn receive(&self, transport: &dyn Transport) -> Result<Vec<u8>> {
        let data = transport.receive()?;
        self.report(Direction::Received, &data);
        Ok(data)
    }

    fn report(&self, direction: Direction, data: &[u8]) {
        if self.quiet {
            return;
        }
        self.sink.record(TrafficEntry {
            actor: self.name.clone(),
            direction,
            data: data.to_vec(),
        });
    }
}

impl std::fmt::Debug for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Actor")
            .field("name", &self.name)
            .field("quiet", &self.quiet)
            .finish_non_exhaustive()
    }
}
