//! Integrity layer.

use std::cell::Cell;

use secsim_crypto::Authenticator;

use crate::error::Result;
use crate::layer::Verdict;
use crate::transport::Transport;

/// Appends an authentication code on send and checks it on receive.
///
/// Frame layout: `message || code`. A failed check is logged and recorded
/// as [`Verdict::Rejected`], and the message is delivered anyway so that
/// callers can observe what an attacker managed to inject.
pub struct AuthenticationLayer<'t, A> {
    transport: &'t dyn Transport,
    authenticator: A,
    last_verdict: Cell<Option<Verdict>>,
    rejected: Cell<usize>,
}

impl<'t, A: Authenticator> AuthenticationLayer<'t, A> {
    /// Layer over `transport` using `authenticator`.
    pub fn new(transport: &'t dyn Transport, authenticator: A) -> Self {
        Self {
            transport,
            authenticator,
            last_verdict: Cell::new(None),
            rejected: Cell::new(0),
        }
    }

    /// The layer's authenticator.
    pub fn authenticator(&self) -> &A {
        &self.authenticator
    }

    /// Outcome of the most recent receive, if any.
    pub fn last_verdict(&self) -> Option<Verdict> {
        self.last_verdict.get()
    }

    /// Number of received frames that failed verification.
    pub fn rejected_count(&self) -> usize {
        self.rejected.get()
    }

    fn reject(&self, len: usize) {
        tracing::warn!(
            layer = "authentication",
            len,
            "integrity check failed; delivering message anyway"
        );
        self.last_verdict.set(Some(Verdict::Rejected));
        self.rejected.set(self.rejected.get() + 1);
    }
}

impl<A: Authenticator> Transport for AuthenticationLayer<'_, A> {
    fn send(&self, data: &[u8]) -> Result<()> {
        let code = self.authenticator.compute_code(data)?;
        let mut frame = Vec::with_capacity(data.len() + code.len());
        frame.extend_from_slice(data);
        frame.extend(code);
        self.transport.send(&frame)
    }

    fn receive(&self) -> Result<Vec<u8>> {
        let frame = self.transport.receive()?;
        let code_size = self.authenticator.code_size();

        // No room for a code: the whole frame is the (unauthenticated) message.
        if frame.len() < code_size {
            self.reject(frame.len());
            return Ok(frame);
        }

        let split = frame.len() - code_size;
        let (message, code) = frame.split_at(split);
        if self.authenticator.verify(message, code) {
            self.last_verdict.set(Some(Verdict::Accepted));
        } else {
            self.reject(message.len());
        }
        Ok(message.to_vec())
    }
}
