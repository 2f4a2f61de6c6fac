//! The attacker's toolbox.
//!
//! An adversary is an ordinary [`Actor`] with access to the bare channel.
//! Every move here is built from plain `receive` and `send` calls; the
//! channel offers no special hooks.

use secsim_link::{Actor, Result, Transport};

/// Eavesdrop, drop, modify and inject traffic.
#[derive(Debug, Clone)]
pub struct Adversary {
    actor: Actor,
}

impl Adversary {
    pub fn new(actor: Actor) -> Self {
        Self { actor }
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    /// Copy the pending message and put it back untouched.
    pub fn eavesdrop(&self, transport: &dyn Transport) -> Result<Vec<u8>> {
        let captured = self.actor.receive(transport)?;
        transport.send(&captured)?;
        Ok(captured)
    }

    /// Take the pending message off the wire.
    pub fn intercept(&self, transport: &dyn Transport) -> Result<Vec<u8>> {
        self.actor.receive(transport)
    }

    /// Replace the pending message with `edit(message)`. Returns the original.
    pub fn tamper(
        &self,
        transport: &dyn Transport,
        edit: impl FnOnce(&[u8]) -> Vec<u8>,
    ) -> Result<Vec<u8>> {
        let original = self.actor.receive(transport)?;
        let forged = edit(&original);
        tracing::debug!(
            adversary = %self.actor.name(),
            before = original.len(),
            after = forged.len(),
            "tampered"
        );
        self.actor.send(transport, &forged)?;
        Ok(original)
    }

    /// Put arbitrary bytes on the wire, e.g. a previously captured message.
    pub fn inject(&self, transport: &dyn Transport, data: &[u8]) -> Result<()> {
        self.actor.send(transport, data)
    }
}
