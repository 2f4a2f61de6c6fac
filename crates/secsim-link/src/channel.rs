//! The shared single-slot channel.
//!
//! A channel holds at most one pending message and has no notion of sender
//! or recipient: whoever calls `receive` first drains it. That asymmetry is
//! how eavesdropping and tampering are expressed, with no attacker API.

use std::cell::RefCell;

use crate::error::{LinkError, Result};
use crate::transport::Transport;

/// What `send` does when a message is already pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FullSlot {
    /// Fail with [`LinkError::ChannelFull`].
    #[default]
    Reject,
    /// Replace the pending message.
    Overwrite,
}

/// Channel configuration.
#[derive(Debug, Clone, Default)]
pub struct ChannelConfig {
    /// Double-send behaviour.
    pub full_slot: FullSlot,
}

/// In-memory medium for one pending byte message.
#[derive(Debug, Default)]
pub struct Channel {
    slot: RefCell<Option<Vec<u8>>>,
    config: ChannelConfig,
}

impl Channel {
    /// A channel that rejects double sends.
    pub fn new() -> Self {
        Self::default()
    }

    /// A channel with explicit configuration.
    pub fn with_config(config: ChannelConfig) -> Self {
        Self {
            slot: RefCell::new(None),
            config,
        }
    }

    /// Whether no message is pending.
    pub fn is_empty(&self) -> bool {
        self.slot.borrow().is_none()
    }

    /// Copy of the pending message, without draining it.
    pub fn peek(&self) -> Option<Vec<u8>> {
        self.slot.borrow().clone()
    }

    /// The active configuration.
    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }
}

impl Transport for Channel {
    fn send(&self, data: &[u8]) -> Result<()> {
        let mut slot = self.slot.borrow_mut();
        if let Some(pending) = slot.as_ref() {
            match self.config.full_slot {
                FullSlot::Reject => return Err(LinkError::ChannelFull),
                FullSlot::Overwrite => {
                    tracing::debug!(
                        dropped = pending.len(),
                        "channel overwrite: pending message replaced"
                    );
                }
            }
        }
        *slot = Some(data.to_vec());
        Ok(())
    }

    fn receive(&self) -> Result<Vec<u8>> {
        self.slot.borrow_mut().take().ok_or(LinkError::ChannelEmpty)
    }
}
