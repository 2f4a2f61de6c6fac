//! Error types for the link layer.

use secsim_crypto::CryptoError;
use thiserror::Error;

/// Errors that can occur while moving bytes through a channel or layer stack.
///
/// Integrity and replay findings are not errors: layers flag them and
/// still deliver the message.
#[derive(Debug, Error)]
pub enum LinkError {
    /// A message is already pending and the channel rejects overwrites.
    #[error("channel full: a message is already pending")]
    ChannelFull,

    /// Nothing to receive.
    #[error("channel empty: no message pending")]
    ChannelEmpty,

    /// A frame is too short to carry the header a layer expects.
    #[error("truncated frame: needed at least {needed} bytes, got {got}")]
    Truncated { needed: usize, got: usize },

    /// A cipher rejected the frame (bad padding, failed tag, wrong key).
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}

/// Result type for link operations.
pub type Result<T> = std::result::Result<T, LinkError>;
