//! Unified error type.

use secsim_access::AccessError;
use secsim_crypto::CryptoError;
use secsim_link::LinkError;
use thiserror::Error;

/// Any failure a scenario can run into.
#[derive(Debug, Error)]
pub enum SimError {
    /// A cryptographic transform failed.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// The channel or a layer failed.
    #[error("link error: {0}")]
    Link(#[from] LinkError),

    /// The file server failed to exchange a request.
    #[error("access error: {0}")]
    Access(#[from] AccessError),
}

/// Result type for scenarios.
pub type Result<T> = std::result::Result<T, SimError>;
