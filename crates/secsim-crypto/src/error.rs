//! Error types for the capability crate.

use thiserror::Error;

/// Errors raised by cipher, authenticator and certificate operations.
///
/// Integrity failures are deliberately absent: authenticators answer
/// `verify` with a plain `bool`.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("invalid key length: expected {expected}, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("invalid iv length: expected {expected}, got {got}")]
    InvalidIvLength { expected: usize, got: usize },

    /// The one-time pad is shorter than the message.
    #[error("message of {len} bytes exceeds the {max}-byte key")]
    MessageTooLong { len: usize, max: usize },

    #[error("encryption error: {0}")]
    Encryption(String),

    /// Bad padding, failed tag check, malformed ciphertext.
    #[error("decryption error: {0}")]
    Decryption(String),

    /// The capability only holds the public half of its key pair.
    #[error("operation requires a private key")]
    MissingPrivateKey,

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for capability operations.
pub type Result<T> = std::result::Result<T, CryptoError>;
