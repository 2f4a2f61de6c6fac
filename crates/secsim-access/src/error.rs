//! Error types for the access-control crate.
//!
//! Authorization outcomes are not errors: they travel back to the client as
//! a response status. These variants cover wire and setup failures only.

use secsim_link::LinkError;
use thiserror::Error;

/// Errors that can occur while exchanging requests or configuring policies.
#[derive(Debug, Error)]
pub enum AccessError {
    /// A request or response was not a JSON object.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The transport failed.
    #[error("link error: {0}")]
    Link(#[from] LinkError),

    /// A role name that was never registered.
    #[error("unknown role: {0}")]
    UnknownRole(String),

    /// A role name registered twice.
    #[error("duplicate role: {0}")]
    DuplicateRole(String),
}

/// Result type for access-control operations.
pub type Result<T> = std::result::Result<T, AccessError>;
