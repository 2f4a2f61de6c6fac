//! # secsim link
//!
//! Moving bytes between actors: a shared single-slot [`Channel`], protocol
//! layers that stack on top of it, and [`Actor`]s that report their traffic.
//!
//! ## Interception
//!
//! The channel has no notion of sender or recipient. Whoever receives first
//! gets the message, so an attacker is just another actor reading the bare
//! channel beneath a layer stack:
//!
//! ```rust
//! use secsim_link::{Actor, Channel};
//!
//! let channel = Channel::new();
//! let alice = Actor::new("Alice");
//! let mallory = Actor::new("Mallory");
//! let bob = Actor::new("Bob");
//!
//! alice.send(&channel, b"meet at noon").unwrap();
//! let stolen = mallory.receive(&channel).unwrap();
//! mallory.send(&channel, b"meet at midnight").unwrap();
//!
//! assert_eq!(stolen, b"meet at noon");
//! assert_eq!(bob.receive(&channel).unwrap(), b"meet at midnight");
//! ```

pub mod actor;
pub mod channel;
pub mod error;
pub mod layer;
pub mod sink;
pub mod transport;

pub use actor::Actor;
pub use channel::{Channel, ChannelConfig, FullSlot};
pub use error::{LinkError, Result};
pub use layer::{
    AntiReplayLayer, AuthenticationLayer, EncryptionLayer, ReplayPolicy, Verdict,
};
pub use sink::{Direction, NullSink, TracingSink, TrafficEntry, TrafficSink, Transcript};
pub use transport::Transport;
