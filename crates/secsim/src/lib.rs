//! # secsim
//!
//! A simulation framework for secure-communication protocols and
//! access-control models.
//!
//! ## Overview
//!
//! Actors exchange byte messages over a shared single-slot channel. Protocol
//! layers (encryption, authentication, anti-replay) stack on top of the
//! channel in any order, and an attacker is simply another actor reading the
//! bare channel beneath them. A JSON file server enforces a pluggable access
//! policy over the same transports.
//!
//! ## Usage
//!
//! ```rust
//! use secsim::crypto::{Aes, Hmac, KeyedCipher};
//! use secsim::link::{Actor, AuthenticationLayer, Channel, EncryptionLayer, Verdict};
//! use secsim::Adversary;
//!
//! let channel = Channel::new();
//! let (cipher, mac) = (Aes::generate(), Hmac::generate());
//!
//! let alice = Actor::new("Alice");
//! let bob = Actor::new("Bob");
//! let mallory = Adversary::new(Actor::new("Mallory"));
//!
//! let authentication = AuthenticationLayer::new(&channel, &mac);
//! let encryption = EncryptionLayer::new(&authentication, &cipher);
//!
//! alice.send(&encryption, b"Hello, Bob! - Alice").unwrap();
//! let ciphertext = mallory.eavesdrop(&channel).unwrap();
//! assert!(!ciphertext.windows(5).any(|w| w == b"Hello"));
//!
//! assert_eq!(bob.receive(&encryption).unwrap(), b"Hello, Bob! - Alice");
//! assert_eq!(authentication.last_verdict(), Some(Verdict::Accepted));
//! ```
//!
//! ## Re-exports
//!
//! - `secsim::crypto` - ciphers, authenticators, key agreement, certificates
//! - `secsim::link` - channel, layers, actors
//! - `secsim::access` - file server and access-control policies

pub mod adversary;
pub mod error;

// Re-export component crates
pub use secsim_access as access;
pub use secsim_crypto as crypto;
pub use secsim_link as link;

pub use adversary::Adversary;
pub use error::{Result, SimError};

// Re-export commonly used types
pub use secsim_access::{Action, FileServer, JsonMessage, Request, Status};
pub use secsim_crypto::{AsymmetricCipher, Authenticator, KeyedCipher, SymmetricCipher};
pub use secsim_link::{
    Actor, AntiReplayLayer, AuthenticationLayer, Channel, EncryptionLayer, Transport, Verdict,
};
