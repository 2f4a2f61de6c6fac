//! # secsim crypto
//!
//! Capability contracts and the algorithms that implement them.
//!
//! This crate contains no I/O and no transport logic. Everything here is a
//! pure transform that a layer, an actor, or an attack script can call.
//!
//! ## Contracts
//!
//! - [`SymmetricCipher`] - `encrypt`/`decrypt` under a per-message IV
//! - [`AsymmetricCipher`] - public-key `encrypt`, private-key `decrypt`
//! - [`Authenticator`] - `compute_code`/`verify` with a declared `code_size`
//!
//! ## Composition
//!
//! Capabilities compose recursively, not just transports:
//!
//! - [`EncryptedHashMac`] is an authenticator built from a digest and a cipher
//! - [`DigitalEnvelope`] is a symmetric cipher built from a keyed cipher and a
//!   public-key cipher
//!
//! ```rust
//! use secsim_crypto::{Aes, Authenticator, EncryptedHashMac, KeyedCipher, Sha256Digest};
//!
//! let mac = EncryptedHashMac::new(Sha256Digest, Aes::generate());
//! let code = mac.compute_code(b"Hello, Bob! - Alice").unwrap();
//! assert!(mac.verify(b"Hello, Bob! - Alice", &code));
//! ```

pub mod asymmetric;
pub mod capability;
pub mod certificate;
pub mod digest;
pub mod envelope;
pub mod error;
pub mod mac;
pub mod signature;
pub mod symmetric;
pub mod util;

pub use asymmetric::{EphemeralKeyPair, SealedBox, SharedKey, X25519PublicKey, X25519Secret};
pub use capability::{AsymmetricCipher, Authenticator, KeyedCipher, SymmetricCipher};
pub use certificate::{Certificate, CertificateAuthority};
pub use digest::{Blake3Digest, Sha256Digest, XorDigest};
pub use envelope::DigitalEnvelope;
pub use error::{CryptoError, Result};
pub use mac::{EncryptedHashMac, Hmac, KeyedHashMac};
pub use signature::{Ed25519PublicKey, Ed25519Signature, Ed25519Signer, Keypair};
pub use symmetric::{Aes, ChaCha, ChaChaPoly, Otp};
pub use util::{printable, random_bytes, xor, zero_pad};
