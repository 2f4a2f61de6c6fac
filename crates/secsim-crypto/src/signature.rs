//! Ed25519 signatures.
//!
//! Wraps ed25519-dalek with strong types and exposes a signer as an
//! [`Authenticator`], so signatures can be stacked like any other code.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::capability::Authenticator;
use crate::error::{CryptoError, Result};

/// Size of an Ed25519 signature in bytes.
pub const SIGNATURE_SIZE: usize = 64;

/// A 32-byte Ed25519 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ed25519PublicKey(pub [u8; 32]);

impl Ed25519PublicKey {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Verify a signature over a message.
    pub fn verify(&self, message: &[u8], signature: &Ed25519Signature) -> Result<()> {
        let verifying_key =
            VerifyingKey::from_bytes(&self.0).map_err(|_| CryptoError::InvalidPublicKey)?;

        let sig = Signature::from_bytes(&signature.0);

        verifying_key
            .verify(message, &sig)
            .map_err(|_| CryptoError::InvalidSignature)
    }
}

impl fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Pub({})", &self.to_hex()[..16])
    }
}

/// A 64-byte Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ed25519Signature(pub [u8; 64]);

impl Ed25519Signature {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Parse from a slice, failing unless it is exactly 64 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; 64] = bytes.try_into().map_err(|_| CryptoError::InvalidSignature)?;
        Ok(Self(arr))
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Sig({}...)", &hex::encode(self.0)[..16])
    }
}

/// A signing keypair.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let signing_key = SigningKey::generate(&mut rng);
        Self { signing_key }
    }

    /// Create from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        Self { signing_key }
    }

    /// Get the public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign a message.
    pub fn sign(&self, message: &[u8]) -> Ed25519Signature {
        let sig = self.signing_key.sign(message);
        Ed25519Signature(sig.to_bytes())
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({:?})", self.public_key())
    }
}

/// Signs outgoing messages and verifies incoming ones.
///
/// A verifier built with [`Ed25519Signer::verifier`] holds only the public
/// key and cannot produce codes.
#[derive(Clone, Debug)]
pub struct Ed25519Signer {
    public: Ed25519PublicKey,
    keypair: Option<Keypair>,
}

impl Ed25519Signer {
    /// Signer with a fresh keypair.
    pub fn generate() -> Self {
        Self::new(Keypair::generate())
    }

    /// Signer for an existing keypair.
    pub fn new(keypair: Keypair) -> Self {
        Self {
            public: keypair.public_key(),
            keypair: Some(keypair),
        }
    }

    /// Verify-only instance.
    pub fn verifier(public: Ed25519PublicKey) -> Self {
        Self {
            public,
            keypair: None,
        }
    }

    /// The verification key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        self.public
    }
}

impl Authenticator for Ed25519Signer {
    fn code_size(&self) -> usize {
        SIGNATURE_SIZE
    }

    fn compute_code(&self, message: &[u8]) -> Result<Vec<u8>> {
        let keypair = self.keypair.as_ref().ok_or(CryptoError::MissingPrivateKey)?;
        Ok(keypair.sign(message).0.to_vec())
    }

    fn verify(&self, message: &[u8], code: &[u8]) -> bool {
        Ed25519Signature::from_slice(code)
            .and_then(|sig| self.public.verify(message, &sig))
            .is_ok()
    }
}
