//! X25519 key agreement and public-key encryption.
//!
//! [`SealedBox`] is the public-key cipher of this crate: each message is
//! encrypted under a key derived from an ephemeral X25519 exchange with the
//! recipient's static key, then sealed with ChaCha20-Poly1305.
//!
//! Wire format: `ephemeral_public(32) || nonce(12) || ciphertext+tag`.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use x25519_dalek::{EphemeralSecret, PublicKey, StaticSecret};

use crate::capability::{AsymmetricCipher, KeyedCipher, SymmetricCipher};
use crate::error::{CryptoError, Result};
use crate::symmetric::ChaChaPoly;
use crate::util::random_bytes;

const WRAP_CONTEXT: &str = "secsim-v0 sealed-box";

/// An X25519 public key (32 bytes).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct X25519PublicKey(pub [u8; 32]);

impl X25519PublicKey {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse from a slice that must be exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; 32] = bytes.try_into().map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self(arr))
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Short hex fingerprint for logs.
    pub fn fingerprint(&self) -> String {
        hex::encode(&self.0[..8])
    }

    fn to_dalek(self) -> PublicKey {
        PublicKey::from(self.0)
    }
}

impl From<PublicKey> for X25519PublicKey {
    fn from(pk: PublicKey) -> Self {
        Self(*pk.as_bytes())
    }
}

impl fmt::Debug for X25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X25519Pub({})", self.fingerprint())
    }
}

/// An X25519 static secret key.
#[derive(Clone)]
pub struct X25519Secret(StaticSecret);

impl X25519Secret {
    /// Generate a new random secret.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(StaticSecret::from(bytes))
    }

    /// Create from seed bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(StaticSecret::from(bytes))
    }

    /// Derive the public key.
    pub fn public_key(&self) -> X25519PublicKey {
        X25519PublicKey::from(PublicKey::from(&self.0))
    }

    /// Perform key agreement with a peer's public key.
    pub fn diffie_hellman(&self, peer_public: &X25519PublicKey) -> SharedKey {
        let shared = self.0.diffie_hellman(&peer_public.to_dalek());
        SharedKey(*shared.as_bytes())
    }
}

/// A shared secret derived from X25519 key agreement.
#[derive(Clone)]
pub struct SharedKey([u8; 32]);

impl SharedKey {
    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Derive a ready-to-use symmetric cipher bound to `context`.
    pub fn derive_cipher<C: KeyedCipher>(&self, context: &[u8]) -> Result<C> {
        let mut hasher = blake3::Hasher::new_derive_key(WRAP_CONTEXT);
        hasher.update(&self.0);
        hasher.update(context);
        let mut key = vec![0u8; C::KEY_SIZE];
        hasher.finalize_xof().fill(&mut key);
        C::from_key(&key)
    }
}

/// Ephemeral key pair for one-time key agreement.
pub struct EphemeralKeyPair {
    secret: EphemeralSecret,
    public: X25519PublicKey,
}

impl EphemeralKeyPair {
    /// Generate a new ephemeral key pair.
    pub fn generate() -> Self {
        let secret = EphemeralSecret::random_from_rng(rand::thread_rng());
        let public = X25519PublicKey::from(PublicKey::from(&secret));
        Self { secret, public }
    }

    /// Get the public key.
    pub fn public_key(&self) -> X25519PublicKey {
        self.public
    }

    /// Perform key agreement with a peer's public key.
    ///
    /// Consumes the ephemeral secret (can only be used once).
    pub fn diffie_hellman(self, peer_public: &X25519PublicKey) -> SharedKey {
        let shared = self.secret.diffie_hellman(&peer_public.to_dalek());
        SharedKey(*shared.as_bytes())
    }
}

/// Public-key encryption to a single recipient.
///
/// Holds the recipient's public key, and their secret when this instance
/// belongs to the recipient. Instances without a secret can only encrypt.
#[derive(Clone)]
pub struct SealedBox {
    recipient: X25519PublicKey,
    secret: Option<X25519Secret>,
}

impl SealedBox {
    /// A fresh key pair able to encrypt and decrypt.
    pub fn generate() -> Self {
        Self::from_secret(X25519Secret::generate())
    }

    /// The recipient side, from an existing secret.
    pub fn from_secret(secret: X25519Secret) -> Self {
        Self {
            recipient: secret.public_key(),
            secret: Some(secret),
        }
    }

    /// The sender side: encrypt-only.
    pub fn for_recipient(recipient: X25519PublicKey) -> Self {
        Self {
            recipient,
            secret: None,
        }
    }

    /// The recipient's public key.
    pub fn public_key(&self) -> X25519PublicKey {
        self.recipient
    }

    /// An encrypt-only copy of this box.
    pub fn to_public(&self) -> Self {
        Self::for_recipient(self.recipient)
    }

    fn context(ephemeral: &X25519PublicKey, recipient: &X25519PublicKey) -> Vec<u8> {
        let mut context = Vec::with_capacity(64);
        context.extend_from_slice(ephemeral.as_bytes());
        context.extend_from_slice(recipient.as_bytes());
        context
    }
}

impl AsymmetricCipher for SealedBox {
    fn ciphertext_len(&self, plaintext_len: usize) -> usize {
        32 + ChaChaPoly::IV_SIZE + ChaChaPoly::sealed_len(plaintext_len)
    }

    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let ephemeral = EphemeralKeyPair::generate();
        let ephemeral_public = ephemeral.public_key();
        let shared = ephemeral.diffie_hellman(&self.recipient);
        let cipher: ChaChaPoly =
            shared.derive_cipher(&Self::context(&ephemeral_public, &self.recipient))?;

        let nonce = random_bytes(ChaChaPoly::IV_SIZE);
        let mut sealed = ephemeral_public.as_bytes().to_vec();
        sealed.extend_from_slice(&nonce);
        sealed.extend(cipher.encrypt(plaintext, &nonce)?);
        Ok(sealed)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let secret = self.secret.as_ref().ok_or(CryptoError::MissingPrivateKey)?;
        let header = 32 + ChaChaPoly::IV_SIZE;
        if ciphertext.len() < header {
            return Err(CryptoError::Decryption(format!(
                "sealed box of {} bytes is shorter than its {header}-byte header",
                ciphertext.len()
            )));
        }

        let (ephemeral, rest) = ciphertext.split_at(32);
        let (nonce, sealed) = rest.split_at(ChaChaPoly::IV_SIZE);
        let ephemeral_public = X25519PublicKey::from_slice(ephemeral)?;

        let shared = secret.diffie_hellman(&ephemeral_public);
        let cipher: ChaChaPoly =
            shared.derive_cipher(&Self::context(&ephemeral_public, &self.recipient))?;
        cipher.decrypt(sealed, nonce)
    }
}
