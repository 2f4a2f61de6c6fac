//! Message authentication codes.

use hmac::Mac;
use sha2::{Digest, Sha256};

use crate::capability::{Authenticator, SymmetricCipher};
use crate::error::{CryptoError, Result};
use crate::util::random_bytes;

type HmacSha256 = hmac::Hmac<Sha256>;

/// Default MAC key size in bytes.
pub const MAC_KEY_SIZE: usize = 32;

/// SHA-256 over `key || message`.
///
/// Prefix-keyed hashing is open to length extension; [`Hmac`] is the fix.
#[derive(Clone)]
pub struct KeyedHashMac {
    key: Vec<u8>,
}

impl KeyedHashMac {
    /// MAC with the given key.
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self { key: key.into() }
    }

    /// MAC with a fresh random key.
    pub fn generate() -> Self {
        Self::new(random_bytes(MAC_KEY_SIZE))
    }
}

impl Authenticator for KeyedHashMac {
    fn code_size(&self) -> usize {
        32
    }

    fn compute_code(&self, message: &[u8]) -> Result<Vec<u8>> {
        let mut hasher = Sha256::new();
        hasher.update(&self.key);
        hasher.update(message);
        Ok(hasher.finalize().to_vec())
    }
}

/// HMAC-SHA256.
#[derive(Clone)]
pub struct Hmac {
    key: Vec<u8>,
}

impl Hmac {
    /// HMAC with the given key.
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self { key: key.into() }
    }

    /// HMAC with a fresh random key.
    pub fn generate() -> Self {
        Self::new(random_bytes(MAC_KEY_SIZE))
    }

    fn mac(&self) -> Result<HmacSha256> {
        HmacSha256::new_from_slice(&self.key).map_err(|_| CryptoError::InvalidKeyLength {
            expected: MAC_KEY_SIZE,
            got: self.key.len(),
        })
    }
}

impl Authenticator for Hmac {
    fn code_size(&self) -> usize {
        32
    }

    fn compute_code(&self, message: &[u8]) -> Result<Vec<u8>> {
        let mut mac = self.mac()?;
        mac.update(message);
        Ok(mac.finalize().into_bytes().to_vec())
    }

    fn verify(&self, message: &[u8], code: &[u8]) -> bool {
        match self.mac() {
            Ok(mut mac) => {
                mac.update(message);
                mac.verify_slice(code).is_ok()
            }
            Err(_) => false,
        }
    }
}

/// A digest encrypted under a symmetric cipher.
///
/// Code layout: `iv || encrypt(digest(message), iv)`. Only as strong as the
/// inner digest: wrapping [`crate::XorDigest`] keeps all of its malleability.
#[derive(Clone)]
pub struct EncryptedHashMac<H, C> {
    hash: H,
    cipher: C,
}

impl<H: Authenticator, C: SymmetricCipher> EncryptedHashMac<H, C> {
    /// Combine a digest with a cipher.
    pub fn new(hash: H, cipher: C) -> Self {
        Self { hash, cipher }
    }

    /// The inner digest.
    pub fn hash(&self) -> &H {
        &self.hash
    }
}

impl<H: Authenticator, C: SymmetricCipher> Authenticator for EncryptedHashMac<H, C> {
    fn code_size(&self) -> usize {
        self.cipher.iv_size() + self.cipher.ciphertext_len(self.hash.code_size())
    }

    fn compute_code(&self, message: &[u8]) -> Result<Vec<u8>> {
        let iv = random_bytes(self.cipher.iv_size());
        let digest = self.hash.compute_code(message)?;
        let mut code = iv.clone();
        code.extend(self.cipher.encrypt(&digest, &iv)?);
        Ok(code)
    }

    fn verify(&self, message: &[u8], code: &[u8]) -> bool {
        let iv_size = self.cipher.iv_size();
        if code.len() < iv_size {
            return false;
        }
        let (iv, encrypted) = code.split_at(iv_size);
        match self.cipher.decrypt(encrypted, iv) {
            Ok(digest) => self.hash.verify(message, &digest),
            Err(_) => false,
        }
    }
}
