//! Unkeyed digests.
//!
//! A digest alone proves nothing about who sent a message: anyone can
//! recompute it. They are still [`Authenticator`]s so they can be stacked,
//! and so they can be wrapped by [`crate::EncryptedHashMac`].

use sha2::{Digest, Sha256};

use crate::capability::Authenticator;
use crate::error::Result;
use crate::util::{xor, zero_pad};

/// XOR of all fixed-size blocks of the zero-padded message.
///
/// Linear, so trivially malleable: swapping two blocks, or appending a block
/// that cancels a change, leaves the digest untouched.
#[derive(Clone, Copy, Debug)]
pub struct XorDigest {
    size: usize,
}

impl XorDigest {
    /// Digest with an explicit block size in bytes.
    pub fn new(size: usize) -> Self {
        Self { size: size.max(1) }
    }
}

impl Default for XorDigest {
    fn default() -> Self {
        Self::new(8)
    }
}

impl Authenticator for XorDigest {
    fn code_size(&self) -> usize {
        self.size
    }

    fn compute_code(&self, message: &[u8]) -> Result<Vec<u8>> {
        let padded = zero_pad(message, self.size);
        let digest = padded
            .chunks(self.size)
            .fold(vec![0u8; self.size], |acc, block| xor(&acc, block));
        Ok(digest)
    }
}

/// SHA-256.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256Digest;

impl Authenticator for Sha256Digest {
    fn code_size(&self) -> usize {
        32
    }

    fn compute_code(&self, message: &[u8]) -> Result<Vec<u8>> {
        let mut hasher = Sha256::new();
        hasher.update(message);
        Ok(hasher.finalize().to_vec())
    }
}

/// Blake3 with the default 32-byte output.
#[derive(Clone, Copy, Debug, Default)]
pub struct Blake3Digest;

impl Authenticator for Blake3Digest {
    fn code_size(&self) -> usize {
        32
    }

    fn compute_code(&self, message: &[u8]) -> Result<Vec<u8>> {
        Ok(blake3::hash(message).as_bytes().to_vec())
    }
}
