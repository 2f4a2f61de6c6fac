//! Capability contracts.
//!
//! Every algorithm in this crate implements one of these narrow traits.
//! Layers and composite constructions only ever talk to the traits, so any
//! algorithm can be swapped for another, or for a composite built from
//! other capabilities.

use crate::error::Result;
use crate::util::random_bytes;

/// A symmetric cipher with a fixed key and a per-message IV.
pub trait SymmetricCipher {
    /// Size of the initialization vector in bytes. Zero for IV-less ciphers.
    fn iv_size(&self) -> usize;

    /// Length of the ciphertext produced for a plaintext of `plaintext_len` bytes.
    fn ciphertext_len(&self, plaintext_len: usize) -> usize;

    /// Encrypt `plaintext` under `iv`.
    fn encrypt(&self, plaintext: &[u8], iv: &[u8]) -> Result<Vec<u8>>;

    /// Decrypt `ciphertext` under `iv`.
    ///
    /// Fails when the ciphertext is detectably corrupt (bad padding, failed
    /// tag check). A cipher without such checks returns garbled plaintext.
    fn decrypt(&self, ciphertext: &[u8], iv: &[u8]) -> Result<Vec<u8>>;
}

/// A symmetric cipher that can be instantiated from raw key bytes.
///
/// Needed wherever keys are generated on the fly, e.g. the digital envelope.
pub trait KeyedCipher: SymmetricCipher + Sized {
    /// Key size in bytes.
    const KEY_SIZE: usize;

    /// IV size in bytes.
    const IV_SIZE: usize;

    /// Build the cipher from key bytes.
    fn from_key(key: &[u8]) -> Result<Self>;

    /// Ciphertext length for a plaintext of `plaintext_len` bytes.
    fn sealed_len(plaintext_len: usize) -> usize;

    /// Key bytes held by this instance.
    fn key(&self) -> &[u8];

    /// Build the cipher from a fresh random key.
    fn generate() -> Self {
        Self::from_key(&random_bytes(Self::KEY_SIZE))
            .expect("key of the declared size should always be accepted")
    }
}

/// A public-key cipher.
pub trait AsymmetricCipher {
    /// Length of the ciphertext produced for a plaintext of `plaintext_len` bytes.
    fn ciphertext_len(&self, plaintext_len: usize) -> usize;

    /// Encrypt with the public key.
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>>;

    /// Decrypt with the private key.
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>>;
}

/// Computes and verifies a code (digest, MAC, signature) over a message.
pub trait Authenticator {
    /// Size of the code in bytes.
    ///
    /// Layers use this to split codes off the end of a frame.
    fn code_size(&self) -> usize;

    /// Compute the code for `message`.
    fn compute_code(&self, message: &[u8]) -> Result<Vec<u8>>;

    /// Check `code` against `message`.
    ///
    /// The default recomputes the code and compares.
    fn verify(&self, message: &[u8], code: &[u8]) -> bool {
        match self.compute_code(message) {
            Ok(expected) => expected == code,
            Err(_) => false,
        }
    }
}

impl<T: SymmetricCipher + ?Sized> SymmetricCipher for &T {
    fn iv_size(&self) -> usize {
        (**self).iv_size()
    }

    fn ciphertext_len(&self, plaintext_len: usize) -> usize {
        (**self).ciphertext_len(plaintext_len)
    }

    fn encrypt(&self, plaintext: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        (**self).encrypt(plaintext, iv)
    }

    fn decrypt(&self, ciphertext: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        (**self).decrypt(ciphertext, iv)
    }
}

impl<T: SymmetricCipher + ?Sized> SymmetricCipher for Box<T> {
    fn iv_size(&self) -> usize {
        (**self).iv_size()
    }

    fn ciphertext_len(&self, plaintext_len: usize) -> usize {
        (**self).ciphertext_len(plaintext_len)
    }

    fn encrypt(&self, plaintext: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        (**self).encrypt(plaintext, iv)
    }

    fn decrypt(&self, ciphertext: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        (**self).decrypt(ciphertext, iv)
    }
}

impl<T: AsymmetricCipher + ?Sized> AsymmetricCipher for &T {
    fn ciphertext_len(&self, plaintext_len: usize) -> usize {
        (**self).ciphertext_len(plaintext_len)
    }

    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        (**self).encrypt(plaintext)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        (**self).decrypt(ciphertext)
    }
}

impl<T: Authenticator + ?Sized> Authenticator for &T {
    fn code_size(&self) -> usize {
        (**self).code_size()
    }

    fn compute_code(&self, message: &[u8]) -> Result<Vec<u8>> {
        (**self).compute_code(message)
    }

    fn verify(&self, message: &[u8], code: &[u8]) -> bool {
        (**self).verify(message, code)
    }
}

impl<T: Authenticator + ?Sized> Authenticator for Box<T> {
    fn code_size(&self) -> usize {
        (**self).code_size()
    }

    fn compute_code(&self, message: &[u8]) -> Result<Vec<u8>> {
        (**self).compute_code(message)
    }

    fn verify(&self, message: &[u8], code: &[u8]) -> bool {
        (**self).verify(message, code)
    }
}
