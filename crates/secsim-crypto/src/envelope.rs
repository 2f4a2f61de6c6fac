//! Digital envelope.
//!
//! Every message gets a fresh symmetric content key. The payload is
//! encrypted with the content key, and the content key is encrypted for the
//! recipient with a public-key cipher. The envelope is itself a
//! [`SymmetricCipher`], so it drops into an encryption layer unchanged.
//!
//! Ciphertext layout: `encrypted_key || encrypted_payload`.

use std::marker::PhantomData;

use crate::capability::{AsymmetricCipher, KeyedCipher, SymmetricCipher};
use crate::error::{CryptoError, Result};
use crate::util::random_bytes;

/// Hybrid encryption: a content cipher `M` keyed per message, its key wrapped by `K`.
pub struct DigitalEnvelope<M, K> {
    key_cipher: K,
    _message: PhantomData<M>,
}

impl<M: KeyedCipher, K: AsymmetricCipher> DigitalEnvelope<M, K> {
    /// Envelope whose content keys are wrapped by `key_cipher`.
    pub fn new(key_cipher: K) -> Self {
        Self {
            key_cipher,
            _message: PhantomData,
        }
    }

    /// Size of the wrapped content key at the front of each ciphertext.
    pub fn encrypted_key_len(&self) -> usize {
        self.key_cipher.ciphertext_len(M::KEY_SIZE)
    }

    /// The key-wrapping cipher.
    pub fn key_cipher(&self) -> &K {
        &self.key_cipher
    }
}

impl<M: KeyedCipher, K: AsymmetricCipher> SymmetricCipher for DigitalEnvelope<M, K> {
    fn iv_size(&self) -> usize {
        M::IV_SIZE
    }

    fn ciphertext_len(&self, plaintext_len: usize) -> usize {
        self.encrypted_key_len() + M::sealed_len(plaintext_len)
    }

    fn encrypt(&self, plaintext: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        let content_key = random_bytes(M::KEY_SIZE);
        let content_cipher = M::from_key(&content_key)?;

        let mut envelope = self.key_cipher.encrypt(&content_key)?;
        envelope.extend(content_cipher.encrypt(plaintext, iv)?);
        Ok(envelope)
    }

    fn decrypt(&self, ciphertext: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        let key_len = self.encrypted_key_len();
        if ciphertext.len() < key_len {
            return Err(CryptoError::Decryption(format!(
                "envelope of {} bytes is shorter than its {key_len}-byte wrapped key",
                ciphertext.len()
            )));
        }

        let (wrapped_key, payload) = ciphertext.split_at(key_len);
        let content_key = self.key_cipher.decrypt(wrapped_key)?;
        M::from_key(&content_key)?.decrypt(payload, iv)
    }
}
