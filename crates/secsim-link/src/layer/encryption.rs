//! Confidentiality layer.

use secsim_crypto::{random_bytes, SymmetricCipher};

use crate::error::{LinkError, Result};
use crate::transport::Transport;

/// Encrypts outbound payloads and decrypts inbound frames.
///
/// Frame layout: `iv || ciphertext`, with a fresh random IV per send.
/// IV-less ciphers produce an empty IV prefix.
pub struct EncryptionLayer<'t, C> {
    transport: &'t dyn Transport,
    cipher: C,
}

impl<'t, C: SymmetricCipher> EncryptionLayer<'t, C> {
    /// Layer over `transport` keyed by `cipher`.
    pub fn new(transport: &'t dyn Transport, cipher: C) -> Self {
        Self { transport, cipher }
    }

    /// The layer's cipher.
    pub fn cipher(&self) -> &C {
        &self.cipher
    }
}

impl<C: SymmetricCipher> Transport for EncryptionLayer<'_, C> {
    fn send(&self, data: &[u8]) -> Result<()> {
        let mut frame = random_bytes(self.cipher.iv_size());
        let ciphertext = self.cipher.encrypt(data, &frame)?;
        frame.extend(ciphertext);

        tracing::debug!(layer = "encryption", plain = data.len(), frame = frame.len(), "encrypted");
        self.transport.send(&frame)
    }

    fn receive(&self) -> Result<Vec<u8>> {
        let frame = self.transport.receive()?;
        let iv_size = self.cipher.iv_size();
        if frame.len() < iv_size {
            return Err(LinkError::Truncated {
                needed: iv_size,
                got: frame.len(),
            });
        }

        let (iv, ciphertext) = frame.split_at(iv_size);
        let plaintext = self.cipher.decrypt(ciphertext, iv)?;

        tracing::debug!(layer = "encryption", frame = frame.len(), plain = plaintext.len(), "decrypted");
        Ok(plaintext)
    }
}
