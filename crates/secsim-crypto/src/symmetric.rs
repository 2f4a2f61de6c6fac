//! Symmetric ciphers.
//!
//! Four ciphers with different failure behaviour, so exercises can contrast
//! silent corruption with detected corruption:
//!
//! | Cipher       | IV | Tampering on decrypt            |
//! |--------------|----|---------------------------------|
//! | [`Otp`]      | 0  | silent (bit flips pass through) |
//! | [`ChaCha`]   | 12 | silent                          |
//! | [`Aes`]      | 16 | usually detected (bad padding)  |
//! | [`ChaChaPoly`] | 12 | always detected (tag check)   |

use aes::cipher::{
    block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit, StreamCipher,
};
use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::Nonce;

use crate::capability::{KeyedCipher, SymmetricCipher};
use crate::error::{CryptoError, Result};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

const AES_BLOCK: usize = 16;
const CHACHA_NONCE: usize = 12;
const POLY1305_TAG: usize = 16;

fn check_iv(iv: &[u8], expected: usize) -> Result<()> {
    if iv.len() != expected {
        return Err(CryptoError::InvalidIvLength {
            expected,
            got: iv.len(),
        });
    }
    Ok(())
}

fn key_array(key: &[u8]) -> Result<[u8; 32]> {
    key.try_into().map_err(|_| CryptoError::InvalidKeyLength {
        expected: 32,
        got: key.len(),
    })
}

/// One-time pad: XOR with a key at least as long as the message.
#[derive(Clone)]
pub struct Otp {
    key: Vec<u8>,
}

impl Otp {
    /// Wrap an existing pad.
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self { key: key.into() }
    }

    fn apply(&self, data: &[u8]) -> Result<Vec<u8>> {
        if data.len() > self.key.len() {
            return Err(CryptoError::MessageTooLong {
                len: data.len(),
                max: self.key.len(),
            });
        }
        Ok(crate::util::xor(data, &self.key))
    }
}

impl SymmetricCipher for Otp {
    fn iv_size(&self) -> usize {
        0
    }

    fn ciphertext_len(&self, plaintext_len: usize) -> usize {
        plaintext_len
    }

    fn encrypt(&self, plaintext: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        check_iv(iv, 0)?;
        self.apply(plaintext)
    }

    fn decrypt(&self, ciphertext: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        check_iv(iv, 0)?;
        self.apply(ciphertext)
    }
}

impl KeyedCipher for Otp {
    const KEY_SIZE: usize = 256;
    const IV_SIZE: usize = 0;

    fn from_key(key: &[u8]) -> Result<Self> {
        Ok(Self::new(key))
    }

    fn sealed_len(plaintext_len: usize) -> usize {
        plaintext_len
    }

    fn key(&self) -> &[u8] {
        &self.key
    }
}

/// AES-256 in CBC mode with PKCS#7 padding.
#[derive(Clone)]
pub struct Aes {
    key: [u8; 32],
}

impl SymmetricCipher for Aes {
    fn iv_size(&self) -> usize {
        Self::IV_SIZE
    }

    fn ciphertext_len(&self, plaintext_len: usize) -> usize {
        Self::sealed_len(plaintext_len)
    }

    fn encrypt(&self, plaintext: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        check_iv(iv, AES_BLOCK)?;
        let encryptor = Aes256CbcEnc::new_from_slices(&self.key, iv)
            .map_err(|e| CryptoError::Encryption(e.to_string()))?;
        Ok(encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
    }

    fn decrypt(&self, ciphertext: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        check_iv(iv, AES_BLOCK)?;
        if ciphertext.is_empty() || ciphertext.len() % AES_BLOCK != 0 {
            return Err(CryptoError::Decryption(format!(
                "ciphertext length {} is not a positive multiple of {AES_BLOCK}",
                ciphertext.len()
            )));
        }
        let decryptor = Aes256CbcDec::new_from_slices(&self.key, iv)
            .map_err(|e| CryptoError::Decryption(e.to_string()))?;
        decryptor
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| CryptoError::Decryption("invalid padding".into()))
    }
}

impl KeyedCipher for Aes {
    const KEY_SIZE: usize = 32;
    const IV_SIZE: usize = AES_BLOCK;

    fn from_key(key: &[u8]) -> Result<Self> {
        Ok(Self {
            key: key_array(key)?,
        })
    }

    fn sealed_len(plaintext_len: usize) -> usize {
        (plaintext_len / AES_BLOCK + 1) * AES_BLOCK
    }

    fn key(&self) -> &[u8] {
        &self.key
    }
}

/// The ChaCha20 stream cipher, without authentication.
#[derive(Clone)]
pub struct ChaCha {
    key: [u8; 32],
}

impl ChaCha {
    fn apply(&self, data: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        check_iv(iv, CHACHA_NONCE)?;
        let mut cipher = chacha20::ChaCha20::new_from_slices(&self.key, iv)
            .map_err(|e| CryptoError::Encryption(e.to_string()))?;
        let mut buf = data.to_vec();
        cipher.apply_keystream(&mut buf);
        Ok(buf)
    }
}

impl SymmetricCipher for ChaCha {
    fn iv_size(&self) -> usize {
        Self::IV_SIZE
    }

    fn ciphertext_len(&self, plaintext_len: usize) -> usize {
        plaintext_len
    }

    fn encrypt(&self, plaintext: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        self.apply(plaintext, iv)
    }

    fn decrypt(&self, ciphertext: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        self.apply(ciphertext, iv)
    }
}

impl KeyedCipher for ChaCha {
    const KEY_SIZE: usize = 32;
    const IV_SIZE: usize = CHACHA_NONCE;

    fn from_key(key: &[u8]) -> Result<Self> {
        Ok(Self {
            key: key_array(key)?,
        })
    }

    fn sealed_len(plaintext_len: usize) -> usize {
        plaintext_len
    }

    fn key(&self) -> &[u8] {
        &self.key
    }
}

/// ChaCha20-Poly1305 authenticated encryption. The IV is the 96-bit nonce.
#[derive(Clone)]
pub struct ChaChaPoly {
    key: [u8; 32],
}

impl SymmetricCipher for ChaChaPoly {
    fn iv_size(&self) -> usize {
        Self::IV_SIZE
    }

    fn ciphertext_len(&self, plaintext_len: usize) -> usize {
        Self::sealed_len(plaintext_len)
    }

    fn encrypt(&self, plaintext: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        check_iv(iv, CHACHA_NONCE)?;
        let cipher = chacha20poly1305::ChaCha20Poly1305::new_from_slice(&self.key)
            .map_err(|e| CryptoError::Encryption(e.to_string()))?;
        cipher
            .encrypt(Nonce::from_slice(iv), plaintext)
            .map_err(|e| CryptoError::Encryption(e.to_string()))
    }

    fn decrypt(&self, ciphertext: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        check_iv(iv, CHACHA_NONCE)?;
        let cipher = chacha20poly1305::ChaCha20Poly1305::new_from_slice(&self.key)
            .map_err(|e| CryptoError::Decryption(e.to_string()))?;
        cipher
            .decrypt(Nonce::from_slice(iv), ciphertext)
            .map_err(|e| CryptoError::Decryption(e.to_string()))
    }
}

impl KeyedCipher for ChaChaPoly {
    const KEY_SIZE: usize = 32;
    const IV_SIZE: usize = CHACHA_NONCE;

    fn from_key(key: &[u8]) -> Result<Self> {
        Ok(Self {
            key: key_array(key)?,
        })
    }

    fn sealed_len(plaintext_len: usize) -> usize {
        plaintext_len + POLY1305_TAG
    }

    fn key(&self) -> &[u8] {
        &self.key
    }
}
