//! Byte helpers shared by the algorithms and by attack scripts.

use rand::RngCore;

/// XOR two byte strings, truncating to the shorter one.
pub fn xor(a: &[u8], b: &[u8]) -> Vec<u8> {
    a.iter().zip(b).map(|(x, y)| x ^ y).collect()
}

/// Right-pad `data` with zeros to a multiple of `block_size`.
///
/// Data that is already aligned (including empty data) is returned unchanged.
pub fn zero_pad(data: &[u8], block_size: usize) -> Vec<u8> {
    let mut padded = data.to_vec();
    if block_size == 0 {
        return padded;
    }
    let remainder = data.len() % block_size;
    if remainder != 0 {
        padded.resize(data.len() + block_size - remainder, 0);
    }
    padded
}

/// Fill a fresh buffer with `len` random bytes.
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes
}

/// Render bytes for logs: the UTF-8 text when valid, hex otherwise.
pub fn printable(data: &[u8]) -> String {
    match std::str::from_utf8(data) {
        Ok(text) if !text.chars().any(char::is_control) => format!("{text:?}"),
        _ => format!("0x{}", hex::encode(data)),
    }
}
