//! Keccak256 hashing and the personal-message digest.
use super::constants::*;

use sha3::{Digest, Keccak256};

/// Legacy Keccak-256 of `data`. This is not the NIST SHA3-256 function: the padding differs.
pub fn keccak256(data: &[u8]) -> [u8; DIGEST_SIZE] {
    let mut output = [0u8; DIGEST_SIZE];
    output.copy_from_slice(Keccak256::digest(data).as_slice());
    output
}

/// Digest signed by the personal-message scheme:
/// keccak256(MESSAGE_PREFIX || decimal(len(message)) || message)
pub fn hash_message(message: &[u8]) -> [u8; DIGEST_SIZE] {
    let mut hasher = Keccak256::new();
    hasher.update(MESSAGE_PREFIX);
    hasher.update(message.len().to_string().as_bytes());
    hasher.update(message);

    let mut output = [0u8; DIGEST_SIZE];
    output.copy_from_slice(hasher.finalize().as_slice());
    output
}
