//! The candidate randomness output `R`.
use super::constants::*;
use super::errors::VrfError;
use super::hash::keccak256;

use rand_core::{CryptoRng, RngCore};

/// A 32-byte random value.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Randomness([u8; RANDOMNESS_SIZE]);

impl Randomness {
    /// Given a cryptographically secure random number generator `csrng`, this function returns
    /// a fresh `Randomness`
    pub fn generate<R>(csrng: &mut R) -> Self
    where
        R: CryptoRng + RngCore,
    {
        let mut bytes = [0u8; RANDOMNESS_SIZE];
        csrng.fill_bytes(&mut bytes);
        Randomness(bytes)
    }

    /// Convert a `Randomness` from a byte array
    pub fn from_bytes(bytes: &[u8; RANDOMNESS_SIZE]) -> Self {
        Randomness(*bytes)
    }

    /// View the `Randomness` as bytes
    pub fn as_bytes(&self) -> &[u8; RANDOMNESS_SIZE] {
        &self.0
    }

    /// Fixed-width `0x`-prefixed hex of the 32 bytes.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Parse a hex quantity of at most `RANDOMNESS_SIZE` bytes, left-padding with zeros. An odd
    /// number of digits is accepted, so the output of [`Randomness::to_be_bytes`] in any hex
    /// form parses back.
    pub fn from_hex(s: &str) -> Result<Self, VrfError> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = if digits.len() % 2 == 1 {
            hex::decode(format!("0{}", digits))?
        } else {
            hex::decode(digits)?
        };

        if bytes.len() > RANDOMNESS_SIZE {
            return Err(VrfError::InvalidLength {
                expected: RANDOMNESS_SIZE,
                actual: bytes.len(),
            });
        }

        let mut value = [0u8; RANDOMNESS_SIZE];
        value[RANDOMNESS_SIZE - bytes.len()..].copy_from_slice(&bytes);
        Ok(Randomness(value))
    }

    /// Minimal big-endian encoding of `R` read as an unsigned integer: leading zero bytes are
    /// dropped, and zero encodes as a single `0x00` byte. These are the bytes that get hashed,
    /// signed and submitted for verification.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        let first = self
            .0
            .iter()
            .position(|b| *b != 0)
            .unwrap_or(RANDOMNESS_SIZE - 1);
        self.0[first..].to_vec()
    }

    /// keccak256 of [`Randomness::to_be_bytes`].
    pub fn digest(&self) -> [u8; DIGEST_SIZE] {
        keccak256(&self.to_be_bytes())
    }
}

impl From<[u8; RANDOMNESS_SIZE]> for Randomness {
    fn from(bytes: [u8; RANDOMNESS_SIZE]) -> Self {
        Randomness(bytes)
    }
}
