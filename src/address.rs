//! Account addresses: the last 20 bytes of the keccak256 of an uncompressed public key.
use super::constants::*;
use super::errors::VrfError;
use super::hash::keccak256;

use k256::ecdsa::VerifyingKey;
use std::fmt::{self, Debug, Display};
use std::str::FromStr;

/// A 20-byte account address.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Address(pub [u8; ADDRESS_SIZE]);

impl Address {
    /// The all-zero address.
    pub const ZERO: Address = Address([0u8; ADDRESS_SIZE]);

    /// Derive the address of a secp256k1 public key. The `0x04` tag of the uncompressed
    /// SEC1 encoding is not hashed.
    pub fn from_public_key(public_key: &VerifyingKey) -> Self {
        let encoded = public_key.to_encoded_point(false);
        let hash = keccak256(&encoded.as_bytes()[1..]);

        let mut address = [0u8; ADDRESS_SIZE];
        address.copy_from_slice(&hash[DIGEST_SIZE - ADDRESS_SIZE..]);
        Address(address)
    }

    /// Build an `Address` from a slice, which must be exactly `ADDRESS_SIZE` bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, VrfError> {
        if bytes.len() != ADDRESS_SIZE {
            return Err(VrfError::InvalidLength {
                expected: ADDRESS_SIZE,
                actual: bytes.len(),
            });
        }
        let mut address = [0u8; ADDRESS_SIZE];
        address.copy_from_slice(bytes);
        Ok(Address(address))
    }

    /// View the `Address` as bytes
    pub fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }

    /// Convert the `Address` into its byte representation
    pub fn to_bytes(self) -> [u8; ADDRESS_SIZE] {
        self.0
    }

    /// Mixed-case checksum encoding of [EIP-55](https://eips.ethereum.org/EIPS/eip-55).
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let hash = keccak256(lower.as_bytes());

        let mut out = String::with_capacity(2 + 2 * ADDRESS_SIZE);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = (hash[i / 2] >> (4 * (1 - i % 2))) & 0x0f;
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl From<&VerifyingKey> for Address {
    fn from(public_key: &VerifyingKey) -> Self {
        Address::from_public_key(public_key)
    }
}

impl From<[u8; ADDRESS_SIZE]> for Address {
    fn from(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Address(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_checksum())
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = VrfError;

    /// Parses 40 hex digits, with or without the `0x` prefix. The checksum casing is not
    /// enforced.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits)?;
        Address::from_slice(&bytes)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_checksum())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Address {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
