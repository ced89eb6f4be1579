//! Signing capability.
//!
//! Anything that can produce a recoverable signature over a 32-byte prehash can act as the
//! randomness signer; [`LocalSigner`] is the in-process implementation over a secp256k1 key.
use super::address::Address;
use super::constants::*;
use super::errors::VrfError;
use super::hash::hash_message;
use super::signature::Signature;

use k256::ecdsa::{SigningKey, VerifyingKey};
use rand_core::{CryptoRng, RngCore};
use std::fmt::{self, Debug};

/// A party able to sign on behalf of an [`Address`].
pub trait MessageSigner {
    /// Address whose key produces the signatures.
    fn address(&self) -> Address;

    /// Sign a 32-byte prehash as is.
    fn sign_prehash(&self, prehash: &[u8; DIGEST_SIZE]) -> Result<Signature, VrfError>;

    /// Sign `message` under the personal-message scheme, i.e. sign
    /// [`hash_message`]`(message)`.
    fn sign_message(&self, message: &[u8]) -> Result<Signature, VrfError> {
        self.sign_prehash(&hash_message(message))
    }
}

impl<S: MessageSigner + ?Sized> MessageSigner for &S {
    fn address(&self) -> Address {
        (**self).address()
    }

    fn sign_prehash(&self, prehash: &[u8; DIGEST_SIZE]) -> Result<Signature, VrfError> {
        (**self).sign_prehash(prehash)
    }
}

/// Signer holding a secp256k1 secret key in memory. Signatures are deterministic
/// ([RFC6979](https://datatracker.ietf.org/doc/html/rfc6979)) and always low-`s`.
#[derive(Clone)]
pub struct LocalSigner {
    key: SigningKey,
    address: Address,
}

impl LocalSigner {
    /// Given a cryptographically secure random number generator `csrng`, this function returns
    /// a signer with a fresh key
    pub fn generate<R>(csrng: &mut R) -> Self
    where
        R: CryptoRng + RngCore,
    {
        Self::from_signing_key(SigningKey::random(csrng))
    }

    /// Build a signer from a 32-byte big-endian secret scalar, which must be non-zero and below
    /// the group order.
    pub fn from_bytes(bytes: &[u8; SECRET_KEY_SIZE]) -> Result<Self, VrfError> {
        let key = SigningKey::from_slice(bytes).map_err(|_| VrfError::InvalidSecretKey)?;
        Ok(Self::from_signing_key(key))
    }

    /// Build a signer from a hex-encoded secret key, with or without the `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, VrfError> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits)?;
        if bytes.len() != SECRET_KEY_SIZE {
            return Err(VrfError::InvalidLength {
                expected: SECRET_KEY_SIZE,
                actual: bytes.len(),
            });
        }
        let key = SigningKey::from_slice(&bytes).map_err(|_| VrfError::InvalidSecretKey)?;
        Ok(Self::from_signing_key(key))
    }

    fn from_signing_key(key: SigningKey) -> Self {
        let address = Address::from_public_key(key.verifying_key());
        Self { key, address }
    }

    /// Convert the secret key into its byte representation
    pub fn to_bytes(&self) -> [u8; SECRET_KEY_SIZE] {
        let mut bytes = [0u8; SECRET_KEY_SIZE];
        bytes.copy_from_slice(&self.key.to_bytes());
        bytes
    }

    /// Public key of the signer.
    pub fn verifying_key(&self) -> &VerifyingKey {
        self.key.verifying_key()
    }
}

impl MessageSigner for LocalSigner {
    fn address(&self) -> Address {
        self.address
    }

    fn sign_prehash(&self, prehash: &[u8; DIGEST_SIZE]) -> Result<Signature, VrfError> {
        let recoverable = self
            .key
            .sign_prehash_recoverable(prehash)
            .map_err(|_| VrfError::SigningFailed)?;
        Ok(Signature::from(recoverable))
    }
}

impl Debug for LocalSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocalSigner({})", self.address)
    }
}
