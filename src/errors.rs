//! Errors returned by parsing, signing and verification
use crate::address::Address;
use thiserror::Error;

/// Error type of the crate
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum VrfError {
    /// Generic verification failure
    #[error("Randomness verification failed")]
    VerificationFailed,
    /// The signature recovers to an address other than the trusted signer
    #[error("Recovered signer {recovered} does not match trusted signer {expected}")]
    SignerMismatch {
        /// Trusted signer of the verifier
        expected: Address,
        /// Address recovered from the signature
        recovered: Address,
    },
    /// `v` is not an accepted recovery indicator
    #[error("Invalid recovery id {0}")]
    InvalidRecoveryId(u8),
    /// Input of the wrong byte length
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Required length
        expected: usize,
        /// Length received
        actual: usize,
    },
    /// `s` is above the allowed bound
    #[error("Non-canonical signature: s is in the upper half of the curve order")]
    NonCanonicalS,
    /// `r` or `s` is zero or not below the group order
    #[error("Invalid signature scalars")]
    InvalidSignature,
    /// No public key could be recovered
    #[error("Public key recovery failed")]
    RecoveryFailed,
    /// Secret key is zero or not below the group order
    #[error("Invalid secret key")]
    InvalidSecretKey,
    /// The signing backend failed
    #[error("Signing failed")]
    SigningFailed,
    /// Malformed hex string
    #[error("Invalid hex encoding")]
    InvalidHex,
    /// Insertion into a batch already at capacity
    #[error("Batch is full")]
    BatchFull,
    /// The batch item at `index` did not verify
    #[error("Batch item {index} failed verification")]
    BatchItemFailed {
        /// Position of the item in insertion order
        index: usize,
    },
}

impl From<hex::FromHexError> for VrfError {
    fn from(_: hex::FromHexError) -> Self {
        VrfError::InvalidHex
    }
}
