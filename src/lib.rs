#![warn(missing_docs, rust_2018_idioms)]
//! Verification of signed randomness over secp256k1
pub mod accounts;
pub mod address;
pub mod batch;
pub mod constants;
pub mod errors;
pub mod hash;
pub mod randomness;
pub mod signature;
pub mod signer;
pub mod verifier;

pub use address::Address;
pub use errors::VrfError;
pub use randomness::Randomness;
pub use signature::Signature;
pub use signer::{LocalSigner, MessageSigner};
pub use verifier::{RandomnessVerifier, SignedRandomness, VerifierConfig};
