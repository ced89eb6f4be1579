//! Verification of signed randomness against a trusted signer.
//!
//! A random value `R` is accepted when its keccak256 digest, signed under the personal-message
//! scheme, recovers to the trusted signer's address. It proceeds as follows:
//! - `digest = keccak256(R)`
//! - `message_hash = keccak256(MESSAGE_PREFIX || "32" || digest)`
//! - recover the signing address from `(message_hash, v, r, s)`
//! - compare it with the trusted signer
use super::address::Address;
use super::constants::*;
use super::errors::VrfError;
use super::hash::keccak256;
use super::randomness::Randomness;
use super::signature::{normalize_v, Signature};
use super::signer::MessageSigner;

use tracing::{debug, trace};

/// Verifier parameters.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerifierConfig {
    /// Address whose signatures are accepted
    pub trusted_signer: Address,
    /// Reject signatures with `s` above half the group order
    #[cfg_attr(feature = "serde", serde(default = "default_require_low_s"))]
    pub require_low_s: bool,
    /// Accept `v` given as a raw parity of `0` or `1`
    #[cfg_attr(feature = "serde", serde(default))]
    pub allow_raw_parity: bool,
}

#[cfg(feature = "serde")]
fn default_require_low_s() -> bool {
    true
}

impl VerifierConfig {
    /// Strict configuration: low `s` required, `v` must be `27` or `28`.
    pub fn new(trusted_signer: Address) -> Self {
        Self {
            trusted_signer,
            require_low_s: true,
            allow_raw_parity: false,
        }
    }

    /// Set whether signatures with a high `s` are rejected.
    pub fn require_low_s(mut self, require: bool) -> Self {
        self.require_low_s = require;
        self
    }

    /// Set whether `v` may be given as `0` or `1`.
    pub fn allow_raw_parity(mut self, allow: bool) -> Self {
        self.allow_raw_parity = allow;
        self
    }
}

/// Read-only verifier bound to a single trusted signer.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RandomnessVerifier {
    config: VerifierConfig,
}

impl RandomnessVerifier {
    /// Verifier trusting `trusted_signer`, with the strict configuration.
    pub fn new(trusted_signer: Address) -> Self {
        Self::with_config(VerifierConfig::new(trusted_signer))
    }

    /// Verifier with an explicit configuration.
    pub fn with_config(config: VerifierConfig) -> Self {
        Self { config }
    }

    /// Address whose signatures are accepted
    pub fn trusted_signer(&self) -> Address {
        self.config.trusted_signer
    }

    /// Active configuration
    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Returns `true` iff `(v, r, s)` is a signature by the trusted signer over
    /// `keccak256(randomness)`. Malformed input yields `false`.
    pub fn verify_randomness(
        &self,
        randomness: &[u8],
        v: u8,
        r: [u8; SCALAR_SIZE],
        s: [u8; SCALAR_SIZE],
    ) -> bool {
        self.verify(randomness, &Signature { v, r, s }).is_ok()
    }

    /// Verify `signature` over `randomness`. On success the digest `keccak256(randomness)` is
    /// returned as the output bound to the trusted signer.
    pub fn verify(
        &self,
        randomness: &[u8],
        signature: &Signature,
    ) -> Result<[u8; DIGEST_SIZE], VrfError> {
        let digest = keccak256(randomness);

        let recovered = match self.recover_digest(&digest, signature) {
            Ok(address) => address,
            Err(err) => {
                debug!(%err, v = signature.v, "rejected randomness signature");
                return Err(err);
            }
        };

        if recovered != self.config.trusted_signer {
            debug!(
                expected = %self.config.trusted_signer,
                %recovered,
                "randomness signed by untrusted key"
            );
            return Err(VrfError::SignerMismatch {
                expected: self.config.trusted_signer,
                recovered,
            });
        }

        trace!(digest = %hex::encode(digest), "randomness verified");
        Ok(digest)
    }

    /// Recover the address that signed `randomness`, applying the same signature checks as
    /// [`RandomnessVerifier::verify`] but without comparing against the trusted signer.
    pub fn recover(&self, randomness: &[u8], signature: &Signature) -> Result<Address, VrfError> {
        self.recover_digest(&keccak256(randomness), signature)
    }

    fn recover_digest(
        &self,
        digest: &[u8; DIGEST_SIZE],
        signature: &Signature,
    ) -> Result<Address, VrfError> {
        let mut signature = *signature;
        if self.config.allow_raw_parity {
            signature.v = normalize_v(signature.v)?;
        }

        if self.config.require_low_s && !signature.is_low_s() {
            return Err(VrfError::NonCanonicalS);
        }

        signature.recover_message(digest)
    }
}

/// A random value together with the signature over its digest.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SignedRandomness {
    /// Bytes of `R` exactly as signed and submitted
    pub randomness: Vec<u8>,
    /// Signature over `keccak256(randomness)`
    pub signature: Signature,
}

impl SignedRandomness {
    /// Sign the minimal big-endian encoding of `randomness`.
    pub fn generate<S>(signer: &S, randomness: &Randomness) -> Result<Self, VrfError>
    where
        S: MessageSigner + ?Sized,
    {
        Self::sign(signer, &randomness.to_be_bytes())
    }

    /// Sign `keccak256(randomness)` under the personal-message scheme.
    pub fn sign<S>(signer: &S, randomness: &[u8]) -> Result<Self, VrfError>
    where
        S: MessageSigner + ?Sized,
    {
        let digest = keccak256(randomness);
        let signature = signer.sign_message(&digest)?;
        Ok(Self {
            randomness: randomness.to_vec(),
            signature,
        })
    }

    /// Check this value against `verifier`, see [`RandomnessVerifier::verify`].
    pub fn verify(&self, verifier: &RandomnessVerifier) -> Result<[u8; DIGEST_SIZE], VrfError> {
        verifier.verify(&self.randomness, &self.signature)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::signature::negate_scalar;
    use crate::signer::LocalSigner;
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    fn setup(seed: u8) -> (LocalSigner, RandomnessVerifier, SignedRandomness) {
        let mut rng = ChaCha20Rng::from_seed([seed; 32]);
        let signer = LocalSigner::generate(&mut rng);
        let verifier = RandomnessVerifier::new(signer.address());
        let randomness = Randomness::generate(&mut rng);
        let signed = SignedRandomness::generate(&signer, &randomness).unwrap();
        (signer, verifier, signed)
    }

    #[test]
    fn accepts_trusted_signer() {
        let (_, verifier, signed) = setup(0);
        let SignedRandomness {
            randomness,
            signature,
        } = &signed;

        assert!(verifier.verify_randomness(randomness, signature.v, signature.r, signature.s));
        assert_eq!(signed.verify(&verifier).unwrap(), keccak256(randomness));
    }

    #[test]
    fn rejects_other_signer() {
        let (_, _, signed) = setup(1);
        let (other, _, _) = setup(2);
        let verifier = RandomnessVerifier::new(other.address());

        match signed.verify(&verifier) {
            Err(VrfError::SignerMismatch {
                expected,
                recovered,
            }) => {
                assert_eq!(expected, other.address());
                assert_ne!(recovered, other.address());
            }
            result => panic!("unexpected result {:?}", result),
        }
    }

    #[test]
    fn rejects_tampering() {
        let (_, verifier, signed) = setup(3);
        let Signature { v, r, s } = signed.signature;

        let mut randomness = signed.randomness.clone();
        randomness[0] ^= 1;
        assert!(!verifier.verify_randomness(&randomness, v, r, s));

        let flipped_v = if v == 27 { 28 } else { 27 };
        assert!(!verifier.verify_randomness(&signed.randomness, flipped_v, r, s));

        let mut tampered_r = r;
        tampered_r[31] ^= 1;
        assert!(!verifier.verify_randomness(&signed.randomness, v, tampered_r, s));

        let mut tampered_s = s;
        tampered_s[31] ^= 1;
        assert!(!verifier.verify_randomness(&signed.randomness, v, r, tampered_s));
    }

    #[test]
    fn rejects_malformed_components() {
        let (_, verifier, signed) = setup(4);
        let Signature { r, s, .. } = signed.signature;

        assert!(!verifier.verify_randomness(&signed.randomness, 29, r, s));
        assert!(!verifier.verify_randomness(&signed.randomness, 27, [0u8; 32], s));
        assert!(!verifier.verify_randomness(&signed.randomness, 27, r, [0u8; 32]));
        assert!(!verifier.verify_randomness(&signed.randomness, 27, r, [0xffu8; 32]));
    }

    #[test]
    fn high_s_depends_on_config() {
        let (signer, strict, signed) = setup(5);
        let twin = Signature {
            v: if signed.signature.v == 27 { 28 } else { 27 },
            r: signed.signature.r,
            s: negate_scalar(&signed.signature.s).unwrap(),
        };

        assert_eq!(
            strict.verify(&signed.randomness, &twin),
            Err(VrfError::NonCanonicalS)
        );

        let lenient =
            RandomnessVerifier::with_config(VerifierConfig::new(signer.address()).require_low_s(false));
        assert!(lenient.verify(&signed.randomness, &twin).is_ok());
    }

    #[test]
    fn raw_parity_depends_on_config() {
        let (signer, strict, signed) = setup(6);
        let Signature { v, r, s } = signed.signature;

        assert!(!strict.verify_randomness(&signed.randomness, v - 27, r, s));

        let lenient = RandomnessVerifier::with_config(
            VerifierConfig::new(signer.address()).allow_raw_parity(true),
        );
        assert!(lenient.verify_randomness(&signed.randomness, v - 27, r, s));
        assert!(lenient.verify_randomness(&signed.randomness, v, r, s));
    }

    #[test]
    fn recover_returns_signer() {
        let (signer, verifier, signed) = setup(7);
        assert_eq!(
            verifier.recover(&signed.randomness, &signed.signature).unwrap(),
            signer.address()
        );
    }

    #[test]
    fn empty_randomness() {
        let (signer, verifier, _) = setup(8);
        let signed = SignedRandomness::sign(&signer, &[]).unwrap();
        assert!(signed.verify(&verifier).is_ok());
    }

    #[test]
    fn verifier_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RandomnessVerifier>();
    }
}
