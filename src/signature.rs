//! Recoverable secp256k1 signatures, decomposed into `(v, r, s)`.
//!
//! The byte layout is `r || s || v` (65 bytes) or the
//! [EIP-2098](https://eips.ethereum.org/EIPS/eip-2098) compact form `r || yParityAndS`
//! (64 bytes), where the top bit of the second word carries the y-parity.
use super::address::Address;
use super::constants::*;
use super::errors::VrfError;
use super::hash::hash_message;

use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, VerifyingKey};
use k256::elliptic_curve::PrimeField;
use k256::{FieldBytes, Scalar};

/// Signature over a 32-byte prehash. `v` is `27` or `28` for every value produced by the
/// constructors of this type; the fields are public so that raw contract-call arguments can
/// be represented as received.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Signature {
    /// Recovery indicator, `27 + y_parity`
    pub v: u8,
    /// x-coordinate of the nonce point, reduced modulo the group order
    pub r: [u8; SCALAR_SIZE],
    /// Signature proof scalar
    pub s: [u8; SCALAR_SIZE],
}

/// Maps the raw parities `0/1` to `27/28`; `27/28` are returned unchanged.
pub(crate) fn normalize_v(v: u8) -> Result<u8, VrfError> {
    match v {
        0 | 1 => Ok(v + V_OFFSET),
        27 | 28 => Ok(v),
        _ => Err(VrfError::InvalidRecoveryId(v)),
    }
}

/// Folds an [EIP-155](https://eips.ethereum.org/EIPS/eip-155) `v = chain_id * 2 + 35 + parity`
/// to `27 + parity`. Smaller values go through [`normalize_v`].
fn fold_eip155_v(v: u8) -> Result<u8, VrfError> {
    if v >= EIP155_V_BASE {
        Ok(V_OFFSET + ((v - EIP155_V_BASE) & 1))
    } else {
        normalize_v(v)
    }
}

impl Signature {
    /// Parse a 65-byte `r || s || v` signature. A `v` of `0` or `1` is normalised to
    /// `27`/`28`, and an EIP-155 `v` (35 and above) is folded to `27`/`28` by its parity. An
    /// `s` with its top bit set is rejected, as it cannot be told apart from a compact
    /// signature.
    pub fn from_bytes(bytes: &[u8; SIGNATURE_SIZE]) -> Result<Self, VrfError> {
        let v = fold_eip155_v(bytes[64])?;

        let mut r = [0u8; SCALAR_SIZE];
        let mut s = [0u8; SCALAR_SIZE];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);

        if s[0] & 0x80 != 0 {
            return Err(VrfError::NonCanonicalS);
        }

        Ok(Self { v, r, s })
    }

    /// Parse an EIP-2098 compact signature.
    pub fn from_compact(bytes: &[u8; COMPACT_SIGNATURE_SIZE]) -> Self {
        let mut r = [0u8; SCALAR_SIZE];
        let mut s = [0u8; SCALAR_SIZE];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);

        let y_parity = s[0] >> 7;
        s[0] &= 0x7f;

        Self {
            v: V_OFFSET + y_parity,
            r,
            s,
        }
    }

    /// Parse either the 65-byte or the 64-byte compact form.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, VrfError> {
        match bytes.len() {
            SIGNATURE_SIZE => {
                let mut full = [0u8; SIGNATURE_SIZE];
                full.copy_from_slice(bytes);
                Self::from_bytes(&full)
            }
            COMPACT_SIGNATURE_SIZE => {
                let mut compact = [0u8; COMPACT_SIGNATURE_SIZE];
                compact.copy_from_slice(bytes);
                Ok(Self::from_compact(&compact))
            }
            actual => Err(VrfError::InvalidLength {
                expected: SIGNATURE_SIZE,
                actual,
            }),
        }
    }

    /// Parse a hex string, with or without the `0x` prefix, in either serialised form.
    pub fn from_hex(s: &str) -> Result<Self, VrfError> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        Self::from_slice(&hex::decode(digits)?)
    }

    /// Convert the signature into its `r || s || v` byte representation.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_SIZE] {
        let mut bytes = [0u8; SIGNATURE_SIZE];
        bytes[..32].copy_from_slice(&self.r);
        bytes[32..64].copy_from_slice(&self.s);
        bytes[64] = self.v;
        bytes
    }

    /// Convert the signature into its EIP-2098 compact representation.
    pub fn to_compact(&self) -> Result<[u8; COMPACT_SIGNATURE_SIZE], VrfError> {
        if self.s[0] & 0x80 != 0 {
            return Err(VrfError::NonCanonicalS);
        }
        let mut bytes = [0u8; COMPACT_SIGNATURE_SIZE];
        bytes[..32].copy_from_slice(&self.r);
        bytes[32..].copy_from_slice(&self.s);
        bytes[32] |= self.y_parity()? << 7;
        Ok(bytes)
    }

    /// `0x`-prefixed hex of [`Signature::to_bytes`].
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_bytes()))
    }

    /// Parity of the y-coordinate of the nonce point. Only `v` values of `27` and `28` are
    /// accepted.
    pub fn y_parity(&self) -> Result<u8, VrfError> {
        match self.v {
            27 | 28 => Ok(self.v - V_OFFSET),
            v => Err(VrfError::InvalidRecoveryId(v)),
        }
    }

    /// Recovery id usable with `k256`.
    pub fn recovery_id(&self) -> Result<RecoveryId, VrfError> {
        RecoveryId::from_byte(self.y_parity()?).ok_or(VrfError::InvalidRecoveryId(self.v))
    }

    /// Whether `s` lies in the lower half of the group order
    /// ([EIP-2](https://eips.ethereum.org/EIPS/eip-2)). Arrays compare lexicographically,
    /// which is numeric order for big-endian scalars.
    pub fn is_low_s(&self) -> bool {
        self.s <= SECP256K1_HALF_ORDER
    }

    /// Recover the public key that produced this signature over `prehash`.
    ///
    /// Signatures with a high `s` are recovered through their low-`s` twin
    /// `(r, n - s, v ^ 1)`, which yields the same key. Whether such signatures are acceptable
    /// is up to the caller.
    pub fn recover_verifying_key(&self, prehash: &[u8; DIGEST_SIZE]) -> Result<VerifyingKey, VrfError> {
        let y_parity = self.y_parity()?;

        let (s, y_parity) = if self.is_low_s() {
            (self.s, y_parity)
        } else {
            (negate_scalar(&self.s)?, y_parity ^ 1)
        };

        let mut compact = [0u8; COMPACT_SIGNATURE_SIZE];
        compact[..32].copy_from_slice(&self.r);
        compact[32..].copy_from_slice(&s);
        let signature =
            EcdsaSignature::from_slice(&compact).map_err(|_| VrfError::InvalidSignature)?;

        let recovery_id = RecoveryId::from_byte(y_parity).ok_or(VrfError::InvalidRecoveryId(self.v))?;

        VerifyingKey::recover_from_prehash(prehash, &signature, recovery_id)
            .map_err(|_| VrfError::RecoveryFailed)
    }

    /// Recover the address that produced this signature over `prehash`.
    pub fn recover_prehash(&self, prehash: &[u8; DIGEST_SIZE]) -> Result<Address, VrfError> {
        let key = self.recover_verifying_key(prehash)?;
        Ok(Address::from_public_key(&key))
    }

    /// Recover the address that signed `message` under the personal-message scheme.
    pub fn recover_message(&self, message: &[u8]) -> Result<Address, VrfError> {
        self.recover_prehash(&hash_message(message))
    }
}

impl From<(EcdsaSignature, RecoveryId)> for Signature {
    fn from((signature, recovery_id): (EcdsaSignature, RecoveryId)) -> Self {
        let bytes = signature.to_bytes();
        let mut r = [0u8; SCALAR_SIZE];
        let mut s = [0u8; SCALAR_SIZE];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);

        Self {
            v: V_OFFSET + u8::from(recovery_id.is_y_odd()),
            r,
            s,
        }
    }
}

/// `n - s` for a non-zero scalar `s` below the group order.
pub(crate) fn negate_scalar(s: &[u8; SCALAR_SIZE]) -> Result<[u8; SCALAR_SIZE], VrfError> {
    let scalar: Option<Scalar> = Scalar::from_repr(FieldBytes::clone_from_slice(s)).into();
    let scalar = scalar.ok_or(VrfError::InvalidSignature)?;

    let mut negated = [0u8; SCALAR_SIZE];
    negated.copy_from_slice(&(-scalar).to_bytes());
    Ok(negated)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::hash::keccak256;
    use k256::ecdsa::SigningKey;

    fn signing_key() -> SigningKey {
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        SigningKey::from_slice(&bytes).unwrap()
    }

    fn sign(prehash: &[u8; 32]) -> Signature {
        Signature::from(signing_key().sign_prehash_recoverable(prehash).unwrap())
    }

    #[test]
    fn recover_signer() {
        let prehash = keccak256(b"recover me");
        let signature = sign(&prehash);
        assert!(signature.v == 27 || signature.v == 28);
        assert!(signature.is_low_s());

        let address = signature.recover_prehash(&prehash).unwrap();
        assert_eq!(address, Address::from_public_key(signing_key().verifying_key()));
    }

    #[test]
    fn bytes_and_hex_forms() {
        let signature = sign(&keccak256(b"forms"));

        let bytes = signature.to_bytes();
        assert_eq!(Signature::from_bytes(&bytes).unwrap(), signature);
        assert_eq!(Signature::from_hex(&signature.to_hex()).unwrap(), signature);
        assert_eq!(Signature::from_hex(&signature.to_hex()[2..]).unwrap(), signature);

        let compact = signature.to_compact().unwrap();
        assert_eq!(Signature::from_slice(&compact).unwrap(), signature);
    }

    #[test]
    fn raw_parity_is_normalised() {
        let signature = sign(&keccak256(b"parity"));
        let mut bytes = signature.to_bytes();
        bytes[64] -= 27;
        assert_eq!(Signature::from_bytes(&bytes).unwrap().v, signature.v);
    }

    #[test]
    fn invalid_v() {
        let mut bytes = sign(&keccak256(b"v")).to_bytes();
        bytes[64] = 29;
        assert_eq!(Signature::from_bytes(&bytes), Err(VrfError::InvalidRecoveryId(29)));
    }

    #[test]
    fn eip155_v_is_folded() {
        let signature = sign(&keccak256(b"chain id"));
        let parity = signature.v - 27;
        let mut bytes = signature.to_bytes();

        // chain id 1
        bytes[64] = 37 + parity;
        assert_eq!(Signature::from_bytes(&bytes).unwrap(), signature);

        // chain id 100
        bytes[64] = 235 + parity;
        assert_eq!(Signature::from_bytes(&bytes).unwrap(), signature);

        bytes[64] = 34;
        assert_eq!(Signature::from_bytes(&bytes), Err(VrfError::InvalidRecoveryId(34)));
    }

    #[test]
    fn invalid_length() {
        assert_eq!(
            Signature::from_slice(&[0u8; 63]),
            Err(VrfError::InvalidLength {
                expected: 65,
                actual: 63
            })
        );
    }

    #[test]
    fn top_bit_of_s_is_rejected() {
        let mut bytes = sign(&keccak256(b"top bit")).to_bytes();
        bytes[32] |= 0x80;
        assert_eq!(Signature::from_bytes(&bytes), Err(VrfError::NonCanonicalS));
    }

    #[test]
    fn high_s_twin_recovers_same_key() {
        let prehash = keccak256(b"malleable");
        let signature = sign(&prehash);

        let twin = Signature {
            v: if signature.v == 27 { 28 } else { 27 },
            r: signature.r,
            s: negate_scalar(&signature.s).unwrap(),
        };
        assert!(!twin.is_low_s());
        assert_eq!(
            twin.recover_prehash(&prehash).unwrap(),
            signature.recover_prehash(&prehash).unwrap()
        );
    }

    #[test]
    fn zero_scalars_are_rejected() {
        let signature = Signature {
            v: 27,
            r: [0u8; 32],
            s: [1u8; 32],
        };
        assert_eq!(
            signature.recover_prehash(&[7u8; 32]),
            Err(VrfError::InvalidSignature)
        );
    }

    #[test]
    fn half_order_is_low() {
        let signature = Signature {
            v: 27,
            r: [1u8; 32],
            s: SECP256K1_HALF_ORDER,
        };
        assert!(signature.is_low_s());

        let mut above = SECP256K1_HALF_ORDER;
        above[31] += 1;
        assert!(!Signature { s: above, ..signature }.is_low_s());
    }
}
