//! Crate specific constants

/// Prefix of the personal-message signing scheme ([EIP-191](https://eips.ethereum.org/EIPS/eip-191),
/// version `0x45`). The decimal length of the message follows it.
pub const MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n";
/// Byte size of the random value `R`
pub const RANDOMNESS_SIZE: usize = 32;
/// Byte size of a keccak256 digest
pub const DIGEST_SIZE: usize = 32;
/// Byte size of a secp256k1 secret key
pub const SECRET_KEY_SIZE: usize = 32;
/// Byte size of an account address
pub const ADDRESS_SIZE: usize = 20;
/// Byte size of each of the `r` and `s` scalars
pub const SCALAR_SIZE: usize = 32;
/// Byte size of a signature serialised as `r || s || v`
pub const SIGNATURE_SIZE: usize = 65;
/// Byte size of an [EIP-2098](https://eips.ethereum.org/EIPS/eip-2098) compact signature
pub const COMPACT_SIGNATURE_SIZE: usize = 64;
/// Offset added to the y-parity bit to form `v`
pub const V_OFFSET: u8 = 27;
/// Smallest [EIP-155](https://eips.ethereum.org/EIPS/eip-155) `v`, for chain id `0` and even parity
pub const EIP155_V_BASE: u8 = 35;

/// Half of the secp256k1 group order. A signature with `s` above this value is malleable
/// ([EIP-2](https://eips.ethereum.org/EIPS/eip-2)).
pub const SECP256K1_HALF_ORDER: [u8; SCALAR_SIZE] = [
    0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0x5d, 0x57, 0x6e, 0x73, 0x57, 0xa4, 0x50, 0x1d, 0xdf, 0xe9, 0x2f, 0x46, 0x68, 0x1b, 0x20, 0xa0,
];
