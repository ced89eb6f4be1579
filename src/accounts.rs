//! Deterministic pool of test accounts.
use super::address::Address;
use super::signer::{LocalSigner, MessageSigner};

use rand_chacha::ChaCha20Rng;
use rand_core::{CryptoRng, RngCore, SeedableRng};

/// Number of accounts a development environment exposes by default
pub const DEFAULT_ACCOUNT_COUNT: usize = 20;

/// An ordered set of signers. The first account is the one test scenarios use by default.
#[derive(Clone, Debug)]
pub struct AccountPool {
    signers: Vec<LocalSigner>,
}

impl AccountPool {
    /// Derive `count` accounts from a ChaCha20 stream keyed by `seed`. The same seed always
    /// yields the same accounts in the same order.
    pub fn from_seed(seed: [u8; 32], count: usize) -> Self {
        Self::random(&mut ChaCha20Rng::from_seed(seed), count)
    }

    /// Draw `count` fresh accounts from `csrng`.
    pub fn random<R>(csrng: &mut R, count: usize) -> Self
    where
        R: CryptoRng + RngCore,
    {
        let signers = (0..count).map(|_| LocalSigner::generate(&mut *csrng)).collect();
        Self { signers }
    }

    /// All signers, in order
    pub fn signers(&self) -> &[LocalSigner] {
        &self.signers
    }

    /// The first available signer
    pub fn first(&self) -> Option<&LocalSigner> {
        self.signers.first()
    }

    /// The signer at `index`
    pub fn get(&self, index: usize) -> Option<&LocalSigner> {
        self.signers.get(index)
    }

    /// Addresses of all signers, in order
    pub fn addresses(&self) -> Vec<Address> {
        self.signers.iter().map(|s| s.address()).collect()
    }

    /// Number of accounts
    pub fn len(&self) -> usize {
        self.signers.len()
    }

    /// Whether the pool holds no account
    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }
}

impl Default for AccountPool {
    fn default() -> Self {
        Self::from_seed([0u8; 32], DEFAULT_ACCOUNT_COUNT)
    }
}
