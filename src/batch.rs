//! Verification of several signed random values against one verifier.
//!
//! Items are collected up to a fixed capacity and checked in insertion order. The whole
//! batch fails on the first invalid item, reporting its index.
use super::constants::*;
use super::errors::VrfError;
use super::verifier::{RandomnessVerifier, SignedRandomness};

use tracing::debug;

/// Bounded collection of [`SignedRandomness`] awaiting verification.
#[derive(Clone, Debug)]
pub struct BatchVerifier {
    capacity: usize,
    items: Vec<SignedRandomness>,
}

impl BatchVerifier {
    /// Empty batch accepting at most `capacity` items. Nothing is preallocated.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::new(),
        }
    }

    /// Add an item, failing with `BatchFull` once `capacity` items are held.
    pub fn insert(&mut self, item: SignedRandomness) -> Result<(), VrfError> {
        if self.items.len() >= self.capacity {
            return Err(VrfError::BatchFull);
        }
        self.items.push(item);
        Ok(())
    }

    /// Number of items inserted so far
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no item has been inserted
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Verify every item. On success the digests are returned in insertion order.
    pub fn verify(
        self,
        verifier: &RandomnessVerifier,
    ) -> Result<Vec<[u8; DIGEST_SIZE]>, VrfError> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item.verify(verifier).map_err(|err| {
                    debug!(index, %err, "batch item rejected");
                    VrfError::BatchItemFailed { index }
                })
            })
            .collect()
    }
}
