//! 64-bit FNV-1a hashing.
//!
//! [`hash`] is the function the table indexes with. [`FnvHasher`] exposes the
//! same mixing step through [`std::hash::Hasher`] so std collections can be
//! run with it for comparison.

use std::hash::{BuildHasher, Hasher};

/// FNV-1a 64-bit offset basis
pub const OFFSET_BASIS: u64 = 14_695_981_039_346_656_037;

/// FNV-1a 64-bit prime
pub const PRIME: u64 = 1_099_511_628_211;

/// Hashes `bytes` with 64-bit FNV-1a, one byte at a time.
#[must_use]
pub fn hash(bytes: &[u8]) -> u64 {
    bytes.iter().fold(OFFSET_BASIS, |hash, &byte| (hash ^ u64::from(byte)).wrapping_mul(PRIME))
}

/// Streaming FNV-1a hasher
#[derive(Debug, Clone, Copy)]
pub struct FnvHasher {
    /// Running hash state
    state: u64,
}

impl FnvHasher {
    /// Creates a hasher seeded with [`OFFSET_BASIS`]
    #[must_use]
    pub fn new() -> Self {
        Self { state: OFFSET_BASIS }
    }
}

impl Default for FnvHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for FnvHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state = (self.state ^ u64::from(byte)).wrapping_mul(PRIME);
        }
    }
}

/// Builds [`FnvHasher`]s; no per-map seed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FnvBuildHasher;

impl BuildHasher for FnvBuildHasher {
    type Hasher = FnvHasher;

    fn build_hasher(&self) -> Self::Hasher {
        FnvHasher::new()
    }
}
