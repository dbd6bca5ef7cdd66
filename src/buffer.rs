//! Byte buffer initialization for the benchmark passes
//!
//! The buffer is filled once by the harness and is read-only for the rest
//! of its life, including the whole parallel phase.

use crate::error::{Error, Result};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// How the benchmark buffer gets its contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    /// Increasing byte values, `bytes[i] = i & 0xff`
    Ramp,

    /// Seeded random bytes, deterministic per seed
    Random,
}

/// Allocate an empty buffer with capacity for `len` bytes
///
/// Allocation failure surfaces as [`Error::Allocation`] instead of an
/// abort; the benchmark has no degraded mode, so the caller gives up.
pub fn alloc_bytes(len: usize) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    bytes
        .try_reserve_exact(len)
        .map_err(|_| Error::Allocation(len))?;
    Ok(bytes)
}

/// Fill a new buffer of `len` bytes according to `mode`
pub fn fill(mode: FillMode, len: usize, seed: u64) -> Result<Vec<u8>> {
    match mode {
        FillMode::Ramp => fill_ramp(len),
        FillMode::Random => fill_random(len, seed),
    }
}

/// Buffer of increasing byte values wrapping at 256
pub fn fill_ramp(len: usize) -> Result<Vec<u8>> {
    let mut bytes = alloc_bytes(len)?;
    bytes.extend((0..len).map(|i| (i & 0xff) as u8));
    Ok(bytes)
}

/// Buffer of seeded random bytes
pub fn fill_random(len: usize, seed: u64) -> Result<Vec<u8>> {
    let mut bytes = alloc_bytes(len)?;
    bytes.resize(len, 0);

    let mut rng = StdRng::seed_from_u64(seed);
    rng.fill_bytes(&mut bytes);
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_wraps_at_256() {
        let bytes = fill_ramp(600).unwrap();
        assert_eq!(bytes.len(), 600);
        assert_eq!(bytes[0], 0);
        assert_eq!(bytes[255], 255);
        assert_eq!(bytes[256], 0);
        assert_eq!(bytes[599], (599 % 256) as u8);
    }

    #[test]
    fn test_random_fill_deterministic_per_seed() {
        let a = fill_random(4096, 0xcafe_babe).unwrap();
        let b = fill_random(4096, 0xcafe_babe).unwrap();
        let c = fill_random(4096, 1).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_zero_length_buffers() {
        assert!(fill_ramp(0).unwrap().is_empty());
        assert!(fill_random(0, 7).unwrap().is_empty());
    }
}
