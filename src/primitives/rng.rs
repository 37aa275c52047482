//! Cryptographically secure randomness and uniform sampling of big integers.

use num_bigint::{BigUint, RandBigInt};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::{Error, Result};

/// Operating-system randomness for every secret and unpredictable value in a
/// proof run.
///
/// Draws the masking values `r1` and `r2`, the verifier's challenge, fresh
/// commitment randomness and session identifiers. Stateless over `OsRng`.
#[derive(Clone, Copy, Debug)]
pub struct SecureRng(OsRng);

impl SecureRng {
    /// Handle to the operating-system generator.
    pub fn new() -> Self {
        Self(OsRng)
    }
}

impl Default for SecureRng {
    fn default() -> Self {
        Self::new()
    }
}

impl RngCore for SecureRng {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> core::result::Result<(), rand::Error> {
        self.0.try_fill_bytes(dest)
    }
}

impl CryptoRng for SecureRng {}

/// Samples an integer uniformly from `[0, bound)`.
///
/// Returns an error if `bound` is zero, since the range would be empty.
pub fn random_below<R: RngCore + CryptoRng + ?Sized>(bound: &BigUint, rng: &mut R) -> Result<BigUint> {
    if *bound == BigUint::ZERO {
        return Err(Error::InvalidParams(
            "sampling bound must be positive".to_string(),
        ));
    }
    Ok(rng.gen_biguint_below(bound))
}
