//! Sizes of the masking values and the challenge space.
//!
//! With `n = |N|`, challenge bits `k`, range bound `T` and hiding parameter `B`:
//!
//! - `r1` is drawn from `[0, T * 2^(n + k))`, masking `c * a < 2^k * T`
//! - `r2` is drawn from `[0, 2^(B + 2n + k))`, masking `c * r < 2^(k + B + n)`
//! - the challenge `c` is drawn from `[0, 2^k)`
//!
//! In both cases the mask exceeds the masked product by a factor of at least
//! `2^n`, so `s1` and `s2` are statistically independent of the opening.

use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};

use crate::primitives::rng::random_below;
use crate::{DamgardFujisakiParams, Error, HiddenOrderGroup, Result};

/// Largest accepted challenge space, in bits.
pub const MAX_CHALLENGE_BITS: u64 = 512;

/// Exclusive upper bounds for `r1`, `r2` and the challenge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProofBounds {
    challenge_bits: u64,
    r1: BigUint,
    r2: BigUint,
    challenge: BigUint,
}

impl ProofBounds {
    /// # Errors
    ///
    /// Returns an error if `challenge_bits` or `modulus_bits` is zero, if
    /// `range_bound` is zero, if `challenge_bits` exceeds
    /// [`MAX_CHALLENGE_BITS`], or if the bound exponents overflow `u64`.
    pub fn new(
        modulus_bits: u64,
        range_bound: &BigUint,
        hiding_bits: u64,
        challenge_bits: u64,
    ) -> Result<Self> {
        if challenge_bits == 0 {
            return Err(Error::InvalidParams(
                "Challenge space must be at least one bit".to_string(),
            ));
        }
        if challenge_bits > MAX_CHALLENGE_BITS {
            return Err(Error::InvalidParams(format!(
                "Challenge space of {challenge_bits} bits exceeds {MAX_CHALLENGE_BITS}"
            )));
        }
        if modulus_bits == 0 || *range_bound == BigUint::ZERO {
            return Err(Error::InvalidParams(
                "Modulus and range bound must be positive".to_string(),
            ));
        }

        let overflow = || Error::InvalidParams("Bound exponent overflows u64".to_string());
        let r1_shift = modulus_bits.checked_add(challenge_bits).ok_or_else(overflow)?;
        let r2_shift = modulus_bits
            .checked_mul(2)
            .and_then(|bits| bits.checked_add(hiding_bits))
            .and_then(|bits| bits.checked_add(challenge_bits))
            .ok_or_else(overflow)?;

        let one = BigUint::from(1u8);
        let r1 = range_bound << r1_shift;
        let r2 = &one << r2_shift;
        let challenge = &one << challenge_bits;

        Ok(Self {
            challenge_bits,
            r1,
            r2,
            challenge,
        })
    }

    /// Bounds for proving openings of commitments made under `params`.
    pub fn for_params<G: HiddenOrderGroup>(
        params: &DamgardFujisakiParams<G>,
        challenge_bits: u64,
    ) -> Result<Self> {
        Self::new(
            params.modulus_bits(),
            params.range_bound(),
            params.hiding_bits(),
            challenge_bits,
        )
    }

    /// The challenge-space size `k`.
    pub fn challenge_bits(&self) -> u64 {
        self.challenge_bits
    }

    /// `T * 2^(n + k)`
    pub fn r1_bound(&self) -> &BigUint {
        &self.r1
    }

    /// `2^(B + 2n + k)`
    pub fn r2_bound(&self) -> &BigUint {
        &self.r2
    }

    /// `2^k`
    pub fn challenge_bound(&self) -> &BigUint {
        &self.challenge
    }

    pub fn sample_r1<R: RngCore + CryptoRng + ?Sized>(&self, rng: &mut R) -> Result<BigUint> {
        random_below(&self.r1, rng)
    }

    pub fn sample_r2<R: RngCore + CryptoRng + ?Sized>(&self, rng: &mut R) -> Result<BigUint> {
        random_below(&self.r2, rng)
    }

    pub fn sample_challenge<R: RngCore + CryptoRng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<BigUint> {
        random_below(&self.challenge, rng)
    }

    /// Rejects challenges outside `[0, 2^k)`.
    pub fn check_challenge(&self, challenge: &BigUint) -> Result<()> {
        if *challenge >= self.challenge {
            return Err(Error::InvalidChallenge(format!(
                "challenge has {} bits, challenge space is {} bits",
                challenge.bits(),
                self.challenge_bits
            )));
        }
        Ok(())
    }
}
