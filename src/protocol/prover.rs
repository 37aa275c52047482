use core::fmt::{self, Debug};

use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};
use tracing::{debug, warn};

use super::{Challenge, ProofBounds, ProofRandomData, Response};
use crate::{Committer, Element, HiddenOrderGroup, ProtocolConfig, Result};

/// Prover for knowledge of a Damgard-Fujisaki commitment opening.
///
/// Demonstrates knowledge of `(a, r)` such that `c = G^a * H^r mod N` without
/// revealing either value.
///
/// A `Prover` holds no per-proof state. Each proof attempt starts with
/// [`Prover::commit`], which returns a fresh [`ProverNonce`]; the nonce is
/// consumed by [`Prover::respond`], so it can never answer two challenges.
/// Any number of attempts may run concurrently against one prover.
pub struct Prover<G: HiddenOrderGroup> {
    committer: Committer<G>,
    bounds: ProofBounds,
}

impl<G: HiddenOrderGroup> Prover<G> {
    /// Creates a prover for the committer's opening with a `challenge_bits`-bit
    /// challenge space.
    ///
    /// # Errors
    ///
    /// Returns an error if `challenge_bits` is zero or exceeds
    /// [`MAX_CHALLENGE_BITS`](crate::MAX_CHALLENGE_BITS).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use damgard_fujisaki_zkp::{Committer, DamgardFujisakiParams, Element, Prover, QrSpecialRsa};
    /// use num_bigint::BigUint;
    ///
    /// let group = QrSpecialRsa::new(BigUint::from(1081u32)).unwrap();
    /// let params = DamgardFujisakiParams::new(
    ///     group,
    ///     Element::new(BigUint::from(4u8)),
    ///     Element::new(BigUint::from(9u8)),
    ///     BigUint::from(16u8),
    ///     8,
    /// )
    /// .unwrap();
    /// let committer = Committer::commit(params, BigUint::from(5u8), &mut rand::thread_rng()).unwrap();
    ///
    /// let prover = Prover::new(committer, 4).unwrap();
    /// ```
    pub fn new(committer: Committer<G>, challenge_bits: u64) -> Result<Self> {
        let bounds = ProofBounds::for_params(committer.params(), challenge_bits)?;
        Ok(Self { committer, bounds })
    }

    /// Creates a prover using the challenge space of a validated `config`.
    pub fn from_config(committer: Committer<G>, config: &ProtocolConfig) -> Result<Self> {
        config.validate()?;
        Self::new(committer, config.protocol.challenge_bits)
    }

    /// Returns the public commitment being proven.
    pub fn commitment(&self) -> &Element {
        self.committer.commitment()
    }

    pub fn bounds(&self) -> &ProofBounds {
        &self.bounds
    }

    /// Interactive protocol: generates the proof random data (first message).
    ///
    /// Samples `r1` from `[0, T * 2^(n + k))` and `r2` from
    /// `[0, 2^(B + 2n + k))` and returns `t = G^r1 * H^r2 mod N` together
    /// with the secret nonce needed to answer the challenge.
    pub fn commit<R: RngCore + CryptoRng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<(ProofRandomData, ProverNonce)> {
        let r1 = self.bounds.sample_r1(rng)?;
        let r2 = self.bounds.sample_r2(rng)?;
        let t = self.committer.params().compute_commit(&r1, &r2);

        debug!(
            group = G::name(),
            modulus_bits = self.committer.params().modulus_bits(),
            challenge_bits = self.bounds.challenge_bits(),
            "sampled proof random data"
        );

        Ok((ProofRandomData::new(t), ProverNonce { r1, r2 }))
    }

    /// Interactive protocol: generates the response (third message).
    ///
    /// Computes `s1 = r1 + c*a` and `s2 = r2 + c*r` over the integers.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidChallenge`] if the challenge lies outside
    /// `[0, 2^k)`.
    ///
    /// # Security
    ///
    /// `r1` and `r2` only mask `c*a` and `c*r` for `c < 2^k`; the check guards
    /// against a dishonest verifier choosing a larger challenge.
    pub fn respond(&self, nonce: ProverNonce, challenge: &Challenge) -> Result<Response> {
        if let Err(e) = self.bounds.check_challenge(challenge.value()) {
            warn!(
                challenge_bits = challenge.value().bits(),
                "refusing to answer out-of-range challenge"
            );
            return Err(e);
        }

        let opening = self.committer.opening();
        let c = challenge.value();
        let s1 = nonce.r1 + c * opening.message();
        let s2 = nonce.r2 + c * opening.randomness();

        Ok(Response::new(s1, s2))
    }
}

/// Secret masking values `(r1, r2)` of one proof attempt.
///
/// Not `Clone`: a nonce answers exactly one challenge, since two responses
/// under the same nonce reveal the opening.
pub struct ProverNonce {
    r1: BigUint,
    r2: BigUint,
}

impl ProverNonce {
    pub(crate) fn r1(&self) -> &BigUint {
        &self.r1
    }

    pub(crate) fn r2(&self) -> &BigUint {
        &self.r2
    }
}

impl Debug for ProverNonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProverNonce { .. }")
    }
}
