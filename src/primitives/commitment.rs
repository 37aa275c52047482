//! Damgard-Fujisaki integer commitments over a hidden-order group.
//!
//! A commitment to `a` is `c = G^a * H^r mod N` with `r` drawn from
//! `[0, 2^(B + |N|))`, which makes `c` statistically hiding with distance
//! about `2^-B`. Binding rests on the hardness of computing discrete
//! logarithms (or the order) in the group.

use core::fmt::{self, Debug};

use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};

use super::group::{Element, HiddenOrderGroup};
use super::rng::random_below;
use crate::{Error, Result};

/// Public commitment parameters shared by committer and receiver.
///
/// The caller is responsible for generating `N` and choosing generators with
/// no known discrete logarithm relationship; this type only checks that the
/// values are well formed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DamgardFujisakiParams<G: HiddenOrderGroup> {
    group: G,
    generator_g: Element,
    generator_h: Element,
    range_bound: BigUint,
    hiding_bits: u64,
}

impl<G: HiddenOrderGroup> DamgardFujisakiParams<G> {
    /// Creates commitment parameters.
    ///
    /// `range_bound` is `T`, the largest message that may be committed;
    /// `hiding_bits` is the statistical hiding parameter `B`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either generator is not an invertible residue modulo `N`
    /// - The generators are equal to each other
    /// - `T` or `B` is zero
    pub fn new(
        group: G,
        generator_g: Element,
        generator_h: Element,
        range_bound: BigUint,
        hiding_bits: u64,
    ) -> Result<Self> {
        group.validate_element(&generator_g)?;
        group.validate_element(&generator_h)?;

        if generator_g == generator_h {
            return Err(Error::InvalidParams(
                "Generators G and H must be different".to_string(),
            ));
        }

        if range_bound == BigUint::ZERO {
            return Err(Error::InvalidParams(
                "Range bound T must be positive".to_string(),
            ));
        }

        if hiding_bits == 0 {
            return Err(Error::InvalidParams(
                "Hiding parameter B must be positive".to_string(),
            ));
        }

        Ok(Self {
            group,
            generator_g,
            generator_h,
            range_bound,
            hiding_bits,
        })
    }

    pub fn group(&self) -> &G {
        &self.group
    }

    pub fn generator_g(&self) -> &Element {
        &self.generator_g
    }

    pub fn generator_h(&self) -> &Element {
        &self.generator_h
    }

    /// The auxiliary range bound `T`.
    pub fn range_bound(&self) -> &BigUint {
        &self.range_bound
    }

    /// The statistical hiding parameter `B`, in bits.
    pub fn hiding_bits(&self) -> u64 {
        self.hiding_bits
    }

    /// Bit length of the modulus, `|N|`.
    pub fn modulus_bits(&self) -> u64 {
        self.group.modulus_bits()
    }

    /// Computes `G^x * H^y mod N`.
    pub fn compute_commit(&self, x: &BigUint, y: &BigUint) -> Element {
        let gx = self.group.exp(&self.generator_g, x);
        let hy = self.group.exp(&self.generator_h, y);
        self.group.mul(&gx, &hy)
    }

    /// Exclusive upper bound for commitment randomness, `2^(B + |N|)`.
    pub fn randomness_bound(&self) -> BigUint {
        BigUint::from(1u8) << (self.hiding_bits + self.modulus_bits())
    }

    fn check_message(&self, message: &BigUint) -> Result<()> {
        if *message > self.range_bound {
            return Err(Error::MessageOutOfRange(format!(
                "committed message has {} bits, range bound T has {}",
                message.bits(),
                self.range_bound.bits()
            )));
        }
        Ok(())
    }
}

/// Secret opening `(a, r)` of a commitment.
#[derive(Clone, PartialEq, Eq)]
pub struct Opening {
    message: BigUint,
    randomness: BigUint,
}

impl Opening {
    pub fn new(message: BigUint, randomness: BigUint) -> Self {
        Self {
            message,
            randomness,
        }
    }

    /// The committed message `a`.
    pub fn message(&self) -> &BigUint {
        &self.message
    }

    /// The commitment randomness `r`.
    pub fn randomness(&self) -> &BigUint {
        &self.randomness
    }
}

impl Debug for Opening {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Opening { .. }")
    }
}

/// The committing party: knows the opening of its commitment.
#[derive(Clone, Debug)]
pub struct Committer<G: HiddenOrderGroup> {
    params: DamgardFujisakiParams<G>,
    opening: Opening,
    commitment: Element,
}

impl<G: HiddenOrderGroup> Committer<G> {
    /// Commits to `message` with fresh randomness from `[0, 2^(B + |N|))`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MessageOutOfRange`] if `message > T`.
    pub fn commit<R: RngCore + CryptoRng + ?Sized>(
        params: DamgardFujisakiParams<G>,
        message: BigUint,
        rng: &mut R,
    ) -> Result<Self> {
        params.check_message(&message)?;
        let randomness = random_below(&params.randomness_bound(), rng)?;
        Ok(Self::build(params, Opening::new(message, randomness)))
    }

    /// Rebuilds a committer from a known opening.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MessageOutOfRange`] if the message exceeds `T`.
    pub fn from_opening(params: DamgardFujisakiParams<G>, opening: Opening) -> Result<Self> {
        params.check_message(opening.message())?;
        Ok(Self::build(params, opening))
    }

    fn build(params: DamgardFujisakiParams<G>, opening: Opening) -> Self {
        let commitment = params.compute_commit(opening.message(), opening.randomness());
        Self {
            params,
            opening,
            commitment,
        }
    }

    pub fn params(&self) -> &DamgardFujisakiParams<G> {
        &self.params
    }

    pub fn commitment(&self) -> &Element {
        &self.commitment
    }

    /// The decommitment `(a, r)`.
    pub fn opening(&self) -> &Opening {
        &self.opening
    }

    /// Public view of this commitment, suitable for handing to a verifier.
    pub fn receiver(&self) -> Receiver<G> {
        Receiver {
            params: self.params.clone(),
            commitment: self.commitment.clone(),
        }
    }
}

/// The receiving party: holds the commitment value only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receiver<G: HiddenOrderGroup> {
    params: DamgardFujisakiParams<G>,
    commitment: Element,
}

impl<G: HiddenOrderGroup> Receiver<G> {
    /// # Errors
    ///
    /// Returns an error if the commitment is not an invertible residue modulo `N`.
    pub fn new(params: DamgardFujisakiParams<G>, commitment: Element) -> Result<Self> {
        params.group().validate_element(&commitment)?;
        Ok(Self { params, commitment })
    }

    pub fn params(&self) -> &DamgardFujisakiParams<G> {
        &self.params
    }

    pub fn commitment(&self) -> &Element {
        &self.commitment
    }

    /// Checks a revealed opening against the stored commitment.
    pub fn check_decommitment(&self, opening: &Opening) -> bool {
        opening.message() <= self.params.range_bound()
            && self.params.compute_commit(opening.message(), opening.randomness())
                == self.commitment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{QrSpecialRsa, SecureRng};

    fn small_params() -> DamgardFujisakiParams<QrSpecialRsa> {
        let group = QrSpecialRsa::new(BigUint::from(1081u32)).unwrap();
        DamgardFujisakiParams::new(
            group,
            Element::new(BigUint::from(4u8)),
            Element::new(BigUint::from(9u8)),
            BigUint::from(16u8),
            8,
        )
        .unwrap()
    }

    #[test]
    fn known_commitment_value() {
        let opening = Opening::new(BigUint::from(5u8), BigUint::from(7u8));
        let committer = Committer::from_opening(small_params(), opening).unwrap();
        assert_eq!(committer.commitment().value(), &BigUint::from(48u32));
    }

    #[test]
    fn receiver_accepts_correct_decommitment() {
        let mut rng = SecureRng::new();
        let committer = Committer::commit(small_params(), BigUint::from(11u8), &mut rng).unwrap();
        let receiver = committer.receiver();

        assert!(receiver.check_decommitment(committer.opening()));

        let wrong = Opening::new(
            BigUint::from(12u8),
            committer.opening().randomness().clone(),
        );
        assert!(!receiver.check_decommitment(&wrong));
    }

    #[test]
    fn randomness_drawn_below_bound() {
        let mut rng = SecureRng::new();
        let params = small_params();
        let bound = params.randomness_bound();
        assert_eq!(bound, BigUint::from(1u8) << 19u32);

        for _ in 0..50 {
            let committer = Committer::commit(params.clone(), BigUint::from(3u8), &mut rng).unwrap();
            assert!(committer.opening().randomness() < &bound);
        }
    }

    #[test]
    fn message_above_range_bound_is_rejected() {
        let mut rng = SecureRng::new();
        let err = Committer::commit(small_params(), BigUint::from(17u8), &mut rng).unwrap_err();
        assert!(matches!(err, Error::MessageOutOfRange(_)));

        // T itself is still a valid message
        assert!(Committer::commit(small_params(), BigUint::from(16u8), &mut rng).is_ok());
    }

    #[test]
    fn params_validation() {
        let group = QrSpecialRsa::new(BigUint::from(1081u32)).unwrap();
        let g = Element::new(BigUint::from(4u8));
        let h = Element::new(BigUint::from(9u8));

        assert!(DamgardFujisakiParams::new(group.clone(), g.clone(), g.clone(), BigUint::from(16u8), 8).is_err());
        assert!(DamgardFujisakiParams::new(group.clone(), g.clone(), h.clone(), BigUint::ZERO, 8).is_err());
        assert!(DamgardFujisakiParams::new(group.clone(), g.clone(), h.clone(), BigUint::from(16u8), 0).is_err());
        assert!(DamgardFujisakiParams::new(
            group,
            Element::new(BigUint::from(46u8)),
            h,
            BigUint::from(16u8),
            8
        )
        .is_err());
    }

    #[test]
    fn receiver_rejects_non_residue_commitment() {
        let err = Receiver::new(small_params(), Element::new(BigUint::ZERO)).unwrap_err();
        assert!(matches!(err, Error::InvalidGroupElement(_)));
    }

    #[test]
    fn opening_debug_hides_secrets() {
        let opening = Opening::new(BigUint::from(5u8), BigUint::from(7u8));
        assert_eq!(format!("{opening:?}"), "Opening { .. }");
    }
}
