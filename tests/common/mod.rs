//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use damgard_fujisaki_zkp::{
    Committer, DamgardFujisakiParams, Element, Opening, QrSpecialRsa, SecureRng,
};
use num_bigint::BigUint;

/// 256-bit safe prime `p = 2p' + 1`.
pub const SAFE_PRIME_P: &str =
    "9be54368fdaeb7e5d45d1ef3f6a1eaf9642cb55f167e01b5378e341afe8737ab";
/// 256-bit safe prime `q = 2q' + 1`.
pub const SAFE_PRIME_Q: &str =
    "f175e296270521a529620c4e820edc4d24b0682bf5b54c9bab62fb0588cf6a17";
/// Random quadratic residue modulo `p*q`.
pub const GENERATOR_G: &str = "547555b85d1e190cef27b3823f26d2e14488dc714f5bc269334f4f5f3b9333689e05c7de6f57fdd647cbe55c723dd9d08e0fa09c077a39c9d02d12ecdf326927";
/// Random quadratic residue modulo `p*q`.
pub const GENERATOR_H: &str = "69113e1e489a38bf8313d52a15c059e1a629b5c71850f21058c7b14946376546fb6893cd5b1e3580be8b020b4358d5f93f2dfd37e6d9c6a84e3f19ace9fc5b6f";

pub const CHALLENGE_BITS: u64 = 80;
pub const HIDING_BITS: u64 = 80;
pub const RANGE_BOUND_BITS: u64 = 128;

/// Initialize test tracing (call once at the beginning of tests).
///
/// Only logs from this crate are shown. Subsequent calls are safe and will be
/// ignored.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::new("damgard_fujisaki_zkp=debug");

    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(filter)
        .try_init();
}

pub fn hex_uint(s: &str) -> BigUint {
    BigUint::parse_bytes(s.as_bytes(), 16).expect("fixture constants are valid hex")
}

/// Commitment parameters over a 512-bit special RSA modulus.
pub fn params() -> DamgardFujisakiParams<QrSpecialRsa> {
    let n = hex_uint(SAFE_PRIME_P) * hex_uint(SAFE_PRIME_Q);
    let group = QrSpecialRsa::new(n).expect("product of safe primes is a valid modulus");
    DamgardFujisakiParams::new(
        group,
        Element::new(hex_uint(GENERATOR_G)),
        Element::new(hex_uint(GENERATOR_H)),
        BigUint::from(1u8) << RANGE_BOUND_BITS,
        HIDING_BITS,
    )
    .expect("fixture parameters are valid")
}

pub fn committer_for(a: u64, r: u64) -> Committer<QrSpecialRsa> {
    Committer::from_opening(params(), Opening::new(BigUint::from(a), BigUint::from(r)))
        .expect("opening is within range")
}

pub fn random_committer() -> Committer<QrSpecialRsa> {
    let mut rng = SecureRng::new();
    let message = damgard_fujisaki_zkp::random_below(params().range_bound(), &mut rng)
        .expect("range bound is positive");
    Committer::commit(params(), message, &mut rng).expect("message is below the range bound")
}
