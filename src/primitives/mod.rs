//! Building blocks consumed by the opening proof.
//!
//! - **group**: hidden-order group arithmetic over an RSA-type modulus
//! - **commitment**: Damgard-Fujisaki commitments (parameters, committer, receiver)
//! - **rng**: secure randomness and uniform big-integer sampling

/// Damgard-Fujisaki commitment scheme.
pub mod commitment;
/// Hidden-order group trait and the special RSA group.
pub mod group;
/// Cryptographically secure random number generation.
pub mod rng;

pub use commitment::{Committer, DamgardFujisakiParams, Opening, Receiver};
pub use group::{Element, HiddenOrderGroup, QrSpecialRsa};
pub use rng::{random_below, SecureRng};
