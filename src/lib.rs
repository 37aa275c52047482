//! Interactive zero-knowledge proof of knowledge of a Damgard-Fujisaki
//! commitment opening.
//!
//! A prover holding the opening `(a, r)` of `c = G^a * H^r mod N` convinces a
//! verifier, who only sees `c`, that it knows a valid opening:
//!
//! 1. Prover sends `t = G^r1 * H^r2 mod N` ([`Prover::commit`])
//! 2. Verifier replies with a challenge `c < 2^k` ([`VerifierSession::challenge`])
//! 3. Prover answers `s1 = r1 + c*a`, `s2 = r2 + c*r` ([`Prover::respond`])
//! 4. Verifier accepts iff `t * C^c == G^s1 * H^s2 mod N` ([`VerifierSession::verify`])
//!
//! The group modulus is an RSA-type modulus of unknown factorization, so the
//! group order is hidden and responses are computed over the integers.
//!
//! # Example
//!
//! ```rust
//! use damgard_fujisaki_zkp::{
//!     Committer, DamgardFujisakiParams, Element, Prover, QrSpecialRsa, SecureRng, Verifier,
//! };
//! use num_bigint::BigUint;
//!
//! // N = 23 * 47, both safe primes; real deployments use 2048-bit moduli.
//! let group = QrSpecialRsa::new(BigUint::from(1081u32)).unwrap();
//! let params = DamgardFujisakiParams::new(
//!     group,
//!     Element::new(BigUint::from(4u8)),
//!     Element::new(BigUint::from(9u8)),
//!     BigUint::from(16u8),
//!     8,
//! )
//! .unwrap();
//!
//! let mut rng = SecureRng::new();
//! let committer = Committer::commit(params, BigUint::from(5u8), &mut rng).unwrap();
//! let verifier = Verifier::new(committer.receiver(), 8).unwrap();
//! let prover = Prover::new(committer, 8).unwrap();
//!
//! let mut session = verifier.start_session();
//! let (t, nonce) = prover.commit(&mut rng).unwrap();
//! session.set_proof_random_data(t).unwrap();
//! let challenge = session.challenge(&mut rng).unwrap();
//! let response = prover.respond(nonce, &challenge).unwrap();
//! assert!(session.verify(&response).unwrap());
//! ```

/// Protocol and session configuration.
pub mod config;
/// Error types.
pub mod error;
/// Group arithmetic, commitments and randomness.
pub mod primitives;
/// The opening proof: bounds, messages, prover and verifier.
pub mod protocol;
/// Registry of concurrent verifier sessions.
pub mod sessions;

pub use config::{ProtocolConfig, ProtocolSettings, SessionSettings};
pub use error::Error;
pub use primitives::{
    random_below, Committer, DamgardFujisakiParams, Element, HiddenOrderGroup, Opening,
    QrSpecialRsa, Receiver, SecureRng,
};
pub use protocol::{
    Challenge, ProofBounds, ProofRandomData, Prover, ProverNonce, Response, SessionStage,
    Verifier, VerifierSession, MAX_CHALLENGE_BITS,
};
pub use sessions::{SessionId, SessionRegistry};

/// Result type for Damgard-Fujisaki proof operations.
pub type Result<T> = core::result::Result<T, Error>;
