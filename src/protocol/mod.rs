/// Masking and challenge-space bounds.
pub mod bounds;
/// Protocol messages (proof random data, challenge, response).
pub mod messages;
/// Prover implementation for generating proofs.
pub mod prover;
/// Verifier implementation and per-attempt sessions.
pub mod verifier;

pub use bounds::{ProofBounds, MAX_CHALLENGE_BITS};
pub use messages::{Challenge, ProofRandomData, Response};
pub use prover::{Prover, ProverNonce};
pub use verifier::{SessionStage, Verifier, VerifierSession};
