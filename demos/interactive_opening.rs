//! Interactive proof of knowledge of a Damgard-Fujisaki commitment opening.
//!
//! This example demonstrates:
//! - Loading protocol configuration
//! - Committing to a secret message
//! - Running the three protocol moves through a verifier session
//! - Rejecting a tampered response

use damgard_fujisaki_zkp::{
    Committer, DamgardFujisakiParams, Element, ProtocolConfig, Prover, QrSpecialRsa, Response,
    SecureRng, Verifier,
};
use num_bigint::BigUint;

// Two 256-bit safe primes and two quadratic residues modulo their product.
// Parameter generation is left to the caller; production moduli are 2048 bits or more.
const P: &str = "9be54368fdaeb7e5d45d1ef3f6a1eaf9642cb55f167e01b5378e341afe8737ab";
const Q: &str = "f175e296270521a529620c4e820edc4d24b0682bf5b54c9bab62fb0588cf6a17";
const G: &str = "547555b85d1e190cef27b3823f26d2e14488dc714f5bc269334f4f5f3b9333689e05c7de6f57fdd647cbe55c723dd9d08e0fa09c077a39c9d02d12ecdf326927";
const H: &str = "69113e1e489a38bf8313d52a15c059e1a629b5c71850f21058c7b14946376546fb6893cd5b1e3580be8b020b4358d5f93f2dfd37e6d9c6a84e3f19ace9fc5b6f";

fn hex_uint(s: &str) -> BigUint {
    BigUint::parse_bytes(s.as_bytes(), 16).expect("constants are valid hex")
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("damgard_fujisaki_zkp=debug"))
        .init();

    println!("Damgard-Fujisaki Opening Proof: Interactive Example\n");

    println!("Step 1: Load configuration");
    let config = ProtocolConfig::from_env().unwrap_or_default();
    config.validate().expect("configuration should be valid");
    let k = config.protocol.challenge_bits;
    println!("  Challenge space: {k} bits\n");

    println!("Step 2: Set up commitment parameters");
    let group = QrSpecialRsa::new(hex_uint(P) * hex_uint(Q)).expect("modulus should be valid");
    let params = DamgardFujisakiParams::new(
        group,
        Element::new(hex_uint(G)),
        Element::new(hex_uint(H)),
        BigUint::from(1u8) << 128u32,
        80,
    )
    .expect("parameters should be valid");
    println!("  Modulus: {} bits\n", params.modulus_bits());

    println!("Step 3: Commit to a secret message");
    let mut rng = SecureRng::new();
    let committer =
        Committer::commit(params, BigUint::from(5u8), &mut rng).expect("message is in range");
    println!("  Commitment: {}", committer.commitment());
    println!("  (The message and randomness remain hidden)\n");

    let verifier = Verifier::from_config(committer.receiver(), &config).expect("verifier setup");
    let prover = Prover::from_config(committer, &config).expect("prover setup");

    println!("Step 4: Prover sends proof random data");
    let (t, nonce) = prover.commit(&mut rng).expect("sampling should succeed");
    let mut session = verifier.start_session();
    session
        .set_proof_random_data(t.clone())
        .expect("session accepts random data");
    println!("  t = {}\n", t.element());

    println!("Step 5: Verifier issues a challenge");
    let challenge = session.challenge(&mut rng).expect("session issues challenge");
    println!("  c = {}\n", challenge.value());

    println!("Step 6: Prover responds");
    let response = prover
        .respond(nonce, &challenge)
        .expect("challenge is in range");
    println!("  s1: {} bits, s2: {} bits\n", response.s1().bits(), response.s2().bits());

    println!("Step 7: Verify");
    match session.verify(&response) {
        Ok(true) => println!("  Proof is VALID"),
        Ok(false) => println!("  Proof is INVALID"),
        Err(e) => println!("  Session error: {e}"),
    }

    println!("\nStep 8: A tampered response is rejected");
    let tampered = Response::new(response.s1() + 1u8, response.s2().clone());
    let verdict = verifier
        .verify_transcript(&t, &challenge, &tampered)
        .expect("challenge is in range");
    println!("  Tampered proof accepted: {verdict}");
}
