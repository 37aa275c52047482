mod common;

use std::sync::Arc;

use damgard_fujisaki_zkp::{
    Error, ProtocolConfig, Prover, Response, SecureRng, SessionRegistry, SessionSettings,
    Verifier,
};
use num_bigint::BigUint;

use common::{init_tracing, random_committer, CHALLENGE_BITS};

fn settings() -> SessionSettings {
    SessionSettings {
        ttl_seconds: 300,
        max_active: 64,
    }
}

#[tokio::test]
async fn full_session_flow() {
    init_tracing();

    let committer = random_committer();
    let verifier = Verifier::new(committer.receiver(), CHALLENGE_BITS).unwrap();
    let prover = Prover::new(committer, CHALLENGE_BITS).unwrap();
    let registry = SessionRegistry::new(settings());

    let id = registry.open(&verifier).await.unwrap();
    let (t, nonce) = prover.commit(&mut SecureRng::new()).unwrap();
    registry.submit_proof_random_data(&id, t).await.unwrap();
    let challenge = registry.issue_challenge(&id).await.unwrap();
    let response = prover.respond(nonce, &challenge).unwrap();

    assert!(registry.finish(&id, &response).await.unwrap());
    assert_eq!(registry.active().await, 0);

    assert!(matches!(
        registry.finish(&id, &response).await,
        Err(Error::UnknownSession(_))
    ));
}

#[tokio::test]
async fn session_flow_driven_by_config() {
    let mut config = ProtocolConfig::default();
    config.protocol.challenge_bits = 40;
    config.sessions.max_active = 1;

    let committer = random_committer();
    let verifier = Verifier::from_config(committer.receiver(), &config).unwrap();
    let prover = Prover::from_config(committer, &config).unwrap();
    let registry = SessionRegistry::from_config(&config);

    let id = registry.open(&verifier).await.unwrap();
    assert!(matches!(
        registry.open(&verifier).await,
        Err(Error::TooManySessions(1))
    ));

    let (t, nonce) = prover.commit(&mut SecureRng::new()).unwrap();
    registry.submit_proof_random_data(&id, t).await.unwrap();
    let challenge = registry.issue_challenge(&id).await.unwrap();
    assert!(challenge.value().bits() <= 40);

    let response = prover.respond(nonce, &challenge).unwrap();
    assert!(registry.finish(&id, &response).await.unwrap());
}

#[tokio::test]
async fn challenge_before_random_data_is_a_state_error() {
    let verifier = Verifier::new(random_committer().receiver(), CHALLENGE_BITS).unwrap();
    let registry = SessionRegistry::new(settings());
    let id = registry.open(&verifier).await.unwrap();

    assert!(matches!(
        registry.issue_challenge(&id).await,
        Err(Error::ProtocolState(_))
    ));

    // finishing out of order still closes the session
    let response = Response::new(BigUint::from(1u8), BigUint::from(1u8));
    assert!(matches!(
        registry.finish(&id, &response).await,
        Err(Error::ProtocolState(_))
    ));
    assert_eq!(registry.active().await, 0);
}

#[tokio::test]
async fn unknown_session_is_reported() {
    let registry = SessionRegistry::<damgard_fujisaki_zkp::QrSpecialRsa>::new(settings());
    let id = damgard_fujisaki_zkp::SessionId::from_hex("00112233445566778899aabbccddeeff").unwrap();

    assert!(matches!(
        registry.issue_challenge(&id).await,
        Err(Error::UnknownSession(_))
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_sessions_on_one_commitment_are_isolated() {
    init_tracing();

    let committer = random_committer();
    let verifier = Arc::new(Verifier::new(committer.receiver(), CHALLENGE_BITS).unwrap());
    let prover = Arc::new(Prover::new(committer, CHALLENGE_BITS).unwrap());
    let registry = SessionRegistry::new(settings());

    let mut handles = Vec::new();
    for i in 0..16 {
        let verifier = Arc::clone(&verifier);
        let prover = Arc::clone(&prover);
        let registry = registry.clone();

        handles.push(tokio::spawn(async move {
            let id = registry.open(&verifier).await.unwrap();
            let (t, nonce) = prover.commit(&mut SecureRng::new()).unwrap();
            registry.submit_proof_random_data(&id, t).await.unwrap();
            let challenge = registry.issue_challenge(&id).await.unwrap();
            tokio::task::yield_now().await;

            let mut response = prover.respond(nonce, &challenge).unwrap();
            // every fourth attempt tampers with its response
            let honest = i % 4 != 0;
            if !honest {
                response = Response::new(response.s1() + 1u8, response.s2().clone());
            }

            let accepted = registry.finish(&id, &response).await.unwrap();
            (honest, accepted)
        }));
    }

    for handle in handles {
        let (honest, accepted) = handle.await.unwrap();
        assert_eq!(honest, accepted);
    }
    assert_eq!(registry.active().await, 0);
}
