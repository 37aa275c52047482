use rand::{CryptoRng, RngCore};
use tracing::{debug, warn};

use super::{Challenge, ProofBounds, ProofRandomData, Response};
use crate::{Error, HiddenOrderGroup, ProtocolConfig, Receiver, Result};

/// Verifier for knowledge of a Damgard-Fujisaki commitment opening.
///
/// Holds only the public commitment. Interactive runs go through a
/// [`VerifierSession`], which enforces the order of the protocol moves.
#[derive(Clone, Debug)]
pub struct Verifier<G: HiddenOrderGroup> {
    receiver: Receiver<G>,
    bounds: ProofBounds,
}

impl<G: HiddenOrderGroup> Verifier<G> {
    /// Creates a verifier for the receiver's commitment with a
    /// `challenge_bits`-bit challenge space.
    ///
    /// # Errors
    ///
    /// Returns an error if `challenge_bits` is zero or exceeds
    /// [`MAX_CHALLENGE_BITS`](crate::MAX_CHALLENGE_BITS).
    pub fn new(receiver: Receiver<G>, challenge_bits: u64) -> Result<Self> {
        let bounds = ProofBounds::for_params(receiver.params(), challenge_bits)?;
        Ok(Self { receiver, bounds })
    }

    /// Creates a verifier using the challenge space of a validated `config`.
    pub fn from_config(receiver: Receiver<G>, config: &ProtocolConfig) -> Result<Self> {
        config.validate()?;
        Self::new(receiver, config.protocol.challenge_bits)
    }

    pub fn receiver(&self) -> &Receiver<G> {
        &self.receiver
    }

    pub fn bounds(&self) -> &ProofBounds {
        &self.bounds
    }

    /// Starts a fresh interactive session against this commitment.
    pub fn start_session(&self) -> VerifierSession<G> {
        VerifierSession::new(self.clone())
    }

    /// Checks a complete transcript `(t, c, s1, s2)`.
    ///
    /// Returns `Ok(false)` for a rejected proof.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChallenge`] if `c` lies outside `[0, 2^k)`.
    pub fn verify_transcript(
        &self,
        t: &ProofRandomData,
        challenge: &Challenge,
        response: &Response,
    ) -> Result<bool> {
        self.bounds.check_challenge(challenge.value())?;
        Ok(self.check(t, challenge, response))
    }

    /// `t * C^c == G^s1 * H^s2 (mod N)`
    fn check(&self, t: &ProofRandomData, challenge: &Challenge, response: &Response) -> bool {
        let params = self.receiver.params();
        let group = params.group();

        if !group.contains(t.element()) {
            debug!("proof random data is not an invertible residue");
            return false;
        }

        let c_pow = group.exp(self.receiver.commitment(), challenge.value());
        let left = group.mul(t.element(), &c_pow);
        let right = params.compute_commit(response.s1(), response.s2());

        left == right
    }
}

/// Stage of a [`VerifierSession`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStage {
    AwaitingRandomData,
    AwaitingChallenge,
    AwaitingResponse,
    /// Verification ran; holds the outcome.
    Done(bool),
}

#[derive(Clone, Debug)]
enum State {
    AwaitingRandomData,
    AwaitingChallenge {
        t: ProofRandomData,
    },
    AwaitingResponse {
        t: ProofRandomData,
        challenge: Challenge,
    },
    Done(bool),
}

/// One interactive proof attempt on the verifier side.
///
/// Moves through `AwaitingRandomData -> AwaitingChallenge -> AwaitingResponse
/// -> Done`. A call made in the wrong stage fails with
/// [`Error::ProtocolState`] and leaves the session untouched.
#[derive(Clone, Debug)]
pub struct VerifierSession<G: HiddenOrderGroup> {
    verifier: Verifier<G>,
    state: State,
}

impl<G: HiddenOrderGroup> VerifierSession<G> {
    pub fn new(verifier: Verifier<G>) -> Self {
        Self {
            verifier,
            state: State::AwaitingRandomData,
        }
    }

    pub fn stage(&self) -> SessionStage {
        match self.state {
            State::AwaitingRandomData => SessionStage::AwaitingRandomData,
            State::AwaitingChallenge { .. } => SessionStage::AwaitingChallenge,
            State::AwaitingResponse { .. } => SessionStage::AwaitingResponse,
            State::Done(accepted) => SessionStage::Done(accepted),
        }
    }

    /// Interactive protocol: stores the prover's first message.
    ///
    /// `t` is stored as given; a malformed value surfaces as a rejected proof.
    pub fn set_proof_random_data(&mut self, t: ProofRandomData) -> Result<()> {
        match self.state {
            State::AwaitingRandomData => {
                self.state = State::AwaitingChallenge { t };
                Ok(())
            }
            _ => Err(self.out_of_order("set proof random data")),
        }
    }

    /// Interactive protocol: draws the challenge (second message).
    ///
    /// Only legal once the proof random data is fixed.
    pub fn challenge<R: RngCore + CryptoRng + ?Sized>(&mut self, rng: &mut R) -> Result<Challenge> {
        let State::AwaitingChallenge { t } = &self.state else {
            return Err(self.out_of_order("issue challenge"));
        };

        let challenge = Challenge::new(self.verifier.bounds.sample_challenge(rng)?);
        self.state = State::AwaitingResponse {
            t: t.clone(),
            challenge: challenge.clone(),
        };
        Ok(challenge)
    }

    /// Interactive protocol: checks the prover's response.
    ///
    /// Returns the verdict and moves the session to `Done`; `false` is a
    /// definitive rejection.
    pub fn verify(&mut self, response: &Response) -> Result<bool> {
        let State::AwaitingResponse { t, challenge } = &self.state else {
            return Err(self.out_of_order("verify"));
        };

        let accepted = self.verifier.check(t, challenge, response);
        if accepted {
            debug!("opening proof accepted");
        } else {
            warn!("opening proof rejected");
        }

        self.state = State::Done(accepted);
        Ok(accepted)
    }

    /// Discards all session state so a new attempt can start.
    pub fn reset(&mut self) {
        self.state = State::AwaitingRandomData;
    }

    fn out_of_order(&self, operation: &str) -> Error {
        Error::ProtocolState(format!(
            "cannot {operation} while session is in stage {:?}",
            self.stage()
        ))
    }
}
