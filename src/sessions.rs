use core::fmt::{self, Display};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::RngCore;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::{ProtocolConfig, SessionSettings};
use crate::{
    Challenge, Error, HiddenOrderGroup, ProofRandomData, Response, Result, SecureRng, Verifier,
    VerifierSession,
};

const SESSION_ID_BYTES: usize = 16;

/// Random identifier of a registered verifier session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SessionId([u8; SESSION_ID_BYTES]);

impl SessionId {
    fn random() -> Self {
        let mut bytes = [0u8; SESSION_ID_BYTES];
        SecureRng::new().fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Parses the hex form produced by [`Display`].
    pub fn from_hex(s: &str) -> Result<Self> {
        let mut bytes = [0u8; SESSION_ID_BYTES];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| Error::UnknownSession(format!("malformed session id '{s}': {e}")))?;
        Ok(Self(bytes))
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| unreachable!("System time is after UNIX_EPOCH"))
        .as_secs()
}

struct SessionEntry<G: HiddenOrderGroup> {
    session: VerifierSession<G>,
    created_at: u64,
    expires_at: u64,
}

impl<G: HiddenOrderGroup> SessionEntry<G> {
    fn new(session: VerifierSession<G>, ttl_seconds: u64) -> Self {
        let created_at = now_secs();
        Self {
            session,
            created_at,
            expires_at: created_at.saturating_add(ttl_seconds),
        }
    }

    /// Expired once the deadline passes or the age exceeds twice the
    /// time-to-live (clock skew).
    fn is_expired(&self, ttl_seconds: u64) -> bool {
        let now = now_secs();
        let age = now.saturating_sub(self.created_at);
        now >= self.expires_at || age >= ttl_seconds.saturating_mul(2)
    }
}

/// Registry of in-flight verifier sessions.
///
/// Every proof attempt gets its own [`VerifierSession`] under a random
/// [`SessionId`], so concurrent attempts, even against the same commitment,
/// never share state. Sessions are single use: [`SessionRegistry::finish`]
/// removes them.
pub struct SessionRegistry<G: HiddenOrderGroup> {
    sessions: Arc<RwLock<HashMap<SessionId, SessionEntry<G>>>>,
    settings: SessionSettings,
}

impl<G: HiddenOrderGroup> SessionRegistry<G> {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            settings,
        }
    }

    /// Registry sized and timed by the `sessions` section of `config`.
    pub fn from_config(config: &ProtocolConfig) -> Self {
        Self::new(config.sessions.clone())
    }

    /// Number of sessions currently held. Expired ones are included until
    /// the next [`SessionRegistry::open`] or [`SessionRegistry::cleanup_expired`].
    pub async fn active(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Opens a session for a proof against `verifier`'s commitment.
    ///
    /// Expired sessions are evicted first and do not count towards capacity.
    /// Returns an error if the registry is still at capacity.
    pub async fn open(&self, verifier: &Verifier<G>) -> Result<SessionId> {
        let mut sessions = self.sessions.write().await;

        self.evict_expired(&mut sessions);
        if sessions.len() >= self.settings.max_active {
            return Err(Error::TooManySessions(self.settings.max_active));
        }

        let id = loop {
            let candidate = SessionId::random();
            if !sessions.contains_key(&candidate) {
                break candidate;
            }
        };

        let entry = SessionEntry::new(verifier.start_session(), self.settings.ttl_seconds);
        sessions.insert(id, entry);
        info!(session = %id, "opened verifier session");

        Ok(id)
    }

    /// Stores the prover's first message in session `id`.
    pub async fn submit_proof_random_data(&self, id: &SessionId, t: ProofRandomData) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        let entry = self.live_entry(&mut sessions, id)?;
        entry.session.set_proof_random_data(t)
    }

    /// Draws and records the challenge for session `id`.
    pub async fn issue_challenge(&self, id: &SessionId) -> Result<Challenge> {
        let mut sessions = self.sessions.write().await;
        let entry = self.live_entry(&mut sessions, id)?;
        entry.session.challenge(&mut SecureRng::new())
    }

    /// Verifies the response and closes session `id`.
    ///
    /// The session is removed even when called out of order, so a failed
    /// attempt cannot be retried under the same identifier.
    pub async fn finish(&self, id: &SessionId, response: &Response) -> Result<bool> {
        let mut sessions = self.sessions.write().await;
        let mut entry = sessions
            .remove(id)
            .ok_or_else(|| Error::UnknownSession(id.to_string()))?;

        if entry.is_expired(self.settings.ttl_seconds) {
            return Err(Error::SessionExpired(id.to_string()));
        }

        let accepted = entry.session.verify(response)?;
        info!(session = %id, accepted, "closed verifier session");
        Ok(accepted)
    }

    /// Removes all expired sessions, returning how many were evicted.
    pub async fn cleanup_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        self.evict_expired(&mut sessions)
    }

    fn evict_expired(&self, sessions: &mut HashMap<SessionId, SessionEntry<G>>) -> usize {
        let before = sessions.len();
        let ttl = self.settings.ttl_seconds;
        sessions.retain(|_, entry| !entry.is_expired(ttl));

        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!(evicted, "evicted expired verifier sessions");
        }
        evicted
    }

    fn live_entry<'a>(
        &self,
        sessions: &'a mut HashMap<SessionId, SessionEntry<G>>,
        id: &SessionId,
    ) -> Result<&'a mut SessionEntry<G>> {
        let expired = sessions
            .get(id)
            .ok_or_else(|| Error::UnknownSession(id.to_string()))?
            .is_expired(self.settings.ttl_seconds);

        if expired {
            sessions.remove(id);
            return Err(Error::SessionExpired(id.to_string()));
        }

        sessions
            .get_mut(id)
            .ok_or_else(|| Error::UnknownSession(id.to_string()))
    }
}

impl<G: HiddenOrderGroup> Clone for SessionRegistry<G> {
    fn clone(&self) -> Self {
        Self {
            sessions: Arc::clone(&self.sessions),
            settings: self.settings.clone(),
        }
    }
}
