use serde::{Deserialize, Serialize};

use crate::{Error, Result, MAX_CHALLENGE_BITS};

/// Protocol and session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolConfig {
    /// Security parameters of the opening proof.
    pub protocol: ProtocolSettings,
    /// Verifier session bookkeeping.
    pub sessions: SessionSettings,
}

/// Security parameters of the opening proof.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolSettings {
    /// Challenge-space size `k`; soundness error is about `2^-k`.
    pub challenge_bits: u64,
}

/// Verifier session settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Seconds a session may stay open before it expires.
    pub ttl_seconds: u64,
    /// Maximum number of concurrently open sessions.
    pub max_active: usize,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            protocol: ProtocolSettings { challenge_bits: 80 },
            sessions: SessionSettings {
                ttl_seconds: 300,
                max_active: 1024,
            },
        }
    }
}

impl ProtocolConfig {
    /// Loads configuration from TOML file and environment variables.
    ///
    /// Configuration priority: environment variables > TOML file > defaults.
    /// Environment variables use the `DFZKP_` prefix with `__` between
    /// sections, e.g. `DFZKP_PROTOCOL__CHALLENGE_BITS=128`.
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> figment::error::Result<Self> {
        use figment::providers::{Env, Format, Serialized, Toml};
        use figment::Figment;

        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file("config/protocol.toml"))
            .merge(Env::prefixed("DFZKP_").split("__"))
            .extract()
    }

    /// Checks that the loaded values describe a usable configuration.
    pub fn validate(&self) -> Result<()> {
        if self.protocol.challenge_bits == 0 {
            return Err(Error::InvalidParams(
                "challenge_bits must be positive".to_string(),
            ));
        }
        if self.protocol.challenge_bits > MAX_CHALLENGE_BITS {
            return Err(Error::InvalidParams(format!(
                "challenge_bits must be at most {MAX_CHALLENGE_BITS}"
            )));
        }
        if self.sessions.ttl_seconds == 0 {
            return Err(Error::InvalidParams(
                "ttl_seconds must be positive".to_string(),
            ));
        }
        if self.sessions.max_active == 0 {
            return Err(Error::InvalidParams(
                "max_active must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
