//! Error types for Damgard-Fujisaki opening proofs

/// Main error types for the library.
///
/// A rejected proof is not an error: verification reports it as `false`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid group, commitment or protocol parameters were provided.
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// A group element is zero, out of range or not invertible modulo `N`.
    #[error("Invalid group element: {0}")]
    InvalidGroupElement(String),

    /// The committed message exceeds the range bound `T`.
    #[error("Message out of range: {0}")]
    MessageOutOfRange(String),

    /// A challenge lies outside `[0, 2^k)`.
    #[error("Invalid challenge: {0}")]
    InvalidChallenge(String),

    /// A protocol step was invoked out of sequence.
    #[error("Protocol state error: {0}")]
    ProtocolState(String),

    /// No session is registered under the given identifier.
    #[error("Unknown session: {0}")]
    UnknownSession(String),

    /// The session outlived its time-to-live.
    #[error("Session expired: {0}")]
    SessionExpired(String),

    /// The registry already holds the maximum number of live sessions.
    #[error("Too many active sessions (limit {0})")]
    TooManySessions(usize),
}
