use thiserror::Error;

/// Failure of a statement or readiness round-trip.
///
/// A GET that matches nothing is not an error; it reshapes to an empty row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProxyError {
    /// The command executor could not be reached or the channel broke.
    #[error("transport error: {0}")]
    Transport(String),
    /// The executor understood the request but the operation failed.
    #[error("{0}")]
    Executor(String),
    /// Response did not line up with the request (length, id, row shape).
    #[error("protocol violation: {0}")]
    ProtocolViolation(String),
}

impl ProxyError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ProxyError::Transport(_))
    }
}
