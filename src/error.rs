//! Fault taxonomy for the connection lifecycle.
//!
//! Every way a connection attempt can end is a [`Fault`]. None of them stop
//! the process: the lifecycle loop picks a cooldown from the fault's phase
//! and tries again. Weather lookup failures never appear here, they become
//! reply text inside the dispatcher.

use std::time::Duration;

use thiserror::Error;
use weatherbot_proto::{FaultPhase, TransportError};

use crate::config::TimingConfig;

// ============================================================================
// Session Errors (what went wrong)
// ============================================================================

/// Cause of a connection attempt ending.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server sent ERROR or a "Closing Link" notice.
    #[error("server closed the link: {0}")]
    Closed(String),

    /// The stream reached end-of-file.
    #[error("connection closed by peer")]
    Eof,
}

impl SessionError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(TransportError::Connect { .. }) => "connect_failed",
            Self::Transport(TransportError::Handshake(_)) => "tls_handshake_failed",
            Self::Transport(_) => "transport_error",
            Self::Closed(_) => "server_closed",
            Self::Eof => "eof",
        }
    }
}

// ============================================================================
// Fault (where it went wrong)
// ============================================================================

/// A retryable end of one connection attempt.
#[derive(Debug, Error)]
#[error("{phase} fault: {cause}")]
pub struct Fault {
    pub phase: FaultPhase,
    #[source]
    pub cause: SessionError,
}

impl Fault {
    pub fn new(phase: FaultPhase, cause: impl Into<SessionError>) -> Self {
        Self {
            phase,
            cause: cause.into(),
        }
    }

    /// How long to wait before the next attempt.
    pub fn cooldown(&self, timing: &TimingConfig) -> Duration {
        timing.cooldown(self.phase)
    }
}
