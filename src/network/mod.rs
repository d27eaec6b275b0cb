//! Network module.
//!
//! One connection attempt runs in three phases on a single task that owns
//! the [`Transport`]:
//!
//! ```text
//! Phase 1: Registration (NICK/USER, answer PINGs until 001)
//!    ↓
//! Phase 2: Joins (one JOIN per configured channel, paced)
//!    ↓
//! Phase 3: Event loop (tokio::select!)
//!    ┌──────────────────────────────────────────────┐
//!    │ recv_line ─▶ Session::feed ─▶ PONG / faults  │
//!    │                    │                         │
//!    │                    ▼                         │
//!    │          spawned command task                │
//!    │                    │                         │
//!    │                    ▼                         │
//!    │        reply queue ─▶ PRIVMSG                │
//!    └──────────────────────────────────────────────┘
//! ```
//!
//! Every attempt ends in a [`Fault`]; [`Lifecycle`] waits out the cooldown
//! for its phase and starts over with a fresh session.

mod event_loop;
mod handshake;
mod lifecycle;

pub use lifecycle::Lifecycle;

use tokio::io::{AsyncRead, AsyncWrite};
use weatherbot_proto::{Command, Session, Transport};

use crate::bot::Dispatcher;
use crate::config::TimingConfig;
use crate::error::{Fault, SessionError};

/// Drive one connected attempt from registration until it faults.
pub async fn run_connection<S>(
    transport: &mut Transport<S>,
    session: &mut Session,
    dispatcher: &Dispatcher,
    timing: &TimingConfig,
) -> Fault
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    if let Err(fault) = handshake::register(transport, session).await {
        return fault;
    }
    if let Err(fault) = handshake::join_channels(transport, session, timing.join_delay()).await {
        return fault;
    }
    event_loop::run_event_loop(transport, session, dispatcher).await
}

/// Send one command; a write failure faults the session.
async fn send<S>(
    transport: &mut Transport<S>,
    session: &mut Session,
    command: Command,
) -> Result<(), Fault>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    transport
        .send(command)
        .await
        .map_err(|e| Fault::new(session.fault(), e))
}

/// Convert the outcome of a read into a line or a fault.
fn read_outcome(
    session: &mut Session,
    line: Option<Result<String, weatherbot_proto::TransportError>>,
) -> Result<String, Fault> {
    match line {
        Some(Ok(line)) => Ok(line),
        Some(Err(e)) => Err(Fault::new(session.fault(), e)),
        None => Err(Fault::new(session.fault(), SessionError::Eof)),
    }
}
