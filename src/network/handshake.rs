//! Registration and channel joins.

use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info};
use weatherbot_proto::{Command, Message, Session, SessionAction, Transport};

use super::{read_outcome, send};
use crate::error::{Fault, SessionError};

/// Run Phase 1: send NICK/USER and read until the server welcomes us.
///
/// PINGs are answered while waiting; servers probe before registration
/// completes.
pub async fn register<S>(transport: &mut Transport<S>, session: &mut Session) -> Result<(), Fault>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    for command in session.connected() {
        send(transport, session, command).await?;
    }

    loop {
        let line = read_outcome(session, transport.recv_line().await)?;
        let Some(msg) = Message::parse(&line) else {
            debug!(line = %line, "skipping unparseable line");
            continue;
        };

        for action in session.feed(&msg) {
            match action {
                SessionAction::Send(command) => {
                    if let Command::Nick(nick) = &command {
                        info!(nick = %nick, "nickname in use, retrying");
                    }
                    send(transport, session, command).await?;
                }
                SessionAction::Registered => {
                    info!(nick = %session.nickname(), "registered");
                    return Ok(());
                }
                SessionAction::Closed { phase, reason } => {
                    return Err(Fault::new(phase, SessionError::Closed(reason)));
                }
                SessionAction::Chat(_) => {}
            }
        }
    }
}

/// Run Phase 2: one JOIN per configured channel, `delay` apart, then go Active.
///
/// Joins are not confirmed before going Active; the server's echoes are
/// picked up by the event loop.
pub async fn join_channels<S>(
    transport: &mut Transport<S>,
    session: &mut Session,
    delay: Duration,
) -> Result<(), Fault>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    for (i, command) in session.join_requests().into_iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if let Command::Join(channel) = &command {
            info!(channel = %channel, "joining");
        }
        send(transport, session, command).await?;
    }

    session.activate();
    info!("active");
    Ok(())
}
