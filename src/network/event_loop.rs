//! Active-state event loop.
//!
//! The connection task is the only writer. Bot commands run on their own
//! tasks and hand their reply back through a bounded queue, so a slow
//! weather lookup never holds up a PONG. At most
//! [`MAX_COMMANDS_IN_FLIGHT`] commands run at once; anything beyond that is
//! dropped rather than queued.

use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::{Semaphore, mpsc};
use tracing::{Instrument, debug, info, warn};
use weatherbot_proto::{
    ChatMessage, Command, FormattedStringExt, Message, Session, SessionAction, Transport,
};

use super::{read_outcome, send};
use crate::bot::{Dispatcher, Invocation};
use crate::error::{Fault, SessionError};

/// Replies waiting to be written.
const REPLY_QUEUE_SIZE: usize = 32;

/// Commands allowed to run concurrently on one connection.
pub(super) const MAX_COMMANDS_IN_FLIGHT: usize = 4;

/// A finished command's answer.
#[derive(Debug)]
struct Reply {
    channel: String,
    text: String,
}

/// Where command tasks send their answers, and how many may run.
struct Workers {
    replies: mpsc::Sender<Reply>,
    permits: Arc<Semaphore>,
}

/// Run Phase 3 until the connection faults.
pub async fn run_event_loop<S>(
    transport: &mut Transport<S>,
    session: &mut Session,
    dispatcher: &Dispatcher,
) -> Fault
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (reply_tx, mut reply_rx) = mpsc::channel::<Reply>(REPLY_QUEUE_SIZE);
    let workers = Workers {
        replies: reply_tx,
        permits: Arc::new(Semaphore::new(MAX_COMMANDS_IN_FLIGHT)),
    };

    loop {
        tokio::select! {
            line = transport.recv_line() => {
                let line = match read_outcome(session, line) {
                    Ok(line) => line,
                    Err(fault) => return fault,
                };
                if let Err(fault) = handle_line(transport, session, dispatcher, &workers, &line).await {
                    return fault;
                }
            }
            Some(reply) = reply_rx.recv() => {
                info!(
                    channel = %reply.channel,
                    reply = %reply.text.as_str().strip_formatting(),
                    "replying"
                );
                let command = Command::privmsg(reply.channel, reply.text);
                if let Err(fault) = send(transport, session, command).await {
                    return fault;
                }
            }
        }
    }
}

async fn handle_line<S>(
    transport: &mut Transport<S>,
    session: &mut Session,
    dispatcher: &Dispatcher,
    workers: &Workers,
    line: &str,
) -> Result<(), Fault>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let Some(msg) = Message::parse(line) else {
        debug!(line = %line, "skipping unparseable line");
        return Ok(());
    };

    for action in session.feed(&msg) {
        match action {
            SessionAction::Send(command) => send(transport, session, command).await?,
            SessionAction::Chat(chat) => spawn_command(dispatcher, workers, chat),
            SessionAction::Closed { phase, reason } => {
                return Err(Fault::new(phase, SessionError::Closed(reason)));
            }
            SessionAction::Registered => {}
        }
    }
    Ok(())
}

fn spawn_command(dispatcher: &Dispatcher, workers: &Workers, chat: ChatMessage) {
    let Some(invocation) = Invocation::parse(&chat) else {
        return;
    };
    let Ok(permit) = Arc::clone(&workers.permits).try_acquire_owned() else {
        warn!(
            command = invocation.command.name(),
            channel = %invocation.channel,
            sender = %invocation.sender,
            "too many commands in flight, dropping"
        );
        return;
    };

    let dispatcher = dispatcher.clone();
    let replies = workers.replies.clone();
    tokio::spawn(
        async move {
            let _permit = permit;
            let text = dispatcher.run(&invocation).await;
            let reply = Reply {
                channel: invocation.channel,
                text,
            };
            if replies.send(reply).await.is_err() {
                debug!("connection ended before the reply could be sent");
            }
        }
        .in_current_span(),
    );
}
