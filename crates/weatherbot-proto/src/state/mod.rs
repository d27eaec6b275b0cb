//! Sans-IO session state machine.
//!
//! The machine owns one connection attempt's protocol state: lifecycle
//! state, the nickname in use and the channels the server has confirmed.
//! It performs no I/O. The caller opens the transport, feeds it parsed
//! lines and carries out the returned [`SessionAction`]s.
//!
//! ```text
//! Disconnected -> Connecting -> Registering -> JoiningChannels -> Active
//!                      \              \               \             /
//!                       +--------------+---------------+-> Faulted
//! ```
//!
//! A fresh [`Session`] is built for every attempt, so nothing learned on
//! one connection (nickname fallback, channel membership) leaks into the
//! next.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use weatherbot_proto::{Message, Session, SessionAction, SessionConfig, SessionState};
//!
//! let config = Arc::new(SessionConfig {
//!     nickname: "WeatherBot".to_string(),
//!     realname: "Weather Bot".to_string(),
//!     channels: vec!["#help".to_string()],
//! });
//! let mut session = Session::new(config);
//! session.begin_connect();
//! let hello = session.connected(); // NICK + USER
//! assert_eq!(hello.len(), 2);
//!
//! let welcome = Message::parse(":irc 001 WeatherBot :Welcome").unwrap();
//! assert_eq!(session.feed(&welcome), vec![SessionAction::Registered]);
//! assert_eq!(session.state(), &SessionState::JoiningChannels);
//! ```

mod machine;

pub use machine::Session;

use crate::command::Command;
use crate::message::ChatMessage;

/// Longest nickname the session will generate when falling back.
pub const MAX_NICK_LEN: usize = 30;

/// Lifecycle state of one connection attempt.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Not connected.
    #[default]
    Disconnected,
    /// Transport is being opened.
    Connecting,
    /// NICK/USER sent, waiting for the welcome numeric.
    Registering,
    /// Registered; join requests are being issued.
    JoiningChannels,
    /// Joined; answering keepalives and dispatching chat.
    Active,
    /// The attempt ended; the caller cools down and starts over.
    Faulted(FaultPhase),
}

/// Where in the lifecycle an attempt failed. Selects the cooldown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaultPhase {
    /// The transport could not be opened.
    Connect,
    /// The server refused or dropped us before the welcome numeric.
    Registration,
    /// The link failed after registration.
    Active,
}

impl std::fmt::Display for FaultPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Connect => "connect",
            Self::Registration => "registration",
            Self::Active => "active",
        })
    }
}

/// Identity and channel list for a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Preferred nickname.
    pub nickname: String,
    /// Real name / GECOS.
    pub realname: String,
    /// Channels to join, in order.
    pub channels: Vec<String>,
}

/// Work the caller must carry out after feeding a line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionAction {
    /// Write this command to the server.
    Send(Command),
    /// Registration finished; issue joins via [`Session::join_requests`].
    Registered,
    /// A chat message for a configured channel, ready for dispatch.
    Chat(ChatMessage),
    /// The server closed the link; the session is now faulted.
    Closed {
        /// Phase the session was in.
        phase: FaultPhase,
        /// Text the server gave.
        reason: String,
    },
}
