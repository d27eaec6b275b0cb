//! # weatherbot-proto
//!
//! The IRC client half of the MansionNet weather bot: everything needed to
//! hold a channel seat on a server, and nothing about weather.
//!
//! ## Features
//!
//! - CRLF line framing as a tokio-util codec, tolerant of undecodable data
//! - Positional parsing of server lines into [`Message`] and [`Inbound`] events
//! - Outbound [`Command`] serialization that cannot inject extra lines
//! - A sans-IO [`Session`] state machine for registration, joins and keepalive
//! - TCP/TLS transport with optional certificate verification
//!
//! ## Quick Start
//!
//! ```rust
//! use weatherbot_proto::{Inbound, Message};
//!
//! let msg = Message::parse(":alice!u@h PRIVMSG #help :!weather Paris").unwrap();
//! match Inbound::classify(&msg) {
//!     Inbound::Privmsg(chat) => {
//!         assert_eq!(chat.sender, "alice");
//!         assert_eq!(chat.target, "#help");
//!         assert_eq!(chat.body, "!weather Paris");
//!     }
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod casemap;
pub mod colors;
pub mod command;
pub mod error;
#[cfg(feature = "tokio")]
pub mod line;
pub mod message;
pub mod state;
#[cfg(feature = "tokio")]
pub mod transport;

pub use self::casemap::{irc_eq, irc_lower_char};
pub use self::colors::FormattedStringExt;
pub use self::command::Command;
pub use self::error::ProtocolError;
#[cfg(feature = "tokio")]
pub use self::line::{LineCodec, MAX_LINE_LEN};
pub use self::message::{ChatMessage, Inbound, Message};
pub use self::state::{
    FaultPhase, Session, SessionAction, SessionConfig, SessionState, MAX_NICK_LEN,
};
#[cfg(feature = "tokio")]
pub use self::transport::{BotStream, Transport, TransportConfig, TransportError};
