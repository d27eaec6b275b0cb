//! Classification of server lines into the events a channel member acts on.

use super::types::{Message, ERR_NICKNAMEINUSE, RPL_WELCOME};

/// A channel or private message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    /// Sender nickname; empty when the prefix does not carry one.
    pub sender: String,
    /// Channel or nickname the message was addressed to.
    pub target: String,
    /// Message body, verbatim.
    pub body: String,
}

/// What a parsed line means to the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inbound {
    /// Keepalive probe carrying the token to echo back.
    Ping(String),
    /// Registration accepted (001).
    Welcome,
    /// Requested nickname is taken (433).
    NicknameInUse,
    /// The server is closing the link.
    Closing(String),
    /// Chat delivery.
    Privmsg(ChatMessage),
    /// Someone (possibly us) joined a channel.
    Join {
        /// Nickname from the prefix, empty if absent.
        nick: String,
        /// Channel joined.
        channel: String,
    },
    /// Anything else; only its command word matters.
    Other,
}

impl Inbound {
    /// Classify a parsed line. Malformed variants fall back to [`Inbound::Other`].
    pub fn classify(msg: &Message) -> Inbound {
        // Keepalive takes priority over every other reading of the line.
        if msg.is_command("PING") {
            return match msg.arg(0) {
                Some(token) if !token.is_empty() => Inbound::Ping(token.to_string()),
                _ => Inbound::Other,
            };
        }

        if msg.is_command("ERROR") {
            let reason = msg
                .trailing
                .clone()
                .unwrap_or_else(|| msg.params.join(" "));
            return Inbound::Closing(reason);
        }

        if msg.is_command("PRIVMSG") {
            // Target is positional; without a trailing part the second
            // middle parameter is the whole body.
            return match (msg.param(0), msg.arg(1)) {
                (Some(target), Some(body)) => Inbound::Privmsg(ChatMessage {
                    sender: msg.source_nickname().unwrap_or_default().to_string(),
                    target: target.to_string(),
                    body: body.to_string(),
                }),
                _ => Inbound::Other,
            };
        }

        if msg.is_command("JOIN") {
            return match msg.arg(0) {
                Some(channel) if !channel.is_empty() => Inbound::Join {
                    nick: msg.source_nickname().unwrap_or_default().to_string(),
                    channel: channel.to_string(),
                },
                _ => Inbound::Other,
            };
        }

        match msg.numeric_code() {
            Some(RPL_WELCOME) => return Inbound::Welcome,
            Some(ERR_NICKNAMEINUSE) => return Inbound::NicknameInUse,
            _ => {}
        }

        // "Closing Link" outside ERROR still ends the link; notices only talk about it.
        if !msg.is_command("NOTICE") {
            if let Some(text) = msg.trailing.as_deref() {
                if text.starts_with("Closing Link") {
                    return Inbound::Closing(text.to_string());
                }
            }
        }

        Inbound::Other
    }
}
