//! Outbound commands and their wire form.
//!
//! Only what a channel member needs: registration, joins, keepalive answers
//! and channel messages.

use std::fmt::{self, Write};

/// A command the bot sends to the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `NICK <nickname>`
    Nick(String),
    /// `USER <username> 0 * :<realname>`
    User {
        /// Username (ident).
        username: String,
        /// Real name / GECOS.
        realname: String,
    },
    /// `JOIN <channel>`
    Join(String),
    /// `PONG <token>`
    Pong(String),
    /// `PRIVMSG <target> :<text>`
    Privmsg {
        /// Channel or nickname.
        target: String,
        /// Message body.
        text: String,
    },
}

impl Command {
    /// Build a channel message.
    pub fn privmsg(target: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Privmsg {
            target: target.into(),
            text: text.into(),
        }
    }

    /// The command word as it appears on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nick(_) => "NICK",
            Self::User { .. } => "USER",
            Self::Join(_) => "JOIN",
            Self::Pong(_) => "PONG",
            Self::Privmsg { .. } => "PRIVMSG",
        }
    }
}

/// Characters that would end or corrupt a line.
fn is_line_breaking(c: char) -> bool {
    matches!(c, '\r' | '\n' | '\0')
}

fn needs_colon_prefix(param: &str) -> bool {
    param.is_empty() || param.starts_with(':') || param.contains(' ')
}

/// Write a middle parameter; spaces and line breaks cannot appear in one.
fn write_middle(f: &mut fmt::Formatter<'_>, param: &str) -> fmt::Result {
    f.write_char(' ')?;
    for c in param.chars() {
        if !is_line_breaking(c) && c != ' ' {
            f.write_char(c)?;
        }
    }
    Ok(())
}

/// Write a final parameter, always in trailing form.
fn write_trailing(f: &mut fmt::Formatter<'_>, param: &str) -> fmt::Result {
    f.write_str(" :")?;
    for c in param.chars() {
        f.write_char(if is_line_breaking(c) { ' ' } else { c })?;
    }
    Ok(())
}

/// Write a final parameter, using trailing form only when it has to.
fn write_last(f: &mut fmt::Formatter<'_>, param: &str) -> fmt::Result {
    if needs_colon_prefix(param) {
        write_trailing(f, param)
    } else {
        write_middle(f, param)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        match self {
            Command::Nick(nick) => write_middle(f, nick),
            Command::User { username, realname } => {
                write_middle(f, username)?;
                f.write_str(" 0 *")?;
                write_trailing(f, realname)
            }
            Command::Join(channel) => write_middle(f, channel),
            Command::Pong(token) => write_last(f, token),
            Command::Privmsg { target, text } => {
                write_middle(f, target)?;
                write_trailing(f, text)
            }
        }
    }
}
