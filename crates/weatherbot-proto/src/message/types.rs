//! Owned message representation.

/// Numeric sent once registration has succeeded.
pub const RPL_WELCOME: u16 = 1;
/// Numeric sent when the requested nickname is taken.
pub const ERR_NICKNAMEINUSE: u16 = 433;

/// One server line, split positionally.
///
/// `:prefix COMMAND middle1 middle2 :trailing text`
///
/// The trailing parameter is kept verbatim, spaces and colons included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// Source without the leading `:` (`nick!user@host` or a server name).
    pub prefix: Option<String>,
    /// Command word or three-digit numeric, as received.
    pub command: String,
    /// Space-separated parameters before the trailing one.
    pub params: Vec<String>,
    /// Free text after ` :`, if any.
    pub trailing: Option<String>,
}

impl Message {
    /// Nickname part of a `nick!user@host` prefix.
    ///
    /// Returns `None` when there is no prefix or it has no `!`
    /// (a server name, for instance).
    pub fn source_nickname(&self) -> Option<&str> {
        self.prefix
            .as_deref()
            .and_then(|p| p.split_once('!'))
            .map(|(nick, _)| nick)
    }

    /// Whether the command word matches `name`, ignoring ASCII case.
    pub fn is_command(&self, name: &str) -> bool {
        self.command.eq_ignore_ascii_case(name)
    }

    /// The numeric value of a three-digit reply.
    pub fn numeric_code(&self) -> Option<u16> {
        if self.command.len() == 3 && self.command.bytes().all(|b| b.is_ascii_digit()) {
            self.command.parse().ok()
        } else {
            None
        }
    }

    /// Positional middle parameter.
    pub fn param(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }

    /// Middle parameter at `index`, or the trailing text when the middle
    /// parameters run out exactly there.
    pub fn arg(&self, index: usize) -> Option<&str> {
        match self.params.get(index) {
            Some(p) => Some(p),
            None if index == self.params.len() => self.trailing.as_deref(),
            None => None,
        }
    }
}
