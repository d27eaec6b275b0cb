//! Positional line tokenizer.
//!
//! Fields are taken by position, never by searching for keywords, so a chat
//! body that happens to contain `PING` or `PRIVMSG` is just text.

use super::types::Message;

/// Split off the next space-delimited token, skipping leading spaces.
fn next_token(s: &str) -> (&str, &str) {
    let s = s.trim_start_matches(' ');
    match s.find(' ') {
        Some(i) => (&s[..i], &s[i..]),
        None => (s, ""),
    }
}

impl Message {
    /// Parse one line with its terminator already removed.
    ///
    /// Returns `None` for lines without a command word (empty lines, a
    /// lone prefix). Never panics on malformed input.
    pub fn parse(line: &str) -> Option<Message> {
        let mut rest = line.trim_end_matches(['\r', '\n']).trim_start_matches(' ');

        // IRCv3 tags are never requested, but skip them if a server sends some.
        if rest.starts_with('@') {
            rest = next_token(rest).1;
        }

        let mut prefix = None;
        if let Some(stripped) = rest.trim_start_matches(' ').strip_prefix(':') {
            // The prefix must follow the colon directly.
            let end = stripped.find(' ').unwrap_or(stripped.len());
            if end == 0 {
                return None;
            }
            prefix = Some(stripped[..end].to_string());
            rest = &stripped[end..];
        }

        let (command, mut rest) = next_token(rest);
        if command.is_empty() || command.starts_with(':') {
            return None;
        }

        let mut params = Vec::new();
        let mut trailing = None;
        loop {
            let remaining = rest.trim_start_matches(' ');
            if remaining.is_empty() {
                break;
            }
            if let Some(text) = remaining.strip_prefix(':') {
                trailing = Some(text.to_string());
                break;
            }
            let (param, after) = next_token(remaining);
            params.push(param.to_string());
            rest = after;
        }

        Some(Message {
            prefix,
            command: command.to_string(),
            params,
            trailing,
        })
    }
}
