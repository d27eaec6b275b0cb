//! RFC 1459 case mapping for nicknames and channel names.
//!
//! Servers treat `#Help` and `#help` as the same channel, and `[`/`{`,
//! `]`/`}`, `\`/`|`, `~`/`^` as the same letter in a nickname. Channel and
//! nickname checks in this crate go through these helpers.

/// Lowercase a single character under RFC 1459 rules.
#[inline]
pub const fn irc_lower_char(c: char) -> char {
    match c {
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        '~' => '^',
        'A'..='Z' => (c as u8 + 32) as char,
        _ => c,
    }
}

/// Compare two names the way the server does.
pub fn irc_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.chars()
        .zip(b.chars())
        .all(|(ca, cb)| irc_lower_char(ca) == irc_lower_char(cb))
}

/// Find `name` in `names`, comparing case-insensitively.
pub fn irc_position<S: AsRef<str>>(names: &[S], name: &str) -> Option<usize> {
    names.iter().position(|n| irc_eq(n.as_ref(), name))
}
