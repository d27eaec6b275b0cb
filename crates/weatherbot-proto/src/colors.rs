//! IRC formatting codes.
//!
//! The bot colors its replies; its logs should not. This module holds the
//! control characters used to build formatted text and a stripper that
//! removes them again.
//!
//! # IRC Format Codes
//! - 0x02 (^B): Bold
//! - 0x03 (^C): Color (followed by optional foreground,background)
//! - 0x0F (^O): Reset all formatting
//! - 0x16 (^V): Reverse/Inverse
//! - 0x1F (^_): Underline

use std::borrow::Cow;

/// Bold toggle.
pub const BOLD: char = '\x02';
/// Color introducer.
pub const COLOR: char = '\x03';
/// Reset all formatting.
pub const RESET: char = '\x0F';

const FORMAT_CHARS: &[char] = &[
    '\x02', // Bold
    '\x03', // Color
    '\x0F', // Reset
    '\x16', // Reverse
    '\x1F', // Underline
];

/// mIRC palette entries used by the bot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    /// 01
    Black = 1,
    /// 07
    Orange = 7,
}

/// Build a color prefix such as `\x0307,01`.
pub fn color_code(fg: Color, bg: Color) -> String {
    format!("{COLOR}{:02},{:02}", fg as u8, bg as u8)
}

/// Extension trait for handling formatted IRC strings.
pub trait FormattedStringExt<'a> {
    /// Check if the string contains any IRC formatting codes.
    fn is_formatted(&self) -> bool;

    /// Strip all IRC formatting codes from the string.
    ///
    /// Returns `Cow::Borrowed` if no formatting was present.
    fn strip_formatting(self) -> Cow<'a, str>;
}

impl<'a> FormattedStringExt<'a> for &'a str {
    fn is_formatted(&self) -> bool {
        self.contains(FORMAT_CHARS)
    }

    fn strip_formatting(self) -> Cow<'a, str> {
        if !self.is_formatted() {
            return Cow::Borrowed(self);
        }
        Cow::Owned(strip(self))
    }
}

impl FormattedStringExt<'static> for String {
    fn is_formatted(&self) -> bool {
        self.as_str().is_formatted()
    }

    fn strip_formatting(self) -> Cow<'static, str> {
        if !self.is_formatted() {
            return Cow::Owned(self);
        }
        Cow::Owned(strip(&self))
    }
}

fn strip(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == COLOR {
            // ^C [fg[fg]] [,bg[bg]]; the comma only belongs to the code when a digit follows.
            if take_digits(&mut chars) > 0 {
                let mut ahead = chars.clone();
                if ahead.next() == Some(',') && ahead.peek().is_some_and(char::is_ascii_digit) {
                    chars.next();
                    take_digits(&mut chars);
                }
            }
            continue;
        }
        if !FORMAT_CHARS.contains(&c) {
            out.push(c);
        }
    }

    out
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> usize {
    let mut taken = 0;
    while taken < 2 && chars.peek().is_some_and(char::is_ascii_digit) {
        chars.next();
        taken += 1;
    }
    taken
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_code() {
        assert_eq!(color_code(Color::Orange, Color::Black), "\x0307,01");
    }

    #[test]
    fn test_is_formatted() {
        assert!("\x02bold\x02".is_formatted());
        assert!("\x034red\x03".is_formatted());
        assert!(!"plain text".is_formatted());
    }

    #[test]
    fn test_strip_basic() {
        assert_eq!("\x02bold\x02".strip_formatting(), "bold");
        assert_eq!("\x1Funderline\x0F".strip_formatting(), "underline");
    }

    #[test]
    fn test_strip_colors() {
        assert_eq!("\x034red".strip_formatting(), "red");
        assert_eq!("\x0304red".strip_formatting(), "red");
        assert_eq!("\x0307,01Paris, FR\x0F".strip_formatting(), "Paris, FR");
        assert_eq!("\x03,5comma".strip_formatting(), ",5comma");
        assert_eq!("\x034,x".strip_formatting(), ",x");
    }

    #[test]
    fn test_strip_report_line() {
        let line = "\x0307,01\x02Paris, France\x0F \x0307,01【Clear sky】 ▸ 21.5°C\x0F";
        assert_eq!(
            line.strip_formatting(),
            "Paris, France 【Clear sky】 ▸ 21.5°C"
        );
    }

    #[test]
    fn test_no_formatting_borrows() {
        match "plain text".strip_formatting() {
            Cow::Borrowed(b) => assert_eq!(b, "plain text"),
            Cow::Owned(_) => panic!("expected borrowed"),
        }
    }
}
