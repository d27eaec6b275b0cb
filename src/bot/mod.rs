//! Bot commands recognized in channel messages.
//!
//! Only messages whose first word is a known command produce an
//! [`Invocation`]; ordinary conversation is ignored.

mod dispatch;

pub use dispatch::Dispatcher;
#[cfg(test)]
pub use dispatch::{HELP_TEXT, USAGE_TEXT};

use weatherbot_proto::ChatMessage;

/// Commands the bot answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    /// `!weather <place>`
    Weather,
    /// `!help`
    Help,
}

impl BotCommand {
    /// Match a command word, ASCII case-insensitively.
    pub fn from_word(word: &str) -> Option<Self> {
        if word.eq_ignore_ascii_case("!weather") {
            Some(Self::Weather)
        } else if word.eq_ignore_ascii_case("!help") {
            Some(Self::Help)
        } else {
            None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Weather => "weather",
            Self::Help => "help",
        }
    }
}

/// One recognized command in a channel message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: BotCommand,
    pub channel: String,
    pub sender: String,
    /// Remaining words joined with single spaces.
    pub args: String,
}

impl Invocation {
    /// Extract a command from a channel message, if it carries one.
    ///
    /// `!help` only counts on its own; `!help me` is conversation.
    pub fn parse(chat: &ChatMessage) -> Option<Self> {
        let mut words = chat.body.split_whitespace();
        let command = BotCommand::from_word(words.next()?)?;
        let args = words.collect::<Vec<_>>().join(" ");
        if command == BotCommand::Help && !args.is_empty() {
            return None;
        }
        Some(Self {
            command,
            channel: chat.target.clone(),
            sender: chat.sender.clone(),
            args,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat(body: &str) -> ChatMessage {
        ChatMessage {
            sender: "alice".to_string(),
            target: "#help".to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_weather_invocation() {
        let inv = Invocation::parse(&chat("!weather Paris")).unwrap();
        assert_eq!(
            inv,
            Invocation {
                command: BotCommand::Weather,
                channel: "#help".to_string(),
                sender: "alice".to_string(),
                args: "Paris".to_string(),
            }
        );
    }

    #[test]
    fn test_multi_word_args_rejoined() {
        let inv = Invocation::parse(&chat("  !weather   New   York  ")).unwrap();
        assert_eq!(inv.args, "New York");
    }

    #[test]
    fn test_empty_args() {
        let inv = Invocation::parse(&chat("!weather")).unwrap();
        assert_eq!(inv.command, BotCommand::Weather);
        assert!(inv.args.is_empty());
    }

    #[test]
    fn test_case_insensitive_command() {
        assert_eq!(
            Invocation::parse(&chat("!HELP")).map(|i| i.command),
            Some(BotCommand::Help)
        );
        assert_eq!(
            Invocation::parse(&chat("!Weather oslo")).map(|i| i.command),
            Some(BotCommand::Weather)
        );
    }

    #[test]
    fn test_bare_help_with_surrounding_space() {
        let inv = Invocation::parse(&chat("  !help  ")).unwrap();
        assert_eq!(inv.command, BotCommand::Help);
        assert!(inv.args.is_empty());
    }

    #[test]
    fn test_ordinary_conversation_ignored() {
        for body in [
            "",
            "   ",
            "hello there",
            "what is the !weather like",
            "!weatherman Paris",
            "weather Paris",
            "!forecast Paris",
            "!help me please",
        ] {
            assert!(Invocation::parse(&chat(body)).is_none(), "{body:?}");
        }
    }
}
