//! IRC message types and parsing.

mod inbound;
mod parse;
mod types;

pub use self::inbound::{ChatMessage, Inbound};
pub use self::types::{Message, ERR_NICKNAMEINUSE, RPL_WELCOME};
