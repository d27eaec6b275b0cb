//! Integration test common infrastructure.
//!
//! Provides a scripted fake IRC server and a handle on a running
//! weatherbot process pointed at it.

pub mod bot;
pub mod server;

#[allow(unused_imports)]
pub use bot::TestBot;
#[allow(unused_imports)]
pub use server::{FakeIrcServer, ServerConnection};
