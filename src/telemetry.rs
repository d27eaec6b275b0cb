//! Telemetry utilities for command timing and span construction.

use std::time::Instant;

/// Guard for timing command execution.
///
/// Logs command latency when dropped.
pub struct CommandTimer {
    command: &'static str,
    start: Instant,
}

impl CommandTimer {
    /// Start timing a command.
    pub fn new(command: &'static str) -> Self {
        Self {
            command,
            start: Instant::now(),
        }
    }
}

impl Drop for CommandTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_millis() as u64;
        tracing::debug!(command = self.command, elapsed_ms, "command finished");
    }
}

/// Standardized span constructors.
pub mod spans {
    use tracing::{Span, info_span};

    /// Create a span for one connection attempt.
    pub fn connection(host: &str, attempt: u64) -> Span {
        info_span!("connection", host = %host, attempt)
    }

    /// Create a span for a bot command execution.
    pub fn command(name: &str, sender: &str, channel: &str) -> Span {
        info_span!("command", name = %name, sender = %sender, channel = %channel)
    }
}
