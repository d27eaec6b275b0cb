//! Command execution.

use std::sync::Arc;

use tracing::Instrument;

use super::{BotCommand, Invocation};
use crate::telemetry::{CommandTimer, spans};
use crate::weather::WeatherLookup;

/// Reply to `!help`.
pub const HELP_TEXT: &str =
    "MansionNet Weather Bot | Commands: !weather <city> - Get weather information for a city";

/// Reply to `!weather` without a place.
pub const USAGE_TEXT: &str = "Usage: !weather <city>";

/// Turns invocations into reply text.
///
/// Cheap to clone; each spawned command task holds its own copy.
#[derive(Clone)]
pub struct Dispatcher {
    weather: Arc<dyn WeatherLookup>,
}

impl Dispatcher {
    pub fn new(weather: Arc<dyn WeatherLookup>) -> Self {
        Self { weather }
    }

    /// Execute a recognized command.
    pub async fn run(&self, invocation: &Invocation) -> String {
        let span = spans::command(
            invocation.command.name(),
            &invocation.sender,
            &invocation.channel,
        );
        async {
            let _timer = CommandTimer::new(invocation.command.name());
            match invocation.command {
                BotCommand::Help => HELP_TEXT.to_string(),
                BotCommand::Weather if invocation.args.is_empty() => USAGE_TEXT.to_string(),
                BotCommand::Weather => self.weather.lookup(&invocation.args).await,
            }
        }
        .instrument(span)
        .await
    }
}
