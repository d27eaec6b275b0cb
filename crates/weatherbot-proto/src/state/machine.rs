//! Session state machine core implementation.

use std::sync::Arc;

use crate::casemap::{irc_eq, irc_position};
use crate::command::Command;
use crate::message::{Inbound, Message};

use super::{FaultPhase, SessionAction, SessionConfig, SessionState, MAX_NICK_LEN};

/// Protocol state for one connection attempt.
#[derive(Clone, Debug)]
pub struct Session {
    config: Arc<SessionConfig>,
    state: SessionState,
    /// Nickname currently requested or accepted by the server.
    nickname: String,
    /// Configured channels the server has confirmed, in confirmation order.
    joined: Vec<String>,
    /// Nickname collisions seen during registration.
    collisions: u32,
}

impl Session {
    /// Create a disconnected session.
    #[must_use]
    pub fn new(config: Arc<SessionConfig>) -> Self {
        let nickname = config.nickname.clone();
        Self {
            config,
            state: SessionState::Disconnected,
            nickname,
            joined: Vec::new(),
            collisions: 0,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Nickname in use on this connection.
    #[must_use]
    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    /// Channels confirmed joined on this connection.
    #[must_use]
    pub fn joined_channels(&self) -> &[String] {
        &self.joined
    }

    /// Whether `channel` is one of the configured channels.
    #[must_use]
    pub fn is_configured_channel(&self, channel: &str) -> bool {
        irc_position(&self.config.channels, channel).is_some()
    }

    /// Disconnected -> Connecting.
    pub fn begin_connect(&mut self) {
        self.state = SessionState::Connecting;
    }

    /// Connecting -> Registering. Returns the registration commands.
    #[must_use]
    pub fn connected(&mut self) -> Vec<Command> {
        self.state = SessionState::Registering;
        vec![
            Command::Nick(self.nickname.clone()),
            Command::User {
                username: self.config.nickname.clone(),
                realname: self.config.realname.clone(),
            },
        ]
    }

    /// Feed one parsed line. Returns the actions to carry out, in order.
    #[must_use]
    pub fn feed(&mut self, msg: &Message) -> Vec<SessionAction> {
        match Inbound::classify(msg) {
            // Answered in every state; servers probe before registration completes.
            Inbound::Ping(token) => vec![SessionAction::Send(Command::Pong(token))],
            Inbound::Closing(reason) => {
                let phase = self.fault();
                vec![SessionAction::Closed { phase, reason }]
            }
            Inbound::Welcome if self.state == SessionState::Registering => {
                if let Some(nick) = msg.param(0).filter(|n| !n.is_empty() && *n != "*") {
                    self.nickname = nick.to_string();
                }
                self.state = SessionState::JoiningChannels;
                vec![SessionAction::Registered]
            }
            Inbound::NicknameInUse if self.state == SessionState::Registering => {
                self.collisions += 1;
                self.nickname = alternate_nick(&self.nickname, self.collisions);
                vec![SessionAction::Send(Command::Nick(self.nickname.clone()))]
            }
            Inbound::Join { nick, channel } if self.is_registered() => {
                if irc_eq(&nick, &self.nickname) {
                    self.record_join(&channel);
                }
                vec![]
            }
            Inbound::Privmsg(chat)
                if self.state == SessionState::Active && self.is_configured_channel(&chat.target) =>
            {
                vec![SessionAction::Chat(chat)]
            }
            _ => vec![],
        }
    }

    /// Join requests for every configured channel, in configured order.
    ///
    /// Empty unless registration has just completed.
    #[must_use]
    pub fn join_requests(&self) -> Vec<Command> {
        if self.state != SessionState::JoiningChannels {
            return Vec::new();
        }
        self.config
            .channels
            .iter()
            .map(|c| Command::Join(c.clone()))
            .collect()
    }

    /// JoiningChannels -> Active, once every join has been issued.
    pub fn activate(&mut self) {
        if self.state == SessionState::JoiningChannels {
            self.state = SessionState::Active;
        }
    }

    /// Phase a fault would be attributed to right now.
    #[must_use]
    pub fn phase(&self) -> FaultPhase {
        match self.state {
            SessionState::Disconnected | SessionState::Connecting => FaultPhase::Connect,
            SessionState::Registering => FaultPhase::Registration,
            SessionState::JoiningChannels | SessionState::Active => FaultPhase::Active,
            SessionState::Faulted(phase) => phase,
        }
    }

    /// Any state -> Faulted. Returns the phase the fault belongs to.
    pub fn fault(&mut self) -> FaultPhase {
        let phase = self.phase();
        self.state = SessionState::Faulted(phase);
        phase
    }

    fn is_registered(&self) -> bool {
        matches!(
            self.state,
            SessionState::JoiningChannels | SessionState::Active
        )
    }

    fn record_join(&mut self, channel: &str) {
        let Some(index) = irc_position(&self.config.channels, channel) else {
            return;
        };
        let configured = &self.config.channels[index];
        if irc_position(&self.joined, configured).is_none() {
            self.joined.push(configured.clone());
        }
    }
}

/// Next nickname to try after the `attempt`th collision.
///
/// Appends `_` while there is room. A full-length name instead ends in the
/// attempt number, so every retry asks for a name not tried before.
fn alternate_nick(current: &str, attempt: u32) -> String {
    if current.chars().count() < MAX_NICK_LEN {
        let mut nick = current.to_string();
        nick.push('_');
        return nick;
    }
    let suffix = attempt.to_string();
    let mut nick: String = current
        .chars()
        .take(MAX_NICK_LEN.saturating_sub(suffix.len()))
        .collect();
    nick.push_str(&suffix);
    nick
}
