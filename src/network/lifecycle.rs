//! Reconnect lifecycle.
//!
//! Connect, run until faulted, wait out the phase's cooldown, repeat. There
//! is no retry limit; the loop only ends with the process.

use std::sync::Arc;

use tracing::{Instrument, info, warn};
use weatherbot_proto::{Session, SessionConfig, Transport};

use super::run_connection;
use crate::bot::Dispatcher;
use crate::config::Config;
use crate::error::Fault;
use crate::telemetry::spans;

/// Owns everything that outlives a single connection attempt.
pub struct Lifecycle {
    config: Arc<Config>,
    session_config: Arc<SessionConfig>,
    dispatcher: Dispatcher,
}

impl Lifecycle {
    pub fn new(config: Arc<Config>, dispatcher: Dispatcher) -> Self {
        let session_config = config.session();
        Self {
            config,
            session_config,
            dispatcher,
        }
    }

    /// Run connection attempts forever.
    pub async fn run(&self) {
        let mut attempt: u64 = 0;
        loop {
            attempt += 1;
            let span = spans::connection(&self.config.server.host, attempt);
            async {
                let fault = self.attempt().await;
                let cooldown = fault.cooldown(&self.config.timing);
                warn!(
                    phase = %fault.phase,
                    error = %fault.cause,
                    code = fault.cause.error_code(),
                    cooldown_secs = cooldown.as_secs(),
                    "connection attempt ended, reconnecting after cooldown"
                );
                tokio::time::sleep(cooldown).await;
            }
            .instrument(span)
            .await;
        }
    }

    /// One full attempt with a fresh session. Always ends in a fault.
    pub async fn attempt(&self) -> Fault {
        let mut session = Session::new(Arc::clone(&self.session_config));
        session.begin_connect();

        let transport_config = self.config.transport();
        let mut transport = match Transport::open(&transport_config).await {
            Ok(transport) => transport,
            Err(e) => return Fault::new(session.fault(), e),
        };
        info!(addr = %transport_config.addr(), tls = transport_config.tls, "connected");

        let fault = run_connection(
            &mut transport,
            &mut session,
            &self.dispatcher,
            &self.config.timing,
        )
        .await;

        let discarded = transport.discarded();
        if discarded > 0 {
            warn!(discarded, "dropped undecodable input on this connection");
        }
        if let Err(e) = transport.close().await {
            tracing::debug!(error = %e, "error while closing transport");
        }
        fault
    }
}
