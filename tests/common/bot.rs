//! Test bot process management.
//!
//! Spawns the weatherbot binary with a temporary configuration and kills it
//! when dropped.

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use tempfile::TempDir;

/// A running weatherbot instance.
pub struct TestBot {
    child: Child,
    _dir: TempDir,
}

impl TestBot {
    /// Spawn a bot connecting to `127.0.0.1:port` over plaintext.
    ///
    /// `weather_port` should be a closed port; lookups then fail fast.
    pub fn spawn(port: u16, weather_port: u16) -> anyhow::Result<Self> {
        let config = format!(
            r##"
channels = ["#help", "#welcome"]

[server]
host = "127.0.0.1"
port = {port}
tls = false

[identity]
nickname = "WeatherBot"
realname = "MansionNet Weather Information Bot"

[timing]
connect_cooldown_secs = 1
registration_cooldown_secs = 1
active_cooldown_secs = 1
join_delay_ms = 10

[weather]
geocoding_url = "http://127.0.0.1:{weather_port}/v1/search"
forecast_url = "http://127.0.0.1:{weather_port}/v1/forecast"
timeout_secs = 2
"##
        );
        Self::spawn_with_config(&config)
    }

    /// Spawn the bot with the given TOML configuration.
    pub fn spawn_with_config(config: &str) -> anyhow::Result<Self> {
        let dir = tempfile::tempdir()?;
        let config_path = dir.path().join("weatherbot.toml");
        std::fs::write(&config_path, config)?;

        let child = Command::new(binary_path())
            .arg(&config_path)
            .env("RUST_LOG", "debug")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        Ok(Self { child, _dir: dir })
    }
}

impl Drop for TestBot {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Path to the compiled weatherbot binary.
pub fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_weatherbot"))
}

/// A localhost port with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    listener.local_addr().expect("local addr").port()
}
