//! Scripted fake IRC server.
//!
//! Accepts plaintext connections from the bot and lets a test read and
//! write raw protocol lines.

use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpListener;
use tokio::time::timeout;

/// How long any single wait may take before the test fails.
const WAIT: Duration = Duration::from_secs(10);

/// A listener the bot connects to.
pub struct FakeIrcServer {
    listener: TcpListener,
    port: u16,
}

impl FakeIrcServer {
    /// Bind to an ephemeral localhost port.
    pub async fn bind() -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();
        Ok(Self { listener, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Wait for the bot's next connection attempt.
    pub async fn accept(&self) -> anyhow::Result<ServerConnection> {
        let (socket, _) = timeout(WAIT, self.listener.accept()).await??;
        let (read, write) = socket.into_split();
        Ok(ServerConnection {
            lines: BufReader::new(read).lines(),
            write,
        })
    }
}

/// One accepted bot connection.
pub struct ServerConnection {
    lines: Lines<BufReader<OwnedReadHalf>>,
    write: OwnedWriteHalf,
}

impl ServerConnection {
    /// Next line from the bot, without the CRLF.
    pub async fn recv(&mut self) -> anyhow::Result<String> {
        match timeout(WAIT, self.lines.next_line()).await?? {
            Some(line) => Ok(line),
            None => anyhow::bail!("bot closed the connection"),
        }
    }

    /// Read the next line and assert it equals `expected`.
    pub async fn expect(&mut self, expected: &str) {
        let line = self
            .recv()
            .await
            .unwrap_or_else(|e| panic!("waiting for {expected:?}: {e}"));
        assert_eq!(line, expected);
    }

    /// Send one line, appending CRLF.
    pub async fn send(&mut self, line: &str) -> anyhow::Result<()> {
        self.write.write_all(format!("{line}\r\n").as_bytes()).await?;
        Ok(())
    }

    /// Walk the bot through NICK/USER, welcome and its JOINs.
    pub async fn register(&mut self, nick: &str, channels: &[&str]) -> anyhow::Result<()> {
        self.expect(&format!("NICK {nick}")).await;
        let user = self.recv().await?;
        assert!(user.starts_with(&format!("USER {nick} 0 * :")), "{user}");
        self.send(&format!(":irc.test 001 {nick} :Welcome to the test network"))
            .await?;
        for channel in channels {
            self.expect(&format!("JOIN {channel}")).await;
        }
        Ok(())
    }
}
