//! Connection to the IRC server.
//!
//! [`Transport`] frames any async byte stream with [`LineCodec`]. Use
//! [`Transport::open`] to dial a real server, or [`Transport::new`] over an
//! in-memory stream in tests.
//!
//! [`LineCodec`]: crate::LineCodec

mod error;
mod stream;
pub mod tls;

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio_util::codec::Framed;
use tracing::{debug, warn};

use crate::command::Command;
use crate::line::LineCodec;

pub use error::TransportError;
pub use stream::BotStream;

/// Where and how to connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Server host name or address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Wrap the connection in TLS.
    pub tls: bool,
    /// Verify the server certificate against the system roots.
    pub verify_cert: bool,
}

impl TransportConfig {
    /// `host:port` as dialed.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Dial the server and perform the TLS handshake if configured.
pub async fn connect(config: &TransportConfig) -> Result<BotStream, TransportError> {
    let tcp = TcpStream::connect((config.host.as_str(), config.port))
        .await
        .map_err(|source| TransportError::Connect {
            addr: config.addr(),
            source,
        })?;

    if let Err(e) = enable_keepalive(&tcp) {
        warn!("failed to enable TCP keepalive: {}", e);
    }

    if !config.tls {
        return Ok(BotStream::Plain(tcp));
    }

    let connector = tls::connector(config.verify_cert)?;
    let server_name = tls::server_name(&config.host)?;
    let stream = connector
        .connect(server_name, tcp)
        .await
        .map_err(TransportError::Handshake)?;

    Ok(BotStream::Tls(Box::new(stream)))
}

fn enable_keepalive(stream: &TcpStream) -> std::io::Result<()> {
    use socket2::{SockRef, TcpKeepalive};

    let sock = SockRef::from(stream);
    let keepalive = TcpKeepalive::new()
        .with_time(Duration::from_secs(120))
        .with_interval(Duration::from_secs(30));

    sock.set_tcp_keepalive(&keepalive)
}

/// Line-framed connection to the server.
pub struct Transport<S = BotStream> {
    framed: Framed<S, LineCodec>,
}

impl Transport<BotStream> {
    /// Connect to the configured server.
    pub async fn open(config: &TransportConfig) -> Result<Self, TransportError> {
        let stream = connect(config).await?;
        debug!(addr = %config.addr(), tls = stream.is_tls(), "connected");
        Ok(Self::new(stream))
    }
}

impl<S> Transport<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Frame an already connected stream.
    pub fn new(stream: S) -> Self {
        Self {
            framed: Framed::new(stream, LineCodec::new()),
        }
    }

    /// Write one command and flush it.
    pub async fn send(&mut self, command: Command) -> Result<(), TransportError> {
        debug!(">> {}", command);
        self.framed.send(command).await?;
        Ok(())
    }

    /// Next complete line from the server, or `None` once the peer has
    /// closed the connection.
    pub async fn recv_line(&mut self) -> Option<Result<String, TransportError>> {
        match self.framed.next().await? {
            Ok(line) => {
                debug!("<< {}", line);
                Some(Ok(line))
            }
            Err(e) => Some(Err(e.into())),
        }
    }

    /// Lines dropped so far because they were oversized or not UTF-8.
    pub fn discarded(&self) -> u64 {
        self.framed.codec().discarded()
    }

    /// Flush pending output and shut the stream down.
    pub async fn close(&mut self) -> Result<(), TransportError> {
        SinkExt::<Command>::close(&mut self.framed).await?;
        Ok(())
    }
}

impl<S> std::fmt::Debug for Transport<S>
where
    S: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("stream", self.framed.get_ref())
            .finish()
    }
}
