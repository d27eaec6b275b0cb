//! Transport error types.

use thiserror::Error;

use crate::error::ProtocolError;

/// Errors raised while opening or using the server connection.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// TCP connect failed.
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        /// `host:port` that was dialed.
        addr: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The host cannot be used as a TLS server name.
    #[error("invalid TLS server name: {0}")]
    ServerName(String),

    /// TLS client configuration could not be built.
    #[error("TLS configuration error: {0}")]
    TlsConfig(#[from] tokio_rustls::rustls::Error),

    /// TLS handshake failed.
    #[error("TLS handshake failed: {0}")]
    Handshake(#[source] std::io::Error),

    /// An I/O error on an established connection.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The codec reported an error.
    #[error("transport protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err =
            std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset");
        let err: TransportError = io_err.into();

        assert!(matches!(err, TransportError::Io(_)));
        assert_eq!(err.to_string(), "transport I/O error: connection reset");
    }

    #[test]
    fn test_connect_error_display_and_source() {
        let err = TransportError::Connect {
            addr: "irc.server.com:6697".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"),
        };
        assert_eq!(
            err.to_string(),
            "failed to connect to irc.server.com:6697: refused"
        );
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "refused");
    }

    #[test]
    fn test_protocol_error_conversion() {
        let inner = ProtocolError::Io(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "broken pipe",
        ));
        let err: TransportError = inner.into();
        assert!(err.to_string().contains("transport protocol error"));
        assert!(err.to_string().contains("broken pipe"));
    }
}
