//! Error types for the protocol crate.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Errors surfaced by the line codec.
///
/// Undecodable or oversized input is not an error: the codec drops it and
/// keeps reading. Only the underlying stream can fail a read.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display_and_source() {
        let err: ProtocolError =
            std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer").into();
        assert_eq!(err.to_string(), "io error: reset by peer");
        assert!(std::error::Error::source(&err).is_some());
    }
}
