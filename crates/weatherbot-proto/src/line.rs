//! CRLF line codec for tokio.
//!
//! Turns the raw byte stream from the server into complete protocol lines
//! (terminator stripped) and writes [`Command`]s back out with a terminator.
//!
//! Reads may split a line anywhere, including between `\r` and `\n` or in
//! the middle of a multi-byte character; bytes stay in the read buffer until
//! their terminator arrives, and decoding happens per complete line.
//!
//! A line that is not valid UTF-8, or pending data that grows past
//! [`MAX_LINE_LEN`] without a terminator, is dropped and reading continues.
//! Once pending data is dropped, everything up to the next terminator goes
//! with it, so the tail of a dropped line never surfaces as a line of its own.
//! The connection is never failed over undecodable input.

use bytes::{Buf, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, warn};

use crate::command::Command;
use crate::error;

/// Maximum accepted line length in bytes, terminator excluded.
pub const MAX_LINE_LEN: usize = 8191;

const TERMINATOR: &[u8] = b"\r\n";

/// Line-based codec that splits on `\r\n`.
#[derive(Debug)]
pub struct LineCodec {
    /// Offset up to which the buffer has already been scanned.
    next_index: usize,
    /// Maximum line length.
    max_len: usize,
    /// Lines and partial buffers dropped so far.
    discarded: u64,
    /// Dropping bytes until the end of an oversized line.
    discarding: bool,
}

impl LineCodec {
    /// Create a codec with the default line limit.
    pub fn new() -> Self {
        Self::with_max_len(MAX_LINE_LEN)
    }

    /// Create a codec with a custom line limit.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
            discarded: 0,
            discarding: false,
        }
    }

    /// Number of lines or partial buffers dropped as undecodable.
    pub fn discarded(&self) -> u64 {
        self.discarded
    }

    fn find_terminator(&self, src: &BytesMut) -> Option<usize> {
        // The previous scan may have stopped right after a lone '\r'.
        let start = self.next_index.saturating_sub(1);
        src[start..]
            .windows(TERMINATOR.len())
            .position(|w| w == TERMINATOR)
            .map(|offset| start + offset)
    }

    /// Drop pending bytes, keeping a trailing '\r' that may pair with the next read.
    fn drop_pending(&mut self, src: &mut BytesMut) {
        let keep = usize::from(src.last() == Some(&b'\r'));
        src.advance(src.len() - keep);
        self.next_index = src.len();
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = error::ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        loop {
            let Some(end) = self.find_terminator(src) else {
                if self.discarding {
                    self.drop_pending(src);
                    return Ok(None);
                }
                // A full-length line may still be waiting for its '\n'.
                if src.len() > self.max_len + 1 {
                    warn!(
                        pending = src.len(),
                        limit = self.max_len,
                        "discarding oversized unterminated data"
                    );
                    self.drop_pending(src);
                    self.discarding = true;
                    self.discarded += 1;
                    return Ok(None);
                }
                self.next_index = src.len();
                return Ok(None);
            };

            let frame = src.split_to(end + TERMINATOR.len());
            self.next_index = 0;
            if self.discarding {
                // Rest of a line already counted as dropped.
                self.discarding = false;
                continue;
            }
            let body = &frame[..end];

            if body.len() > self.max_len {
                warn!(len = body.len(), limit = self.max_len, "discarding oversized line");
                self.discarded += 1;
                continue;
            }

            match std::str::from_utf8(body) {
                Ok(line) => return Ok(Some(line.to_owned())),
                Err(e) => {
                    debug!(
                        len = body.len(),
                        valid_up_to = e.valid_up_to(),
                        "discarding undecodable line"
                    );
                    self.discarded += 1;
                }
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        if let Some(line) = self.decode(src)? {
            return Ok(Some(line));
        }
        if !src.is_empty() {
            debug!(bytes = src.len(), "dropping unterminated data at end of stream");
            src.clear();
        }
        self.next_index = 0;
        self.discarding = false;
        Ok(None)
    }
}

impl Encoder<Command> for LineCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, cmd: Command, dst: &mut BytesMut) -> error::Result<()> {
        let line = cmd.to_string();
        dst.reserve(line.len() + TERMINATOR.len());
        dst.extend_from_slice(line.as_bytes());
        dst.extend_from_slice(TERMINATOR);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn drain(codec: &mut LineCodec, buf: &mut BytesMut) -> Vec<String> {
        let mut out = Vec::new();
        while let Some(line) = codec.decode(buf).unwrap() {
            out.push(line);
        }
        out
    }

    fn feed_chunks(chunks: &[&[u8]]) -> Vec<String> {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::new();
        let mut out = Vec::new();
        for chunk in chunks {
            buf.extend_from_slice(chunk);
            out.extend(drain(&mut codec, &mut buf));
        }
        out
    }

    #[test]
    fn test_decode_complete_line() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("PING :irc.server.com\r\n");

        let result = codec.decode(&mut buf).unwrap();
        assert_eq!(result, Some("PING :irc.server.com".to_string()));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_partial_line_is_retained() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("PING :abc\r\nPRIVMSG #help :hal");

        assert_eq!(codec.decode(&mut buf).unwrap(), Some("PING :abc".into()));
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        assert_eq!(&buf[..], b"PRIVMSG #help :hal");
    }

    #[test]
    fn test_terminator_split_across_reads() {
        let lines = feed_chunks(&[b"PING :one\r", b"\nPING :two", b"\r", b"\n"]);
        assert_eq!(lines, vec!["PING :one", "PING :two"]);
    }

    #[test]
    fn test_bare_lf_is_not_a_terminator() {
        let lines = feed_chunks(&[b"NOTICE * :a\nb\r\n"]);
        assert_eq!(lines, vec!["NOTICE * :a\nb"]);
    }

    #[test]
    fn test_multibyte_char_split_across_reads() {
        let text = "PRIVMSG #help :!weather Zürich\r\n".as_bytes();
        let split = text.iter().position(|&b| b == 0xC3).unwrap() + 1;
        let lines = feed_chunks(&[&text[..split], &text[split..]]);
        assert_eq!(lines, vec!["PRIVMSG #help :!weather Zürich"]);
    }

    #[test]
    fn test_invalid_utf8_line_is_discarded() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::new();
        buf.extend_from_slice(b"PRIVMSG #help :\xFF\xFE\r\nPING :still-here\r\n");

        assert_eq!(
            codec.decode(&mut buf).unwrap(),
            Some("PING :still-here".to_string())
        );
        assert_eq!(codec.discarded(), 1);
    }

    #[test]
    fn test_oversized_pending_data_is_discarded() {
        let mut codec = LineCodec::with_max_len(10);
        let mut buf = BytesMut::from("this is way too long");

        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        assert!(buf.is_empty());
        assert_eq!(codec.discarded(), 1);

        buf.extend_from_slice(b" still going\r\nPING :ok\r\n");
        assert_eq!(codec.decode(&mut buf).unwrap(), Some("PING :ok".into()));
        assert_eq!(codec.discarded(), 1);
    }

    #[test]
    fn test_tail_of_oversized_line_is_not_emitted() {
        let mut codec = LineCodec::with_max_len(10);
        let mut buf = BytesMut::from("XXXXXXXXXXXXXXXX");
        assert_eq!(codec.decode(&mut buf).unwrap(), None);

        buf.extend_from_slice(b"PING :evil\r\n");
        assert_eq!(codec.decode(&mut buf).unwrap(), None);

        buf.extend_from_slice(b"PING :good\r\n");
        assert_eq!(codec.decode(&mut buf).unwrap(), Some("PING :good".into()));
    }

    #[test]
    fn test_oversized_line_ending_split_inside_terminator() {
        let lines = {
            let mut codec = LineCodec::with_max_len(8);
            let mut buf = BytesMut::new();
            let mut out = Vec::new();
            for chunk in [&b"ERROR :Closing\r"[..], b"\nPING :a\r\n"] {
                buf.extend_from_slice(chunk);
                out.extend(drain(&mut codec, &mut buf));
            }
            out
        };
        assert_eq!(lines, vec!["PING :a"]);
    }

    #[test]
    fn test_full_length_line_split_before_lf() {
        let mut codec = LineCodec::with_max_len(8);
        let mut buf = BytesMut::from("PING :ab\r");
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        assert_eq!(codec.discarded(), 0);

        buf.extend_from_slice(b"\n");
        assert_eq!(codec.decode(&mut buf).unwrap(), Some("PING :ab".into()));
    }

    #[test]
    fn test_empty_line_is_emitted() {
        let lines = feed_chunks(&[b"\r\nPING :x\r\n"]);
        assert_eq!(lines, vec!["", "PING :x"]);
    }

    #[test]
    fn test_decode_eof_drops_unterminated_tail() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("PING :a\r\nPING :incompl");

        assert_eq!(codec.decode_eof(&mut buf).unwrap(), Some("PING :a".into()));
        assert_eq!(codec.decode_eof(&mut buf).unwrap(), None);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_encode_appends_crlf() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::new();

        codec
            .encode(Command::Pong("irc.server.com".into()), &mut buf)
            .unwrap();
        assert_eq!(&buf[..], b"PONG irc.server.com\r\n");
    }

    proptest! {
        #[test]
        fn prop_chunking_never_changes_lines(
            lines in prop::collection::vec("[^\r\n]{0,40}", 0..20),
            cuts in prop::collection::vec(any::<prop::sample::Index>(), 0..12),
        ) {
            let wire: Vec<u8> = lines
                .iter()
                .flat_map(|l| l.bytes().chain(TERMINATOR.iter().copied()))
                .collect();

            let mut points: Vec<usize> = cuts.iter().map(|i| i.index(wire.len() + 1)).collect();
            points.push(0);
            points.push(wire.len());
            points.sort_unstable();
            points.dedup();

            let chunks: Vec<&[u8]> = points.windows(2).map(|w| &wire[w[0]..w[1]]).collect();
            prop_assert_eq!(feed_chunks(&chunks), lines);
        }
    }
}
