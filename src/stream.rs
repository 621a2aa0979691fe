/// Reader-driven validation: pulls fixed-size chunks from any `Read` and feeds
/// them to a `Utf8Validator` until EOF or the first malformed byte.

use crate::core::Utf8Validator;
use std::io::{self, Read};

pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamReport {
    /// Bytes pulled from the reader. May exceed `offset` when a chunk was rejected midway.
    pub bytes_read: u64,
    pub chunks: u64,
    /// No malformed sequence was seen.
    pub valid: bool,
    /// Input ended on a code point boundary.
    pub complete: bool,
    /// Bytes accepted; the offending byte's offset when `valid` is false.
    pub offset: u64,
}

impl StreamReport {
    /// Valid and not truncated mid-sequence.
    pub fn is_ok(&self) -> bool {
        self.valid && self.complete
    }
}

/// Validate everything `reader` yields, `chunk_size` bytes at a time.
pub fn validate_reader<R: Read>(reader: &mut R, chunk_size: usize) -> io::Result<StreamReport> {
    let mut buf = vec![0u8; chunk_size.max(1)];
    let mut validator = Utf8Validator::new();
    let mut bytes_read = 0u64;
    let mut chunks = 0u64;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        bytes_read += n as u64;
        chunks += 1;
        log::trace!("chunk {}: {} bytes", chunks, n);

        validator.feed(&buf[..n]);
        if !validator.is_valid() {
            log::debug!("malformed UTF-8 at byte {}", validator.total_index());
            break;
        }
    }

    Ok(StreamReport {
        bytes_read,
        chunks,
        valid: validator.is_valid(),
        complete: validator.ends_on_codepoint(),
        offset: validator.total_index() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Hands out at most `step` bytes per read, failing once with `Interrupted`.
    struct Trickle {
        data: Vec<u8>,
        pos: usize,
        step: usize,
        interrupted: bool,
    }

    impl Read for Trickle {
        fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::new(io::ErrorKind::Interrupted, "signal"));
            }
            let n = self.step.min(out.len()).min(self.data.len() - self.pos);
            out[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    #[test]
    fn test_valid_stream() {
        let text = "héllo wörld 中文 😀".repeat(100);
        let report = validate_reader(&mut Cursor::new(text.as_bytes()), 7).unwrap();
        assert!(report.is_ok());
        assert_eq!(report.offset, text.len() as u64);
        assert_eq!(report.bytes_read, text.len() as u64);
        assert_eq!(report.chunks, (text.len() as u64).div_ceil(7));
    }

    #[test]
    fn test_empty_stream() {
        let report = validate_reader(&mut Cursor::new(Vec::new()), 16).unwrap();
        assert!(report.is_ok());
        assert_eq!(report.chunks, 0);
        assert_eq!(report.offset, 0);
    }

    #[test]
    fn test_stops_at_first_error() {
        let mut data = b"0123456789".to_vec();
        data.push(0xff);
        data.extend_from_slice(&[b'x'; 100]);
        let report = validate_reader(&mut Cursor::new(data), 4).unwrap();
        assert!(!report.valid);
        assert!(!report.complete);
        assert_eq!(report.offset, 10);
        // 0..4, 4..8, 8..12; nothing read after the bad chunk
        assert_eq!(report.chunks, 3);
        assert_eq!(report.bytes_read, 12);
    }

    #[test]
    fn test_truncated_stream() {
        let report = validate_reader(&mut Cursor::new(vec![b'a', 0xe4, 0xb8]), 2).unwrap();
        assert!(report.valid);
        assert!(!report.complete);
        assert!(!report.is_ok());
        assert_eq!(report.offset, 3);
    }

    #[test]
    fn test_interrupted_and_short_reads() {
        let mut reader = Trickle {
            data: "😀😀😀".as_bytes().to_vec(),
            pos: 0,
            step: 1,
            interrupted: false,
        };
        let report = validate_reader(&mut reader, 1024).unwrap();
        assert!(report.is_ok());
        assert_eq!(report.chunks, 12);
    }

    #[test]
    fn test_zero_chunk_size_clamped() {
        let report = validate_reader(&mut Cursor::new(b"abc".to_vec()), 0).unwrap();
        assert!(report.is_ok());
        assert_eq!(report.chunks, 3);
    }

    #[test]
    fn test_io_error_propagates() {
        let err = validate_reader(&mut Broken, 16).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
    }
}
