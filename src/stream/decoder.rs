//! Incremental newline framing for raw input bytes.
//!
//! Bytes arrive in arbitrary chunks; a line may straddle any number of them. The
//! decoder buffers the unterminated tail between calls and splits complete lines
//! with `memchr`. Decoding is lossy: invalid UTF-8 becomes U+FFFD instead of an
//! error, so one malformed line never stops ingestion.

use bstr::ByteSlice;
use memchr::memchr;

/// Splits a byte stream into text lines on `\n`.
#[derive(Debug, Default)]
pub struct LineDecoder {
    /// Bytes of the current, not yet terminated line
    pending: Vec<u8>,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and hand every completed line to `emit`.
    ///
    /// Returns the number of lines emitted.
    pub fn feed<F>(&mut self, chunk: &[u8], mut emit: F) -> usize
    where
        F: FnMut(String),
    {
        let mut emitted = 0;
        let mut pos = 0;

        while let Some(offset) = memchr(b'\n', &chunk[pos..]) {
            let end = pos + offset;
            let line = if self.pending.is_empty() {
                decode_line(&chunk[pos..end])
            } else {
                self.pending.extend_from_slice(&chunk[pos..end]);
                let line = decode_line(&self.pending);
                self.pending.clear();
                line
            };
            emit(line);
            emitted += 1;
            pos = end + 1;
        }

        self.pending.extend_from_slice(&chunk[pos..]);
        emitted
    }

    /// Flush the final unterminated line at end-of-stream, if any.
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let line = decode_line(&self.pending);
        self.pending.clear();
        Some(line)
    }

    /// Bytes buffered for a line that has not seen its newline yet.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

/// Strip a CR left over from CRLF framing and decode lossily.
fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    bytes.to_str_lossy().into_owned()
}
