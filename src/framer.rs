//! Incremental framing of the device's record stream.
//!
//! The transport delivers text in arbitrary chunks with no relation to record
//! boundaries. [`locate_frame`] scans a working buffer for the next complete
//! JSON-object candidate; [`FrameBuffer`] owns such a buffer and hands out
//! candidates in arrival order, keeping any trailing partial record for the
//! next chunk.
//!
//! Firmware terminates each record with `}` followed by a newline, so that
//! two-byte pattern is the cheap end-of-record check. A record's nested
//! content can itself contain `}\n` (pretty-printed sections), so a fast-path
//! match is only trusted when the candidate's braces balance exactly at the
//! matched `}`; otherwise a string-aware depth scan finds the true close.
//!
//! Known limitation: text preceding the first `{` stays buffered until a later
//! frame consumes past it, and a stream that opens a brace but never closes it
//! accumulates until the configured cap fails the pipeline cleanly.

use bytes::{Bytes, BytesMut};

/// Default cap on the working buffer, in bytes.
pub const DEFAULT_MAX_BUFFER: usize = 1024 * 1024;

/// Location of one complete candidate within the working buffer.
///
/// The candidate is `buf[start..end]`; `consumed` bytes are dropped from the
/// front of the buffer once the candidate has been handed on (for a fast-path
/// match this includes the terminating newline).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSpan {
    pub start: usize,
    pub end: usize,
    pub consumed: usize,
}

/// Scans `buf` for the next complete JSON-object candidate.
///
/// Returns `None` when the buffer holds no record start or only a partial
/// record; callers append more data and retry.
pub fn locate_frame(buf: &[u8]) -> Option<FrameSpan> {
    let start = buf.iter().position(|&b| b == b'{')?;
    let tail = &buf[start..];

    if let Some(term) = find_terminator(tail) {
        let candidate = &tail[..=term];
        if scan_to_close(candidate) == Some(candidate.len()) {
            return Some(FrameSpan {
                start,
                end: start + term + 1,
                consumed: start + term + 2,
            });
        }
        // Terminator sits inside nested content or a string; fall through.
    }

    let close = scan_to_close(tail)?;
    Some(FrameSpan {
        start,
        end: start + close,
        consumed: start + close,
    })
}

/// Index of the `}` of the first `}\n` occurrence, if any.
fn find_terminator(tail: &[u8]) -> Option<usize> {
    tail.windows(2).position(|w| w == b"}\n")
}

/// Depth-scans from the leading `{`, honoring JSON strings and escapes.
/// Returns the index one past the matching `}`, or `None` while unclosed.
fn scan_to_close(bytes: &[u8]) -> Option<usize> {
    let mut depth = 0i32;
    let mut in_string = false;
    let mut escape = false;

    for (i, &c) in bytes.iter().enumerate() {
        match (in_string, escape, c) {
            (true, false, b'\\') => escape = true,
            (true, true, _) => escape = false,
            (true, false, b'"') => in_string = false,
            (false, _, b'"') => in_string = true,
            (false, _, b'{') => depth += 1,
            (false, _, b'}') => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// Raised when a chunk would push the working buffer past its cap.
#[derive(Debug, Clone, thiserror::Error)]
#[error("working buffer would exceed {limit} bytes (needs {required})")]
pub struct OverflowError {
    pub limit: usize,
    pub required: usize,
}

/// Working buffer with the ingest → drain-candidates contract.
///
/// Exactly one partially-received record (at most) survives between chunks; no
/// record is skipped or duplicated.
#[derive(Debug)]
pub struct FrameBuffer {
    buf: BytesMut,
    max_len: usize,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::with_max_len(DEFAULT_MAX_BUFFER)
    }

    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            buf: BytesMut::new(),
            max_len,
        }
    }

    /// Appends one chunk of incoming text.
    ///
    /// Fails without mutating the buffer when the cap would be exceeded; the
    /// session owning this buffer is expected to tear down rather than grow
    /// without bound on corrupt input.
    pub fn ingest(&mut self, chunk: &[u8]) -> Result<(), OverflowError> {
        let required = self.buf.len() + chunk.len();
        if required > self.max_len {
            return Err(OverflowError {
                limit: self.max_len,
                required,
            });
        }
        self.buf.extend_from_slice(chunk);
        Ok(())
    }

    /// Extracts the next complete candidate, consuming it from the buffer.
    /// Call until `None` after each `ingest`.
    pub fn next_frame(&mut self) -> Option<Bytes> {
        let span = locate_frame(&self.buf)?;
        let consumed = self.buf.split_to(span.consumed).freeze();
        Some(consumed.slice(span.start..span.end))
    }

    /// Bytes currently buffered, including any partial record.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Drops all buffered data, partial record included.
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
