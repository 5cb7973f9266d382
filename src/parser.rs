use bytes::{Buf, BytesMut};
use serde::de::DeserializeOwned;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_stream::Stream;
use tracing::{debug, instrument, warn};

use crate::decoder::{decode_frame, DecodeError};
use crate::framer::{locate_frame, DEFAULT_MAX_BUFFER};
use crate::record::GestureRecord;

#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("stream closed before a complete record arrived")]
    Eof,
    #[error("working buffer exceeded {limit} bytes ({size} buffered) with no complete record")]
    BufferOverflow { size: usize, limit: usize },
}

pub struct ParserConfig {
    /// Bytes reserved per read from the transport.
    pub read_chunk_size: usize,
    /// Cap on the working buffer; exceeding it fails the pipeline cleanly
    /// instead of growing without bound on corrupt input.
    pub max_buffer_size: usize,
    /// Drop-and-continue on undecodable candidates (the wire is lossy device
    /// telemetry; one bad record must not stall the ones behind it). `false`
    /// surfaces each failure as [`ParserError::Decode`] instead.
    pub skip_invalid: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            read_chunk_size: 1024,
            max_buffer_size: DEFAULT_MAX_BUFFER,
            skip_invalid: true,
        }
    }
}

/// Pulls framed records out of any [`AsyncRead`] transport.
///
/// Reads suspend until the transport yields data; each delivered chunk is
/// drained of every complete record before the next read is issued.
pub struct RecordParser<R> {
    reader: R,
    buffer: BytesMut,
    config: ParserConfig,
}

impl<R: AsyncRead + Unpin> RecordParser<R> {
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, ParserConfig::default())
    }

    pub fn with_config(reader: R, config: ParserConfig) -> Self {
        Self {
            reader,
            buffer: BytesMut::with_capacity(config.read_chunk_size),
            config,
        }
    }

    async fn fill_buffer(&mut self) -> Result<(), ParserError> {
        self.buffer.reserve(self.config.read_chunk_size);
        let n = self.reader.read_buf(&mut self.buffer).await?;
        if n == 0 {
            return Err(ParserError::Eof);
        }
        if self.buffer.len() > self.config.max_buffer_size {
            return Err(ParserError::BufferOverflow {
                size: self.buffer.len(),
                limit: self.config.max_buffer_size,
            });
        }
        #[cfg(feature = "metrics")]
        crate::metrics::BUFFER_BYTES.set(self.buffer.len() as i64);
        Ok(())
    }

    /// Next decoded record of type `T`, reading more chunks as needed.
    #[instrument(skip(self))]
    pub async fn next<T: DeserializeOwned>(&mut self) -> Result<T, ParserError> {
        loop {
            if let Some(span) = locate_frame(&self.buffer) {
                let frame = &self.buffer[span.start..span.end];
                debug!(len = frame.len(), "framed candidate");
                let decoded = decode_frame::<T>(frame);
                self.buffer.advance(span.consumed);
                match decoded {
                    Ok(record) => {
                        #[cfg(feature = "metrics")]
                        crate::metrics::RECORDS_DECODED.inc();
                        return Ok(record);
                    }
                    Err(err) => {
                        #[cfg(feature = "metrics")]
                        crate::metrics::DECODE_FAILURES.inc();
                        if self.config.skip_invalid {
                            warn!(error = %err.source, snippet = %err.snippet, "dropping undecodable record");
                            continue;
                        }
                        return Err(ParserError::Decode(err));
                    }
                }
            }
            self.fill_buffer().await?;
        }
    }

    /// [`Self::next`] fixed to the gesture wire shape.
    pub async fn next_record(&mut self) -> Result<GestureRecord, ParserError> {
        self.next().await
    }

    /// Adapts the parser into a stream that ends at EOF and stops after the
    /// first terminal error.
    pub fn into_stream<T: DeserializeOwned>(
        mut self,
    ) -> impl Stream<Item = Result<T, ParserError>> {
        async_stream::stream! {
            loop {
                match self.next::<T>().await {
                    Ok(record) => yield Ok(record),
                    Err(ParserError::Eof) => break,
                    Err(e) => {
                        yield Err(e);
                        break;
                    }
                }
            }
        }
    }
}
