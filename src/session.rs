use tokio::io::AsyncRead;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::parser::{ParserConfig, ParserError, RecordParser};
use crate::view::{RecordSink, Status};

/// Line rate of the device's serial link.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// How a session's read loop ended, short of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Stopped via the cancellation token.
    Cancelled,
    /// The transport reported end-of-stream.
    StreamClosed,
}

/// One connection's worth of state: transport reader, working buffer, and the
/// sink being fed. Created on connect; dropping it releases the reader.
///
/// The read loop is strictly sequential — every record extractable from a
/// delivered chunk reaches the sink before the next read is issued, so the
/// working buffer is never touched concurrently.
pub struct Session<R, S> {
    parser: RecordParser<R>,
    sink: S,
    cancel: CancellationToken,
}

impl<R: AsyncRead + Unpin, S: RecordSink> Session<R, S> {
    pub fn new(reader: R, sink: S) -> Self {
        Self::with_config(reader, sink, ParserConfig::default())
    }

    pub fn with_config(reader: R, sink: S, config: ParserConfig) -> Self {
        Self {
            parser: RecordParser::with_config(reader, config),
            sink,
            cancel: CancellationToken::new(),
        }
    }

    /// Handle for stopping the read loop from elsewhere. Cancellation aborts a
    /// read in flight rather than waiting out the next chunk.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Drives the source → framer → decoder → sink cascade until the stream
    /// ends, the session is cancelled, or the transport fails.
    pub async fn run(&mut self) -> Result<SessionEnd, ParserError> {
        self.sink.on_status(Status::Connected);
        loop {
            tokio::select! {
                // Check for a stop before re-suspending on the transport.
                biased;
                _ = self.cancel.cancelled() => {
                    info!("session cancelled");
                    self.sink.on_status(Status::Disconnected);
                    return Ok(SessionEnd::Cancelled);
                }
                next = self.parser.next_record() => match next {
                    Ok(record) => self.sink.on_record(&record),
                    Err(ParserError::Eof) => {
                        info!("stream closed");
                        self.sink.on_status(Status::Disconnected);
                        return Ok(SessionEnd::StreamClosed);
                    }
                    Err(err) => {
                        error!(error = %err, "read loop failed");
                        self.sink.on_status(Status::ReadError);
                        return Err(err);
                    }
                }
            }
        }
    }
}
