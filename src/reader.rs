use bytes::{Buf, BytesMut};
use std::io::Error as IoError;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, ReadBuf};
use tokio::sync::mpsc;

/// Bridges chunk-at-a-time byte delivery into [`AsyncRead`].
///
/// Serial transports typically surface data as discrete chunks (one callback
/// per USB transfer); the producing side pushes each chunk into the channel
/// and the parser reads from this end. Dropping the sender reads as EOF, so
/// disconnecting an already-closed channel is a no-op.
pub struct ChunkReader {
    rx: mpsc::Receiver<Vec<u8>>,
    pending: BytesMut,
}

impl ChunkReader {
    pub fn new(rx: mpsc::Receiver<Vec<u8>>) -> Self {
        Self {
            rx,
            pending: BytesMut::new(),
        }
    }
}

impl AsyncRead for ChunkReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<Result<(), IoError>> {
        if self.pending.is_empty() {
            match Pin::new(&mut self.rx).poll_recv(cx) {
                Poll::Ready(Some(chunk)) => self.pending.extend_from_slice(&chunk),
                Poll::Ready(None) => return Poll::Ready(Ok(())),
                Poll::Pending => return Poll::Pending,
            }
        }

        let n = std::cmp::min(self.pending.len(), buf.remaining());
        buf.put_slice(&self.pending[..n]);
        self.pending.advance(n);
        Poll::Ready(Ok(()))
    }
}
