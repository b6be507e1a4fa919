//! Queue sink handing text to an async consumer.

use std::io;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use super::Sink;

/// Sink that pushes each chunk onto an unbounded tokio channel.
///
/// `accept` never blocks or awaits, so it is safe to emit from synchronous
/// code while an async task on the other end writes the text out.
#[derive(Debug, Clone)]
pub struct QueueSink {
    id: String,
    tx: mpsc::UnboundedSender<String>,
}

/// Receiving half of a [`QueueSink`].
#[derive(Debug)]
pub struct QueueReceiver {
    rx: mpsc::UnboundedReceiver<String>,
}

impl QueueSink {
    /// Create a queue sink and the receiver that drains it.
    pub fn new(id: impl Into<String>) -> (Self, QueueReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { id: id.into(), tx }, QueueReceiver { rx })
    }
}

impl Sink for QueueSink {
    fn id(&self) -> &str {
        &self.id
    }

    fn accept(&self, text: &str) -> io::Result<()> {
        self.tx
            .send(text.to_owned())
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "queue receiver dropped"))
    }
}

impl QueueReceiver {
    /// Wait for the next chunk. `None` once every sender is gone.
    pub async fn recv(&mut self) -> Option<String> {
        self.rx.recv().await
    }

    /// Take the next chunk if one is already queued.
    pub fn try_recv(&mut self) -> Option<String> {
        self.rx.try_recv().ok()
    }

    /// Copy chunks into `writer` until every sender is dropped.
    ///
    /// Returns the number of bytes written.
    pub async fn drain_to<W>(&mut self, writer: &mut W) -> io::Result<usize>
    where
        W: AsyncWrite + Unpin,
    {
        let mut written = 0;
        while let Some(chunk) = self.rx.recv().await {
            writer.write_all(chunk.as_bytes()).await?;
            written += chunk.len();
        }
        writer.flush().await?;
        Ok(written)
    }
}
