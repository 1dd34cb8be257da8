//! Dedicated writer task for a device connection.
//!
//! Encoders run synchronously wherever the call-control logic runs; the
//! socket is owned by one task that receives finished messages over a
//! bounded mpsc channel and batches them into vectored writes.
//!
//! # Architecture
//!
//! ```text
//! DeviceSession ─┐
//! DeviceSession ─┼─► mpsc::Sender<WireMessage> ─► Writer Task ─► AsyncWrite
//! Keep-alive    ─┘
//! ```
//!
//! Sending never blocks. A full channel is reported as
//! [`CodecError::Backpressure`] and the message is not queued.

use std::io::{self, IoSlice};

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::{CodecError, Result};
use crate::protocol::{WireMessage, PACKET_HEADER_SIZE};
use crate::transport::Transport;

/// Default channel capacity.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// Maximum messages to batch in a single write operation.
const MAX_BATCH_SIZE: usize = 64;

/// Configuration for the writer task.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Messages the queue holds before sends report backpressure.
    pub channel_capacity: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Handle for queueing messages on the writer task.
///
/// Cheaply cloneable; every session on the same connection can hold one.
#[derive(Debug, Clone)]
pub struct WriterHandle {
    tx: mpsc::Sender<WireMessage>,
}

impl WriterHandle {
    /// Queue a message without waiting.
    ///
    /// Returns `Err(Backpressure)` if the queue is full and
    /// `Err(ConnectionClosed)` once the writer task has stopped.
    pub fn try_send(&self, msg: WireMessage) -> Result<()> {
        self.tx.try_send(msg).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => CodecError::Backpressure,
            mpsc::error::TrySendError::Closed(_) => CodecError::ConnectionClosed,
        })
    }

    /// Messages queued but not yet taken by the writer task.
    #[inline]
    pub fn queued(&self) -> usize {
        self.tx.max_capacity() - self.tx.capacity()
    }

    /// True once the writer task has stopped accepting messages.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl Transport for WriterHandle {
    fn send(&self, msg: WireMessage) {
        let message_id = msg.message_id().as_u32();
        if let Err(e) = self.try_send(msg) {
            tracing::warn!(message_id, error = %e, queued = self.queued(), "dropping outbound message");
        }
    }
}

/// Spawn the writer task and return a handle for queueing messages.
///
/// The `JoinHandle` resolves when every `WriterHandle` has been dropped and
/// the queue is drained, or on the first I/O error.
pub fn spawn_writer_task<W>(writer: W, config: WriterConfig) -> (WriterHandle, JoinHandle<Result<()>>)
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::channel(config.channel_capacity.max(1));
    let task = tokio::spawn(writer_loop(rx, writer));
    (WriterHandle { tx }, task)
}

async fn writer_loop<W>(mut rx: mpsc::Receiver<WireMessage>, mut writer: W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut batch = Vec::with_capacity(MAX_BATCH_SIZE);

    while let Some(first) = rx.recv().await {
        batch.push(first);
        while batch.len() < MAX_BATCH_SIZE {
            match rx.try_recv() {
                Ok(msg) => batch.push(msg),
                Err(_) => break,
            }
        }

        if let Err(e) = write_batch(&mut writer, &batch).await {
            rx.close();
            let mut abandoned = 0usize;
            while rx.try_recv().is_ok() {
                abandoned += 1;
            }
            tracing::error!(error = %e, batch_size = batch.len(), abandoned, "device write failed");
            return Err(e);
        }

        tracing::trace!(batch_size = batch.len(), "batch written");
        batch.clear();
    }

    tracing::debug!("writer channel closed");
    Ok(())
}

/// Write every packet in `batch` with `write_vectored`, resuming after
/// partial writes.
async fn write_batch<W>(writer: &mut W, batch: &[WireMessage]) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let headers: Vec<[u8; PACKET_HEADER_SIZE]> = batch.iter().map(|msg| msg.header().encode()).collect();

    let mut slices = Vec::with_capacity(batch.len() * 2);
    for (header, msg) in headers.iter().zip(batch) {
        slices.push(IoSlice::new(header));
        // token ack has no body
        if !msg.body().is_empty() {
            slices.push(IoSlice::new(msg.body()));
        }
    }

    let mut remaining = &mut slices[..];
    while !remaining.is_empty() {
        let written = writer.write_vectored(remaining).await?;
        if written == 0 {
            return Err(CodecError::Io(io::Error::new(
                io::ErrorKind::WriteZero,
                "write_vectored returned 0",
            )));
        }
        IoSlice::advance_slices(&mut remaining, written);
    }

    writer.flush().await?;
    Ok(())
}
