//! Transport module - where finished messages go.
//!
//! Sending is fire-and-forget: encoders hand a [`WireMessage`] over and do
//! not learn whether it reached the device. Implementations that can fail
//! log and drop.
//!
//! - [`WriterHandle`](crate::writer::WriterHandle) - queues to a tokio writer task
//! - [`CaptureTransport`] - keeps messages in memory

use std::sync::Mutex;

use crate::protocol::WireMessage;

/// Sink for outbound device messages.
pub trait Transport: Send + Sync {
    /// Hand `msg` to the device connection.
    fn send(&self, msg: WireMessage);
}

/// In-memory transport that records every message it is given.
#[derive(Debug, Default)]
pub struct CaptureTransport {
    messages: Mutex<Vec<WireMessage>>,
}

impl CaptureTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything sent so far.
    pub fn messages(&self) -> Vec<WireMessage> {
        self.lock().clone()
    }

    /// Remove and return everything sent so far.
    pub fn take(&self) -> Vec<WireMessage> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<WireMessage>> {
        // a panic while holding the lock cannot leave the Vec inconsistent
        self.messages.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Transport for CaptureTransport {
    fn send(&self, msg: WireMessage) {
        tracing::debug!(
            message_id = msg.message_id().as_u32(),
            len = msg.body().len(),
            "captured message"
        );
        self.lock().push(msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{HeapAllocator, MessageAllocator, MessageId};

    #[test]
    fn test_capture_and_take() {
        let transport = CaptureTransport::new();
        let msg = HeapAllocator::default()
            .allocate(MessageId::RegisterTokenAck, 0)
            .unwrap()
            .finish();

        transport.send(msg.clone());
        transport.send(msg.clone());
        assert_eq!(transport.len(), 2);
        assert_eq!(transport.messages()[0], msg);

        let taken = transport.take();
        assert_eq!(taken.len(), 2);
        assert!(transport.is_empty());
    }
}
