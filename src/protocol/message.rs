//! Message buffers and the allocator seam.
//!
//! Encoders never size buffers themselves: they compute the final body size,
//! ask a [`MessageAllocator`] for a zeroed [`MessageBuffer`] of exactly that
//! size, write into it, and [`finish`](MessageBuffer::finish) it into an
//! immutable [`WireMessage`].
//!
//! # Example
//!
//! ```
//! use sccp_codec::protocol::{HeapAllocator, MessageAllocator, MessageId};
//!
//! let mut buf = HeapAllocator::default().allocate(MessageId::DisplayNotify, 36).unwrap();
//! buf.put_u32(0, 10);
//! buf.copy_truncate(4, 32, "Hello", "displayMessage");
//! let msg = buf.finish();
//!
//! assert_eq!(msg.body().len(), 36);
//! assert_eq!(&msg.body()[4..9], b"Hello");
//! ```

use bytes::{Bytes, BytesMut};

use super::field_packer::wire_str;
use super::wire_format::{MessageId, PacketHeader, PACKET_HEADER_SIZE};
use crate::error::{CodecError, Result};

/// Default largest body the heap allocator hands out.
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 4096;

/// Source of zero-initialized message buffers.
pub trait MessageAllocator: Send + Sync {
    /// Return a zeroed buffer of exactly `size` body bytes tagged with `message_id`.
    fn allocate(&self, message_id: MessageId, size: usize) -> Result<MessageBuffer>;
}

/// Allocator backed by `BytesMut`, refusing bodies above a size limit.
#[derive(Debug, Clone, Copy)]
pub struct HeapAllocator {
    max_message_size: usize,
}

impl HeapAllocator {
    /// Create an allocator accepting bodies up to `max_message_size` bytes.
    pub fn new(max_message_size: usize) -> Self {
        Self { max_message_size }
    }

    /// Largest body this allocator accepts.
    #[inline]
    pub fn max_message_size(&self) -> usize {
        self.max_message_size
    }
}

impl Default for HeapAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MESSAGE_SIZE)
    }
}

impl MessageAllocator for HeapAllocator {
    fn allocate(&self, message_id: MessageId, size: usize) -> Result<MessageBuffer> {
        if size > self.max_message_size {
            return Err(CodecError::AllocationFailed {
                message_id: message_id.as_u32(),
                requested: size,
                limit: self.max_message_size,
            });
        }
        Ok(MessageBuffer::zeroed(message_id, size))
    }
}

/// A writable, fixed-size message body.
///
/// Writes outside the allocated size panic: the size was computed by the
/// encoder before allocation, so an overrun is a layout bug.
#[derive(Debug)]
pub struct MessageBuffer {
    message_id: MessageId,
    body: BytesMut,
}

impl MessageBuffer {
    /// Create a zero-filled body of `size` bytes.
    pub fn zeroed(message_id: MessageId, size: usize) -> Self {
        Self {
            message_id,
            body: BytesMut::zeroed(size),
        }
    }

    /// Message id this buffer was allocated for.
    #[inline]
    pub fn message_id(&self) -> MessageId {
        self.message_id
    }

    /// Body size in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Whether the body is empty (token ack carries no body).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Write a 32-bit integer in wire byte order (Little Endian).
    #[inline]
    pub fn put_u32(&mut self, offset: usize, value: u32) {
        self.body[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    /// Write a single byte.
    #[inline]
    pub fn put_u8(&mut self, offset: usize, value: u8) {
        self.body[offset] = value;
    }

    /// Copy raw bytes verbatim.
    #[inline]
    pub fn put_bytes(&mut self, offset: usize, bytes: &[u8]) {
        self.body[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    /// Copy `value` into a fixed-width, NUL-terminated slot.
    ///
    /// At most `width - 1` bytes are copied; the rest of `value` is dropped
    /// and the slot always keeps its terminator. Returns `true` when the value
    /// was cut. Empty values leave the slot untouched. Bytes after an
    /// interior NUL are never copied.
    pub fn copy_truncate(&mut self, offset: usize, width: usize, value: &str, field: &'static str) -> bool {
        let src = wire_str(value).as_bytes();
        let take = src.len().min(width.saturating_sub(1));
        self.body[offset..offset + take].copy_from_slice(&src[..take]);

        let truncated = take < src.len();
        if truncated {
            tracing::debug!(
                field,
                width,
                len = src.len(),
                message_id = self.message_id.as_u32(),
                "field truncated to fixed width"
            );
        }
        truncated
    }

    /// Copy up to `width` bytes of `value` with no terminator reserved.
    pub fn copy_fixed(&mut self, offset: usize, width: usize, value: &str) {
        let src = wire_str(value).as_bytes();
        let take = src.len().min(width);
        self.body[offset..offset + take].copy_from_slice(&src[..take]);
    }

    /// Seal the buffer into an immutable message.
    pub fn finish(self) -> WireMessage {
        WireMessage {
            message_id: self.message_id,
            body: self.body.freeze(),
        }
    }
}

/// A completed message ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireMessage {
    message_id: MessageId,
    body: Bytes,
}

impl WireMessage {
    /// Message id.
    #[inline]
    pub fn message_id(&self) -> MessageId {
        self.message_id
    }

    /// Body bytes (zero-copy via `bytes::Bytes`).
    #[inline]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Get a clone of the body as Bytes (cheap, zero-copy).
    #[inline]
    pub fn body_bytes(&self) -> Bytes {
        self.body.clone()
    }

    /// Packet header for this message.
    #[inline]
    pub fn header(&self) -> PacketHeader {
        PacketHeader::new(self.message_id, self.body.len())
    }

    /// Size on the wire, packet header included.
    #[inline]
    pub fn packet_len(&self) -> usize {
        PACKET_HEADER_SIZE + self.body.len()
    }

    /// Build the complete packet as a single byte vector.
    pub fn to_packet(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.packet_len());
        buf.extend_from_slice(&self.header().encode());
        buf.extend_from_slice(&self.body);
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_zeroed() {
        let buf = HeapAllocator::default().allocate(MessageId::CallInfo, 384).unwrap();
        assert_eq!(buf.len(), 384);
        assert!(buf.finish().body().iter().all(|b| *b == 0));
    }

    #[test]
    fn test_allocate_over_limit_fails() {
        let alloc = HeapAllocator::new(64);
        let err = alloc.allocate(MessageId::UserToDeviceDataVersion1, 65).unwrap_err();
        assert!(matches!(
            err,
            CodecError::AllocationFailed { requested: 65, limit: 64, .. }
        ));
        assert!(err.to_string().contains("0x013F"));
    }

    #[test]
    fn test_put_u32_little_endian() {
        let mut buf = MessageBuffer::zeroed(MessageId::RegisterAck, 8);
        buf.put_u32(4, 0x0102_0304);
        let msg = buf.finish();
        assert_eq!(&msg.body()[4..8], &[0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn test_copy_truncate_fits() {
        let mut buf = MessageBuffer::zeroed(MessageId::DialedNumber, 24);
        assert!(!buf.copy_truncate(0, 24, "1001", "calledParty"));
        let msg = buf.finish();
        assert_eq!(&msg.body()[..5], b"1001\0");
    }

    #[test]
    fn test_copy_truncate_keeps_terminator() {
        let mut buf = MessageBuffer::zeroed(MessageId::DisplayNotify, 8);
        assert!(buf.copy_truncate(0, 4, "abcdef", "displayMessage"));
        let msg = buf.finish();
        assert_eq!(&msg.body()[..4], b"abc\0");
        assert_eq!(&msg.body()[4..], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_copy_truncate_exact_width_minus_one() {
        let mut buf = MessageBuffer::zeroed(MessageId::DisplayNotify, 4);
        assert!(!buf.copy_truncate(0, 4, "abc", "displayMessage"));
        assert!(buf.copy_truncate(0, 4, "abcd", "displayMessage"));
    }

    #[test]
    fn test_copy_truncate_stops_at_nul() {
        let mut buf = MessageBuffer::zeroed(MessageId::DisplayNotify, 8);
        assert!(!buf.copy_truncate(0, 8, "ab\0cd", "displayMessage"));
        let msg = buf.finish();
        assert_eq!(msg.body(), &[b'a', b'b', 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_copy_fixed_stops_at_nul() {
        let mut buf = MessageBuffer::zeroed(MessageId::RegisterAck, 6);
        buf.copy_fixed(0, 6, "M\0D/YA");
        let msg = buf.finish();
        assert_eq!(msg.body(), b"M\0\0\0\0\0");
    }

    #[test]
    fn test_copy_fixed_uses_full_width() {
        let mut buf = MessageBuffer::zeroed(MessageId::RegisterAck, 8);
        buf.copy_fixed(0, 6, "M/D/YA-extra");
        let msg = buf.finish();
        assert_eq!(&msg.body()[..8], b"M/D/YA\0\0");
    }

    #[test]
    fn test_to_packet() {
        let mut buf = MessageBuffer::zeroed(MessageId::SpcpRegisterTokenAck, 4);
        buf.put_u32(0, 7);
        let msg = buf.finish();
        let packet = msg.to_packet();

        assert_eq!(packet.len(), PACKET_HEADER_SIZE + 4);
        let header = PacketHeader::decode(&packet).unwrap();
        assert_eq!(header.length, 8);
        assert_eq!(header.message_id, 0x8100);
        assert_eq!(&packet[PACKET_HEADER_SIZE..], &[7, 0, 0, 0]);
    }

    #[test]
    fn test_body_bytes_zero_copy() {
        let msg = MessageBuffer::zeroed(MessageId::CallInfo, 16).finish();
        let cloned = msg.body_bytes();
        assert_eq!(cloned.as_ptr(), msg.body().as_ptr());
    }
}
