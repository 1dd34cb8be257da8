//! Registration acknowledgement.
//!
//! One 20-byte layout for all versions:
//! ```text
//! 0  keepAliveInterval        u32
//! 4  dateTemplate             [u8; 6]
//! 10 filler                   [u8; 2]
//! 12 secondaryKeepAlive       u32
//! 16 protocolVer              u8
//! 17 marker                   [u8; 3]
//! ```
//! The three marker bytes differ per version. Their meaning is not
//! documented; devices reject the ack when they are wrong.

use crate::error::Result;
use crate::model::RegisterAck;
use crate::protocol::{MessageAllocator, MessageId, WireMessage, DATE_TEMPLATE_SIZE};

/// Body size.
pub const SIZE: usize = 20;

const KEEP_ALIVE: usize = 0;
const DATE_TEMPLATE: usize = 4;
const SECONDARY_KEEP_ALIVE: usize = 12;
const PROTOCOL_VERSION: usize = 16;
const MARKER: usize = 17;

/// Register-ack wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterAckEncoding {
    V3,
    V4,
    V11,
}

impl RegisterAckEncoding {
    /// Marker bytes written after the protocol version.
    pub fn marker(self) -> [u8; 3] {
        match self {
            Self::V3 => [0x00, 0x00, 0x00],
            Self::V4 => [0x20, 0x00, 0xFE],
            Self::V11 => [0x20, 0xF1, 0xFF],
        }
    }

    pub fn encode(self, alloc: &dyn MessageAllocator, ack: &RegisterAck) -> Result<WireMessage> {
        let mut buf = alloc.allocate(MessageId::RegisterAck, SIZE)?;

        buf.put_u32(KEEP_ALIVE, ack.keep_alive);
        buf.copy_fixed(DATE_TEMPLATE, DATE_TEMPLATE_SIZE, &ack.date_template);
        buf.put_u32(SECONDARY_KEEP_ALIVE, ack.secondary_keep_alive);
        buf.put_u8(PROTOCOL_VERSION, ack.protocol_version);
        buf.put_bytes(MARKER, &self.marker());

        Ok(buf.finish())
    }
}
