//! Wire format encoding and decoding.
//!
//! Every SCCP packet starts with a 12-byte header:
//! ```text
//! ┌──────────┬──────────┬────────────┬──────────────┐
//! │ Length   │ Reserved │ Message ID │ Body         │
//! │ 4 bytes  │ 4 bytes  │ 4 bytes    │ Length - 4   │
//! │ uint32 LE│ always 0 │ uint32 LE  │              │
//! └──────────┴──────────┴────────────┴──────────────┘
//! ```
//!
//! All multi-byte integers are Little Endian. `Length` counts the message id
//! plus the body, not the length and reserved words.

/// Packet header size in bytes (fixed, exactly 12).
pub const PACKET_HEADER_SIZE: usize = 12;

/// Bytes of the header covered by the length word (the message id).
const LENGTH_BIAS: u32 = 4;

/// Width of a party name field in static layouts.
pub const MAX_NAME_SIZE: usize = 40;

/// Width of a directory number field in static layouts.
pub const MAX_DIRNUM_SIZE: usize = 24;

/// Width of the register-ack date template.
pub const DATE_TEMPLATE_SIZE: usize = 6;

/// Width of the static prompt text.
pub const MAX_PROMPT_SIZE: usize = 32;

/// Width of the static notify text.
pub const MAX_NOTIFY_SIZE: usize = 32;

/// Message identifiers for every message this codec emits.
///
/// Variants that share an id (V3/V19 dialed number, forward status) differ
/// only in body layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum MessageId {
    RegisterAck = 0x0081,
    CallInfo = 0x008F,
    ForwardStat = 0x0090,
    RegisterTokenAck = 0x0098,
    RegisterTokenReject = 0x0099,
    DisplayPromptStatus = 0x0112,
    DisplayNotify = 0x0114,
    DialedNumber = 0x011D,
    DisplayPriNotify = 0x0120,
    UserToDeviceDataVersion1 = 0x013F,
    DisplayDynamicNotify = 0x0143,
    DisplayDynamicPriNotify = 0x0144,
    DisplayDynamicPromptStatus = 0x0145,
    CallInfoDynamic = 0x014A,
    SpcpRegisterTokenAck = 0x8100,
    SpcpRegisterTokenReject = 0x8101,
}

impl MessageId {
    /// Numeric wire value.
    #[inline]
    pub fn as_u32(self) -> u32 {
        self as u32
    }

    /// Map a wire value back to a known message id.
    pub fn from_u32(value: u32) -> Option<Self> {
        let id = match value {
            0x0081 => Self::RegisterAck,
            0x008F => Self::CallInfo,
            0x0090 => Self::ForwardStat,
            0x0098 => Self::RegisterTokenAck,
            0x0099 => Self::RegisterTokenReject,
            0x0112 => Self::DisplayPromptStatus,
            0x0114 => Self::DisplayNotify,
            0x011D => Self::DialedNumber,
            0x0120 => Self::DisplayPriNotify,
            0x013F => Self::UserToDeviceDataVersion1,
            0x0143 => Self::DisplayDynamicNotify,
            0x0144 => Self::DisplayDynamicPriNotify,
            0x0145 => Self::DisplayDynamicPromptStatus,
            0x014A => Self::CallInfoDynamic,
            0x8100 => Self::SpcpRegisterTokenAck,
            0x8101 => Self::SpcpRegisterTokenReject,
            _ => return None,
        };
        Some(id)
    }
}

/// Decoded packet header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketHeader {
    /// Length word as it appears on the wire (body length + 4).
    pub length: u32,
    /// Raw message id.
    pub message_id: u32,
}

impl PacketHeader {
    /// Build the header for a body of `body_len` bytes.
    pub fn new(message_id: MessageId, body_len: usize) -> Self {
        Self {
            length: body_len as u32 + LENGTH_BIAS,
            message_id: message_id.as_u32(),
        }
    }

    /// Body length implied by the length word.
    #[inline]
    pub fn body_len(&self) -> usize {
        self.length.saturating_sub(LENGTH_BIAS) as usize
    }

    /// Encode header to bytes (Little Endian).
    pub fn encode(&self) -> [u8; PACKET_HEADER_SIZE] {
        let mut buf = [0u8; PACKET_HEADER_SIZE];
        buf[0..4].copy_from_slice(&self.length.to_le_bytes());
        // bytes 4..8 are the reserved word, always zero
        buf[8..12].copy_from_slice(&self.message_id.to_le_bytes());
        buf
    }

    /// Decode header from bytes (Little Endian).
    ///
    /// Returns `None` if buffer is too short.
    pub fn decode(buf: &[u8]) -> Option<Self> {
        if buf.len() < PACKET_HEADER_SIZE {
            return None;
        }
        Some(Self {
            length: u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]),
            message_id: u32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]),
        })
    }
}

/// Size computation for a dynamic message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Body size to allocate: header + variable part + padding.
    pub total_size: usize,
    /// Zero bytes appended to reach a 4-byte boundary.
    pub padding: usize,
}

/// Compute the 4-byte aligned body size for `header_size + variable_len`.
///
/// # Example
///
/// ```
/// use sccp_codec::protocol::layout;
///
/// let l = layout(9, 5);
/// assert_eq!(l.padding, 2);
/// assert_eq!(l.total_size, 16);
/// ```
#[inline]
pub fn layout(header_size: usize, variable_len: usize) -> Layout {
    let rem = (variable_len + header_size) % 4;
    let padding = if rem > 0 { 4 - rem } else { 0 };
    Layout {
        total_size: header_size + variable_len + padding,
        padding,
    }
}
