//! Codec module - per-operation message encoders.
//!
//! Each operation has an encoding selector enum whose variants are the wire
//! formats that exist for it across protocol versions:
//!
//! - [`CallInfoEncoding`] - static V3, dynamic 12-field V7, dynamic 16-field V16
//! - [`DialedNumberEncoding`] - V3, V19
//! - [`RegisterAckEncoding`] - V3, V4, V11 (marker bytes only)
//! - [`DisplayEncoding`] - static or dynamic prompt, notify and priority notify
//! - [`ForwardStatusEncoding`] - V3, V19
//! - [`TokenEncoding`] - SCCP or SPCP token ack/reject
//! - [`UserDataEncoding`] - user-to-device data, dynamic only
//!
//! # Design
//!
//! Selectors are plain `Copy` enums rather than trait objects so capability
//! descriptors can be `static` data. Every encoder is a pure function of its
//! inputs and the allocator; sending is done by the caller.
//!
//! Dynamic encoders all go through [`build_dynamic`]: fields are packed,
//! the header size is the fixed part plus one terminator per field, and the
//! body is padded to 4 bytes before it is allocated.

mod call_info;
mod dialed_number;
mod display;
mod forward;
mod register;
mod token;
mod user_data;

pub use call_info::CallInfoEncoding;
pub use dialed_number::DialedNumberEncoding;
pub use display::DisplayEncoding;
pub use forward::{ForwardStatusEncoding, FORWARD_V19_MARKER};
pub use register::RegisterAckEncoding;
pub use token::TokenEncoding;
pub use user_data::UserDataEncoding;

use crate::error::Result;
use crate::protocol::{layout, wire_str, MessageAllocator, MessageBuffer, MessageId, PackedFields, WireMessage};

/// Allocate and fill a dynamic message.
///
/// `fixed_header` is the size of the integer part in front of the packed
/// region; `write_header` fills it.
pub(crate) fn build_dynamic<F>(
    alloc: &dyn MessageAllocator,
    message_id: MessageId,
    fixed_header: usize,
    fields: &PackedFields,
    write_header: F,
) -> Result<WireMessage>
where
    F: FnOnce(&mut MessageBuffer),
{
    let l = layout(fixed_header + fields.field_count(), fields.total_len());
    let mut buf = alloc.allocate(message_id, l.total_size)?;

    write_header(&mut buf);
    buf.put_bytes(fixed_header, fields.as_bytes());

    Ok(buf.finish())
}

/// Treat empty strings, and strings that start with NUL, as absent.
#[inline]
pub(crate) fn opt(value: &str) -> Option<&str> {
    let value = wire_str(value);
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
