//! Protocol module - packet framing, layout arithmetic, and message buffers.
//!
//! This module implements the wire-level building blocks every encoder uses:
//! - 12-byte packet header and message ids
//! - 4-byte alignment arithmetic for dynamic bodies
//! - packing of optional string fields
//! - allocator seam and fixed-size message buffers

mod field_packer;
mod message;
mod wire_format;

pub use field_packer::{wire_str, PackedFields};
pub use message::{
    HeapAllocator, MessageAllocator, MessageBuffer, WireMessage, DEFAULT_MAX_MESSAGE_SIZE,
};
pub use wire_format::{
    layout, Layout, MessageId, PacketHeader, DATE_TEMPLATE_SIZE, MAX_DIRNUM_SIZE, MAX_NAME_SIZE,
    MAX_NOTIFY_SIZE, MAX_PROMPT_SIZE, PACKET_HEADER_SIZE,
};
