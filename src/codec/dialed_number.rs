//! Dialed-number notification.
//!
//! Both formats use message id 0x011D. V19 prefixes the V3 body with a
//! reserved word; the number is bounded to the same 24-byte slot in both.

use crate::error::Result;
use crate::model::CallContext;
use crate::protocol::{MessageAllocator, MessageId, WireMessage, MAX_DIRNUM_SIZE};

/// V3 body size.
pub const V3_SIZE: usize = 32;

/// V19 body size.
pub const V19_SIZE: usize = 36;

/// Dialed-number wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialedNumberEncoding {
    V3,
    /// Leading reserved word; required for "Placed Calls" on V19+ firmware.
    V19,
}

impl DialedNumberEncoding {
    /// Encode `called_number` for `ctx`.
    pub fn encode(
        self,
        alloc: &dyn MessageAllocator,
        called_number: &str,
        ctx: &CallContext,
    ) -> Result<WireMessage> {
        let (size, base) = match self {
            Self::V3 => (V3_SIZE, 0),
            Self::V19 => (V19_SIZE, 4),
        };
        let mut buf = alloc.allocate(MessageId::DialedNumber, size)?;

        buf.copy_truncate(base, MAX_DIRNUM_SIZE, called_number, "calledParty");
        buf.put_u32(base + MAX_DIRNUM_SIZE, ctx.line_instance as u32);
        buf.put_u32(base + MAX_DIRNUM_SIZE + 4, ctx.call_id);

        Ok(buf.finish())
    }
}
