//! Call-forward status.
//!
//! ```text
//! 0  status              u32   1 when any forward is active
//! 4  lineNumber          u32
//! 8  cfwdAllStatus       u32
//! 12 cfwdAllNumber       [u8; 24]
//! 36 cfwdBusyStatus      u32
//! 40 cfwdBusyNumber      [u8; 24]
//! 64 cfwdNoAnswerStatus  u32   never set
//! 68 cfwdNoAnswerNumber  [u8; 24]
//! 92 marker              u32   V19 only
//! ```

use crate::error::Result;
use crate::model::{ForwardTarget, LineForwardStatus};
use crate::protocol::{MessageAllocator, MessageBuffer, MessageId, WireMessage, MAX_DIRNUM_SIZE};

/// V3 body size.
pub const V3_SIZE: usize = 92;
/// V19 body size.
pub const V19_SIZE: usize = 96;

/// Trailing word V19 devices expect.
pub const FORWARD_V19_MARKER: u32 = 0x0000_00FF;

const STATUS: usize = 0;
const LINE_NUMBER: usize = 4;
const ALL_STATUS: usize = 8;
const BUSY_STATUS: usize = 36;
const MARKER: usize = 92;

/// Forward-status wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardStatusEncoding {
    V3,
    V19,
}

impl ForwardStatusEncoding {
    pub fn encode(self, alloc: &dyn MessageAllocator, status: &LineForwardStatus) -> Result<WireMessage> {
        let size = match self {
            Self::V3 => V3_SIZE,
            Self::V19 => V19_SIZE,
        };
        let mut buf = alloc.allocate(MessageId::ForwardStat, size)?;

        buf.put_u32(STATUS, status.is_forwarding() as u32);
        buf.put_u32(LINE_NUMBER, status.line_instance as u32);
        write_target(&mut buf, ALL_STATUS, &status.all, "cfwdAllNumber");
        write_target(&mut buf, BUSY_STATUS, &status.busy, "cfwdBusyNumber");

        if self == Self::V19 {
            buf.put_u32(MARKER, FORWARD_V19_MARKER);
        }

        Ok(buf.finish())
    }
}

fn write_target(buf: &mut MessageBuffer, offset: usize, target: &ForwardTarget, field: &'static str) {
    if target.enabled {
        buf.put_u32(offset, 1);
        buf.copy_truncate(offset + 4, MAX_DIRNUM_SIZE, &target.number, field);
    }
}
