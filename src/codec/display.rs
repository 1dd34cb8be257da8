//! Prompt, notify and priority-notify display text.
//!
//! Static formats copy the text into a 32-byte slot. Dynamic formats carry
//! the full text as a single packed field after the integer header.

use super::{build_dynamic, opt};
use crate::error::Result;
use crate::model::DisplayPrompt;
use crate::protocol::{
    MessageAllocator, MessageId, PackedFields, WireMessage, MAX_NOTIFY_SIZE, MAX_PROMPT_SIZE,
};

/// Static prompt body: timeout, text[32], line instance, call reference.
pub const STATIC_PROMPT_SIZE: usize = 44;
/// Static notify body: timeout, text[32].
pub const STATIC_NOTIFY_SIZE: usize = 36;
/// Static priority notify body: timeout, priority, text[32].
pub const STATIC_PRI_NOTIFY_SIZE: usize = 40;

/// Dynamic prompt integer header: timeout, line instance, call reference.
pub const DYNAMIC_PROMPT_HEADER: usize = 12;
/// Dynamic notify integer header: timeout.
pub const DYNAMIC_NOTIFY_HEADER: usize = 4;
/// Dynamic priority notify integer header: timeout, priority.
pub const DYNAMIC_PRI_NOTIFY_HEADER: usize = 8;

/// Display text wire format, shared by the three display operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayEncoding {
    /// Fixed 32-byte text slot, truncated.
    Static,
    /// Variable-length text, never truncated.
    Dynamic,
}

impl DisplayEncoding {
    /// Prompt line for a call.
    pub fn encode_prompt(self, alloc: &dyn MessageAllocator, prompt: &DisplayPrompt) -> Result<WireMessage> {
        match self {
            Self::Static => {
                let mut buf = alloc.allocate(MessageId::DisplayPromptStatus, STATIC_PROMPT_SIZE)?;
                buf.put_u32(0, prompt.timeout);
                buf.copy_truncate(4, MAX_PROMPT_SIZE, &prompt.message, "promptMessage");
                buf.put_u32(36, prompt.line_instance as u32);
                buf.put_u32(40, prompt.call_id);
                Ok(buf.finish())
            }
            Self::Dynamic => {
                let fields = PackedFields::pack([opt(&prompt.message)]);
                build_dynamic(
                    alloc,
                    MessageId::DisplayDynamicPromptStatus,
                    DYNAMIC_PROMPT_HEADER,
                    &fields,
                    |buf| {
                        buf.put_u32(0, prompt.timeout);
                        buf.put_u32(4, prompt.line_instance as u32);
                        buf.put_u32(8, prompt.call_id);
                    },
                )
            }
        }
    }

    /// Device-wide notification.
    pub fn encode_notify(self, alloc: &dyn MessageAllocator, timeout: u32, message: &str) -> Result<WireMessage> {
        match self {
            Self::Static => {
                let mut buf = alloc.allocate(MessageId::DisplayNotify, STATIC_NOTIFY_SIZE)?;
                buf.put_u32(0, timeout);
                buf.copy_truncate(4, MAX_NOTIFY_SIZE, message, "displayMessage");
                Ok(buf.finish())
            }
            Self::Dynamic => {
                let fields = PackedFields::pack([opt(message)]);
                build_dynamic(
                    alloc,
                    MessageId::DisplayDynamicNotify,
                    DYNAMIC_NOTIFY_HEADER,
                    &fields,
                    |buf| buf.put_u32(0, timeout),
                )
            }
        }
    }

    /// Device-wide notification with a priority.
    pub fn encode_priority_notify(
        self,
        alloc: &dyn MessageAllocator,
        priority: u32,
        timeout: u32,
        message: &str,
    ) -> Result<WireMessage> {
        match self {
            Self::Static => {
                let mut buf = alloc.allocate(MessageId::DisplayPriNotify, STATIC_PRI_NOTIFY_SIZE)?;
                buf.put_u32(0, timeout);
                buf.put_u32(4, priority);
                buf.copy_truncate(8, MAX_NOTIFY_SIZE, message, "displayMessage");
                Ok(buf.finish())
            }
            Self::Dynamic => {
                let fields = PackedFields::pack([opt(message)]);
                build_dynamic(
                    alloc,
                    MessageId::DisplayDynamicPriNotify,
                    DYNAMIC_PRI_NOTIFY_HEADER,
                    &fields,
                    |buf| {
                        buf.put_u32(0, timeout);
                        buf.put_u32(4, priority);
                    },
                )
            }
        }
    }
}
