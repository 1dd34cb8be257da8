//! Call-info encoders.
//!
//! Three wire formats exist:
//!
//! - **V3** (`CallInfo`, 0x008F): 384-byte static struct, every string in its
//!   own fixed slot.
//! - **V7** (`CallInfoDynamic`, 0x014A): 32-byte integer header followed by 12
//!   packed strings.
//! - **V16** (`CallInfoDynamic`, 0x014A): same header, 16 packed strings. The
//!   last three slots repeat original called party name and the calling and
//!   called voicemail boxes; devices expect them.

use super::{build_dynamic, opt};
use crate::error::Result;
use crate::model::{CallContext, CallInfo, CallSecurityState};
use crate::protocol::{
    MessageAllocator, MessageId, PackedFields, WireMessage, MAX_DIRNUM_SIZE, MAX_NAME_SIZE,
};

/// Static V3 body size.
pub const STATIC_SIZE: usize = 384;

/// Integer header in front of the packed strings of the dynamic formats.
pub const DYNAMIC_FIXED_HEADER: usize = 32;

mod v3 {
    pub const CALLING_PARTY_NAME: usize = 0;
    pub const CALLING_PARTY: usize = 40;
    pub const CALLED_PARTY_NAME: usize = 64;
    pub const CALLED_PARTY: usize = 104;
    pub const LINE_ID: usize = 128;
    pub const CALL_REF: usize = 132;
    pub const CALL_TYPE: usize = 136;
    pub const ORIGINAL_CALLED_PARTY_NAME: usize = 140;
    pub const ORIGINAL_CALLED_PARTY: usize = 180;
    pub const LAST_REDIRECTING_PARTY_NAME: usize = 204;
    pub const LAST_REDIRECTING_PARTY: usize = 244;
    pub const ORIGINAL_CDPN_REDIRECT_REASON: usize = 268;
    pub const LAST_REDIRECTING_REASON: usize = 272;
    pub const CGPN_VOICE_MAILBOX: usize = 276;
    pub const CDPN_VOICE_MAILBOX: usize = 300;
    pub const ORIGINAL_CDPN_VOICE_MAILBOX: usize = 324;
    pub const LAST_REDIRECTING_VOICE_MAILBOX: usize = 348;
    pub const CALL_SECURITY_STATUS: usize = 376;
}

mod dynamic {
    pub const LINE_ID: usize = 0;
    pub const CALL_REF: usize = 4;
    pub const CALL_TYPE: usize = 8;
    // 12: party PI restriction bits, always 0
    pub const CALL_SECURITY_STATUS: usize = 16;
    pub const CALL_INSTANCE: usize = 20;
    pub const ORIGINAL_CDPN_REDIRECT_REASON: usize = 24;
    pub const LAST_REDIRECTING_REASON: usize = 28;
}

/// Call-info wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallInfoEncoding {
    /// Fixed-width struct.
    V3,
    /// Dynamic, 12 packed fields.
    V7,
    /// Dynamic, 16 packed fields.
    V16,
}

impl CallInfoEncoding {
    /// Encode call info for `ctx`.
    pub fn encode(
        self,
        alloc: &dyn MessageAllocator,
        info: &CallInfo,
        ctx: &CallContext,
    ) -> Result<WireMessage> {
        match self {
            Self::V3 => encode_static(alloc, info, ctx),
            Self::V7 => encode_dynamic(alloc, &fields_v7(info), info, ctx),
            Self::V16 => encode_dynamic(alloc, &fields_v16(info), info, ctx),
        }
    }

    /// Packed field set for the dynamic formats, `None` for V3.
    pub fn field_set(self, info: &CallInfo) -> Option<PackedFields> {
        match self {
            Self::V3 => None,
            Self::V7 => Some(fields_v7(info)),
            Self::V16 => Some(fields_v16(info)),
        }
    }
}

fn fields_v7(info: &CallInfo) -> PackedFields {
    PackedFields::pack([
        opt(&info.calling_party_number),
        opt(&info.called_party_number),
        opt(&info.original_called_party_number),
        opt(&info.last_redirecting_party_number),
        opt(&info.cgpn_voice_mailbox),
        opt(&info.cdpn_voice_mailbox),
        opt(&info.original_cdpn_voice_mailbox),
        opt(&info.last_redirecting_voice_mailbox),
        opt(&info.calling_party_name),
        opt(&info.called_party_name),
        opt(&info.original_called_party_name),
        opt(&info.last_redirecting_party_name),
    ])
}

fn fields_v16(info: &CallInfo) -> PackedFields {
    PackedFields::pack([
        opt(&info.calling_party_number),
        opt(&info.original_calling_party_number),
        opt(&info.called_party_number),
        opt(&info.original_called_party_number),
        opt(&info.last_redirecting_party_number),
        opt(&info.cgpn_voice_mailbox),
        opt(&info.cdpn_voice_mailbox),
        opt(&info.original_cdpn_voice_mailbox),
        opt(&info.last_redirecting_voice_mailbox),
        opt(&info.calling_party_name),
        opt(&info.called_party_name),
        opt(&info.original_called_party_name),
        opt(&info.last_redirecting_party_name),
        opt(&info.original_called_party_name),
        opt(&info.cgpn_voice_mailbox),
        opt(&info.cdpn_voice_mailbox),
    ])
}

fn encode_static(alloc: &dyn MessageAllocator, info: &CallInfo, ctx: &CallContext) -> Result<WireMessage> {
    let mut buf = alloc.allocate(MessageId::CallInfo, STATIC_SIZE)?;

    let strings: [(usize, usize, &str, &'static str); 12] = [
        (v3::CALLING_PARTY_NAME, MAX_NAME_SIZE, info.calling_party_name.as_str(), "callingPartyName"),
        (v3::CALLING_PARTY, MAX_DIRNUM_SIZE, info.calling_party_number.as_str(), "callingParty"),
        (v3::CALLED_PARTY_NAME, MAX_NAME_SIZE, info.called_party_name.as_str(), "calledPartyName"),
        (v3::CALLED_PARTY, MAX_DIRNUM_SIZE, info.called_party_number.as_str(), "calledParty"),
        (v3::ORIGINAL_CALLED_PARTY_NAME, MAX_NAME_SIZE, info.original_called_party_name.as_str(), "originalCalledPartyName"),
        (v3::ORIGINAL_CALLED_PARTY, MAX_DIRNUM_SIZE, info.original_called_party_number.as_str(), "originalCalledParty"),
        (v3::LAST_REDIRECTING_PARTY_NAME, MAX_NAME_SIZE, info.last_redirecting_party_name.as_str(), "lastRedirectingPartyName"),
        (v3::LAST_REDIRECTING_PARTY, MAX_DIRNUM_SIZE, info.last_redirecting_party_number.as_str(), "lastRedirectingParty"),
        (v3::CGPN_VOICE_MAILBOX, MAX_DIRNUM_SIZE, info.cgpn_voice_mailbox.as_str(), "cgpnVoiceMailbox"),
        (v3::CDPN_VOICE_MAILBOX, MAX_DIRNUM_SIZE, info.cdpn_voice_mailbox.as_str(), "cdpnVoiceMailbox"),
        (v3::ORIGINAL_CDPN_VOICE_MAILBOX, MAX_DIRNUM_SIZE, info.original_cdpn_voice_mailbox.as_str(), "originalCdpnVoiceMailbox"),
        (v3::LAST_REDIRECTING_VOICE_MAILBOX, MAX_DIRNUM_SIZE, info.last_redirecting_voice_mailbox.as_str(), "lastRedirectingVoiceMailbox"),
    ];
    for (offset, width, value, field) in strings {
        buf.copy_truncate(offset, width, value, field);
    }

    buf.put_u32(v3::LINE_ID, ctx.line_instance as u32);
    buf.put_u32(v3::CALL_REF, ctx.call_id);
    buf.put_u32(v3::CALL_TYPE, ctx.call_type.as_u32());
    buf.put_u32(v3::ORIGINAL_CDPN_REDIRECT_REASON, info.original_cdpn_redirect_reason);
    buf.put_u32(v3::LAST_REDIRECTING_REASON, info.last_redirecting_reason);
    buf.put_u32(v3::CALL_SECURITY_STATUS, CallSecurityState::Unknown.as_u32());

    Ok(buf.finish())
}

fn encode_dynamic(
    alloc: &dyn MessageAllocator,
    fields: &PackedFields,
    info: &CallInfo,
    ctx: &CallContext,
) -> Result<WireMessage> {
    build_dynamic(alloc, MessageId::CallInfoDynamic, DYNAMIC_FIXED_HEADER, fields, |buf| {
        buf.put_u32(dynamic::LINE_ID, ctx.line_instance as u32);
        buf.put_u32(dynamic::CALL_REF, ctx.call_id);
        buf.put_u32(dynamic::CALL_TYPE, ctx.call_type.as_u32());
        buf.put_u32(dynamic::CALL_SECURITY_STATUS, CallSecurityState::NotAuthenticated.as_u32());
        buf.put_u32(dynamic::CALL_INSTANCE, ctx.line_instance as u32);
        buf.put_u32(dynamic::ORIGINAL_CDPN_REDIRECT_REASON, info.original_cdpn_redirect_reason);
        buf.put_u32(dynamic::LAST_REDIRECTING_REASON, info.last_redirecting_reason);
    })
}
