//! Capability descriptors.

use std::fmt;

use crate::codec::{
    CallInfoEncoding, DialedNumberEncoding, DisplayEncoding, ForwardStatusEncoding, RegisterAckEncoding,
    TokenEncoding, UserDataEncoding,
};

/// Protocol family a device speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolFamily {
    /// Skinny Client Control Protocol.
    Sccp,
    /// SPCP variant; its own table, token messages and versions.
    Spcp,
}

impl fmt::Display for ProtocolFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sccp => f.write_str("SCCP"),
            Self::Spcp => f.write_str("SPCP"),
        }
    }
}

/// The wire encoding used for every operation at one protocol version.
///
/// Descriptors are `static` and shared by all devices that negotiate the
/// same version; they are never built at runtime.
#[derive(Debug, PartialEq, Eq)]
pub struct CapabilityDescriptor {
    pub family: ProtocolFamily,
    pub version: u8,
    pub call_info: CallInfoEncoding,
    pub dialed_number: DialedNumberEncoding,
    pub register_ack: RegisterAckEncoding,
    pub display_prompt: DisplayEncoding,
    pub display_notify: DisplayEncoding,
    pub display_priority_notify: DisplayEncoding,
    pub call_forward_status: ForwardStatusEncoding,
    pub user_to_device_data: UserDataEncoding,
    pub token_ack: TokenEncoding,
    pub token_reject: TokenEncoding,
}

impl CapabilityDescriptor {
    /// SCCP descriptor. All display operations share one encoding.
    pub const fn sccp(
        version: u8,
        call_info: CallInfoEncoding,
        dialed_number: DialedNumberEncoding,
        register_ack: RegisterAckEncoding,
        display: DisplayEncoding,
        call_forward_status: ForwardStatusEncoding,
    ) -> Self {
        Self {
            family: ProtocolFamily::Sccp,
            version,
            call_info,
            dialed_number,
            register_ack,
            display_prompt: display,
            display_notify: display,
            display_priority_notify: display,
            call_forward_status,
            user_to_device_data: UserDataEncoding::Version1,
            token_ack: TokenEncoding::Sccp,
            token_reject: TokenEncoding::Sccp,
        }
    }

    /// SPCP descriptor. Every SPCP version uses the same encodings.
    pub const fn spcp(version: u8) -> Self {
        Self {
            family: ProtocolFamily::Spcp,
            version,
            call_info: CallInfoEncoding::V3,
            dialed_number: DialedNumberEncoding::V3,
            register_ack: RegisterAckEncoding::V4,
            display_prompt: DisplayEncoding::Dynamic,
            display_notify: DisplayEncoding::Dynamic,
            display_priority_notify: DisplayEncoding::Dynamic,
            call_forward_status: ForwardStatusEncoding::V3,
            user_to_device_data: UserDataEncoding::Version1,
            token_ack: TokenEncoding::Spcp,
            token_reject: TokenEncoding::Spcp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_display() {
        assert_eq!(ProtocolFamily::Sccp.to_string(), "SCCP");
        assert_eq!(ProtocolFamily::Spcp.to_string(), "SPCP");
    }

    #[test]
    fn test_spcp_uses_spcp_tokens() {
        let d = CapabilityDescriptor::spcp(8);
        assert_eq!(d.family, ProtocolFamily::Spcp);
        assert_eq!(d.token_ack, TokenEncoding::Spcp);
        assert_eq!(d.token_reject, TokenEncoding::Spcp);
    }
}
