//! Domain inputs the encoders read.
//!
//! These mirror the call, line and device state owned by the call-control
//! layer. The codec only reads them; nothing here is validated.
//!
//! All types deserialize with serde so test fixtures and callers can build
//! them from JSON:
//!
//! ```
//! use sccp_codec::model::CallInfo;
//!
//! let info: CallInfo = serde_json::from_str(r#"{"called_party_number": "5551234"}"#).unwrap();
//! assert_eq!(info.called_party_number, "5551234");
//! assert!(info.calling_party_name.is_empty());
//! ```

use serde::Deserialize;

/// Caller-id and redirect metadata of a call.
///
/// Empty strings mean "absent".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CallInfo {
    pub calling_party_name: String,
    pub calling_party_number: String,
    pub called_party_name: String,
    pub called_party_number: String,
    pub original_called_party_name: String,
    pub original_called_party_number: String,
    pub last_redirecting_party_name: String,
    pub last_redirecting_party_number: String,
    pub original_calling_party_number: String,
    pub cgpn_voice_mailbox: String,
    pub cdpn_voice_mailbox: String,
    pub original_cdpn_voice_mailbox: String,
    pub last_redirecting_voice_mailbox: String,
    pub original_cdpn_redirect_reason: u32,
    pub last_redirecting_reason: u32,
}

/// Direction of a call as shown on the device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u32)]
pub enum CallType {
    #[default]
    Inbound = 1,
    Outbound = 2,
    Forward = 3,
}

impl CallType {
    /// Wire value.
    #[inline]
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

/// Security indication carried in call-info messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum CallSecurityState {
    Unknown = 0,
    NotAuthenticated = 1,
    Authenticated = 2,
    Encrypted = 3,
}

impl CallSecurityState {
    /// Wire value.
    #[inline]
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

/// Which call on which line a message refers to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CallContext {
    /// Line instance on the device (1-based).
    pub line_instance: u8,
    /// Call reference.
    pub call_id: u32,
    pub call_type: CallType,
}

impl CallContext {
    pub fn new(line_instance: u8, call_id: u32, call_type: CallType) -> Self {
        Self {
            line_instance,
            call_id,
            call_type,
        }
    }
}

/// One forward rule on a line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ForwardTarget {
    pub enabled: bool,
    pub number: String,
}

impl ForwardTarget {
    /// An enabled forward to `number`.
    pub fn to(number: impl Into<String>) -> Self {
        Self {
            enabled: true,
            number: number.into(),
        }
    }
}

/// Forward state of one line on one device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LineForwardStatus {
    pub line_instance: u8,
    /// Forward all calls.
    pub all: ForwardTarget,
    /// Forward when busy.
    pub busy: ForwardTarget,
}

impl LineForwardStatus {
    /// Whether any forward rule is active.
    #[inline]
    pub fn is_forwarding(&self) -> bool {
        self.all.enabled || self.busy.enabled
    }
}

/// Registration acknowledgement parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegisterAck {
    /// Keep-alive interval in seconds.
    pub keep_alive: u32,
    /// Keep-alive interval towards the secondary server.
    pub secondary_keep_alive: u32,
    /// Negotiated protocol version echoed to the device.
    pub protocol_version: u8,
    /// Date format template such as `"D/M/YA"`.
    pub date_template: String,
}

/// Prompt line text for a call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DisplayPrompt {
    pub line_instance: u8,
    pub call_id: u32,
    /// Seconds to show the prompt, 0 for no timeout.
    pub timeout: u32,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_type_wire_values() {
        assert_eq!(CallType::Inbound.as_u32(), 1);
        assert_eq!(CallType::Outbound.as_u32(), 2);
        assert_eq!(CallType::Forward.as_u32(), 3);
    }

    #[test]
    fn test_forward_status_from_json() {
        let status: LineForwardStatus = serde_json::from_str(
            r#"{"line_instance": 2, "busy": {"enabled": true, "number": "8000"}}"#,
        )
        .unwrap();

        assert_eq!(status.line_instance, 2);
        assert!(!status.all.enabled);
        assert_eq!(status.busy, ForwardTarget::to("8000"));
        assert!(status.is_forwarding());
    }

    #[test]
    fn test_call_context_from_json() {
        let ctx: CallContext =
            serde_json::from_str(r#"{"line_instance": 1, "call_id": 42, "call_type": "outbound"}"#)
                .unwrap();
        assert_eq!(ctx, CallContext::new(1, 42, CallType::Outbound));
    }
}
