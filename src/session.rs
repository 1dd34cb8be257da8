//! Per-device session.
//!
//! A [`DeviceSession`] is created once when a device registers. The
//! advertised protocol version is resolved a single time; every send after
//! that dispatches through the cached descriptor.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use sccp_codec::capability::ProtocolFamily;
//! use sccp_codec::transport::CaptureTransport;
//! use sccp_codec::DeviceSession;
//!
//! let transport = Arc::new(CaptureTransport::new());
//! let session = DeviceSession::negotiate("SEP001122334455", ProtocolFamily::Sccp, 17, transport.clone());
//!
//! session.send_display_notify(10, "Hello").unwrap();
//! assert_eq!(transport.take()[0].message_id().as_u32(), 0x0143);
//! ```

use std::sync::Arc;

use crate::capability::{self, CapabilityDescriptor, ProtocolFamily};
use crate::config::CodecConfig;
use crate::error::Result;
use crate::model::{CallContext, CallInfo, DisplayPrompt, LineForwardStatus, RegisterAck};
use crate::protocol::{HeapAllocator, MessageAllocator, WireMessage};
use crate::transport::Transport;

/// Encoding state for one registered device.
#[derive(Clone)]
pub struct DeviceSession {
    device_id: String,
    descriptor: &'static CapabilityDescriptor,
    transport: Arc<dyn Transport>,
    allocator: Arc<dyn MessageAllocator>,
}

impl DeviceSession {
    /// Resolve `advertised_version` and bind the result to `transport`.
    pub fn negotiate(
        device_id: impl Into<String>,
        family: ProtocolFamily,
        advertised_version: u8,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let device_id = device_id.into();
        let descriptor = capability::resolve(family, advertised_version);
        tracing::debug!(
            device = %device_id,
            %family,
            advertised = advertised_version,
            negotiated = descriptor.version,
            "device session negotiated"
        );

        Self {
            device_id,
            descriptor,
            transport,
            allocator: Arc::new(HeapAllocator::default()),
        }
    }

    /// Use `allocator` for every message from now on.
    pub fn with_allocator(mut self, allocator: Arc<dyn MessageAllocator>) -> Self {
        self.allocator = allocator;
        self
    }

    /// Apply the allocation limits from `config`.
    pub fn with_config(self, config: &CodecConfig) -> Self {
        self.with_allocator(Arc::new(config.allocator()))
    }

    #[inline]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Negotiated descriptor.
    #[inline]
    pub fn descriptor(&self) -> &'static CapabilityDescriptor {
        self.descriptor
    }

    /// Negotiated protocol version.
    #[inline]
    pub fn version(&self) -> u8 {
        self.descriptor.version
    }

    #[inline]
    pub fn family(&self) -> ProtocolFamily {
        self.descriptor.family
    }

    pub fn send_call_info(&self, info: &CallInfo, ctx: &CallContext) -> Result<()> {
        let msg = self
            .descriptor
            .call_info
            .encode(self.allocator.as_ref(), info, ctx)?;
        self.dispatch("call_info", msg);
        Ok(())
    }

    pub fn send_dialed_number(&self, called_number: &str, ctx: &CallContext) -> Result<()> {
        let msg = self
            .descriptor
            .dialed_number
            .encode(self.allocator.as_ref(), called_number, ctx)?;
        self.dispatch("dialed_number", msg);
        Ok(())
    }

    /// Acknowledge registration. The protocol version sent is the negotiated one.
    pub fn send_register_ack(&self, keep_alive: u32, secondary_keep_alive: u32, date_template: &str) -> Result<()> {
        let ack = RegisterAck {
            keep_alive,
            secondary_keep_alive,
            protocol_version: self.descriptor.version,
            date_template: date_template.to_owned(),
        };
        let msg = self.descriptor.register_ack.encode(self.allocator.as_ref(), &ack)?;
        self.dispatch("register_ack", msg);
        Ok(())
    }

    pub fn send_display_prompt(&self, prompt: &DisplayPrompt) -> Result<()> {
        let msg = self
            .descriptor
            .display_prompt
            .encode_prompt(self.allocator.as_ref(), prompt)?;
        self.dispatch("display_prompt", msg);
        Ok(())
    }

    pub fn send_display_notify(&self, timeout: u32, message: &str) -> Result<()> {
        let msg = self
            .descriptor
            .display_notify
            .encode_notify(self.allocator.as_ref(), timeout, message)?;
        self.dispatch("display_notify", msg);
        Ok(())
    }

    pub fn send_display_priority_notify(&self, priority: u32, timeout: u32, message: &str) -> Result<()> {
        let msg = self.descriptor.display_priority_notify.encode_priority_notify(
            self.allocator.as_ref(),
            priority,
            timeout,
            message,
        )?;
        self.dispatch("display_priority_notify", msg);
        Ok(())
    }

    pub fn send_call_forward_status(&self, status: &LineForwardStatus) -> Result<()> {
        let msg = self
            .descriptor
            .call_forward_status
            .encode(self.allocator.as_ref(), status)?;
        self.dispatch("call_forward_status", msg);
        Ok(())
    }

    /// Push application data. An empty payload sends nothing.
    pub fn send_user_to_device_data(&self, data: &str, priority: u32) -> Result<()> {
        let encoded = self
            .descriptor
            .user_to_device_data
            .encode(self.allocator.as_ref(), data, priority)?;
        if let Some(msg) = encoded {
            self.dispatch("user_to_device_data", msg);
        }
        Ok(())
    }

    pub fn send_token_ack(&self, features: u32) -> Result<()> {
        let msg = self.descriptor.token_ack.encode_ack(self.allocator.as_ref(), features)?;
        self.dispatch("token_ack", msg);
        Ok(())
    }

    pub fn send_token_reject(&self, backoff: u32, features: u32) -> Result<()> {
        let msg = self
            .descriptor
            .token_reject
            .encode_reject(self.allocator.as_ref(), backoff, features)?;
        self.dispatch("token_reject", msg);
        Ok(())
    }

    fn dispatch(&self, operation: &'static str, msg: WireMessage) {
        tracing::debug!(
            device = %self.device_id,
            operation,
            message_id = msg.message_id().as_u32(),
            len = msg.body().len(),
            "sending"
        );
        self.transport.send(msg);
    }
}

impl std::fmt::Debug for DeviceSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceSession")
            .field("device_id", &self.device_id)
            .field("family", &self.descriptor.family)
            .field("version", &self.descriptor.version)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;
    use crate::model::{CallType, ForwardTarget};
    use crate::protocol::MessageId;
    use crate::transport::CaptureTransport;

    fn session(family: ProtocolFamily, version: u8) -> (DeviceSession, Arc<CaptureTransport>) {
        let transport = Arc::new(CaptureTransport::new());
        let session = DeviceSession::negotiate("SEP000000000001", family, version, transport.clone());
        (session, transport)
    }

    #[test]
    fn test_negotiate_caches_descriptor() {
        let (s, _) = session(ProtocolFamily::Sccp, 7);
        assert_eq!(s.version(), 5);
        assert_eq!(s.family(), ProtocolFamily::Sccp);
        assert!(std::ptr::eq(s.descriptor(), capability::resolve(ProtocolFamily::Sccp, 5)));
    }

    #[test]
    fn test_display_dispatch_follows_version() {
        let (old, old_tx) = session(ProtocolFamily::Sccp, 5);
        let (new, new_tx) = session(ProtocolFamily::Sccp, 11);

        old.send_display_notify(5, "Hi").unwrap();
        new.send_display_notify(5, "Hi").unwrap();

        assert_eq!(old_tx.take()[0].message_id(), MessageId::DisplayNotify);
        assert_eq!(new_tx.take()[0].message_id(), MessageId::DisplayDynamicNotify);
    }

    #[test]
    fn test_register_ack_uses_negotiated_version() {
        let (s, tx) = session(ProtocolFamily::Sccp, 18);
        s.send_register_ack(30, 60, "D/M/YA").unwrap();

        let msgs = tx.take();
        let body = msgs[0].body();
        assert_eq!(body[16], 17);
        assert_eq!(&body[17..20], &[0x20, 0xF1, 0xFF]);
    }

    #[test]
    fn test_call_info_and_dialed_number() {
        let (s, tx) = session(ProtocolFamily::Sccp, 20);
        let ctx = CallContext::new(1, 42, CallType::Outbound);
        let info = CallInfo {
            called_party_number: "5551234".into(),
            ..Default::default()
        };

        s.send_call_info(&info, &ctx).unwrap();
        s.send_dialed_number("5551234", &ctx).unwrap();

        let msgs = tx.take();
        assert_eq!(msgs[0].message_id(), MessageId::CallInfoDynamic);
        assert_eq!(msgs[1].message_id(), MessageId::DialedNumber);
        assert_eq!(msgs[1].body().len(), 36);
    }

    #[test]
    fn test_forward_status() {
        let (s, tx) = session(ProtocolFamily::Sccp, 19);
        let status = LineForwardStatus {
            line_instance: 1,
            all: ForwardTarget::to("2000"),
            ..Default::default()
        };
        s.send_call_forward_status(&status).unwrap();
        assert_eq!(tx.take()[0].body().len(), 96);
    }

    #[test]
    fn test_spcp_tokens() {
        let (s, tx) = session(ProtocolFamily::Spcp, 8);
        s.send_token_ack(3).unwrap();
        s.send_token_reject(60, 3).unwrap();

        let msgs = tx.take();
        assert_eq!(msgs[0].message_id(), MessageId::SpcpRegisterTokenAck);
        assert_eq!(msgs[1].message_id(), MessageId::SpcpRegisterTokenReject);
    }

    #[test]
    fn test_empty_user_data_sends_nothing() {
        let (s, tx) = session(ProtocolFamily::Sccp, 17);
        s.send_user_to_device_data("", 0).unwrap();
        assert!(tx.is_empty());

        s.send_user_to_device_data("<xml/>", 0).unwrap();
        assert_eq!(tx.len(), 1);
    }

    #[test]
    fn test_allocation_failure_propagates() {
        let (s, tx) = session(ProtocolFamily::Sccp, 3);
        let s = s.with_config(&CodecConfig {
            max_message_size: 64,
            ..Default::default()
        });

        let err = s
            .send_call_info(&CallInfo::default(), &CallContext::default())
            .unwrap_err();
        assert!(matches!(err, CodecError::AllocationFailed { requested: 384, limit: 64, .. }));
        assert!(tx.is_empty());

        // small messages still go through
        s.send_display_notify(0, "ok").unwrap();
        assert_eq!(tx.len(), 1);
    }

    #[test]
    fn test_debug_omits_transport() {
        let (s, _) = session(ProtocolFamily::Spcp, 0);
        let dbg = format!("{:?}", s);
        assert!(dbg.contains("SEP000000000001"));
        assert!(dbg.contains("Spcp"));
    }
}
