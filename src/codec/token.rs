//! Registration token acknowledgement and rejection.

use crate::error::Result;
use crate::protocol::{MessageAllocator, MessageId, WireMessage};

/// Token message family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenEncoding {
    /// 0x0098 ack with no body, 0x0099 reject carrying the wait time.
    Sccp,
    /// 0x8100 ack and 0x8101 reject, both carrying the feature word.
    Spcp,
}

impl TokenEncoding {
    /// Grant the device its registration token.
    pub fn encode_ack(self, alloc: &dyn MessageAllocator, features: u32) -> Result<WireMessage> {
        match self {
            Self::Sccp => Ok(alloc.allocate(MessageId::RegisterTokenAck, 0)?.finish()),
            Self::Spcp => {
                let mut buf = alloc.allocate(MessageId::SpcpRegisterTokenAck, 4)?;
                buf.put_u32(0, features);
                Ok(buf.finish())
            }
        }
    }

    /// Refuse the token; SCCP devices retry after `backoff` seconds.
    pub fn encode_reject(self, alloc: &dyn MessageAllocator, backoff: u32, features: u32) -> Result<WireMessage> {
        let (id, word) = match self {
            Self::Sccp => (MessageId::RegisterTokenReject, backoff),
            Self::Spcp => (MessageId::SpcpRegisterTokenReject, features),
        };
        let mut buf = alloc.allocate(id, 4)?;
        buf.put_u32(0, word);
        Ok(buf.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::HeapAllocator;

    #[test]
    fn test_sccp_ack_empty_body() {
        let msg = TokenEncoding::Sccp
            .encode_ack(&HeapAllocator::default(), 7)
            .unwrap();
        assert_eq!(msg.message_id(), MessageId::RegisterTokenAck);
        assert!(msg.body().is_empty());
        assert_eq!(msg.header().length, 4);
    }

    #[test]
    fn test_sccp_reject_carries_backoff() {
        let msg = TokenEncoding::Sccp
            .encode_reject(&HeapAllocator::default(), 60, 7)
            .unwrap();
        assert_eq!(msg.message_id(), MessageId::RegisterTokenReject);
        assert_eq!(msg.body(), &[60, 0, 0, 0]);
    }

    #[test]
    fn test_spcp_messages_carry_features() {
        let alloc = HeapAllocator::default();

        let ack = TokenEncoding::Spcp.encode_ack(&alloc, 0x11).unwrap();
        assert_eq!(ack.message_id(), MessageId::SpcpRegisterTokenAck);
        assert_eq!(ack.body(), &[0x11, 0, 0, 0]);

        let reject = TokenEncoding::Spcp.encode_reject(&alloc, 60, 0x22).unwrap();
        assert_eq!(reject.message_id(), MessageId::SpcpRegisterTokenReject);
        assert_eq!(reject.body(), &[0x22, 0, 0, 0]);
    }
}
