//! User-to-device data (version 1).
//!
//! Only a dynamic format exists. The 40-byte integer header is followed by
//! the payload as a single packed field:
//! ```text
//! 0  applicationId     u32   0
//! 4  lineInstance      u32   0
//! 8  callReference     u32   1
//! 12 transactionId     u32   1
//! 16 dataLength        u32
//! 20 sequenceFlag      u32   2
//! 24 displayPriority   u32
//! 28 conferenceId      u32   0
//! 32 appInstanceId     u32   0
//! 36 routingId         u32   0
//! 40 data
//! ```

use super::build_dynamic;
use crate::error::Result;
use crate::protocol::{wire_str, MessageAllocator, MessageId, PackedFields, WireMessage};

/// Integer header in front of the payload.
const FIXED_HEADER: usize = 40;

const CALL_REFERENCE: usize = 8;
const TRANSACTION_ID: usize = 12;
const DATA_LENGTH: usize = 16;
const SEQUENCE_FLAG: usize = 20;
const DISPLAY_PRIORITY: usize = 24;

/// Sequence flag for a single-segment payload.
const SEQUENCE_SINGLE: u32 = 2;

/// User-to-device data wire format.
///
/// Every version that supports the message uses the same layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserDataEncoding {
    Version1,
}

impl UserDataEncoding {
    /// Encode `data` for the device's application layer.
    ///
    /// Returns `Ok(None)` for an empty payload: nothing is allocated and
    /// there is nothing to send. The payload ends at its first NUL.
    pub fn encode(self, alloc: &dyn MessageAllocator, data: &str, priority: u32) -> Result<Option<WireMessage>> {
        let data = wire_str(data);
        if data.is_empty() {
            tracing::debug!("user data empty, skipping");
            return Ok(None);
        }

        let fields = PackedFields::pack([Some(data)]);
        let msg = match self {
            Self::Version1 => build_dynamic(
                alloc,
                MessageId::UserToDeviceDataVersion1,
                FIXED_HEADER,
                &fields,
                |buf| {
                    buf.put_u32(CALL_REFERENCE, 1);
                    buf.put_u32(TRANSACTION_ID, 1);
                    buf.put_u32(DATA_LENGTH, data.len() as u32);
                    buf.put_u32(SEQUENCE_FLAG, SEQUENCE_SINGLE);
                    buf.put_u32(DISPLAY_PRIORITY, priority);
                },
            )?,
        };
        Ok(Some(msg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;
    use crate::protocol::HeapAllocator;

    fn encode(alloc: &dyn MessageAllocator, data: &str, priority: u32) -> Result<Option<WireMessage>> {
        UserDataEncoding::Version1.encode(alloc, data, priority)
    }

    fn body_len(data: &str) -> usize {
        encode(&HeapAllocator::default(), data, 0)
            .unwrap()
            .unwrap()
            .body()
            .len()
    }

    #[test]
    fn test_empty_payload_skipped() {
        // A zero-size limit proves nothing is allocated.
        let alloc = HeapAllocator::new(0);
        assert!(encode(&alloc, "", 1).unwrap().is_none());
        assert!(encode(&alloc, "\0<xml/>", 1).unwrap().is_none());
    }

    #[test]
    fn test_layout() {
        let xml = "<CiscoIPPhoneText/>";
        let msg = encode(&HeapAllocator::default(), xml, 1).unwrap().unwrap();
        let body = msg.body();

        assert_eq!(msg.message_id(), MessageId::UserToDeviceDataVersion1);
        // 40 + 1 terminator + 19 = 60, already aligned
        assert_eq!(body.len(), 60);
        assert_eq!(&body[0..8], &[0; 8]);
        assert_eq!(&body[8..12], &[1, 0, 0, 0]);
        assert_eq!(&body[12..16], &[1, 0, 0, 0]);
        assert_eq!(&body[16..20], &[19, 0, 0, 0]);
        assert_eq!(&body[20..24], &[2, 0, 0, 0]);
        assert_eq!(&body[24..28], &[1, 0, 0, 0]);
        assert_eq!(&body[28..40], &[0; 12]);
        assert_eq!(&body[40..59], xml.as_bytes());
        assert_eq!(body[59], 0);
    }

    #[test]
    fn test_body_size_counts_terminator() {
        // The payload always has room for its terminator after the 40-byte
        // header, so lengths 0 and 1 mod 4 round up one word further than a
        // 39-byte header would.
        assert_eq!(body_len("abc"), 44);
        assert_eq!(body_len("abcd"), 48);
        assert_eq!(body_len("abcde"), 48);
        assert_eq!(body_len("abcdefg"), 48);
        assert_eq!(body_len("abcdefgh"), 52);
    }

    #[test]
    fn test_payload_ends_at_nul() {
        let msg = encode(&HeapAllocator::default(), "abcd\0tail", 0).unwrap().unwrap();
        let body = msg.body();

        assert_eq!(body.len(), 48);
        assert_eq!(&body[16..20], &[4, 0, 0, 0]);
        assert_eq!(&body[40..45], b"abcd\0");
        assert!(body[45..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_oversized_payload_fails() {
        let alloc = HeapAllocator::new(64);
        let err = encode(&alloc, &"x".repeat(100), 0).unwrap_err();
        assert!(matches!(err, CodecError::AllocationFailed { .. }));
    }
}
