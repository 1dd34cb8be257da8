//! Integration tests for sccp-codec.
//!
//! These tests drive sessions end to end: negotiation, encoding and
//! delivery through a transport.

use std::sync::Arc;
use std::time::Duration;

use sccp_codec::capability::{self, ProtocolFamily};
use sccp_codec::model::{CallContext, CallInfo, CallType, DisplayPrompt, ForwardTarget, LineForwardStatus};
use sccp_codec::protocol::{layout, MessageId, PacketHeader, PACKET_HEADER_SIZE};
use sccp_codec::transport::CaptureTransport;
use sccp_codec::writer::spawn_writer_task;
use sccp_codec::{CodecConfig, CodecError, DeviceSession};
use tokio::io::{duplex, AsyncReadExt};

/// Split a byte stream into (header, body) pairs.
fn split_packets(mut bytes: &[u8]) -> Vec<(PacketHeader, Vec<u8>)> {
    let mut packets = Vec::new();
    while let Some(header) = PacketHeader::decode(bytes) {
        let end = PACKET_HEADER_SIZE + header.body_len();
        packets.push((header, bytes[PACKET_HEADER_SIZE..end].to_vec()));
        bytes = &bytes[end..];
    }
    packets
}

fn capture_session(family: ProtocolFamily, version: u8) -> (DeviceSession, Arc<CaptureTransport>) {
    let transport = Arc::new(CaptureTransport::new());
    let session = DeviceSession::negotiate("SEP0011223344AA", family, version, transport.clone());
    (session, transport)
}

/// Registration sequence over the tokio writer task.
#[tokio::test]
async fn test_registration_over_writer_task() {
    let config = CodecConfig::default();
    let (client, mut server) = duplex(8192);
    let (handle, task) = spawn_writer_task(client, config.writer_config());

    let session = DeviceSession::negotiate("SEP0011223344AA", ProtocolFamily::Sccp, 22, Arc::new(handle))
        .with_config(&config);
    assert_eq!(session.version(), 20);

    session.send_token_ack(0).unwrap();
    session.send_register_ack(30, 60, "D/M/YA").unwrap();
    session.send_display_notify(10, "Welcome").unwrap();

    // token ack 12, register ack 12 + 20, notify 12 + (4 + 1 + 7 -> 12)
    let expected = 12 + 32 + 24;
    let mut buf = vec![0u8; expected];
    tokio::time::timeout(Duration::from_secs(1), server.read_exact(&mut buf))
        .await
        .unwrap()
        .unwrap();

    let packets = split_packets(&buf);
    assert_eq!(packets.len(), 3);

    assert_eq!(packets[0].0.message_id, MessageId::RegisterTokenAck.as_u32());
    assert!(packets[0].1.is_empty());

    assert_eq!(packets[1].0.message_id, MessageId::RegisterAck.as_u32());
    assert_eq!(packets[1].1[16], 20);
    assert_eq!(&packets[1].1[17..20], &[0x20, 0xF1, 0xFF]);

    assert_eq!(packets[2].0.message_id, MessageId::DisplayDynamicNotify.as_u32());
    assert_eq!(&packets[2].1[4..11], b"Welcome");

    drop(session);
    assert!(task.await.unwrap().is_ok());
}

/// The same call rendered for each generation of device.
#[test]
fn test_call_info_per_version() {
    let info = CallInfo {
        calling_party_name: "Alice".into(),
        calling_party_number: "1001".into(),
        called_party_number: "5551234".into(),
        ..Default::default()
    };
    let ctx = CallContext::new(1, 7, CallType::Inbound);

    let mut sizes = Vec::new();
    for version in [3u8, 9, 16] {
        let (session, tx) = capture_session(ProtocolFamily::Sccp, version);
        session.send_call_info(&info, &ctx).unwrap();
        let msg = tx.take().remove(0);
        assert_eq!(msg.body().len() % 4, 0);
        sizes.push((msg.message_id(), msg.body().len()));
    }

    // static 384; V7: 32-byte header, 12 terminators, 16 bytes of text
    assert_eq!(sizes[0], (MessageId::CallInfo, 384));
    assert_eq!(sizes[1].0, MessageId::CallInfoDynamic);
    assert_eq!(sizes[1].1, layout(32 + 12, 16).total_size);
    assert_eq!(sizes[2].0, MessageId::CallInfoDynamic);
    assert!(sizes[2].1 > sizes[1].1);
}

#[test]
fn test_prompt_and_forward_flow() {
    let (session, tx) = capture_session(ProtocolFamily::Sccp, 19);

    session
        .send_display_prompt(&DisplayPrompt {
            line_instance: 2,
            call_id: 99,
            timeout: 0,
            message: "Call forwarded".into(),
        })
        .unwrap();
    session
        .send_call_forward_status(&LineForwardStatus {
            line_instance: 2,
            all: ForwardTarget::to("8000"),
            busy: ForwardTarget::default(),
        })
        .unwrap();

    let msgs = tx.take();
    assert_eq!(msgs[0].message_id(), MessageId::DisplayDynamicPromptStatus);
    assert_eq!(msgs[1].message_id(), MessageId::ForwardStat);
    assert_eq!(&msgs[1].body()[92..96], &[0xFF, 0, 0, 0]);
}

#[test]
fn test_allocation_failure_sends_nothing() {
    let (session, tx) = capture_session(ProtocolFamily::Sccp, 20);
    let session = session.with_config(&CodecConfig::from_json(r#"{"max_message_size": 48}"#).unwrap());

    let err = session.send_user_to_device_data(&"x".repeat(64), 1).unwrap_err();
    assert!(matches!(err, CodecError::AllocationFailed { .. }));
    assert!(tx.is_empty());
}

#[test]
fn test_empty_user_data_sends_nothing() {
    let (session, tx) = capture_session(ProtocolFamily::Spcp, 8);
    session.send_user_to_device_data("", 1).unwrap();
    assert!(tx.is_empty());
}

#[test]
fn test_identical_input_identical_bytes() {
    let (a, a_tx) = capture_session(ProtocolFamily::Sccp, 17);
    let (b, b_tx) = capture_session(ProtocolFamily::Sccp, 18);
    let info = CallInfo {
        called_party_name: "Bob".into(),
        original_called_party_number: "2000".into(),
        ..Default::default()
    };
    let ctx = CallContext::new(1, 3, CallType::Forward);

    a.send_call_info(&info, &ctx).unwrap();
    b.send_call_info(&info, &ctx).unwrap();

    assert_eq!(a_tx.take()[0].to_packet(), b_tx.take()[0].to_packet());
}

#[test]
fn test_tables_valid_and_bounded() {
    capability::validate_tables().unwrap();
    assert_eq!(capability::max_supported_version(ProtocolFamily::Sccp), 20);
    assert_eq!(capability::max_supported_version(ProtocolFamily::Spcp), 8);
}
