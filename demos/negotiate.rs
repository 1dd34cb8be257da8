//! Negotiate a device session and dump the packets it writes.
//!
//! ```text
//! RUST_LOG=debug cargo run --example negotiate -- 17
//! ```

use std::sync::Arc;

use sccp_codec::capability::{self, ProtocolFamily};
use sccp_codec::model::{CallContext, CallInfo, CallType};
use sccp_codec::protocol::{PacketHeader, PACKET_HEADER_SIZE};
use sccp_codec::writer::spawn_writer_task;
use sccp_codec::{CodecConfig, DeviceSession};
use tokio::io::{duplex, AsyncReadExt};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    capability::validate_tables()?;

    let advertised: u8 = std::env::args().nth(1).map(|v| v.parse()).transpose()?.unwrap_or(17);
    let config = CodecConfig::default();

    let (device_side, mut server_side) = duplex(64 * 1024);
    let (handle, writer) = spawn_writer_task(device_side, config.writer_config());

    let session = DeviceSession::negotiate("SEP001122334455", ProtocolFamily::Sccp, advertised, Arc::new(handle))
        .with_config(&config);
    println!(
        "device advertised v{}, negotiated v{} (max v{})",
        advertised,
        session.version(),
        capability::max_supported_version(ProtocolFamily::Sccp)
    );

    session.send_token_ack(0)?;
    session.send_register_ack(30, 60, "D/M/YA")?;
    session.send_display_notify(10, "Registered")?;
    session.send_call_info(
        &CallInfo {
            calling_party_name: "Alice".into(),
            calling_party_number: "1001".into(),
            called_party_number: "5551234".into(),
            ..Default::default()
        },
        &CallContext::new(1, 1, CallType::Inbound),
    )?;
    session.send_user_to_device_data("<CiscoIPPhoneText><Text>Hi</Text></CiscoIPPhoneText>", 1)?;

    drop(session);
    writer.await??;

    let mut stream = Vec::new();
    server_side.read_to_end(&mut stream).await?;

    let mut rest = stream.as_slice();
    while let Some(header) = PacketHeader::decode(rest) {
        let end = PACKET_HEADER_SIZE + header.body_len();
        println!(
            "0x{:04X} len={:<4} {:02X?}",
            header.message_id,
            header.body_len(),
            &rest[PACKET_HEADER_SIZE..end]
        );
        rest = &rest[end..];
    }

    Ok(())
}
