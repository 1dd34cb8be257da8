//! # sccp-codec
//!
//! Version-gated message encoder for the Skinny Client Control Protocol
//! (SCCP) and its SPCP variant.
//!
//! Devices advertise a protocol version when they register. Each version
//! maps to a [`CapabilityDescriptor`](capability::CapabilityDescriptor)
//! naming the wire format of every outgoing operation. Older versions use
//! fixed-width NUL-padded fields; newer ones pack optional strings into a
//! variable-length, 4-byte aligned tail.
//!
//! ## Layers
//!
//! - [`protocol`] - packet header, layout arithmetic, field packing, buffers
//! - [`codec`] - one encoder per operation, with a variant per wire format
//! - [`capability`] - version tables and negotiation
//! - [`session`] - per-device dispatch through the negotiated descriptor
//! - [`writer`] / [`transport`] - delivery to the device connection
//!
//! ## Example
//!
//! ```ignore
//! use sccp_codec::{capability::ProtocolFamily, writer, CodecConfig, DeviceSession};
//!
//! #[tokio::main]
//! async fn main() -> sccp_codec::Result<()> {
//!     sccp_codec::capability::validate_tables()?;
//!
//!     let config = CodecConfig::default();
//!     let (handle, task) = writer::spawn_writer_task(socket, config.writer_config());
//!
//!     let session = DeviceSession::negotiate("SEP001122334455", ProtocolFamily::Sccp, 17, Arc::new(handle))
//!         .with_config(&config);
//!     session.send_register_ack(30, 60, "D/M/YA")?;
//!     Ok(())
//! }
//! ```

pub mod capability;
pub mod codec;
pub mod config;
pub mod error;
pub mod model;
pub mod protocol;
pub mod session;
pub mod transport;
pub mod writer;

pub use config::CodecConfig;
pub use error::{CodecError, Result};
pub use session::DeviceSession;
