//! Capability negotiation.
//!
//! A device advertises a protocol version when it registers. The server
//! resolves that once into a [`CapabilityDescriptor`] naming the wire
//! encoding of every operation, then dispatches through it for the rest of
//! the session.
//!
//! - [`descriptor`] - the per-version record and protocol families
//! - [`table`] - the static SCCP and SPCP version tables
//! - [`resolver`] - highest-at-or-below lookup with a fallback

pub mod descriptor;
pub mod resolver;
pub mod table;

pub use descriptor::{CapabilityDescriptor, ProtocolFamily};
pub use resolver::{max_supported_version, resolve, validate_tables};
pub use table::{VersionTable, SCCP_TABLE, SPCP_TABLE};
