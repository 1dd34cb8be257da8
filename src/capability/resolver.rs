//! Version negotiation against the built-in tables.

use super::descriptor::{CapabilityDescriptor, ProtocolFamily};
use super::table::{VersionTable, SCCP_TABLE, SPCP_TABLE};
use crate::error::Result;

/// Built-in table for `family`.
#[inline]
pub fn table(family: ProtocolFamily) -> &'static VersionTable {
    match family {
        ProtocolFamily::Sccp => &SCCP_TABLE,
        ProtocolFamily::Spcp => &SPCP_TABLE,
    }
}

/// Pick the descriptor for a device advertising `advertised_version`.
///
/// Returns the highest assigned version at or below the advertised one, or
/// the family's fallback (SCCP v3, SPCP v0). Never fails.
///
/// # Example
///
/// ```
/// use sccp_codec::capability::{resolve, ProtocolFamily};
///
/// assert_eq!(resolve(ProtocolFamily::Sccp, 7).version, 5);
/// assert_eq!(resolve(ProtocolFamily::Sccp, 2).version, 3);
/// assert_eq!(resolve(ProtocolFamily::Sccp, 25).version, 20);
/// ```
pub fn resolve(family: ProtocolFamily, advertised_version: u8) -> &'static CapabilityDescriptor {
    let descriptor = table(family).resolve(advertised_version);
    tracing::debug!(
        %family,
        advertised = advertised_version,
        negotiated = descriptor.version,
        "resolved protocol version"
    );
    descriptor
}

/// Highest version with a slot in `family`'s table.
#[inline]
pub fn max_supported_version(family: ProtocolFamily) -> u8 {
    table(family).max_version()
}

/// Validate every built-in table. Call once at startup.
pub fn validate_tables() -> Result<()> {
    SCCP_TABLE.validate()?;
    SPCP_TABLE.validate()
}
