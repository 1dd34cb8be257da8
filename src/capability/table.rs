//! Version tables.
//!
//! A table is indexed by protocol version. Only versions that changed at
//! least one encoding have a slot; everything in between resolves down to
//! the nearest assigned slot.

use std::ptr;

use super::descriptor::{CapabilityDescriptor, ProtocolFamily};
use crate::codec::{
    CallInfoEncoding as Ci, DialedNumberEncoding as Dn, DisplayEncoding as Disp,
    ForwardStatusEncoding as Fwd, RegisterAckEncoding as Ra,
};
use crate::error::{CodecError, Result};

/// Sparse, version-indexed descriptors of one family.
#[derive(Debug)]
pub struct VersionTable {
    family: ProtocolFamily,
    slots: &'static [Option<&'static CapabilityDescriptor>],
    fallback: &'static CapabilityDescriptor,
}

impl VersionTable {
    pub const fn new(
        family: ProtocolFamily,
        slots: &'static [Option<&'static CapabilityDescriptor>],
        fallback: &'static CapabilityDescriptor,
    ) -> Self {
        Self {
            family,
            slots,
            fallback,
        }
    }

    #[inline]
    pub fn family(&self) -> ProtocolFamily {
        self.family
    }

    /// Descriptor returned when nothing better matches.
    #[inline]
    pub fn fallback(&self) -> &'static CapabilityDescriptor {
        self.fallback
    }

    /// Descriptor assigned to exactly `version`, if any.
    pub fn get(&self, version: u8) -> Option<&'static CapabilityDescriptor> {
        self.slots.get(version as usize).copied().flatten()
    }

    /// Highest version this table knows about.
    #[inline]
    pub fn max_version(&self) -> u8 {
        self.slots.len().saturating_sub(1).min(u8::MAX as usize) as u8
    }

    /// Highest assigned descriptor at or below `advertised`.
    ///
    /// Slot 0 is never scanned; devices below the first assigned version
    /// get the fallback.
    pub fn resolve(&self, advertised: u8) -> &'static CapabilityDescriptor {
        self.slots
            .iter()
            .skip(1)
            .rev()
            .flatten()
            .find(|d| d.version <= advertised)
            .copied()
            .unwrap_or(self.fallback)
    }

    /// Check the table's invariants.
    pub fn validate(&self) -> Result<()> {
        let fail = |reason: String| CodecError::InvalidVersionTable {
            family: self.family,
            reason,
        };

        if self.slots.is_empty() || self.slots.len() > u8::MAX as usize + 1 {
            return Err(fail(format!("{} slots", self.slots.len())));
        }
        if self.family == ProtocolFamily::Sccp && self.slots[0].is_some() {
            return Err(fail("slot 0 must be empty".into()));
        }

        for (index, slot) in self.slots.iter().enumerate() {
            let Some(d) = slot else { continue };
            if d.version as usize != index {
                return Err(fail(format!("slot {} holds version {}", index, d.version)));
            }
            if d.family != self.family {
                return Err(fail(format!("slot {} holds a {} descriptor", index, d.family)));
            }
        }

        match self.get(self.fallback.version) {
            Some(d) if ptr::eq(d, self.fallback) => Ok(()),
            _ => Err(fail(format!(
                "fallback version {} is not assigned",
                self.fallback.version
            ))),
        }
    }
}

static SCCP_V3: CapabilityDescriptor = CapabilityDescriptor::sccp(3, Ci::V3, Dn::V3, Ra::V3, Disp::Static, Fwd::V3);
static SCCP_V5: CapabilityDescriptor = CapabilityDescriptor::sccp(5, Ci::V3, Dn::V3, Ra::V4, Disp::Static, Fwd::V3);
static SCCP_V9: CapabilityDescriptor = CapabilityDescriptor::sccp(9, Ci::V7, Dn::V3, Ra::V4, Disp::Dynamic, Fwd::V3);
static SCCP_V10: CapabilityDescriptor = CapabilityDescriptor::sccp(10, Ci::V7, Dn::V3, Ra::V4, Disp::Dynamic, Fwd::V3);
static SCCP_V11: CapabilityDescriptor = CapabilityDescriptor::sccp(11, Ci::V7, Dn::V3, Ra::V11, Disp::Dynamic, Fwd::V3);
static SCCP_V15: CapabilityDescriptor = CapabilityDescriptor::sccp(15, Ci::V7, Dn::V3, Ra::V11, Disp::Dynamic, Fwd::V3);
static SCCP_V16: CapabilityDescriptor = CapabilityDescriptor::sccp(16, Ci::V16, Dn::V3, Ra::V11, Disp::Dynamic, Fwd::V3);
static SCCP_V17: CapabilityDescriptor = CapabilityDescriptor::sccp(17, Ci::V16, Dn::V3, Ra::V11, Disp::Dynamic, Fwd::V3);
static SCCP_V19: CapabilityDescriptor = CapabilityDescriptor::sccp(19, Ci::V16, Dn::V19, Ra::V11, Disp::Dynamic, Fwd::V19);
static SCCP_V20: CapabilityDescriptor = CapabilityDescriptor::sccp(20, Ci::V16, Dn::V19, Ra::V11, Disp::Dynamic, Fwd::V19);

/// SCCP versions 0 to 20.
pub static SCCP_TABLE: VersionTable = VersionTable::new(
    ProtocolFamily::Sccp,
    &[
        None,
        None,
        None,
        Some(&SCCP_V3),
        None,
        Some(&SCCP_V5),
        None,
        None,
        None,
        Some(&SCCP_V9),
        Some(&SCCP_V10),
        Some(&SCCP_V11),
        None,
        None,
        None,
        Some(&SCCP_V15),
        Some(&SCCP_V16),
        Some(&SCCP_V17),
        None,
        Some(&SCCP_V19),
        Some(&SCCP_V20),
    ],
    &SCCP_V3,
);

static SPCP_V0: CapabilityDescriptor = CapabilityDescriptor::spcp(0);
static SPCP_V8: CapabilityDescriptor = CapabilityDescriptor::spcp(8);

/// SPCP versions 0 to 8.
pub static SPCP_TABLE: VersionTable = VersionTable::new(
    ProtocolFamily::Spcp,
    &[
        Some(&SPCP_V0),
        None,
        None,
        None,
        None,
        None,
        None,
        None,
        Some(&SPCP_V8),
    ],
    &SPCP_V0,
);
