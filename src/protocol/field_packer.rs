//! Packed optional string fields for dynamic layouts.
//!
//! Dynamic messages carry their strings in one trailing region:
//! ```text
//! ┌─────────┬────┬────┬─────────┬────┬─────┐
//! │ field 0 │ \0 │ \0 │ field 2 │ \0 │ ... │
//! └─────────┴────┴────┴─────────┴────┴─────┘
//!             ▲ field 1 absent: terminator only
//! ```
//!
//! Absent and empty fields are the same thing on the wire. Terminators are
//! not counted in [`PackedFields::total_len`]; callers add them to the fixed
//! header size instead.
//!
//! Devices read every field as a C string, so a value ends at its first NUL
//! (see [`wire_str`]). Anything after it is never packed.

/// The part of `value` a device would read: everything before the first NUL.
///
/// ```
/// use sccp_codec::protocol::wire_str;
///
/// assert_eq!(wire_str("1001\0x"), "1001");
/// assert_eq!(wire_str("1001"), "1001");
/// ```
#[inline]
pub fn wire_str(value: &str) -> &str {
    match value.find('\0') {
        Some(end) => &value[..end],
        None => value,
    }
}

/// Result of packing an ordered list of optional fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedFields {
    bytes: Vec<u8>,
    field_lengths: Vec<usize>,
    total_len: usize,
}

impl PackedFields {
    /// Pack `fields` in order, one terminator after each.
    ///
    /// # Example
    ///
    /// ```
    /// use sccp_codec::protocol::PackedFields;
    ///
    /// let packed = PackedFields::pack([Some("12"), None, Some("")]);
    /// assert_eq!(packed.as_bytes(), b"12\0\0\0");
    /// assert_eq!(packed.total_len(), 2);
    /// assert_eq!(packed.field_count(), 3);
    /// ```
    pub fn pack<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let fields: Vec<&[u8]> = fields
            .into_iter()
            .map(|f| f.map(|s| wire_str(s).as_bytes()).unwrap_or_default())
            .collect();

        let field_lengths: Vec<usize> = fields.iter().map(|f| f.len()).collect();
        let total_len: usize = field_lengths.iter().sum();

        let mut bytes = Vec::with_capacity(total_len + fields.len());
        for field in &fields {
            bytes.extend_from_slice(field);
            bytes.push(0);
        }
        debug_assert_eq!(bytes.len(), total_len + fields.len());

        Self {
            bytes,
            field_lengths,
            total_len,
        }
    }

    /// Packed region, terminators included.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Sum of raw field lengths, terminators excluded.
    #[inline]
    pub fn total_len(&self) -> usize {
        self.total_len
    }

    /// Number of fields (and therefore terminators).
    #[inline]
    pub fn field_count(&self) -> usize {
        self.field_lengths.len()
    }

    /// Raw length of field `index`, if it exists.
    #[inline]
    pub fn field_len(&self, index: usize) -> Option<usize> {
        self.field_lengths.get(index).copied()
    }

    /// Per-field raw lengths in packing order.
    #[inline]
    pub fn field_lengths(&self) -> &[usize] {
        &self.field_lengths
    }
}
