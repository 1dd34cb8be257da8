//! Error types for sccp-codec.

use thiserror::Error;

use crate::capability::ProtocolFamily;

/// Main error type for all codec operations.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The allocator refused to hand out a buffer of the requested size.
    #[error("allocation of {requested} bytes for message 0x{message_id:04X} failed (limit {limit})")]
    AllocationFailed {
        /// Message id the buffer was requested for.
        message_id: u32,
        /// Requested body size in bytes.
        requested: usize,
        /// Largest body the allocator accepts.
        limit: usize,
    },

    /// A version table violates its invariants.
    #[error("invalid {family} version table: {reason}")]
    InvalidVersionTable {
        /// Family of the offending table.
        family: ProtocolFamily,
        /// What is wrong with it.
        reason: String,
    },

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    /// I/O error while writing to a device session.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Session writer is gone.
    #[error("Connection closed")]
    ConnectionClosed,

    /// Session writer queue is full.
    #[error("Backpressure: too many pending messages")]
    Backpressure,
}

/// Result type alias using CodecError.
pub type Result<T> = std::result::Result<T, CodecError>;
