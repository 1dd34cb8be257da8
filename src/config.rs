//! Codec configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config:
//!
//! ```
//! use sccp_codec::CodecConfig;
//!
//! let config = CodecConfig::from_json(r#"{"max_message_size": 2048}"#).unwrap();
//! assert_eq!(config.max_message_size, 2048);
//! assert_eq!(config.channel_capacity, 1024);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::protocol::{HeapAllocator, DEFAULT_MAX_MESSAGE_SIZE};
use crate::writer::{WriterConfig, DEFAULT_CHANNEL_CAPACITY};

/// Limits for message allocation and the session writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Largest message body the heap allocator hands out.
    pub max_message_size: usize,
    /// Messages the writer queues before sends are dropped as backpressure.
    pub channel_capacity: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl CodecConfig {
    /// Parse a JSON config document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Allocator enforcing `max_message_size`.
    pub fn allocator(&self) -> HeapAllocator {
        HeapAllocator::new(self.max_message_size)
    }

    /// Settings for [`spawn_writer_task`](crate::writer::spawn_writer_task).
    pub fn writer_config(&self) -> WriterConfig {
        WriterConfig {
            channel_capacity: self.channel_capacity,
        }
    }
}
