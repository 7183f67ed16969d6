//! Reader configuration.
//!
//! [`ReaderConfig`] can be built in code with the setter chain or loaded
//! from JSON; missing fields fall back to the defaults.
//!
//! ```
//! use framed_reader::ReaderConfig;
//!
//! let config = ReaderConfig::from_json(r#"{ "framing": false }"#).unwrap();
//! assert!(!config.framing);
//! assert_eq!(config.max_frame_size, ReaderConfig::default().max_frame_size);
//! ```

use serde::Deserialize;

use crate::error::Result;
use crate::protocol::DEFAULT_MAX_FRAME_SIZE;

/// Default chunk size for async socket reads (64KB).
pub const DEFAULT_READ_CHUNK_SIZE: usize = 64 * 1024;

/// Configuration for a framed reader.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Read length-prefixed frames (true) or pass reads straight through.
    pub framing: bool,
    /// Largest frame payload accepted from a length prefix.
    pub max_frame_size: u32,
    /// Size of each read issued by the async frame reader task.
    pub read_chunk_size: usize,
}

impl ReaderConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Enable or disable framing.
    pub fn framing(mut self, enabled: bool) -> Self {
        self.framing = enabled;
        self
    }

    /// Set the maximum frame payload size.
    pub fn max_frame_size(mut self, size: u32) -> Self {
        self.max_frame_size = size;
        self
    }

    /// Set the async read chunk size.
    pub fn read_chunk_size(mut self, size: usize) -> Self {
        self.read_chunk_size = size;
        self
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            framing: true,
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
        }
    }
}
