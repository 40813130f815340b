//! Compiler configuration
//!
//! Loaded from TOML:
//!
//! ```toml
//! expand_threshold = 1000
//! allow_compact = true
//!
//! [ports]
//! vdp_io0 = 0x88
//! psg_addr = 0xA0
//! ```
//!
//! A `[ports]` table replaces the default port table rather than extending it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CompileError, CompileResult};
use crate::expand::ExpandConfig;
use crate::ports::PortMap;

/// Loops with more iterations than this are compacted when allowed
pub const DEFAULT_EXPAND_THRESHOLD: u64 = 200_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub expand_threshold: u64,
    pub allow_compact: bool,
    pub ports: PortMap,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            expand_threshold: DEFAULT_EXPAND_THRESHOLD,
            allow_compact: false,
            ports: PortMap::default(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> CompileResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CompileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| CompileError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn expand_config(&self) -> ExpandConfig {
        ExpandConfig {
            expand_threshold: self.expand_threshold,
            allow_compact: self.allow_compact,
        }
    }
}
