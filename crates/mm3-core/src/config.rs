use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Mm3Error, Mm3Result};
use crate::types::{HexOrder, OutputFormat, Variant};

/// Default read buffer for reader/file hashing (64KB)
pub const DEFAULT_READ_BUFFER: usize = 64 * 1024;

/// Top-level configuration (loaded from mm3.toml)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mm3Config {
    pub hash: HashConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashConfig {
    /// Hash variant (default: x64_128)
    pub variant: Variant,
    /// Seed applied to every accumulator word (default: 0).
    /// Must fit in 32 bits for the x86 variants.
    pub seed: u64,
    /// Read buffer size in bytes for file/stdin hashing
    pub read_buffer_bytes: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Hex byte direction: "increasing" or "decreasing"
    pub hex_order: HexOrder,
    /// Output format: "text" or "json"
    pub format: OutputFormat,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            seed: 0,
            read_buffer_bytes: DEFAULT_READ_BUFFER,
        }
    }
}

impl Mm3Config {
    /// Load a config file; a missing file yields the defaults.
    pub fn load(path: &Path) -> Mm3Result<Self> {
        if !path.exists() {
            tracing::warn!("config file not found: {}  (using defaults)", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
            .map_err(|e| Mm3Error::Config(format!("parsing {}: {e}", path.display())))
    }

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Mm3Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| Mm3Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Mm3Result<()> {
        let max = self.hash.variant.max_seed();
        if self.hash.seed > max {
            return Err(Mm3Error::Config(format!(
                "seed {:#x} does not fit variant {} (max {:#x})",
                self.hash.seed, self.hash.variant, max
            )));
        }
        if self.hash.read_buffer_bytes == 0 {
            return Err(Mm3Error::Config("read_buffer_bytes must be > 0".into()));
        }
        Ok(())
    }
}
