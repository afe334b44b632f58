//! Configuration system for the hazard unit.
//!
//! This module defines the configuration structures used to parameterize the
//! unit. It provides:
//! 1. **Defaults:** Baseline register-file geometry and validation switches.
//! 2. **Structures:** Hierarchical config for general and pipeline settings.
//! 3. **Loading:** JSON parsing from strings or files, with validation.
//!
//! Configuration is supplied as JSON; use `Config::default()` when no file is given.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::constants::{MAX_REGS, NUM_REGS};
use crate::common::error::ConfigError;

/// Default configuration constants.
///
/// These values define the baseline unit when not explicitly overridden.
mod defaults {
    use crate::common::constants::NUM_REGS;

    /// Register-file size of the canonical 32-register integer ISA.
    pub const NUM_REGISTERS: usize = NUM_REGS;

    /// Snapshot validation is on unless explicitly disabled.
    pub const VALIDATE_SNAPSHOTS: bool = true;
}

/// Root configuration structure containing all unit settings.
///
/// # Examples
///
/// ```
/// use hdu_core::config::Config;
///
/// let config = Config::default();
/// assert!(!config.general.trace_hazards);
/// assert_eq!(config.pipeline.num_registers, 32);
/// ```
///
/// Deserializing from JSON, with omitted fields taking their defaults:
///
/// ```
/// use hdu_core::config::Config;
///
/// let config = Config::from_json(r#"{ "pipeline": { "num_registers": 16 } }"#).unwrap();
/// assert_eq!(config.pipeline.num_registers, 16);
/// assert!(config.pipeline.validate_snapshots);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Pipeline geometry and validation
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Parses and validates a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::RegisterCount`] for an unusable register-file size.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// errors of [`Config::from_json`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Checks cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RegisterCount`] unless `1 <= num_registers <= 256`.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        let got = self.pipeline.num_registers;
        if got == 0 || got > MAX_REGS {
            return Err(ConfigError::RegisterCount { got, max: MAX_REGS });
        }
        Ok(())
    }
}

/// General settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log every cycle decision at `info` level instead of `debug`/`trace`.
    #[serde(default)]
    pub trace_hazards: bool,
}

/// Pipeline geometry and input validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Number of architectural registers; valid indices are `0..num_registers`.
    #[serde(default = "PipelineConfig::default_num_registers")]
    pub num_registers: usize,

    /// Reject snapshots whose register indices fall outside the register file.
    #[serde(default = "PipelineConfig::default_validate_snapshots")]
    pub validate_snapshots: bool,
}

impl PipelineConfig {
    /// Returns the default register-file size.
    const fn default_num_registers() -> usize {
        defaults::NUM_REGISTERS
    }

    /// Returns the default validation switch.
    const fn default_validate_snapshots() -> bool {
        defaults::VALIDATE_SNAPSHOTS
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            num_registers: NUM_REGS,
            validate_snapshots: defaults::VALIDATE_SNAPSHOTS,
        }
    }
}
