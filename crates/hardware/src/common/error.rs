//! Error definitions.
//!
//! This module defines the error types of the crate. It provides:
//! 1. **Snapshot Errors:** Caller precondition violations caught at the unit boundary.
//! 2. **Trace Errors:** Failures while loading or replaying a cycle trace.
//! 3. **Configuration Errors:** Unreadable, malformed or inconsistent configuration.
//!
//! The decision function itself is total and never fails; these errors only
//! arise in the validating wrapper and the I/O surfaces around it.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::reg::RegisterIndex;
use crate::core::pipeline::latches::Stage;

/// A latch snapshot violated the unit's input contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// A register index lies outside the configured register file.
    #[error("{stage}.{field} = {index} is outside the register file (0..{limit})")]
    RegisterOutOfRange {
        /// Stage whose latch carried the bad index.
        stage: Stage,
        /// Field name within that stage (`rs1`, `rs2` or `rd`).
        field: &'static str,
        /// The offending index.
        index: RegisterIndex,
        /// Configured register-file size.
        limit: usize,
    },
}

/// Loading or replaying a cycle trace failed.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace file could not be read.
    #[error("could not read trace '{}'", .path.display())]
    Io {
        /// Path of the trace file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The trace is not valid JSON or does not match the snapshot schema.
    #[error("malformed trace: {0}")]
    Parse(#[from] serde_json::Error),

    /// The trace could not be written out as JSON.
    #[error("could not serialize trace: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A snapshot in the trace was rejected by the unit.
    #[error("invalid snapshot at cycle {cycle}")]
    Snapshot {
        /// Zero-based cycle number of the rejected snapshot.
        cycle: usize,
        /// The validation failure.
        #[source]
        source: SnapshotError,
    },
}

/// Loading or validating a configuration failed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("could not read config '{}'", .path.display())]
    Io {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration is not valid JSON or does not match the schema.
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The declared register-file size is unusable.
    #[error("pipeline.num_registers must be in 1..={max}, got {got}")]
    RegisterCount {
        /// Declared register count.
        got: usize,
        /// Largest supported register count.
        max: usize,
    },
}
