//! Common utilities and types shared by the hazard unit.
//!
//! This module provides the building blocks used across the crate. It includes:
//! 1. **Constants:** Register-file geometry and the hard-wired zero register.
//! 2. **Register Indices:** A strong type for architectural register numbers.
//! 3. **Error Handling:** Typed errors for snapshot validation, traces and configuration.

/// Register-file constants.
pub mod constants;

/// Error types for validation, trace loading and configuration.
pub mod error;

/// Architectural register index type.
pub mod reg;

pub use constants::{NUM_REGS, ZERO_REG};
pub use error::{ConfigError, SnapshotError, TraceError};
pub use reg::RegisterIndex;
