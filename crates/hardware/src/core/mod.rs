//! Core pipeline control.
//!
//! This module contains the hazard/control logic of the five-stage pipeline and
//! the per-cycle driver that wraps it with validation, logging and statistics.

/// Pipeline control (latch snapshots, control signals, hazard rules, consumer traits).
pub mod pipeline;

/// Validating per-cycle hazard unit.
pub mod unit;

pub use self::unit::HazardUnit;
