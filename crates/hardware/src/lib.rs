//! Pipeline hazard detection and control library.
//!
//! This crate implements the hazard/control decision of a five-stage in-order
//! pipeline (fetch, decode, execute, memory, writeback) that resolves branches in
//! decode. It provides:
//! 1. **Decision:** A pure per-cycle function from latch snapshots to stall/flush signals.
//! 2. **Unit:** A validating, logging, counting wrapper driven once per simulated cycle.
//! 3. **Statistics:** Stall and flush counters with a printable report.
//! 4. **Simulation:** JSON cycle traces and a replay driver.
//! 5. **Configuration:** Register-file size, validation and tracing switches.

/// Common types and constants (register indices, error types).
pub mod common;
/// Unit configuration (defaults and JSON deserialization).
pub mod config;
/// Core pipeline control (latch snapshots, signals, hazard rules, unit).
pub mod core;
/// Cycle traces and trace replay.
pub mod sim;
/// Hazard statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Pure decision function and rule classification.
pub use crate::core::pipeline::hazards::{Hazard, classify, evaluate};
/// Per-cycle snapshot types consumed by the decision function.
pub use crate::core::pipeline::latches::{
    BranchSignal, DecodeState, ExecuteState, HazardSnapshot, MemoryState,
};
/// Control signals produced each cycle.
pub use crate::core::pipeline::signals::ControlSignals;
/// Validating per-cycle driver.
pub use crate::core::unit::HazardUnit;
