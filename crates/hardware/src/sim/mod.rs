//! Cycle traces and trace replay.
//!
//! Provides a JSON format for recording one hazard snapshot per cycle and a
//! driver that feeds such a trace through the hazard unit.

/// Trace replay through a [`HazardUnit`](crate::core::unit::HazardUnit).
pub mod replay;

/// JSON cycle-trace format and loader.
pub mod trace;

pub use replay::{CycleDecision, Replay};
pub use trace::Trace;
