//! Pipeline hazard control.
//!
//! This module contains the decision logic that keeps a five-stage in-order
//! pipeline correct when branches resolve in decode. It includes the following components:
//! 1. **Hazards:** Register-conflict predicate, prioritized hazard rules and the decision function.
//! 2. **Latches:** Read-only snapshots of the decode, execute and memory latches.
//! 3. **Signals:** The stall/flush control signals produced each cycle.
//! 4. **Traits:** The interface through which the surrounding pipeline applies those signals.

/// Hazard detection rules and the per-cycle decision function.
pub mod hazards;

/// Latch snapshots (decode operands, execute/memory producers, branch outcome).
pub mod latches;

/// Stall and flush control signals.
pub mod signals;

/// Traits for pipeline components that consume control signals.
pub mod traits;
