//! Trace Replay.
//!
//! Feeds a recorded trace through a [`HazardUnit`] one cycle at a time, the way a
//! pipeline driver would: one snapshot in, one decision out, strictly in order.

use serde::Serialize;

use crate::common::error::TraceError;
use crate::config::Config;
use crate::core::pipeline::hazards::Hazard;
use crate::core::pipeline::signals::ControlSignals;
use crate::core::unit::HazardUnit;
use crate::sim::trace::Trace;
use crate::stats::HazardStats;

/// The unit's decision for one replayed cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CycleDecision {
    /// Zero-based cycle number within the trace.
    pub cycle: usize,
    /// Rule that decided the cycle, if any.
    pub hazard: Option<Hazard>,
    /// Signals to apply before the next cycle.
    pub signals: ControlSignals,
}

/// Replay driver owning a hazard unit.
#[derive(Clone, Debug)]
pub struct Replay {
    /// Unit under replay; statistics accumulate across runs until reset.
    pub unit: HazardUnit,
}

impl Replay {
    /// Creates a replay driver with a fresh hazard unit.
    pub fn new(config: &Config) -> Self {
        Self {
            unit: HazardUnit::new(config),
        }
    }

    /// Evaluates every cycle of `trace` in order.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Snapshot`] with the cycle number of the first
    /// snapshot the unit rejects; cycles before it have already been counted.
    pub fn run(&mut self, trace: &Trace) -> Result<Vec<CycleDecision>, TraceError> {
        let mut decisions = Vec::with_capacity(trace.len());
        for (cycle, snapshot) in trace.cycles.iter().enumerate() {
            let (hazard, signals) = self
                .unit
                .tick_classified(snapshot)
                .map_err(|source| TraceError::Snapshot { cycle, source })?;
            decisions.push(CycleDecision {
                cycle,
                hazard,
                signals,
            });
        }
        tracing::debug!(cycles = decisions.len(), "trace replay complete");
        Ok(decisions)
    }

    /// Statistics accumulated by the unit.
    pub const fn stats(&self) -> &HazardStats {
        self.unit.stats()
    }
}
