//! Hazard Unit.
//!
//! This module wraps the pure decision function into the per-cycle driver the
//! surrounding pipeline calls. It performs the following:
//! 1. **Validation:** Rejects snapshots whose register indices fall outside the register file.
//! 2. **Decision:** Classifies the snapshot and derives the cycle's control signals.
//! 3. **Observability:** Emits a `tracing` event per cycle and keeps hazard statistics.
//!
//! Evaluation takes `&mut self`, so two evaluations can never overlap; the
//! caller captures one snapshot per cycle and applies the returned signals
//! before capturing the next.

use tracing::{debug, info, trace};

use crate::common::error::SnapshotError;
use crate::config::Config;
use crate::core::pipeline::hazards::Hazard;
use crate::core::pipeline::latches::HazardSnapshot;
use crate::core::pipeline::signals::ControlSignals;
use crate::stats::HazardStats;

/// Per-cycle hazard detection and control driver.
#[derive(Clone, Debug)]
pub struct HazardUnit {
    /// Register-file size used for snapshot validation.
    num_registers: usize,
    /// Whether snapshots are range-checked before evaluation.
    validate: bool,
    /// Whether every decision is logged at `info` level.
    trace_hazards: bool,
    /// Cycle counter used in log events.
    cycle: u64,
    /// Accumulated statistics.
    stats: HazardStats,
}

impl HazardUnit {
    /// Creates a hazard unit from the pipeline and general configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            num_registers: config.pipeline.num_registers,
            validate: config.pipeline.validate_snapshots,
            trace_hazards: config.general.trace_hazards,
            cycle: 0,
            stats: HazardStats::default(),
        }
    }

    /// Evaluates one cycle.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::RegisterOutOfRange`] if validation is enabled and a
    /// register index is outside the register file. A rejected snapshot is not
    /// counted and does not advance the cycle counter.
    pub fn tick(&mut self, snapshot: &HazardSnapshot) -> Result<ControlSignals, SnapshotError> {
        self.tick_classified(snapshot).map(|(_, signals)| signals)
    }

    /// Evaluates one cycle, also returning the rule that decided it.
    ///
    /// # Errors
    ///
    /// Same as [`HazardUnit::tick`].
    pub fn tick_classified(
        &mut self,
        snapshot: &HazardSnapshot,
    ) -> Result<(Option<Hazard>, ControlSignals), SnapshotError> {
        if self.validate {
            snapshot.validate(self.num_registers)?;
        }

        let hazard = snapshot.classify();
        let signals = hazard.map_or(ControlSignals::none(), Hazard::signals);
        self.log(hazard, snapshot, signals);
        self.stats.record(hazard);
        self.cycle += 1;
        Ok((hazard, signals))
    }

    /// Number of cycles evaluated so far.
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Statistics accumulated since creation or the last reset.
    pub const fn stats(&self) -> &HazardStats {
        &self.stats
    }

    /// Clears statistics and the cycle counter.
    pub fn reset_stats(&mut self) {
        self.stats = HazardStats::default();
        self.cycle = 0;
    }

    fn log(&self, hazard: Option<Hazard>, snapshot: &HazardSnapshot, signals: ControlSignals) {
        let cycle = self.cycle;
        if self.trace_hazards {
            info!(cycle, hazard = hazard.map_or("none", Hazard::name), %signals, "hazard decision");
            return;
        }
        match hazard {
            Some(h) => debug!(
                cycle,
                hazard = h.name(),
                rs1 = %snapshot.decode.rs1,
                rs2 = %snapshot.decode.rs2,
                ex_rd = %snapshot.execute.rd,
                mem_rd = %snapshot.memory.rd,
                %signals,
                "hazard detected"
            ),
            None => trace!(cycle, "no hazard"),
        }
    }
}
