//! Hazard statistics collection and reporting.
//!
//! This module tracks how often the hazard unit intervened. It provides:
//! 1. **Cycles:** Total evaluated cycles and the idle remainder.
//! 2. **Stalls:** Stall counts split by cause (load-use, execute into jump, memory load into jump).
//! 3. **Flushes:** Taken-branch flush counts.
//! 4. **Report:** Sectioned plain-text output and a serializable form for JSON.

use serde::Serialize;

use crate::core::pipeline::hazards::Hazard;

/// Hazard unit statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct HazardStats {
    /// Cycles evaluated.
    pub cycles: u64,
    /// Stalls caused by a load in execute feeding decode.
    pub stalls_load_use: u64,
    /// Stalls caused by a non-load in execute feeding a jump in decode.
    pub stalls_execute_jump: u64,
    /// Stalls caused by a load in memory feeding a jump in decode.
    pub stalls_memory_jump: u64,
    /// Instructions discarded after a branch resolved taken in decode.
    pub branch_flushes: u64,
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"hazards"`.
/// Pass an empty slice to `render_sections` to render all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "hazards"];

impl HazardStats {
    /// Records the outcome of one evaluated cycle.
    pub const fn record(&mut self, hazard: Option<Hazard>) {
        self.cycles += 1;
        match hazard {
            Some(Hazard::LoadUse) => self.stalls_load_use += 1,
            Some(Hazard::ExecuteIntoJump) => self.stalls_execute_jump += 1,
            Some(Hazard::MemoryLoadIntoJump) => self.stalls_memory_jump += 1,
            Some(Hazard::BranchTaken) => self.branch_flushes += 1,
            None => {}
        }
    }

    /// Total stall cycles across all causes.
    pub const fn stall_cycles(&self) -> u64 {
        self.stalls_load_use + self.stalls_execute_jump + self.stalls_memory_jump
    }

    /// Total flush cycles.
    pub const fn flush_cycles(&self) -> u64 {
        self.branch_flushes
    }

    /// Cycles in which no signal was asserted.
    ///
    /// Saturates at zero for hand-built counters that are not self-consistent.
    pub const fn idle_cycles(&self) -> u64 {
        self.cycles
            .saturating_sub(self.stall_cycles())
            .saturating_sub(self.flush_cycles())
    }

    /// Fraction of cycles lost to stalls or flushes (0.0 when nothing was evaluated).
    pub fn penalty_ratio(&self) -> f64 {
        if self.cycles == 0 {
            return 0.0;
        }
        (self.stall_cycles() + self.flush_cycles()) as f64 / self.cycles as f64
    }

    /// Renders only the requested statistics sections.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`].
    /// Pass an empty slice to render all sections.
    pub fn render_sections(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let cyc = self.cycles.max(1) as f64;
        let pct = |n: u64| (n as f64 / cyc) * 100.0;
        let mut out = String::new();

        if want("summary") {
            out.push_str("\n==========================================================\n");
            out.push_str("HAZARD UNIT STATISTICS\n");
            out.push_str("==========================================================\n");
            out.push_str(&format!("sim_cycles               {}\n", self.cycles));
            out.push_str(&format!(
                "cycles.idle              {} ({:.2}%)\n",
                self.idle_cycles(),
                pct(self.idle_cycles())
            ));
            out.push_str(&format!(
                "penalty_ratio            {:.4}\n",
                self.penalty_ratio()
            ));
            out.push_str("----------------------------------------------------------\n");
        }
        if want("hazards") {
            out.push_str("HAZARD BREAKDOWN\n");
            let rows = [
                ("stalls.load_use", self.stalls_load_use),
                ("stalls.execute_jump", self.stalls_execute_jump),
                ("stalls.memory_jump", self.stalls_memory_jump),
                ("stalls.total", self.stall_cycles()),
                ("flushes.branch", self.branch_flushes),
            ];
            for (name, count) in rows {
                out.push_str(&format!("  {name:<22} {count} ({:.2}%)\n", pct(count)));
            }
            out.push_str("----------------------------------------------------------\n");
        }
        out
    }
}
