//! Pipeline control signals.
//!
//! This module defines the four wires the hazard unit drives every cycle and
//! the canonical patterns they take. It provides:
//! 1. **Signals:** `if_flush`, `id_flush`, `pc_stall` and `if_stall`.
//! 2. **Patterns:** The idle, stall and branch-flush combinations.
//! 3. **Application:** Forwarding each asserted signal to the latch or PC logic it controls.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::traits::PipelineControl;

/// Stall and flush signals for one cycle.
///
/// At most one hazard category is active per cycle: a stall asserts
/// `id_flush`, `pc_stall` and `if_stall`; a taken branch asserts only
/// `if_flush`. The two patterns never overlap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControlSignals {
    /// Discard the instruction in the IF/ID latch (speculatively fetched after a taken branch).
    pub if_flush: bool,
    /// Inject a bubble into the ID/EX latch so the held instruction does not execute twice.
    pub id_flush: bool,
    /// Hold the program counter.
    pub pc_stall: bool,
    /// Hold the IF/ID latch so decode re-issues its instruction next cycle.
    pub if_stall: bool,
}

impl ControlSignals {
    /// No hazard: every signal deasserted.
    pub const fn none() -> Self {
        Self {
            if_flush: false,
            id_flush: false,
            pc_stall: false,
            if_stall: false,
        }
    }

    /// Data hazard: freeze fetch, hold decode and bubble execute.
    pub const fn stall() -> Self {
        Self {
            if_flush: false,
            id_flush: true,
            pc_stall: true,
            if_stall: true,
        }
    }

    /// Control hazard: discard the instruction fetched after a taken branch.
    pub const fn branch_flush() -> Self {
        Self {
            if_flush: true,
            id_flush: false,
            pc_stall: false,
            if_stall: false,
        }
    }

    /// Returns `true` if this is the stall pattern.
    pub fn is_stall(&self) -> bool {
        *self == Self::stall()
    }

    /// Returns `true` if this is the branch-flush pattern.
    pub fn is_flush(&self) -> bool {
        *self == Self::branch_flush()
    }

    /// Returns `true` if no signal is asserted.
    pub fn is_idle(&self) -> bool {
        *self == Self::none()
    }

    /// Drives the asserted signals into the surrounding pipeline.
    ///
    /// Each asserted signal results in exactly one call, in the order
    /// `pc_stall`, `if_stall`, `if_flush`, `id_flush`. Deasserted signals
    /// produce no call, leaving the pipeline to advance normally.
    pub fn apply<P: PipelineControl + ?Sized>(self, pipeline: &mut P) {
        if self.pc_stall {
            pipeline.hold_pc();
        }
        if self.if_stall {
            pipeline.hold_if_id();
        }
        if self.if_flush {
            pipeline.flush_if_id();
        }
        if self.id_flush {
            pipeline.bubble_id_ex();
        }
    }
}

impl fmt::Display for ControlSignals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "if_flush={} id_flush={} pc_stall={} if_stall={}",
            u8::from(self.if_flush),
            u8::from(self.id_flush),
            u8::from(self.pc_stall),
            u8::from(self.if_stall)
        )
    }
}
