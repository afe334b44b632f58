//! Hazard Detection and Pipeline Control.
//!
//! This module decides, every cycle, whether the pipeline must stall or flush.
//! Branches and jumps resolve in decode, which halves the taken-branch penalty
//! but means decode needs its operands a cycle earlier than execute would. It provides:
//! 1. **Conflict Predicate:** Read-after-write matching between one producer
//!    and the decode operands.
//! 2. **Data Hazards:** The one-cycle (execute) and two-cycle (memory, jump
//!    only) stall conditions.
//! 3. **Control Hazards:** Discarding the speculatively fetched instruction
//!    after a taken branch.
//! 4. **Priority:** Stalls win over the branch flush; a jump whose operand is not ready
//!    cannot have its outcome trusted this cycle.
//!
//! The decision is a pure function of one [`HazardSnapshot`]: it keeps no state
//! and never observes earlier cycles.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::latches::{BranchSignal, DecodeState, ExecuteState, HazardSnapshot, MemoryState};
use super::signals::ControlSignals;
use crate::common::reg::RegisterIndex;

/// Returns `true` if an active producer writing `rd` feeds either decode operand.
///
/// Writes to the zero register are discarded, so `rd == x0` never conflicts.
#[inline]
pub fn register_conflict(
    rd: RegisterIndex,
    active: bool,
    rs1: RegisterIndex,
    rs2: RegisterIndex,
) -> bool {
    active && !rd.is_zero() && (rd == rs1 || rd == rs2)
}

/// One-cycle hazard against the instruction in execute.
///
/// The execute producer is active if it is a load (data not ready until after
/// memory access) or if decode holds a jump (decode compares operands before
/// execute has produced any result).
#[inline]
pub fn execute_hazard(decode: &DecodeState, execute: &ExecuteState) -> bool {
    register_conflict(
        execute.rd,
        execute.is_load || decode.is_jump,
        decode.rs1,
        decode.rs2,
    )
}

/// Two-cycle hazard against a load in the memory stage, seen only by jumps.
#[inline]
pub fn memory_hazard(decode: &DecodeState, memory: &MemoryState) -> bool {
    decode.is_jump && register_conflict(memory.rd, memory.is_load, decode.rs1, decode.rs2)
}

/// The hazard rule that determined a cycle's control signals.
///
/// Variants are listed in priority order; see [`Hazard::PRIORITY`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Hazard {
    /// A load in execute writes an operand of the instruction in decode.
    LoadUse,
    /// A non-load in execute writes an operand of a jump in decode.
    ExecuteIntoJump,
    /// A load in memory writes an operand of a jump in decode.
    MemoryLoadIntoJump,
    /// Decode resolved a branch as taken.
    BranchTaken,
}

impl Hazard {
    /// Rules in evaluation order. The first rule that fires decides the cycle.
    pub const PRIORITY: [Self; 4] = [
        Self::LoadUse,
        Self::ExecuteIntoJump,
        Self::MemoryLoadIntoJump,
        Self::BranchTaken,
    ];

    /// Returns `true` if this rule's guard holds for `snapshot`.
    ///
    /// `LoadUse` and `ExecuteIntoJump` together cover exactly [`execute_hazard`];
    /// they are split only so that statistics can tell the two causes apart.
    pub fn fires(self, snapshot: &HazardSnapshot) -> bool {
        let HazardSnapshot {
            decode,
            execute,
            memory,
            branch,
        } = snapshot;
        match self {
            Self::LoadUse => execute.is_load && execute_hazard(decode, execute),
            Self::ExecuteIntoJump => !execute.is_load && execute_hazard(decode, execute),
            Self::MemoryLoadIntoJump => memory_hazard(decode, memory),
            Self::BranchTaken => branch.taken,
        }
    }

    /// Returns `true` for the data hazards that stall the pipeline.
    pub const fn is_stall(self) -> bool {
        !matches!(self, Self::BranchTaken)
    }

    /// Control signals this rule produces.
    pub const fn signals(self) -> ControlSignals {
        if self.is_stall() {
            ControlSignals::stall()
        } else {
            ControlSignals::branch_flush()
        }
    }

    /// Short human-readable name, as used in logs and reports.
    pub const fn name(self) -> &'static str {
        match self {
            Self::LoadUse => "load-use",
            Self::ExecuteIntoJump => "execute-into-jump",
            Self::MemoryLoadIntoJump => "memory-load-into-jump",
            Self::BranchTaken => "branch-taken",
        }
    }
}

impl fmt::Display for Hazard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl HazardSnapshot {
    /// Returns the highest-priority hazard rule that fires, if any.
    pub fn classify(&self) -> Option<Hazard> {
        Hazard::PRIORITY.into_iter().find(|rule| rule.fires(self))
    }

    /// Computes this cycle's control signals.
    pub fn evaluate(&self) -> ControlSignals {
        self.classify().map_or(ControlSignals::none(), Hazard::signals)
    }
}

/// Returns the hazard rule that decides this cycle, if any.
pub fn classify(
    decode: DecodeState,
    execute: ExecuteState,
    memory: MemoryState,
    branch: BranchSignal,
) -> Option<Hazard> {
    HazardSnapshot {
        decode,
        execute,
        memory,
        branch,
    }
    .classify()
}

/// Computes the stall/flush control signals for one cycle.
///
/// Total and side-effect free: register indices are not range-checked here
/// (see [`HazardUnit`](crate::core::unit::HazardUnit) for a validating driver).
///
/// # Examples
///
/// ```
/// use hdu_core::{evaluate, BranchSignal, ControlSignals, DecodeState, ExecuteState, MemoryState};
///
/// // lw x1, 0(x2) in execute; jalr x0, 0(x1) in decode.
/// let signals = evaluate(
///     DecodeState::jump(1, 0),
///     ExecuteState::load(1),
///     MemoryState::default(),
///     BranchSignal::NOT_TAKEN,
/// );
/// assert_eq!(signals, ControlSignals::stall());
/// ```
pub fn evaluate(
    decode: DecodeState,
    execute: ExecuteState,
    memory: MemoryState,
    branch: BranchSignal,
) -> ControlSignals {
    classify(decode, execute, memory, branch).map_or(ControlSignals::none(), Hazard::signals)
}
