//! Pipeline latch snapshots.
//!
//! The hazard unit does not own any pipeline register. Each cycle the
//! surrounding pipeline captures the fields it needs from the IF/ID, ID/EX and
//! EX/MEM latches into these read-only snapshots. It provides:
//! 1. **Decode:** Source operands and jump classification of the instruction
//!    in ID.
//! 2. **Producers:** Destination register and load classification of the
//!    instructions in EX and MEM.
//! 3. **Branch:** Whether decode resolved a branch as taken this cycle.
//! 4. **Boundary Checks:** Register-range validation of a full snapshot.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::error::SnapshotError;
use crate::common::reg::RegisterIndex;

/// Pipeline stage whose latch contributed a snapshot field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Instruction decode (IF/ID latch contents).
    Decode,
    /// Execute (ID/EX latch contents).
    Execute,
    /// Memory access (EX/MEM latch contents).
    Memory,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Decode => "decode",
            Self::Execute => "execute",
            Self::Memory => "memory",
        };
        f.write_str(name)
    }
}

/// Operands of the instruction currently in decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeState {
    /// First source register.
    pub rs1: RegisterIndex,
    /// Second source register.
    pub rs2: RegisterIndex,
    /// Instruction is a jump or branch that reads its operands in decode.
    pub is_jump: bool,
}

impl DecodeState {
    /// Decode state for a non-jump instruction reading `rs1` and `rs2`.
    pub const fn new(rs1: u8, rs2: u8) -> Self {
        Self {
            rs1: RegisterIndex(rs1),
            rs2: RegisterIndex(rs2),
            is_jump: false,
        }
    }

    /// Decode state for a jump/branch reading `rs1` and `rs2`.
    pub const fn jump(rs1: u8, rs2: u8) -> Self {
        Self {
            rs1: RegisterIndex(rs1),
            rs2: RegisterIndex(rs2),
            is_jump: true,
        }
    }
}

/// Producer currently in the execute stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecuteState {
    /// Destination register.
    pub rd: RegisterIndex,
    /// Instruction is a load; its result is not available until after memory access.
    pub is_load: bool,
}

impl ExecuteState {
    /// A load writing `rd`.
    pub const fn load(rd: u8) -> Self {
        Self {
            rd: RegisterIndex(rd),
            is_load: true,
        }
    }

    /// A non-load (ALU, jump-and-link, ...) instruction writing `rd`.
    pub const fn alu(rd: u8) -> Self {
        Self {
            rd: RegisterIndex(rd),
            is_load: false,
        }
    }
}

/// Producer currently in the memory-access stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryState {
    /// Destination register.
    pub rd: RegisterIndex,
    /// Instruction is a load; its data returns at the end of this stage.
    pub is_load: bool,
}

impl MemoryState {
    /// A load writing `rd`.
    pub const fn load(rd: u8) -> Self {
        Self {
            rd: RegisterIndex(rd),
            is_load: true,
        }
    }

    /// A non-load instruction writing `rd`.
    pub const fn alu(rd: u8) -> Self {
        Self {
            rd: RegisterIndex(rd),
            is_load: false,
        }
    }
}

/// Branch outcome resolved in decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchSignal {
    /// Decode resolved a branch or jump as taken this cycle.
    pub taken: bool,
}

impl BranchSignal {
    /// A taken branch.
    pub const TAKEN: Self = Self { taken: true };
    /// No branch taken.
    pub const NOT_TAKEN: Self = Self { taken: false };
}

/// Everything the hazard unit reads in one cycle, captured atomically at the
/// start of that cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardSnapshot {
    /// Instruction in decode.
    pub decode: DecodeState,
    /// Producer in execute.
    pub execute: ExecuteState,
    /// Producer in memory access.
    pub memory: MemoryState,
    /// Branch outcome from decode.
    pub branch: BranchSignal,
}

impl HazardSnapshot {
    /// Every register index in the snapshot, tagged with its stage and field name.
    pub const fn registers(&self) -> [(Stage, &'static str, RegisterIndex); 4] {
        [
            (Stage::Decode, "rs1", self.decode.rs1),
            (Stage::Decode, "rs2", self.decode.rs2),
            (Stage::Execute, "rd", self.execute.rd),
            (Stage::Memory, "rd", self.memory.rd),
        ]
    }

    /// Checks that every register index lies in `0..num_registers`.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::RegisterOutOfRange`] for the first offending field,
    /// in the order decode `rs1`, decode `rs2`, execute `rd`, memory `rd`.
    pub fn validate(&self, num_registers: usize) -> Result<(), SnapshotError> {
        for (stage, field, index) in self.registers() {
            if index.val() >= num_registers {
                return Err(SnapshotError::RegisterOutOfRange {
                    stage,
                    field,
                    index,
                    limit: num_registers,
                });
            }
        }
        Ok(())
    }
}
