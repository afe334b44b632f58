//! Architectural Register Index.
//!
//! This module provides the `RegisterIndex` newtype used for every source and
//! destination operand seen by the hazard unit. It provides:
//! 1. **Type Safety:** Keeps register numbers apart from cycle counts and other integers.
//! 2. **Zero Register:** A single place that knows `x0` never carries a dependency.
//! 3. **Serialization:** Transparent encoding as a plain integer in JSON traces.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::constants::ZERO_REG;

/// Index of an architectural register.
///
/// Index 0 is the hard-wired zero register: writes to it are architecturally
/// discarded, so it can never be the source of a data hazard.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RegisterIndex(pub u8);

impl RegisterIndex {
    /// The hard-wired zero register `x0`.
    pub const ZERO: Self = Self(ZERO_REG);

    /// Creates a register index from a raw register number.
    #[inline]
    pub const fn new(idx: u8) -> Self {
        Self(idx)
    }

    /// Returns the register number as a `usize`, suitable for indexing.
    #[inline]
    pub const fn val(self) -> usize {
        self.0 as usize
    }

    /// Returns `true` if this is the zero register.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == ZERO_REG
    }
}

impl From<u8> for RegisterIndex {
    fn from(idx: u8) -> Self {
        Self(idx)
    }
}

impl fmt::Display for RegisterIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}
