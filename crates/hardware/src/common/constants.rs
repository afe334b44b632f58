//! Register-File Constants.
//!
//! Geometry of the architectural register file seen by the hazard unit.

/// Number of architectural integer registers (x0-x31).
pub const NUM_REGS: usize = 32;

/// Index of the hard-wired zero register. Writes to it are discarded, so it
/// never forms a dependency.
pub const ZERO_REG: u8 = 0;

/// Largest register-file size a configuration may declare.
///
/// Register indices are carried as `u8`, so no more than 256 registers are addressable.
pub const MAX_REGS: usize = 256;
