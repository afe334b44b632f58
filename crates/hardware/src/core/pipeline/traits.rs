//! Pipeline Control Interface.
//!
//! This module defines the trait through which the surrounding pipeline
//! receives the hazard unit's decisions. The unit never touches a latch itself;
//! it only tells the owner of each latch what to do this cycle.

/// Receiver of the hazard unit's control signals.
///
/// Implemented by whatever owns the program counter and the IF/ID and ID/EX
/// latches. Calls arrive through [`ControlSignals::apply`](super::signals::ControlSignals::apply)
/// after the cycle's decision and before any latch is updated.
pub trait PipelineControl {
    /// Do not advance the program counter this cycle (`pc_stall`).
    fn hold_pc(&mut self);

    /// Keep the IF/ID latch contents so decode re-issues them next cycle (`if_stall`).
    fn hold_if_id(&mut self);

    /// Discard the instruction in the IF/ID latch (`if_flush`).
    fn flush_if_id(&mut self);

    /// Replace the instruction entering ID/EX with a bubble (`id_flush`).
    fn bubble_id_ex(&mut self);
}
