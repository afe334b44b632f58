//! Reference Scenario Tests.
//!
//! The four reference cycles of the decode-resolved pipeline plus the
//! priority rule, table-driven with `rstest`.

use rstest::rstest;

use hdu_core::{
    BranchSignal, ControlSignals, DecodeState, ExecuteState, Hazard, MemoryState, classify,
    evaluate,
};

#[rstest]
// lw x1 in EX, jalr 0(x1) in ID.
#[case::load_into_jump_one_cycle(
    DecodeState::jump(1, 0),
    ExecuteState::load(1),
    MemoryState::alu(0),
    BranchSignal::NOT_TAKEN,
    Some(Hazard::LoadUse),
    ControlSignals::stall()
)]
// Bubble in EX, lw x1 in MEM, jalr 0(x1) in ID.
#[case::load_into_jump_two_cycles(
    DecodeState::jump(1, 0),
    ExecuteState::alu(0),
    MemoryState::load(1),
    BranchSignal::NOT_TAKEN,
    Some(Hazard::MemoryLoadIntoJump),
    ControlSignals::stall()
)]
// addi x1 in EX, taken beq x1, x4 in ID: forwarded, flush only.
#[case::forwarded_alu_to_branch(
    DecodeState::new(1, 4),
    ExecuteState::alu(1),
    MemoryState::default(),
    BranchSignal::TAKEN,
    Some(Hazard::BranchTaken),
    ControlSignals::branch_flush()
)]
#[case::no_hazard(
    DecodeState::default(),
    ExecuteState::default(),
    MemoryState::default(),
    BranchSignal::NOT_TAKEN,
    None,
    ControlSignals::none()
)]
fn reference_scenarios(
    #[case] decode: DecodeState,
    #[case] execute: ExecuteState,
    #[case] memory: MemoryState,
    #[case] branch: BranchSignal,
    #[case] hazard: Option<Hazard>,
    #[case] expected: ControlSignals,
) {
    assert_eq!(classify(decode, execute, memory, branch), hazard);
    assert_eq!(evaluate(decode, execute, memory, branch), expected);
}

#[rstest]
#[case::execute_stall_beats_taken(
    DecodeState::jump(1, 0),
    ExecuteState::load(1),
    MemoryState::default()
)]
#[case::alu_into_jump_beats_taken(
    DecodeState::jump(1, 0),
    ExecuteState::alu(1),
    MemoryState::default()
)]
#[case::memory_stall_beats_taken(
    DecodeState::jump(0, 2),
    ExecuteState::default(),
    MemoryState::load(2)
)]
fn stall_wins_over_taken_branch(
    #[case] decode: DecodeState,
    #[case] execute: ExecuteState,
    #[case] memory: MemoryState,
) {
    assert_eq!(
        evaluate(decode, execute, memory, BranchSignal::TAKEN),
        ControlSignals::stall()
    );
}

#[rstest]
#[case(Hazard::LoadUse, "load-use", true)]
#[case(Hazard::ExecuteIntoJump, "execute-into-jump", true)]
#[case(Hazard::MemoryLoadIntoJump, "memory-load-into-jump", true)]
#[case(Hazard::BranchTaken, "branch-taken", false)]
fn hazard_metadata(#[case] hazard: Hazard, #[case] name: &str, #[case] stall: bool) {
    assert_eq!(hazard.name(), name);
    assert_eq!(hazard.to_string(), name);
    assert_eq!(hazard.is_stall(), stall);
    assert_eq!(
        serde_json::to_value(hazard).unwrap(),
        serde_json::Value::String(name.to_owned())
    );
    let expected = if stall {
        ControlSignals::stall()
    } else {
        ControlSignals::branch_flush()
    };
    assert_eq!(hazard.signals(), expected);
}

#[test]
fn priority_order_is_fixed() {
    assert_eq!(
        Hazard::PRIORITY,
        [
            Hazard::LoadUse,
            Hazard::ExecuteIntoJump,
            Hazard::MemoryLoadIntoJump,
            Hazard::BranchTaken,
        ]
    );
}
