//! # Control Signal Tests
//!
//! Checks the three canonical signal patterns and that `apply` drives exactly
//! the asserted signals into a `PipelineControl` implementation, in order.

use mockall::Sequence;

use hdu_core::ControlSignals;

use crate::common::mocks::pipeline::MockPipeline;

#[test]
fn canonical_patterns() {
    assert_eq!(ControlSignals::none(), ControlSignals::default());
    assert_eq!(
        ControlSignals::stall(),
        ControlSignals {
            if_flush: false,
            id_flush: true,
            pc_stall: true,
            if_stall: true,
        }
    );
    assert_eq!(
        ControlSignals::branch_flush(),
        ControlSignals {
            if_flush: true,
            id_flush: false,
            pc_stall: false,
            if_stall: false,
        }
    );
}

#[test]
fn patterns_are_mutually_exclusive() {
    let none = ControlSignals::none();
    let stall = ControlSignals::stall();
    let flush = ControlSignals::branch_flush();

    assert!(none.is_idle() && !none.is_stall() && !none.is_flush());
    assert!(stall.is_stall() && !stall.is_idle() && !stall.is_flush());
    assert!(flush.is_flush() && !flush.is_idle() && !flush.is_stall());
}

#[test]
fn display_lists_every_wire() {
    assert_eq!(
        ControlSignals::stall().to_string(),
        "if_flush=0 id_flush=1 pc_stall=1 if_stall=1"
    );
    assert_eq!(
        ControlSignals::branch_flush().to_string(),
        "if_flush=1 id_flush=0 pc_stall=0 if_stall=0"
    );
}

#[test]
fn apply_stall_holds_and_bubbles_in_order() {
    let mut mock = MockPipeline::new();
    let mut seq = Sequence::new();
    let _ = mock
        .expect_hold_pc()
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    let _ = mock
        .expect_hold_if_id()
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    let _ = mock
        .expect_bubble_id_ex()
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    let _ = mock.expect_flush_if_id().never();

    ControlSignals::stall().apply(&mut mock);
}

#[test]
fn apply_branch_flush_only_flushes_if_id() {
    let mut mock = MockPipeline::new();
    let _ = mock.expect_flush_if_id().times(1).return_const(());
    let _ = mock.expect_hold_pc().never();
    let _ = mock.expect_hold_if_id().never();
    let _ = mock.expect_bubble_id_ex().never();

    ControlSignals::branch_flush().apply(&mut mock);
}

#[test]
fn apply_none_makes_no_calls() {
    let mut mock = MockPipeline::new();
    let _ = mock.expect_hold_pc().never();
    let _ = mock.expect_hold_if_id().never();
    let _ = mock.expect_flush_if_id().never();
    let _ = mock.expect_bubble_id_ex().never();

    ControlSignals::none().apply(&mut mock);
}

#[test]
fn apply_through_trait_object() {
    use hdu_core::core::pipeline::traits::PipelineControl;

    let mut mock = MockPipeline::new();
    let _ = mock.expect_flush_if_id().times(1).return_const(());
    let pipeline: &mut dyn PipelineControl = &mut mock;
    ControlSignals::branch_flush().apply(pipeline);
}

#[test]
fn signals_serialize_by_name() {
    let json = serde_json::to_value(ControlSignals::branch_flush()).unwrap();
    assert_eq!(json["if_flush"], true);
    assert_eq!(json["pc_stall"], false);
}
