use arm_core::{ArmPosition, Attempt, AttemptState, TickOutcome};

fn pos(upper: i32, lower: i32) -> ArmPosition {
    ArmPosition { upper, lower }
}

#[test]
fn starts_when_both_segments_inside_warning_band() {
    let mut a = Attempt::new(10, 15);
    assert_eq!(a.state(), AttemptState::PendingStart);
    assert!(a.try_start(pos(5, 5), 1_000));
    assert_eq!(a.state(), AttemptState::Active);
    assert_eq!(a.started_at_ms(), Some(1_000));
    assert_eq!(a.history(), &[pos(5, 5)]);
}

#[test]
fn does_not_start_outside_warning_band() {
    let mut a = Attempt::new(10, 15);
    assert!(!a.try_start(pos(15, 0), 1_000));
    assert_eq!(a.state(), AttemptState::PendingStart);
    assert!(a.history().is_empty());
}

#[test]
fn start_boundary_is_strict() {
    let mut a = Attempt::new(10, 15);
    // Exactly at the warning threshold means outside the start zone.
    assert!(!a.try_start(pos(10, 0), 0));
    assert!(!a.try_start(pos(0, -10), 0));
    assert!(a.try_start(pos(9, -9), 0));
}

#[test]
fn ticks_report_elapsed_and_record_history() {
    let mut a = Attempt::new(10, 15);
    assert!(a.try_start(pos(1, 1), 2_000));
    match a.tick(pos(14, 14), 2_300) {
        TickOutcome::Running { elapsed_ms } => assert_eq!(elapsed_ms, 300),
        TickOutcome::Ended => panic!("should still be running"),
    }
    assert_eq!(a.history(), &[pos(1, 1), pos(14, 14)]);
    assert_eq!(a.state(), AttemptState::Active);
}

#[test]
fn leaving_failure_band_ends_the_attempt() {
    let mut a = Attempt::new(10, 15);
    assert!(a.try_start(pos(0, 0), 0));
    assert_eq!(a.tick(pos(16, 0), 800), TickOutcome::Ended);
    assert_eq!(a.state(), AttemptState::Ended);
    assert_eq!(a.ended_at_ms(), Some(800));
    assert_eq!(a.elapsed_ms(), 800);
    // Disqualifying position is not recorded.
    assert_eq!(a.history(), &[pos(0, 0)]);
}

#[test]
fn failure_boundary_is_strict() {
    let mut a = Attempt::new(10, 15);
    assert!(a.try_start(pos(0, 0), 0));
    assert_eq!(a.tick(pos(15, 0), 100), TickOutcome::Ended);
}

#[test]
fn force_end_reports_elapsed_and_is_idempotent() {
    let mut a = Attempt::new(10, 15);
    assert!(a.try_start(pos(0, 0), 500));
    assert_eq!(a.force_end(1_700), 1_200);
    assert_eq!(a.state(), AttemptState::Ended);
    assert_eq!(a.ended_at_ms(), Some(1_700));
    // Repeat call: no-op, previous value, end timestamp untouched.
    assert_eq!(a.force_end(9_999), 1_200);
    assert_eq!(a.ended_at_ms(), Some(1_700));
}

#[test]
fn force_end_before_start_is_a_noop() {
    let mut a = Attempt::new(10, 15);
    assert_eq!(a.force_end(1_000), 0);
    assert_eq!(a.state(), AttemptState::PendingStart);
}

#[test]
fn no_transition_out_of_ended() {
    let mut a = Attempt::new(10, 15);
    assert!(a.try_start(pos(0, 0), 0));
    assert_eq!(a.tick(pos(20, 0), 100), TickOutcome::Ended);
    assert!(!a.try_start(pos(0, 0), 200));
    assert_eq!(a.tick(pos(0, 0), 300), TickOutcome::Ended);
    assert_eq!(a.state(), AttemptState::Ended);
    assert_eq!(a.ended_at_ms(), Some(100));
}

#[test]
fn thresholds_are_snapshotted_at_construction() {
    let a = Attempt::new(7, 12);
    assert_eq!(a.warning(), 7);
    assert_eq!(a.failure(), 12);
}

#[test]
fn restart_resets_history_to_the_qualifying_position() {
    let mut a = Attempt::new(10, 15);
    // Pending retries that fail leave no trace.
    assert!(!a.try_start(pos(30, 30), 0));
    assert!(!a.try_start(pos(11, 0), 50));
    assert!(a.try_start(pos(2, 3), 100));
    assert_eq!(a.history(), &[pos(2, 3)]);
}
