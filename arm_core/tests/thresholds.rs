use arm_core::{Offsets, Thresholds};
use proptest::prelude::*;

#[test]
fn lowering_failure_pulls_warning_down() {
    let mut t = Thresholds::new(10, 15);
    t.set_failure(5);
    assert_eq!(t.warning(), 5);
    assert_eq!(t.failure(), 5);
}

#[test]
fn raising_warning_pushes_failure_up() {
    let mut t = Thresholds::new(10, 15);
    t.set_warning(20);
    assert_eq!(t.warning(), 20);
    assert_eq!(t.failure(), 20);
}

#[test]
fn warning_is_floored_at_zero() {
    let mut t = Thresholds::new(10, 15);
    t.set_failure(-3);
    assert_eq!(t.warning(), 0);
    // The failure value itself is deliberately not floored.
    assert_eq!(t.failure(), -3);
}

#[test]
fn non_crossing_updates_leave_the_other_side_alone() {
    let mut t = Thresholds::new(10, 15);
    t.set_warning(12);
    assert_eq!(t.failure(), 15);
    t.set_failure(20);
    assert_eq!(t.warning(), 12);
}

proptest! {
    // For non-negative inputs the setters always restore
    // 0 <= warning <= failure, regardless of call order.
    #[test]
    fn setters_maintain_the_invariant(ops in prop::collection::vec((any::<bool>(), 0i32..=90), 1..40)) {
        let mut t = Thresholds::default();
        for (set_warning, angle) in ops {
            if set_warning {
                t.set_warning(angle);
            } else {
                t.set_failure(angle);
            }
            prop_assert!(t.warning() >= 0);
            prop_assert!(t.warning() <= t.failure());
        }
    }
}

#[test]
fn offsets_zero_and_reset() {
    let mut o = Offsets::default();
    o.zero_to(9, -4);
    assert_eq!(o.upper, -9);
    assert_eq!(o.lower, 4);
    o.reset();
    assert_eq!(o, Offsets::default());
}
