use arm_core::{ConnectivityMonitor, FetchVerdict};

const OK: FetchVerdict = FetchVerdict {
    degraded: false,
    should_force_end: false,
};

#[test]
fn success_clears_degraded_and_stamps_time() {
    let mut c = ConnectivityMonitor::new(3_000);
    assert_eq!(c.record_fetch_result(true, 1_000), OK);
    assert!(!c.degraded());
    assert_eq!(c.last_success_at_ms(), 1_000);
}

#[test]
fn single_failure_degrades_without_force_end() {
    let mut c = ConnectivityMonitor::new(3_000);
    c.record_fetch_result(true, 1_000);
    let v = c.record_fetch_result(false, 1_100);
    assert!(v.degraded);
    assert!(!v.should_force_end);
    assert!(c.degraded());
}

#[test]
fn sustained_failure_past_interval_forces_end() {
    let mut c = ConnectivityMonitor::new(3_000);
    c.record_fetch_result(true, 1_000);
    // Exactly at the interval: strictly-greater comparison, no force end.
    let v = c.record_fetch_result(false, 4_000);
    assert!(!v.should_force_end);
    let v = c.record_fetch_result(false, 4_001);
    assert!(v.should_force_end);
}

#[test]
fn recovery_rearms_the_watchdog() {
    let mut c = ConnectivityMonitor::new(3_000);
    c.record_fetch_result(true, 0);
    c.record_fetch_result(false, 2_000);
    assert_eq!(c.record_fetch_result(true, 2_500), OK);
    // Interval now measured from the new success.
    let v = c.record_fetch_result(false, 5_400);
    assert!(!v.should_force_end);
    let v = c.record_fetch_result(false, 5_600);
    assert!(v.should_force_end);
}
