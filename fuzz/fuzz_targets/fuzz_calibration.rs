#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (i32, i32, i32)| {
    // Any raw count through any step of the monitor must not panic.
    let (upper_raw, lower_raw, edit) = data;
    let curve = arm_core::CalibrationCurve::default();
    let _ = curve.calibrate(upper_raw);

    let mut monitor = match arm_core::ArmMonitor::builder().build() {
        Ok(m) => m,
        Err(_) => return,
    };
    monitor.begin_attempt();
    monitor.set_warning_angle(edit);
    monitor.set_failure_angle(edit.wrapping_add(1));
    let _ = monitor.step(Some(upper_raw), Some(lower_raw));
    let _ = monitor.step(None, None);
});
