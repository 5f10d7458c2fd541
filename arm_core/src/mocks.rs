//! Test and helper mocks for arm_core

/// A sensor that always errors on fetch; useful when driving the monitor
/// with externally supplied readings via `ArmMonitor::step`.
pub struct NoopSensor;

impl arm_traits::AngleSensor for NoopSensor {
    fn fetch(
        &mut self,
        _timeout: std::time::Duration,
    ) -> Result<i32, Box<dyn std::error::Error + Send + Sync>> {
        Err(Box::new(std::io::Error::other("noop sensor")))
    }
}
