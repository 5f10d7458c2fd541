pub mod clock;

pub use clock::{Clock, MonotonicClock};

/// One angle sensor on the arm (one per segment).
///
/// Implementations block for at most `timeout` and return the raw sensor
/// reading, nominally in `0..=4095`. Transport problems, timeouts and
/// unparseable payloads are returned as errors; the monitor treats any
/// error as a failed fetch for that tick.
pub trait AngleSensor {
    fn fetch(
        &mut self,
        timeout: std::time::Duration,
    ) -> Result<i32, Box<dyn std::error::Error + Send + Sync>>;
}
