//! Small display/time helpers shared by the core and the CLI.

/// Number of milliseconds in one second.
pub const MILLIS_PER_SEC: u64 = 1_000;
/// Number of milliseconds in one minute.
pub const MILLIS_PER_MIN: u64 = 60_000;

/// Round an integer to the nearest multiple of `n`. `n <= 1` is identity.
#[inline]
pub fn round_to_nearest(number: i32, n: i32) -> i32 {
    if n <= 1 {
        return number;
    }
    let n = i64::from(n);
    let rounded = (f64::from(number) / n as f64).round() as i64 * n;
    rounded.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Format elapsed milliseconds as "m:ss.mmm" for the timer display.
/// Example: 63589 -> "1:03.589".
pub fn format_elapsed_ms(ms: u64) -> String {
    let minutes = ms / MILLIS_PER_MIN;
    let rem = ms % MILLIS_PER_MIN;
    let seconds = rem / MILLIS_PER_SEC;
    let millis = rem % MILLIS_PER_SEC;
    format!("{minutes}:{seconds:02}.{millis:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_multiples() {
        assert_eq!(round_to_nearest(7, 1), 7);
        assert_eq!(round_to_nearest(7, 5), 5);
        assert_eq!(round_to_nearest(8, 5), 10);
        assert_eq!(round_to_nearest(-8, 5), -10);
        assert_eq!(round_to_nearest(0, 5), 0);
    }

    #[test]
    fn formats_with_zero_padding() {
        assert_eq!(format_elapsed_ms(0), "0:00.000");
        assert_eq!(format_elapsed_ms(63589), "1:03.589");
        assert_eq!(format_elapsed_ms(185002), "3:05.002");
        assert_eq!(format_elapsed_ms(185012), "3:05.012");
        assert_eq!(format_elapsed_ms(185123), "3:05.123");
    }
}
