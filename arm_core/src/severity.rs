//! Three-tier classification of a segment's deviation from neutral.

/// Severity band for one segment angle. Drives both display color and the
/// attempt gating zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Nominal,
    Warning,
    Failure,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Nominal => "nominal",
            Severity::Warning => "warning",
            Severity::Failure => "failure",
        }
    }
}

/// Classify an angle against the two band edges. Failure wins over warning.
///
/// Callers must keep `warning <= failure` (the threshold setters guarantee
/// it); the result for an inverted pair is unspecified.
pub fn classify(angle: i32, warning: i32, failure: i32) -> Severity {
    // i64 keeps |i32::MIN| representable.
    let from_zero = i64::from(angle).abs();
    if from_zero >= i64::from(failure) {
        Severity::Failure
    } else if from_zero >= i64::from(warning) {
        Severity::Warning
    } else {
        Severity::Nominal
    }
}
