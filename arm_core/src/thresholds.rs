//! Live severity thresholds and operator zeroing offsets.

/// The two process-wide band edges, kept under the invariant
/// `0 <= warning <= failure` by the setters. The setters never reject
/// input; the other threshold silently follows instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    warning: i32,
    failure: i32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            warning: 10,
            failure: 15,
        }
    }
}

impl Thresholds {
    /// Build from an already-validated pair (config validation enforces
    /// `0 <= warning <= failure` before this is reached).
    pub fn new(warning: i32, failure: i32) -> Self {
        debug_assert!(0 <= warning && warning <= failure);
        Self { warning, failure }
    }

    pub fn warning(&self) -> i32 {
        self.warning
    }

    pub fn failure(&self) -> i32 {
        self.failure
    }

    /// Set the warning threshold; the failure threshold is raised to match
    /// when the new warning would exceed it.
    pub fn set_warning(&mut self, angle: i32) {
        if angle >= self.failure {
            self.failure = angle;
        }
        self.warning = angle;
    }

    /// Set the failure threshold; the warning threshold is pulled down to
    /// match when the new failure would undercut it, then floored at 0.
    /// The failure value itself is intentionally not floored.
    pub fn set_failure(&mut self, angle: i32) {
        if angle <= self.warning {
            self.warning = angle;
            if self.warning < 0 {
                self.warning = 0;
            }
        }
        self.failure = angle;
    }
}

impl From<&arm_config::ThresholdsCfg> for Thresholds {
    fn from(cfg: &arm_config::ThresholdsCfg) -> Self {
        Self::new(cfg.warning_deg, cfg.failure_deg)
    }
}

/// Additive per-segment offsets letting the operator redefine "zero"
/// without touching the calibration curve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Offsets {
    pub upper: i32,
    pub lower: i32,
}

impl Offsets {
    /// Capture the current calibrated angles so they read as 0 from now on.
    pub fn zero_to(&mut self, upper_angle: i32, lower_angle: i32) {
        self.upper = -upper_angle;
        self.lower = -lower_angle;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
