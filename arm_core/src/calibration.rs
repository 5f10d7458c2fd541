//! Raw sensor count to calibrated degrees.
//!
//! The microcontroller reports the sensor as an integer between 0 and 4095.
//! The mapping to degrees saturates at ±45° and is piecewise linear around
//! an empirically measured midpoint; the sensor output is not linearly
//! proportional to the real angle, so a slightly different slope is used on
//! each side of the midpoint to keep the error down.

/// Clamped minimum of the calibrated range, returned for saturated-high raw
/// readings.
pub const ANGLE_MIN: i32 = -45;
/// Clamped maximum of the calibrated range, returned for saturated-low raw
/// readings.
pub const ANGLE_MAX: i32 = 45;

/// Piecewise-linear calibration curve with saturation at the range edges.
#[derive(Debug, Clone, Copy)]
pub struct CalibrationCurve {
    /// Readings above this map straight to [`ANGLE_MIN`].
    pub upper_saturation_raw: i32,
    /// Readings below this map straight to [`ANGLE_MAX`].
    pub lower_saturation_raw: i32,
    /// Raw count observed with the segment at 0 degrees.
    pub midpoint_raw: i32,
    /// Counts per degree for raw >= midpoint.
    pub slope_above: f64,
    /// Counts per degree for raw < midpoint.
    pub slope_below: f64,
}

impl Default for CalibrationCurve {
    fn default() -> Self {
        Self {
            upper_saturation_raw: 1910,
            lower_saturation_raw: 410,
            midpoint_raw: 1060,
            slope_above: 14.2,
            slope_below: 14.0,
        }
    }
}

impl CalibrationCurve {
    /// Convert a raw sensor count to a calibrated angle in degrees.
    ///
    /// Pure and total: out-of-range input is absorbed by the saturation
    /// branches, never reported as an error. The quotient is truncated
    /// toward zero; the truncation mode is load-bearing for reproducible
    /// test vectors and must not be changed to floor/round.
    pub fn calibrate(&self, raw: i32) -> i32 {
        if raw > self.upper_saturation_raw {
            return ANGLE_MIN;
        }
        if raw < self.lower_saturation_raw {
            return ANGLE_MAX;
        }
        let zeroed = f64::from(self.midpoint_raw - raw);
        let slope = if raw >= self.midpoint_raw {
            self.slope_above
        } else {
            self.slope_below
        };
        (zeroed / slope) as i32
    }
}

impl From<&arm_config::CalibrationCfg> for CalibrationCurve {
    fn from(cfg: &arm_config::CalibrationCfg) -> Self {
        Self {
            upper_saturation_raw: cfg.upper_saturation_raw,
            lower_saturation_raw: cfg.lower_saturation_raw,
            midpoint_raw: cfg.midpoint_raw,
            slope_above: cfg.slope_above,
            slope_below: cfg.slope_below,
        }
    }
}
