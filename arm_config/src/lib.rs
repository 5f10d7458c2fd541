#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schemas for the arm monitor.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - Every section has defaults matching the shipped hardware deployment,
//!   so an empty TOML document is a valid configuration.

use serde::Deserialize;

/// Sensor endpoints, one HTTP URL per arm segment.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Endpoints {
    pub upper_arm_url: String,
    pub lower_arm_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            upper_arm_url: "http://192.168.4.1/upperArmAngle".to_string(),
            lower_arm_url: "http://192.168.4.1/lowerArmAngle".to_string(),
        }
    }
}

/// How the two segment fetches are orchestrated each tick.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PollMode {
    /// Fetch both endpoints sequentially inside the tick.
    #[default]
    Direct,
    /// One background sampler thread per segment; the tick consumes the
    /// latest reading from each.
    Paced,
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct Poll {
    /// Tick period in milliseconds. Also accepts alias "interval_ms".
    #[serde(alias = "interval_ms")]
    pub period_ms: u64,
    /// Per-request fetch timeout in milliseconds.
    pub fetch_timeout_ms: u64,
    pub mode: PollMode,
}

impl Default for Poll {
    fn default() -> Self {
        Self {
            period_ms: 100,
            fetch_timeout_ms: 500,
            mode: PollMode::Direct,
        }
    }
}

/// Severity band edges in degrees from neutral.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct ThresholdsCfg {
    pub warning_deg: i32,
    pub failure_deg: i32,
}

impl Default for ThresholdsCfg {
    fn default() -> Self {
        Self {
            warning_deg: 10,
            failure_deg: 15,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct ConnectivityCfg {
    /// Longest tolerated gap between successful fetches before an active
    /// attempt is force-ended.
    pub max_fetch_interval_ms: u64,
}

impl Default for ConnectivityCfg {
    fn default() -> Self {
        Self {
            max_fetch_interval_ms: 3000,
        }
    }
}

/// Raw-count-to-degrees curve, empirically tuned per hardware revision.
///
/// The sensor output is not linear in the real angle; two slopes around
/// the midpoint compensate.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct CalibrationCfg {
    /// Readings above this saturate to the clamped minimum angle.
    pub upper_saturation_raw: i32,
    /// Readings below this saturate to the clamped maximum angle.
    pub lower_saturation_raw: i32,
    /// Raw count observed at 0 degrees.
    pub midpoint_raw: i32,
    /// Counts per degree for raw >= midpoint.
    pub slope_above: f64,
    /// Counts per degree for raw < midpoint.
    pub slope_below: f64,
}

impl Default for CalibrationCfg {
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

/// Geometry consumed by whoever renders the arm figure. The core only
/// uses it to chain the two forward-kinematics projections.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct DisplayCfg {
    pub shoulder_x: f64,
    pub shoulder_y: f64,
    pub segment_length: f64,
    /// Round displayed angles to the nearest multiple of this (1 = off).
    pub angle_rounding: i32,
}

impl Default for DisplayCfg {
    fn default() -> Self {
        Self {
            shoulder_x: 87.0,
            shoulder_y: 89.0,
            segment_length: 50.0,
            angle_rounding: 1,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Config {
    pub endpoints: Endpoints,
    pub poll: Poll,
    pub thresholds: ThresholdsCfg,
    pub connectivity: ConnectivityCfg,
    pub calibration: CalibrationCfg,
    pub display: DisplayCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

impl Config {
    /// Reject configurations the monitor cannot run with. Error messages
    /// are stable substrings relied upon by the CLI and tests.
    pub fn validate(&self) -> eyre::Result<()> {
        if self.poll.period_ms == 0 {
            eyre::bail!("poll.period_ms must be > 0");
        }
        if self.poll.fetch_timeout_ms == 0 {
            eyre::bail!("poll.fetch_timeout_ms must be > 0");
        }
        if self.connectivity.max_fetch_interval_ms == 0 {
            eyre::bail!("connectivity.max_fetch_interval_ms must be > 0");
        }
        if self.thresholds.warning_deg < 0 {
            eyre::bail!("thresholds.warning_deg must be >= 0");
        }
        if self.thresholds.warning_deg > self.thresholds.failure_deg {
            eyre::bail!("thresholds.warning_deg must be <= thresholds.failure_deg");
        }
        let cal = &self.calibration;
        if cal.lower_saturation_raw >= cal.midpoint_raw {
            eyre::bail!("calibration.lower_saturation_raw must be < midpoint_raw");
        }
        if cal.midpoint_raw >= cal.upper_saturation_raw {
            eyre::bail!("calibration.midpoint_raw must be < upper_saturation_raw");
        }
        if !(cal.slope_above.is_finite() && cal.slope_above > 0.0) {
            eyre::bail!("calibration.slope_above must be finite and > 0");
        }
        if !(cal.slope_below.is_finite() && cal.slope_below > 0.0) {
            eyre::bail!("calibration.slope_below must be finite and > 0");
        }
        if !(self.display.segment_length.is_finite() && self.display.segment_length > 0.0) {
            eyre::bail!("display.segment_length must be finite and > 0");
        }
        if self.display.angle_rounding < 1 {
            eyre::bail!("display.angle_rounding must be >= 1");
        }
        for (name, url) in [
            ("endpoints.upper_arm_url", &self.endpoints.upper_arm_url),
            ("endpoints.lower_arm_url", &self.endpoints.lower_arm_url),
        ] {
            if url.trim().is_empty() {
                eyre::bail!("{name} must not be empty");
            }
        }
        Ok(())
    }
}
