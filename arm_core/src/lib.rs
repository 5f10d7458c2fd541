#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Core arm-monitor logic (transport-agnostic).
//!
//! This crate watches a two-segment mechanical arm through two angle
//! sensors reached over the network. All transport goes through the
//! `arm_traits::AngleSensor` trait.
//!
//! ## Architecture
//!
//! - **Calibration**: piecewise-linear raw→degrees mapping with saturation
//!   (`calibration` module)
//! - **Severity**: three-tier nominal/warning/failure bands (`severity`)
//! - **Kinematics**: chained endpoint projection for the arm figure
//!   (`kinematics`)
//! - **Connectivity**: glitch-tolerant fetch-health watchdog
//!   (`connectivity`)
//! - **Attempt**: the timed trial state machine (`attempt`)
//! - **Loop**: fixed-period polling orchestration (`runner`, `sampler`)
//!
//! [`ArmMonitor`] is the single authoritative aggregate: one `step` per
//! poll tick consumes both segments' raw readings jointly and returns a
//! [`MonitorFrame`] for whoever renders state.

pub mod attempt;
pub mod calibration;
pub mod connectivity;
pub mod error;
pub mod kinematics;
pub mod mocks;
pub mod runner;
pub mod sampler;
pub mod severity;
pub mod thresholds;
pub mod util;

pub use arm_traits::clock::{Clock, MonotonicClock};
pub use attempt::{ArmPosition, Attempt, AttemptState, TickOutcome};
pub use calibration::CalibrationCurve;
pub use connectivity::{ConnectivityMonitor, FetchVerdict};
pub use error::{BuildError, EndReason, Result};
pub use kinematics::{Point, project};
pub use severity::{Severity, classify};
pub use thresholds::{Offsets, Thresholds};

use std::sync::Arc;
use std::time::Instant;

/// Where the current attempt is in its lifecycle, as exposed per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptPhase {
    /// No attempt has been requested yet.
    Idle,
    /// Waiting for a qualifying position (and a healthy connection).
    PendingStart,
    Active,
    Ended(EndReason),
}

/// Everything a renderer needs from one poll tick. Angles are post-offset
/// display degrees; both segments always come from the same tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonitorFrame {
    pub upper_angle: i32,
    pub lower_angle: i32,
    pub upper_severity: Severity,
    pub lower_severity: Severity,
    pub shoulder: Point,
    pub elbow: Point,
    pub wrist: Point,
    pub degraded: bool,
    pub phase: AttemptPhase,
    /// Timer value to show: running time while active, final time once
    /// ended, 0 while idle/pending.
    pub timer_ms: u64,
    /// Milliseconds since the monitor's epoch.
    pub now_ms: u64,
}

/// The authoritative monitor state: calibration, thresholds, offsets,
/// connectivity and the current attempt, advanced one poll tick at a time.
pub struct ArmMonitor {
    calibration: CalibrationCurve,
    thresholds: Thresholds,
    offsets: Offsets,
    connectivity: ConnectivityMonitor,
    attempt: Option<Attempt>,
    last_end_reason: Option<EndReason>,
    // Base display angles from the last successful joint fetch. Kept as a
    // pair so one segment is never shown against the other's stale tick.
    upper_angle: i32,
    lower_angle: i32,
    last_timer_ms: u64,
    shoulder: Point,
    segment_length: f64,
    angle_rounding: i32,
    clock: Arc<dyn Clock + Send + Sync>,
    epoch: Instant,
}

impl core::fmt::Debug for ArmMonitor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ArmMonitor")
            .field("upper_angle", &self.upper_angle)
            .field("lower_angle", &self.lower_angle)
            .field("degraded", &self.connectivity.degraded())
            .field("attempt", &self.attempt.as_ref().map(Attempt::state))
            .finish()
    }
}

impl ArmMonitor {
    pub fn builder() -> ArmMonitorBuilder {
        ArmMonitorBuilder::default()
    }

    /// Current band edges (live values, not an attempt's snapshot).
    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    pub fn offsets(&self) -> Offsets {
        self.offsets
    }

    pub fn attempt(&self) -> Option<&Attempt> {
        self.attempt.as_ref()
    }

    pub fn degraded(&self) -> bool {
        self.connectivity.degraded()
    }

    /// Request a new trial. The previous attempt (and its history) is
    /// replaced; the new one waits in `PendingStart` until a tick finds the
    /// arm inside the warning band. Thresholds are snapshotted here.
    pub fn begin_attempt(&mut self) {
        self.attempt = Some(Attempt::new(
            self.thresholds.warning(),
            self.thresholds.failure(),
        ));
        self.last_end_reason = None;
        self.last_timer_ms = 0;
        tracing::info!(
            warning = self.thresholds.warning(),
            failure = self.thresholds.failure(),
            "attempt pending start"
        );
    }

    /// Make the arm's current pose read as 0° on both segments.
    pub fn zero_sensors(&mut self) {
        self.offsets.zero_to(self.upper_angle, self.lower_angle);
        tracing::info!(
            upper = self.offsets.upper,
            lower = self.offsets.lower,
            "sensors zeroed"
        );
    }

    /// Clear the offsets and the displayed timer.
    pub fn reset(&mut self) {
        self.offsets.reset();
        self.last_timer_ms = 0;
    }

    pub fn set_warning_angle(&mut self, angle: i32) {
        self.thresholds.set_warning(angle);
    }

    pub fn set_failure_angle(&mut self, angle: i32) {
        self.thresholds.set_failure(angle);
    }

    /// Advance one poll tick with the two raw readings (`None` for a failed
    /// fetch; negative readings count as failed, matching the transport's
    /// error sentinel). Both readings are applied together or not at all.
    pub fn step(&mut self, upper_raw: Option<i32>, lower_raw: Option<i32>) -> MonitorFrame {
        let now_ms = self.clock.ms_since(self.epoch);
        let upper_raw = upper_raw.filter(|v| *v >= 0);
        let lower_raw = lower_raw.filter(|v| *v >= 0);

        let success = upper_raw.is_some() && lower_raw.is_some();
        let verdict = self.connectivity.record_fetch_result(success, now_ms);
        if let (Some(u), Some(l)) = (upper_raw, lower_raw) {
            // Display convention: the sensor mounting is mirrored, so the
            // calibrated angle is negated before rounding.
            self.upper_angle =
                -util::round_to_nearest(self.calibration.calibrate(u), self.angle_rounding);
            self.lower_angle =
                -util::round_to_nearest(self.calibration.calibrate(l), self.angle_rounding);
        } else {
            tracing::debug!(degraded = verdict.degraded, "fetch failed this tick");
        }

        let position = ArmPosition {
            upper: self.upper_angle + self.offsets.upper,
            lower: self.lower_angle + self.offsets.lower,
        };

        let mut phase = AttemptPhase::Idle;
        if let Some(attempt) = self.attempt.as_mut() {
            phase = match attempt.state() {
                AttemptState::PendingStart => {
                    // Never start a trial over a bad connection.
                    if !verdict.degraded && attempt.try_start(position, now_ms) {
                        self.last_timer_ms = 0;
                        tracing::info!(
                            upper = position.upper,
                            lower = position.lower,
                            "attempt started"
                        );
                        AttemptPhase::Active
                    } else {
                        AttemptPhase::PendingStart
                    }
                }
                AttemptState::Active => {
                    if verdict.should_force_end {
                        self.last_timer_ms = attempt.force_end(now_ms);
                        self.last_end_reason = Some(EndReason::ConnectionLost);
                        tracing::warn!(
                            elapsed_ms = self.last_timer_ms,
                            "attempt ended: connection lost"
                        );
                        AttemptPhase::Ended(EndReason::ConnectionLost)
                    } else {
                        match attempt.tick(position, now_ms) {
                            TickOutcome::Running { elapsed_ms } => {
                                self.last_timer_ms = elapsed_ms;
                                AttemptPhase::Active
                            }
                            TickOutcome::Ended => {
                                self.last_timer_ms = attempt.elapsed_ms();
                                self.last_end_reason = Some(EndReason::AngleFailure);
                                tracing::info!(
                                    elapsed_ms = self.last_timer_ms,
                                    upper = position.upper,
                                    lower = position.lower,
                                    "attempt ended: failure zone"
                                );
                                AttemptPhase::Ended(EndReason::AngleFailure)
                            }
                        }
                    }
                }
                AttemptState::Ended => {
                    AttemptPhase::Ended(self.last_end_reason.unwrap_or(EndReason::AngleFailure))
                }
            };
        }

        let elbow = project(self.shoulder, position.upper, self.segment_length);
        let wrist = project(elbow, position.lower, self.segment_length);

        MonitorFrame {
            upper_angle: position.upper,
            lower_angle: position.lower,
            upper_severity: classify(
                position.upper,
                self.thresholds.warning(),
                self.thresholds.failure(),
            ),
            lower_severity: classify(
                position.lower,
                self.thresholds.warning(),
                self.thresholds.failure(),
            ),
            shoulder: self.shoulder,
            elbow,
            wrist,
            degraded: verdict.degraded,
            phase,
            timer_ms: self.last_timer_ms,
            now_ms,
        }
    }
}

/// Builder for [`ArmMonitor`]. Every component has a default; `build()`
/// validates the combination.
pub struct ArmMonitorBuilder {
    calibration: CalibrationCurve,
    thresholds: Thresholds,
    max_fetch_interval_ms: u64,
    shoulder: Point,
    segment_length: f64,
    angle_rounding: i32,
    clock: Option<Box<dyn Clock + Send + Sync>>,
}

impl Default for ArmMonitorBuilder {
    fn default() -> Self {
        Self {
            calibration: CalibrationCurve::default(),
            thresholds: Thresholds::default(),
            max_fetch_interval_ms: 3000,
            shoulder: Point::new(87.0, 89.0),
            segment_length: 50.0,
            angle_rounding: 1,
            clock: None,
        }
    }
}

impl ArmMonitorBuilder {
    /// Map the validated TOML config onto builder state.
    pub fn from_config(cfg: &arm_config::Config) -> Self {
        Self {
            calibration: CalibrationCurve::from(&cfg.calibration),
            thresholds: Thresholds::from(&cfg.thresholds),
            max_fetch_interval_ms: cfg.connectivity.max_fetch_interval_ms,
            shoulder: Point::new(cfg.display.shoulder_x, cfg.display.shoulder_y),
            segment_length: cfg.display.segment_length,
            angle_rounding: cfg.display.angle_rounding,
            clock: None,
        }
    }

    pub fn with_calibration(mut self, calibration: CalibrationCurve) -> Self {
        self.calibration = calibration;
        self
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_max_fetch_interval_ms(mut self, ms: u64) -> Self {
        self.max_fetch_interval_ms = ms;
        self
    }

    pub fn with_shoulder(mut self, shoulder: Point) -> Self {
        self.shoulder = shoulder;
        self
    }

    pub fn with_segment_length(mut self, length: f64) -> Self {
        self.segment_length = length;
        self
    }

    pub fn with_angle_rounding(mut self, n: i32) -> Self {
        self.angle_rounding = n;
        self
    }

    /// Provide a custom clock; defaults to `MonotonicClock`.
    pub fn with_clock(mut self, clock: Box<dyn Clock + Send + Sync>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn build(self) -> Result<ArmMonitor> {
        if self.max_fetch_interval_ms == 0 {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "max_fetch_interval_ms must be > 0",
            )));
        }
        if !(self.segment_length.is_finite() && self.segment_length > 0.0) {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "segment_length must be finite and > 0",
            )));
        }
        if self.angle_rounding < 1 {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "angle_rounding must be >= 1",
            )));
        }
        if self.thresholds.warning() < 0 || self.thresholds.warning() > self.thresholds.failure() {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "thresholds must satisfy 0 <= warning <= failure",
            )));
        }
        let cal = &self.calibration;
        if cal.lower_saturation_raw >= cal.midpoint_raw
            || cal.midpoint_raw >= cal.upper_saturation_raw
        {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "calibration saturation bounds must straddle the midpoint",
            )));
        }
        if !(cal.slope_above.is_finite() && cal.slope_above > 0.0)
            || !(cal.slope_below.is_finite() && cal.slope_below > 0.0)
        {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "calibration slopes must be finite and > 0",
            )));
        }

        let clock: Arc<dyn Clock + Send + Sync> = match self.clock {
            Some(b) => Arc::from(b),
            None => Arc::new(MonotonicClock::new()),
        };
        let epoch = clock.now();

        Ok(ArmMonitor {
            calibration: self.calibration,
            thresholds: self.thresholds,
            offsets: Offsets::default(),
            connectivity: ConnectivityMonitor::new(self.max_fetch_interval_ms),
            attempt: None,
            last_end_reason: None,
            upper_angle: 0,
            lower_angle: 0,
            last_timer_ms: 0,
            shoulder: self.shoulder,
            segment_length: self.segment_length,
            angle_rounding: self.angle_rounding,
            clock,
            epoch,
        })
    }
}
