#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Sensor transports: the HTTP angle endpoints and a simulated source.
//!
//! Each arm segment exposes its potentiometer count over a one-line HTTP
//! endpoint on the controller's access point. The body is the raw ADC
//! count as decimal text; `-1` means the controller itself failed to read
//! the potentiometer.

pub mod error;

pub use error::{NetError, Result};

use arm_traits::AngleSensor;
use std::time::Duration;

/// Default endpoints on the arm controller's access point.
pub const DEFAULT_UPPER_URL: &str = "http://192.168.4.1/upperArmAngle";
pub const DEFAULT_LOWER_URL: &str = "http://192.168.4.1/lowerArmAngle";

/// One segment's HTTP endpoint. `fetch` performs a blocking GET with the
/// caller's timeout applied to the whole request.
pub struct HttpAngleSensor {
    agent: ureq::Agent,
    url: String,
}

impl HttpAngleSensor {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn get(&self, timeout: Duration) -> Result<i32> {
        let response = self
            .agent
            .get(&self.url)
            .timeout(timeout)
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => NetError::Status(code, self.url.clone()),
                ureq::Error::Transport(t) => NetError::Transport(t.to_string()),
            })?;
        let body = response.into_string()?;
        let trimmed = body.trim();
        let raw: i32 = trimmed.parse().map_err(|_| NetError::Parse {
            body: trimmed.to_owned(),
        })?;
        // The controller's in-band read-failure sentinel.
        if raw == -1 {
            return Err(NetError::SensorFault);
        }
        Ok(raw)
    }
}

impl AngleSensor for HttpAngleSensor {
    fn fetch(
        &mut self,
        timeout: Duration,
    ) -> std::result::Result<i32, Box<dyn std::error::Error + Send + Sync>> {
        match self.get(timeout) {
            Ok(raw) => {
                tracing::trace!(url = %self.url, raw, "angle fetched");
                Ok(raw)
            }
            Err(e) => {
                tracing::debug!(url = %self.url, error = %e, "angle fetch failed");
                Err(Box::new(e))
            }
        }
    }
}

/// Deterministic sensor for demos and tests: a triangle wave of raw counts
/// sweeping `amplitude` either side of the midpoint.
pub struct SimulatedSensor {
    midpoint: i32,
    amplitude: i32,
    step: i32,
    current: i32,
    rising: bool,
}

impl SimulatedSensor {
    pub fn new(midpoint: i32, amplitude: i32, step: i32) -> Self {
        Self {
            midpoint,
            amplitude: amplitude.abs(),
            step: step.abs().max(1),
            current: 0,
            rising: true,
        }
    }

    /// Sweeps the full calibrated range at a gentle rate.
    pub fn sweeping() -> Self {
        Self::new(1060, 400, 4)
    }

    /// Always reports the same raw count.
    pub fn steady(raw: i32) -> Self {
        Self {
            midpoint: raw,
            amplitude: 0,
            step: 1,
            current: 0,
            rising: true,
        }
    }
}

impl AngleSensor for SimulatedSensor {
    fn fetch(
        &mut self,
        _timeout: Duration,
    ) -> std::result::Result<i32, Box<dyn std::error::Error + Send + Sync>> {
        let raw = self.midpoint + self.current;
        self.current += if self.rising { self.step } else { -self.step };
        if self.current >= self.amplitude {
            self.current = self.amplitude;
            self.rising = false;
        } else if self.current <= -self.amplitude {
            self.current = -self.amplitude;
            self.rising = true;
        }
        Ok(raw)
    }
}
