//! Fetch-health tracking with glitch tolerance.
//!
//! A single failed fetch only flags the connection as degraded; an active
//! attempt is force-ended only when failures persist past the configured
//! interval since the last success.

/// What the monitor should do with this tick's fetch outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchVerdict {
    pub degraded: bool,
    pub should_force_end: bool,
}

#[derive(Debug, Clone)]
pub struct ConnectivityMonitor {
    last_success_at_ms: u64,
    degraded: bool,
    max_fetch_interval_ms: u64,
}

impl ConnectivityMonitor {
    /// `max_fetch_interval_ms` is the longest time between successful
    /// fetches before an attempt is terminated (default 3000 in config).
    pub fn new(max_fetch_interval_ms: u64) -> Self {
        Self {
            last_success_at_ms: 0,
            degraded: false,
            max_fetch_interval_ms,
        }
    }

    /// Record one joint fetch outcome at `now_ms` (monitor-epoch millis).
    pub fn record_fetch_result(&mut self, success: bool, now_ms: u64) -> FetchVerdict {
        if success {
            self.last_success_at_ms = now_ms;
            self.degraded = false;
            return FetchVerdict {
                degraded: false,
                should_force_end: false,
            };
        }
        self.degraded = true;
        let elapsed = now_ms.saturating_sub(self.last_success_at_ms);
        FetchVerdict {
            degraded: true,
            should_force_end: elapsed > self.max_fetch_interval_ms,
        }
    }

    pub fn degraded(&self) -> bool {
        self.degraded
    }

    pub fn last_success_at_ms(&self) -> u64 {
        self.last_success_at_ms
    }
}
