//! The timed attempt state machine.
//!
//! An attempt is one trial of holding the arm within tolerance. It is
//! created in `PendingStart`, becomes `Active` on the first tick where both
//! segments sit strictly inside the warning band, and ends — terminally —
//! when a segment leaves the failure band or the connection is lost for too
//! long. A new `Attempt` must be constructed to run again; there is no
//! reset-in-place.

/// One joint snapshot of the arm, in post-offset degrees. Produced once per
/// successful poll tick and appended to the active attempt's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArmPosition {
    pub upper: i32,
    pub lower: i32,
}

impl ArmPosition {
    /// Whether both segment angles are strictly within `max_diff` of zero.
    ///
    /// Strict on purpose: an angle exactly equal to a threshold counts as
    /// having left the zone.
    pub fn within(&self, max_diff: i32) -> bool {
        self.lower > -max_diff
            && self.lower < max_diff
            && self.upper > -max_diff
            && self.upper < max_diff
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    PendingStart,
    Active,
    Ended,
}

/// Outcome of feeding one position to an active attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running { elapsed_ms: u64 },
    /// The position left the failure band this tick; the attempt is now
    /// terminal.
    Ended,
}

/// Timing state and position history of one trial. Thresholds are
/// snapshotted at construction; later global threshold edits do not affect
/// an in-flight attempt.
#[derive(Debug, Clone)]
pub struct Attempt {
    state: AttemptState,
    started_at_ms: Option<u64>,
    ended_at_ms: Option<u64>,
    history: Vec<ArmPosition>,
    warning: i32,
    failure: i32,
}

impl Attempt {
    pub fn new(warning: i32, failure: i32) -> Self {
        Self {
            state: AttemptState::PendingStart,
            started_at_ms: None,
            ended_at_ms: None,
            history: Vec::new(),
            warning,
            failure,
        }
    }

    pub fn state(&self) -> AttemptState {
        self.state
    }

    /// Thresholds captured at construction.
    pub fn warning(&self) -> i32 {
        self.warning
    }

    pub fn failure(&self) -> i32 {
        self.failure
    }

    /// Every position fed to this attempt, starting with the qualifying
    /// one. Unbounded and retained for the attempt's lifetime so it can be
    /// inspected after the fact.
    pub fn history(&self) -> &[ArmPosition] {
        &self.history
    }

    pub fn started_at_ms(&self) -> Option<u64> {
        self.started_at_ms
    }

    pub fn ended_at_ms(&self) -> Option<u64> {
        self.ended_at_ms
    }

    /// Milliseconds between start and end (or `now` at the last recorded
    /// tick for a still-active attempt's caller-side display). 0 before the
    /// attempt ever started.
    pub fn elapsed_ms(&self) -> u64 {
        match (self.started_at_ms, self.ended_at_ms) {
            (Some(start), Some(end)) => end.saturating_sub(start),
            _ => 0,
        }
    }

    /// Start the trial if the position qualifies. Valid only from
    /// `PendingStart`; callers keep retrying every tick until it succeeds.
    /// On success the history is reset to just `position`.
    pub fn try_start(&mut self, position: ArmPosition, now_ms: u64) -> bool {
        if self.state != AttemptState::PendingStart {
            return false;
        }
        if !position.within(self.warning) {
            return false;
        }
        self.history.clear();
        self.history.push(position);
        self.started_at_ms = Some(now_ms);
        self.ended_at_ms = None;
        self.state = AttemptState::Active;
        true
    }

    /// Feed one more position to an active trial. While both segments stay
    /// strictly inside the failure band the position is recorded and the
    /// running time returned; otherwise the attempt ends at `now_ms`.
    /// Calls in any other state are no-ops reporting `Ended`.
    pub fn tick(&mut self, position: ArmPosition, now_ms: u64) -> TickOutcome {
        if self.state != AttemptState::Active {
            return TickOutcome::Ended;
        }
        if position.within(self.failure) {
            self.history.push(position);
            let start = self.started_at_ms.unwrap_or(now_ms);
            return TickOutcome::Running {
                elapsed_ms: now_ms.saturating_sub(start),
            };
        }
        self.ended_at_ms = Some(now_ms);
        self.state = AttemptState::Ended;
        TickOutcome::Ended
    }

    /// Manually end the trial, e.g. when connectivity degrades past the
    /// tolerated interval. Returns the elapsed milliseconds. No-op from any
    /// state but `Active`: repeat calls return the previous elapsed value
    /// without re-mutating the end timestamp.
    pub fn force_end(&mut self, now_ms: u64) -> u64 {
        if self.state != AttemptState::Active {
            return self.elapsed_ms();
        }
        self.ended_at_ms = Some(now_ms);
        self.state = AttemptState::Ended;
        tracing::debug!(elapsed_ms = self.elapsed_ms(), "attempt force-ended");
        self.elapsed_ms()
    }
}
