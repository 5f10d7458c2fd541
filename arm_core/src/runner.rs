//! The fixed-period polling loop.
//!
//! One dedicated thread owns the [`ArmMonitor`] and drives it tick by
//! tick: fetch both segments, step the monitor, publish the frame, sleep
//! out the rest of the period. Ticks never overlap; a slow fetch delays
//! only its own tick and the next one fires immediately after.
//!
//! Control actions from the operator surface arrive over a channel and are
//! drained at tick boundaries (last write wins), so no other thread ever
//! mutates monitor state.

use crate::sampler::SegmentSampler;
use crate::{ArmMonitor, MonitorFrame};
use arm_traits::AngleSensor;
use arm_traits::clock::{Clock, MonotonicClock};
use crossbeam_channel as xch;
use std::time::Duration;

/// Operator actions applied between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Construct a fresh attempt with the current thresholds.
    StartAttempt,
    /// Make the current pose read as 0° on both segments.
    ZeroSensors,
    /// Clear offsets and the timer display.
    Reset,
    SetWarningAngle(i32),
    SetFailureAngle(i32),
    Shutdown,
}

/// How the two per-segment fetches are orchestrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingMode {
    /// Both endpoints fetched sequentially inside the tick.
    Direct,
    /// One background sampler thread per segment; the tick consumes the
    /// latest reading from each, so the fetches overlap in time.
    Paced,
}

#[derive(Debug, Clone, Copy)]
pub struct LoopOptions {
    pub period: Duration,
    pub fetch_timeout: Duration,
    pub mode: SamplingMode,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            period: Duration::from_millis(100),
            fetch_timeout: Duration::from_millis(500),
            mode: SamplingMode::Direct,
        }
    }
}

impl From<&arm_config::Poll> for LoopOptions {
    fn from(cfg: &arm_config::Poll) -> Self {
        Self {
            period: Duration::from_millis(cfg.period_ms),
            fetch_timeout: Duration::from_millis(cfg.fetch_timeout_ms),
            mode: match cfg.mode {
                arm_config::PollMode::Direct => SamplingMode::Direct,
                arm_config::PollMode::Paced => SamplingMode::Paced,
            },
        }
    }
}

/// Handle to a running monitor loop. Dropping it shuts the loop down and
/// joins the thread.
pub struct MonitorHandle {
    commands: xch::Sender<Command>,
    frames: xch::Receiver<MonitorFrame>,
    join_handle: Option<std::thread::JoinHandle<()>>,
}

impl MonitorHandle {
    /// Queue a control action for the next tick boundary. Returns false if
    /// the loop has already exited.
    pub fn send(&self, cmd: Command) -> bool {
        self.commands.send(cmd).is_ok()
    }

    /// Frames published once per tick. Slow consumers lose old frames
    /// rather than stalling the loop.
    pub fn frames(&self) -> &xch::Receiver<MonitorFrame> {
        &self.frames
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        let _ = self.commands.send(Command::Shutdown);
        if let Some(handle) = self.join_handle.take() {
            match handle.join() {
                Ok(()) => tracing::trace!("monitor loop joined"),
                Err(e) => tracing::warn!(?e, "monitor loop panicked during shutdown"),
            }
        }
    }
}

/// Spawn the polling loop on its own thread, taking ownership of the
/// monitor and both sensors.
pub fn spawn<U, L>(monitor: ArmMonitor, upper: U, lower: L, opts: LoopOptions) -> MonitorHandle
where
    U: AngleSensor + Send + 'static,
    L: AngleSensor + Send + 'static,
{
    let (cmd_tx, cmd_rx) = xch::unbounded();
    // Enough slack to ride out a briefly busy consumer at the default
    // 100 ms cadence.
    let (frame_tx, frame_rx) = xch::bounded(32);
    let join_handle =
        std::thread::spawn(move || run_loop(monitor, upper, lower, opts, &cmd_rx, &frame_tx));
    MonitorHandle {
        commands: cmd_tx,
        frames: frame_rx,
        join_handle: Some(join_handle),
    }
}

enum Source<U, L> {
    Direct { upper: U, lower: L },
    Paced { upper: SegmentSampler, lower: SegmentSampler },
}

impl<U: AngleSensor, L: AngleSensor> Source<U, L> {
    /// Obtain this tick's readings, `None` per segment on failure. Both
    /// values are gathered before either is handed to the monitor.
    fn read_pair(&mut self, timeout: Duration) -> (Option<i32>, Option<i32>) {
        match self {
            Source::Direct { upper, lower } => {
                let u = upper
                    .fetch(timeout)
                    .map_err(|e| tracing::trace!(segment = "upper", error = %e, "fetch failed"))
                    .ok();
                let l = lower
                    .fetch(timeout)
                    .map_err(|e| tracing::trace!(segment = "lower", error = %e, "fetch failed"))
                    .ok();
                (u, l)
            }
            Source::Paced { upper, lower } => (upper.latest(), lower.latest()),
        }
    }
}

fn apply_command(monitor: &mut ArmMonitor, cmd: Command) -> bool {
    match cmd {
        Command::StartAttempt => monitor.begin_attempt(),
        Command::ZeroSensors => monitor.zero_sensors(),
        Command::Reset => monitor.reset(),
        Command::SetWarningAngle(a) => monitor.set_warning_angle(a),
        Command::SetFailureAngle(a) => monitor.set_failure_angle(a),
        Command::Shutdown => return false,
    }
    true
}

fn run_loop<U, L>(
    mut monitor: ArmMonitor,
    upper: U,
    lower: L,
    opts: LoopOptions,
    cmd_rx: &xch::Receiver<Command>,
    frame_tx: &xch::Sender<MonitorFrame>,
) where
    U: AngleSensor + Send + 'static,
    L: AngleSensor + Send + 'static,
{
    let clock = MonotonicClock::new();
    let mut source = match opts.mode {
        SamplingMode::Direct => Source::Direct { upper, lower },
        SamplingMode::Paced => Source::Paced {
            upper: SegmentSampler::spawn(upper, opts.period, opts.fetch_timeout, clock),
            lower: SegmentSampler::spawn(lower, opts.period, opts.fetch_timeout, clock),
        },
    };

    tracing::info!(
        period_ms = opts.period.as_millis() as u64,
        fetch_timeout_ms = opts.fetch_timeout.as_millis() as u64,
        mode = ?opts.mode,
        "monitor loop started"
    );

    loop {
        let tick_start = clock.now();

        // Control actions land between ticks, last write wins.
        for cmd in cmd_rx.try_iter() {
            if !apply_command(&mut monitor, cmd) {
                tracing::info!("monitor loop shutting down");
                return;
            }
        }

        let (u, l) = source.read_pair(opts.fetch_timeout);
        let frame = monitor.step(u, l);

        match frame_tx.try_send(frame) {
            Ok(()) => {}
            Err(xch::TrySendError::Full(_)) => {
                tracing::trace!("frame consumer lagging; frame dropped");
            }
            Err(xch::TrySendError::Disconnected(_)) => {
                tracing::debug!("frame consumer disconnected; loop exiting");
                return;
            }
        }

        let spent = clock.now().saturating_duration_since(tick_start);
        if let Some(rest) = opts.period.checked_sub(spent) {
            clock.sleep(rest);
        }
    }
}
