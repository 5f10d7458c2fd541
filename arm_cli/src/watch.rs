//! The `watch` and `check` commands: sensor assembly and frame rendering.

use arm_core::runner::{self, Command, LoopOptions, MonitorHandle};
use arm_core::util::format_elapsed_ms;
use arm_core::{ArmMonitor, AttemptPhase, EndReason, MonitorFrame};
use arm_net::{HttpAngleSensor, SimulatedSensor};
use arm_traits::AngleSensor;
use eyre::WrapErr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

pub struct WatchOpts {
    pub simulate: bool,
    pub max_ticks: Option<u64>,
    pub start: bool,
    pub json: bool,
}

fn spawn_loop(
    monitor: ArmMonitor,
    cfg: &arm_config::Config,
    simulate: bool,
    loop_opts: LoopOptions,
) -> MonitorHandle {
    if simulate {
        runner::spawn(
            monitor,
            SimulatedSensor::sweeping(),
            SimulatedSensor::sweeping(),
            loop_opts,
        )
    } else {
        runner::spawn(
            monitor,
            HttpAngleSensor::new(cfg.endpoints.upper_arm_url.clone()),
            HttpAngleSensor::new(cfg.endpoints.lower_arm_url.clone()),
            loop_opts,
        )
    }
}

fn phase_text(phase: AttemptPhase) -> &'static str {
    match phase {
        AttemptPhase::Idle => "idle",
        AttemptPhase::PendingStart => "get in position",
        AttemptPhase::Active => "running",
        AttemptPhase::Ended(EndReason::AngleFailure) => "failed",
        AttemptPhase::Ended(EndReason::ConnectionLost) => "connection lost",
    }
}

fn render_text(frame: &MonitorFrame) -> String {
    let link = if frame.degraded { "LINK?" } else { "ok" };
    format!(
        "upper {:>4}\u{b0} [{}]  lower {:>4}\u{b0} [{}]  link {}  {}  {}",
        frame.upper_angle,
        frame.upper_severity.as_str(),
        frame.lower_angle,
        frame.lower_severity.as_str(),
        link,
        phase_text(frame.phase),
        format_elapsed_ms(frame.timer_ms),
    )
}

fn render_json(frame: &MonitorFrame) -> String {
    serde_json::json!({
        "now_ms": frame.now_ms,
        "upper_angle": frame.upper_angle,
        "lower_angle": frame.lower_angle,
        "upper_severity": frame.upper_severity.as_str(),
        "lower_severity": frame.lower_severity.as_str(),
        "elbow": { "x": frame.elbow.x, "y": frame.elbow.y },
        "wrist": { "x": frame.wrist.x, "y": frame.wrist.y },
        "degraded": frame.degraded,
        "phase": phase_text(frame.phase),
        "timer_ms": frame.timer_ms,
        "timer": format_elapsed_ms(frame.timer_ms),
    })
    .to_string()
}

pub fn run_watch(cfg: &arm_config::Config, opts: &WatchOpts) -> eyre::Result<()> {
    let monitor = arm_core::ArmMonitorBuilder::from_config(cfg).build()?;
    let loop_opts = LoopOptions::from(&cfg.poll);
    let handle = spawn_loop(monitor, cfg, opts.simulate, loop_opts);

    if opts.start {
        handle.send(Command::StartAttempt);
    }

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = running.clone();
        ctrlc::set_handler(move || {
            running.store(false, Ordering::SeqCst);
        })
        .wrap_err("failed to install Ctrl-C handler")?;
    }

    // Generous frame deadline so a fully dead link still produces frames
    // (the loop publishes degraded frames at the poll cadence regardless).
    let deadline = loop_opts.period.saturating_mul(10) + loop_opts.fetch_timeout * 4;
    let mut ticks = 0u64;
    while running.load(Ordering::SeqCst) {
        if opts.max_ticks.is_some_and(|max| ticks >= max) {
            break;
        }
        let frame = match handle.frames().recv_timeout(deadline) {
            Ok(f) => f,
            Err(_) => eyre::bail!("monitor loop stopped publishing frames"),
        };
        if opts.json {
            println!("{}", render_json(&frame));
        } else {
            println!("{}", render_text(&frame));
        }
        ticks += 1;
    }
    Ok(())
}

pub fn run_check(cfg: &arm_config::Config, simulate: bool) -> eyre::Result<()> {
    let timeout = Duration::from_millis(cfg.poll.fetch_timeout_ms);
    let curve = arm_core::CalibrationCurve::from(&cfg.calibration);

    let mut probe = |name: &str, mut sensor: Box<dyn AngleSensor>| -> eyre::Result<()> {
        let raw = sensor
            .fetch(timeout)
            .map_err(|e| eyre::eyre!(e))
            .wrap_err_with(|| format!("{name} segment fetch failed"))?;
        let angle = -curve.calibrate(raw);
        println!("{name}: raw {raw} -> {angle}\u{b0} ok");
        Ok(())
    };

    if simulate {
        probe("upper", Box::new(SimulatedSensor::steady(1060)))?;
        probe("lower", Box::new(SimulatedSensor::steady(1060)))?;
    } else {
        probe(
            "upper",
            Box::new(HttpAngleSensor::new(cfg.endpoints.upper_arm_url.clone())),
        )?;
        probe(
            "lower",
            Box::new(HttpAngleSensor::new(cfg.endpoints.lower_arm_url.clone())),
        )?;
    }
    println!("check ok");
    Ok(())
}
