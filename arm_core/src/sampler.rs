//! Background per-segment sampling.
//!
//! Spawns a thread that owns one `AngleSensor` and pushes the latest raw
//! reading through a bounded channel at the poll cadence. Used by the
//! `Paced` loop mode so the two segment fetches overlap in time instead of
//! running back to back inside the tick.
//!
//! Safety: each `SegmentSampler` spawns exactly one thread that is shut
//! down when the sampler is dropped, preventing thread leaks.
use arm_traits::AngleSensor;
use arm_traits::clock::Clock;
use crossbeam_channel as xch;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

pub struct SegmentSampler {
    rx: xch::Receiver<i32>,
    shutdown: Arc<AtomicBool>,
    join_handle: Option<std::thread::JoinHandle<()>>,
}

impl SegmentSampler {
    /// Poll `sensor` every `period`, bounding each fetch by `timeout`.
    /// Failed fetches produce nothing; the consumer treats an empty channel
    /// as a failed fetch for that tick.
    pub fn spawn<S, C>(mut sensor: S, period: Duration, timeout: Duration, clock: C) -> Self
    where
        S: AngleSensor + Send + 'static,
        C: Clock + Send + Sync + 'static,
    {
        let (tx, rx) = xch::bounded(1);
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let join_handle = std::thread::spawn(move || {
            loop {
                if shutdown_clone.load(Ordering::Relaxed) {
                    tracing::debug!("segment sampler received shutdown signal");
                    break;
                }

                match sensor.fetch(timeout) {
                    Ok(raw) => {
                        // If send fails, the consumer is gone; exit.
                        if tx.send(raw).is_err() {
                            tracing::debug!("segment sampler consumer disconnected");
                            break;
                        }
                    }
                    Err(e) => {
                        // Transient failure; connectivity tracking lives in
                        // the monitor, not here.
                        tracing::trace!(error = %e, "segment fetch failed");
                    }
                }

                if shutdown_clone.load(Ordering::Relaxed) {
                    break;
                }
                clock.sleep(period);
            }
            tracing::trace!("segment sampler thread exiting cleanly");
        });

        Self {
            rx,
            shutdown,
            join_handle: Some(join_handle),
        }
    }

    /// Latest reading since the previous call, if any arrived.
    pub fn latest(&self) -> Option<i32> {
        self.rx.try_iter().last()
    }
}

impl Drop for SegmentSampler {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        // Unblock a sender stuck on the full channel so it can observe the
        // shutdown flag.
        let _ = self.rx.try_iter().last();
        // The thread exits after at most one fetch timeout plus one period.
        if let Some(handle) = self.join_handle.take() {
            match handle.join() {
                Ok(()) => tracing::trace!("segment sampler joined"),
                Err(e) => tracing::warn!(?e, "segment sampler panicked during shutdown"),
            }
        }
    }
}
