use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, mpsc};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::foundation::error::{FacewarpError, FacewarpResult};
use crate::landmarks::model::Detection;
use crate::session::devices::{CaptureDevice, LandmarkDetector};

/// Latest raw detections, shared between the detection loop and the render loop.
///
/// The list is only ever replaced whole; readers get the `Arc` current at the time of the read
/// and never observe a partially written list.
#[derive(Debug, Default)]
pub struct DetectionSlot {
    latest: Mutex<Arc<Vec<Detection>>>,
}

impl DetectionSlot {
    /// Empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current list (last writer wins).
    pub fn publish(&self, detections: Vec<Detection>) {
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner) = Arc::new(detections);
    }

    /// The most recently published list.
    pub fn latest(&self) -> Arc<Vec<Detection>> {
        Arc::clone(&self.latest.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Publish an empty list.
    pub fn clear(&self) {
        self.publish(Vec::new());
    }
}

/// Detection loop counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeedStats {
    /// Requests whose result was published.
    pub cycles: u64,
    /// Requests that failed (grab or detect).
    pub failures: u64,
    /// Results that arrived after the session stopped and were dropped.
    pub discarded: u64,
    /// The loop gave up after a failure instead of re-issuing.
    pub stalled: bool,
}

#[derive(Debug, Default)]
struct FeedCounters {
    cycles: AtomicU64,
    failures: AtomicU64,
    discarded: AtomicU64,
    stalled: AtomicBool,
}

/// Detection loop tuning.
#[derive(Clone, Copy, Debug)]
pub struct FeedOpts {
    /// Re-issue the next request after a failed one.
    pub retry_on_error: bool,
    /// Pause before re-issuing after a failure.
    pub error_backoff: Duration,
}

/// State the session and its detection thread share.
#[derive(Debug, Default)]
pub struct FeedShared {
    active: AtomicBool,
    slot: DetectionSlot,
    counters: FeedCounters,
}

impl FeedShared {
    /// Inactive feed with an empty slot and zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the detection loop should keep issuing requests.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Where the loop publishes results.
    pub fn slot(&self) -> &DetectionSlot {
        &self.slot
    }

    /// Counters so far.
    pub fn stats(&self) -> FeedStats {
        FeedStats {
            cycles: self.counters.cycles.load(Ordering::Relaxed),
            failures: self.counters.failures.load(Ordering::Relaxed),
            discarded: self.counters.discarded.load(Ordering::Relaxed),
            stalled: self.counters.stalled.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn activate(&self) {
        self.active.store(true, Ordering::Release);
    }

    /// Stop issuing requests; an in-flight result will be discarded.
    pub(crate) fn deactivate(&self) {
        self.active.store(false, Ordering::Release);
    }
}

/// Spawn the detection thread.
///
/// The thread loads the model and reports the outcome on `ready` before issuing any request.
pub(crate) fn spawn_feed(
    capture: Arc<dyn CaptureDevice>,
    mut detector: Box<dyn LandmarkDetector>,
    shared: Arc<FeedShared>,
    opts: FeedOpts,
    ready: mpsc::Sender<FacewarpResult<()>>,
) -> FacewarpResult<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("facewarp-detect".to_owned())
        .spawn(move || {
            let loaded = detector.load_model();
            let ok = loaded.is_ok();
            if ready.send(loaded).is_err() || !ok {
                return;
            }
            run_feed(capture.as_ref(), detector.as_mut(), &shared, opts);
        })
        .map_err(|e| FacewarpError::Other(anyhow::anyhow!("spawn detection thread: {e}")))
}

/// Request, wait for completion, publish, repeat, for as long as the feed is active.
pub(crate) fn run_feed(
    capture: &dyn CaptureDevice,
    detector: &mut dyn LandmarkDetector,
    shared: &FeedShared,
    opts: FeedOpts,
) {
    let counters = &shared.counters;
    while shared.is_active() {
        let result = capture.grab().and_then(|frame| detector.detect(&frame));
        match result {
            Ok(found) => {
                if !shared.is_active() {
                    counters.discarded.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!(faces = found.len(), "session stopped, discarding detections");
                    break;
                }
                tracing::trace!(faces = found.len(), "publishing detections");
                shared.slot.publish(found);
                counters.cycles.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                counters.failures.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(error = %e, "detection request failed");
                if !opts.retry_on_error {
                    counters.stalled.store(true, Ordering::Relaxed);
                    tracing::warn!("detection loop stalled until the session restarts");
                    break;
                }
                if !opts.error_backoff.is_zero() {
                    std::thread::sleep(opts.error_backoff);
                }
            }
        }
    }
    tracing::debug!("detection loop exited");
}

#[cfg(test)]
#[path = "../../tests/unit/session/feed.rs"]
mod tests;
