use std::sync::{Arc, mpsc};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::effects::params::DistortionParameters;
use crate::foundation::core::Canvas;
use crate::foundation::error::{FacewarpError, FacewarpResult};
use crate::frame::buffer::{FrameRGBA, FrameSnapshot};
use crate::landmarks::model::Detection;
use crate::render::compositor::FrameCompositor;
use crate::session::devices::{CaptureDevice, SessionDevices};
use crate::session::feed::{FeedOpts, FeedShared, FeedStats, spawn_feed};

/// Capture session lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No devices held.
    Idle,
    /// Acquiring the camera and loading the detector model.
    Starting,
    /// Capture and detection running.
    Detecting,
    /// Devices released; a new `start` is required.
    Stopped,
}

/// Options controlling a [`Session`].
#[derive(Clone, Copy, Debug)]
pub struct SessionOpts {
    /// Capture resolution.
    pub canvas: Canvas,
    /// How long `start` waits for the detector's readiness signal.
    pub model_load_timeout: Duration,
    /// Keep the detection loop going after a failed request.
    pub retry_on_error: bool,
    /// Pause before re-issuing a failed request.
    pub error_backoff: Duration,
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self {
            canvas: Canvas::CAPTURE,
            model_load_timeout: Duration::from_secs(30),
            retry_on_error: true,
            error_backoff: Duration::from_millis(100),
        }
    }
}

struct Running {
    capture: Arc<dyn CaptureDevice>,
    shared: Arc<FeedShared>,
    worker: Option<JoinHandle<()>>,
}

/// One camera + detector session and the render loop that draws over it.
///
/// The session owns its capture device and detector exclusively and releases both together on
/// [`Session::stop`] (or drop).
pub struct Session<D: SessionDevices> {
    devices: D,
    opts: SessionOpts,
    state: SessionState,
    running: Option<Running>,
    compositor: FrameCompositor,
    last_error: Option<String>,
    last_stats: FeedStats,
}

impl<D: SessionDevices> Session<D> {
    /// Idle session; nothing is opened until `start`.
    pub fn new(devices: D, opts: SessionOpts) -> Self {
        Self {
            devices,
            opts,
            state: SessionState::Idle,
            running: None,
            compositor: FrameCompositor::new(),
            last_error: None,
            last_stats: FeedStats::default(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Options given at construction.
    pub fn opts(&self) -> &SessionOpts {
        &self.opts
    }

    /// The device factory.
    pub fn devices(&self) -> &D {
        &self.devices
    }

    /// Message of the error that last sent `start` back to `Idle`.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The render-side compositor, for its stats and history.
    pub fn compositor(&self) -> &FrameCompositor {
        &self.compositor
    }

    /// Detection loop counters of the running feed, or of the last one after a stop.
    pub fn feed_stats(&self) -> FeedStats {
        match &self.running {
            Some(r) => r.shared.stats(),
            None => self.last_stats,
        }
    }

    /// The latest raw detections; empty unless detecting.
    pub fn latest_detections(&self) -> Arc<Vec<Detection>> {
        match &self.running {
            Some(r) => r.shared.slot().latest(),
            None => Arc::new(Vec::new()),
        }
    }

    /// `Idle | Stopped → Starting → Detecting`.
    ///
    /// Returns once the detector has signalled readiness. Any failure on the way returns the
    /// session to `Idle`, records the message and surfaces the error.
    pub fn start(&mut self) -> FacewarpResult<()> {
        if matches!(self.state, SessionState::Starting | SessionState::Detecting) {
            return Err(FacewarpError::validation(format!(
                "cannot start a session that is {:?}",
                self.state
            )));
        }
        self.set_state(SessionState::Starting);
        self.last_error = None;
        self.last_stats = FeedStats::default();
        self.compositor.reset();

        match self.launch() {
            Ok(running) => {
                self.running = Some(running);
                self.set_state(SessionState::Detecting);
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "session failed to start");
                self.last_error = Some(e.to_string());
                self.set_state(SessionState::Idle);
                Err(e)
            }
        }
    }

    fn launch(&mut self) -> FacewarpResult<Running> {
        let capture = self
            .devices
            .open_capture(self.opts.canvas)
            .map_err(|e| as_class(e, FacewarpError::Acquisition))?;
        if capture.canvas() != self.opts.canvas {
            return Err(FacewarpError::acquisition(format!(
                "capture delivers {}x{}, expected {}x{}",
                capture.canvas().width,
                capture.canvas().height,
                self.opts.canvas.width,
                self.opts.canvas.height
            )));
        }
        let detector = self
            .devices
            .open_detector()
            .map_err(|e| as_class(e, FacewarpError::DetectorUnavailable))?;

        let shared = Arc::new(FeedShared::new());
        shared.activate();
        let (tx, rx) = mpsc::channel();
        let feed_opts = FeedOpts {
            retry_on_error: self.opts.retry_on_error,
            error_backoff: self.opts.error_backoff,
        };
        let worker = spawn_feed(Arc::clone(&capture), detector, Arc::clone(&shared), feed_opts, tx)?;

        let received = rx.recv_timeout(self.opts.model_load_timeout);
        let exited = matches!(received, Err(mpsc::RecvTimeoutError::Disconnected));
        let ready = match received {
            Ok(loaded) => loaded.map_err(|e| as_class(e, FacewarpError::DetectorUnavailable)),
            Err(mpsc::RecvTimeoutError::Timeout) => Err(FacewarpError::detector_unavailable(
                format!("model not ready after {:?}", self.opts.model_load_timeout),
            )),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(
                FacewarpError::detector_unavailable("detector thread exited during model load"),
            ),
        };
        if let Err(e) = ready {
            shared.deactivate();
            // A loader that never answered keeps its thread; it exits on its own once it sees
            // the closed channel.
            if (exited || worker.is_finished()) && worker.join().is_err() {
                tracing::warn!("detection thread panicked during model load");
            }
            return Err(e);
        }

        tracing::info!(
            width = self.opts.canvas.width,
            height = self.opts.canvas.height,
            "detector ready"
        );
        Ok(Running {
            capture,
            shared,
            worker: Some(worker),
        })
    }

    /// Any state `→ Stopped`.
    ///
    /// Stops the detection loop (an in-flight result is discarded), waits for it to exit, then
    /// releases the capture device and detector and clears the shared detections.
    pub fn stop(&mut self) {
        self.shutdown();
        self.compositor.reset();
        self.set_state(SessionState::Stopped);
    }

    fn shutdown(&mut self) {
        let Some(mut running) = self.running.take() else {
            return;
        };
        running.shared.deactivate();
        if let Some(worker) = running.worker.take()
            && worker.join().is_err()
        {
            tracing::warn!("detection thread panicked");
        }
        running.shared.slot().clear();
        self.last_stats = running.shared.stats();
        tracing::debug!(stats = ?self.last_stats, "detection feed released");
    }

    /// One render cycle: the placeholder unless detecting, otherwise the current frame with the
    /// selected effect applied to the latest detections.
    pub fn render(&mut self, params: &DistortionParameters) -> FacewarpResult<FrameRGBA> {
        let Some(running) = self.running.as_ref().filter(|_| self.state == SessionState::Detecting)
        else {
            return self.compositor.idle(self.opts.canvas);
        };
        let snapshot = FrameSnapshot::new(running.capture.grab()?);
        let detections = running.shared.slot().latest();
        self.compositor.draw(&snapshot, &detections, params)
    }

    fn set_state(&mut self, next: SessionState) {
        if self.state != next {
            tracing::info!(from = ?self.state, to = ?next, "session state");
            self.state = next;
        }
    }
}

impl<D: SessionDevices> Drop for Session<D> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Keep errors already in the right class, fold anything else into it.
fn as_class(e: FacewarpError, class: fn(String) -> FacewarpError) -> FacewarpError {
    match e {
        FacewarpError::Acquisition(_) | FacewarpError::DetectorUnavailable(_) => e,
        other => class(other.to_string()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/lifecycle.rs"]
mod tests;
