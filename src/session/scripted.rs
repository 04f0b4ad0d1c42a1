//! In-memory devices: a capture that always returns the same frame and a detector that replays
//! a script. They back the CLI `run` command and let sessions be exercised without a camera or
//! a model.

use std::sync::Arc;
use std::time::Duration;

use crate::foundation::core::Canvas;
use crate::foundation::error::{FacewarpError, FacewarpResult};
use crate::frame::buffer::{FrameRGBA, FrameSnapshot};
use crate::landmarks::model::Detection;
use crate::session::devices::{CaptureDevice, LandmarkDetector, SessionDevices};

/// Capture device serving one still frame.
#[derive(Clone, Debug)]
pub struct StillCapture {
    frame: FrameSnapshot,
}

impl StillCapture {
    /// Capture device that always returns `frame`.
    pub fn new(frame: FrameRGBA) -> Self {
        Self {
            frame: FrameSnapshot::new(frame),
        }
    }
}

impl CaptureDevice for StillCapture {
    fn canvas(&self) -> Canvas {
        self.frame.canvas()
    }

    fn grab(&self) -> FacewarpResult<FrameRGBA> {
        Ok(self.frame.to_frame())
    }
}

/// One scripted detector response.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    /// Faces found in this request.
    Faces(Vec<Detection>),
    /// The request fails with this message.
    Fail {
        /// Error message reported by the detector.
        error: String,
    },
}

/// Parse a JSON detector script: a list of steps, each a list of detections or `{"error": ".."}`.
pub fn script_from_json(json: &str) -> FacewarpResult<Vec<ScriptStep>> {
    serde_json::from_str(json).map_err(|e| FacewarpError::serde(e.to_string()))
}

/// Detector replaying a script in a loop, one step per request.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDetector {
    steps: Vec<ScriptStep>,
    next: usize,
    latency: Duration,
    model_error: Option<String>,
}

impl ScriptedDetector {
    /// Detector replaying `steps`.
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        Self {
            steps,
            ..Self::default()
        }
    }

    /// Always report the same faces.
    pub fn constant(faces: Vec<Detection>) -> Self {
        Self::new(vec![ScriptStep::Faces(faces)])
    }

    /// Time each request takes.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make `load_model` fail.
    pub fn with_model_error(mut self, msg: impl Into<String>) -> Self {
        self.model_error = Some(msg.into());
        self
    }
}

impl LandmarkDetector for ScriptedDetector {
    fn load_model(&mut self) -> FacewarpResult<()> {
        match &self.model_error {
            Some(msg) => Err(FacewarpError::detector_unavailable(msg.clone())),
            None => Ok(()),
        }
    }

    fn detect(&mut self, _frame: &FrameRGBA) -> FacewarpResult<Vec<Detection>> {
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }
        if self.steps.is_empty() {
            return Ok(Vec::new());
        }
        let step = &self.steps[self.next % self.steps.len()];
        self.next = self.next.wrapping_add(1);
        match step {
            ScriptStep::Faces(faces) => Ok(faces.clone()),
            ScriptStep::Fail { error } => Err(FacewarpError::detection(error.clone())),
        }
    }
}

/// Device provider handing out a [`StillCapture`] and a clone of a [`ScriptedDetector`].
#[derive(Clone, Debug)]
pub struct ScriptedDevices {
    frame: FrameRGBA,
    detector: ScriptedDetector,
    capture_error: Option<String>,
    /// Number of successful `open_capture` calls.
    pub captures_opened: usize,
}

impl ScriptedDevices {
    /// Devices serving `frame` and clones of `detector`.
    pub fn new(frame: FrameRGBA, detector: ScriptedDetector) -> Self {
        Self {
            frame,
            detector,
            capture_error: None,
            captures_opened: 0,
        }
    }

    /// Make `open_capture` fail, as when camera permission is denied.
    pub fn with_capture_error(mut self, msg: impl Into<String>) -> Self {
        self.capture_error = Some(msg.into());
        self
    }
}

impl SessionDevices for ScriptedDevices {
    fn open_capture(&mut self, canvas: Canvas) -> FacewarpResult<Arc<dyn CaptureDevice>> {
        if let Some(msg) = &self.capture_error {
            return Err(FacewarpError::acquisition(msg.clone()));
        }
        if self.frame.canvas() != canvas {
            return Err(FacewarpError::acquisition(format!(
                "still frame is {}x{}, session wants {}x{}",
                self.frame.width, self.frame.height, canvas.width, canvas.height
            )));
        }
        self.captures_opened += 1;
        Ok(Arc::new(StillCapture::new(self.frame.clone())))
    }

    fn open_detector(&mut self) -> FacewarpResult<Box<dyn LandmarkDetector>> {
        Ok(Box::new(self.detector.clone()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/scripted.rs"]
mod tests;
