use std::sync::Arc;

use crate::foundation::core::Canvas;
use crate::foundation::error::FacewarpResult;
use crate::frame::buffer::FrameRGBA;
use crate::landmarks::model::Detection;

/// Pull-based frame source, queried once per render cycle and once per detection request.
pub trait CaptureDevice: Send + Sync {
    /// Resolution of every frame this device returns.
    fn canvas(&self) -> Canvas;

    /// The current frame.
    fn grab(&self) -> FacewarpResult<FrameRGBA>;
}

/// Landmark detector driven one request at a time by the detection loop.
pub trait LandmarkDetector: Send {
    /// Load the model; returning `Ok` is the readiness signal.
    fn load_model(&mut self) -> FacewarpResult<()>;

    /// Detect zero or more faces in `frame`.
    fn detect(&mut self, frame: &FrameRGBA) -> FacewarpResult<Vec<Detection>>;
}

/// Opens the capture device and detector a session owns exclusively.
///
/// Each call hands out a fresh instance; a session never shares either with another session.
pub trait SessionDevices {
    /// Acquire the camera. Permission or hardware problems are acquisition errors.
    fn open_capture(&mut self, canvas: Canvas) -> FacewarpResult<Arc<dyn CaptureDevice>>;

    /// Instantiate the detector. A missing model or library is a detector-unavailable error.
    fn open_detector(&mut self) -> FacewarpResult<Box<dyn LandmarkDetector>>;
}
