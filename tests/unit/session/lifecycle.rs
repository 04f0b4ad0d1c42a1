use std::time::Instant;

use super::*;
use crate::effects::params::EffectKind;
use crate::fixtures::{default_face, gradient_frame};
use crate::session::devices::LandmarkDetector;
use crate::session::scripted::{ScriptStep, ScriptedDetector, ScriptedDevices, StillCapture};

fn devices(detector: ScriptedDetector) -> ScriptedDevices {
    ScriptedDevices::new(gradient_frame(Canvas::CAPTURE), detector)
}

fn quick_opts() -> SessionOpts {
    SessionOpts {
        model_load_timeout: Duration::from_secs(5),
        error_backoff: Duration::from_millis(1),
        ..SessionOpts::default()
    }
}

fn tracking() -> ScriptedDetector {
    ScriptedDetector::constant(vec![default_face()]).with_latency(Duration::from_millis(1))
}

fn wait_until<D: SessionDevices>(s: &Session<D>, done: impl Fn(FeedStats) -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if done(s.feed_stats()) {
            return true;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    false
}

fn twist() -> DistortionParameters {
    DistortionParameters::default().with_effect(EffectKind::Twist)
}

#[test]
fn defaults_match_the_capture_surface() {
    let opts = SessionOpts::default();
    assert_eq!(opts.canvas, Canvas::CAPTURE);
    assert_eq!(opts.model_load_timeout, Duration::from_secs(30));
    assert!(opts.retry_on_error);
}

#[test]
fn idle_session_renders_the_placeholder() {
    let mut s = Session::new(devices(tracking()), quick_opts());
    assert_eq!(s.state(), SessionState::Idle);
    let out = s.render(&twist()).unwrap();
    assert_eq!(out.canvas(), Canvas::CAPTURE);
    assert_eq!(out.pixel(0, 0), Some([0, 0, 0, 255]));
    assert_eq!(s.compositor().stats().idle_cycles, 1);
}

#[test]
fn start_detect_render_stop() {
    let mut s = Session::new(devices(tracking()), quick_opts());
    s.start().unwrap();
    assert_eq!(s.state(), SessionState::Detecting);
    assert!(wait_until(&s, |st| st.cycles > 0));
    assert_eq!(s.latest_detections().len(), 1);

    let out = s.render(&twist()).unwrap();
    assert_ne!(out, gradient_frame(Canvas::CAPTURE));
    assert_eq!(s.compositor().previous().len(), 1);

    s.stop();
    assert_eq!(s.state(), SessionState::Stopped);
    assert!(s.latest_detections().is_empty());
    assert!(s.compositor().previous().is_empty());
    assert!(s.feed_stats().cycles > 0);
    assert_eq!(s.render(&twist()).unwrap().pixel(0, 0), Some([0, 0, 0, 255]));
}

#[test]
fn stopped_session_can_start_again_with_fresh_devices() {
    let mut s = Session::new(devices(tracking()), quick_opts());
    s.start().unwrap();
    s.stop();
    s.start().unwrap();
    assert_eq!(s.state(), SessionState::Detecting);
    assert_eq!(s.devices().captures_opened, 2);
    s.stop();
}

#[test]
fn starting_twice_is_rejected() {
    let mut s = Session::new(devices(tracking()), quick_opts());
    s.start().unwrap();
    assert!(matches!(s.start(), Err(FacewarpError::Validation(_))));
    assert_eq!(s.state(), SessionState::Detecting);
}

#[test]
fn denied_camera_returns_to_idle() {
    let mut s = Session::new(
        devices(tracking()).with_capture_error("permission denied"),
        quick_opts(),
    );
    let err = s.start().unwrap_err();
    assert!(err.is_session_fatal());
    assert!(matches!(err, FacewarpError::Acquisition(_)));
    assert_eq!(s.state(), SessionState::Idle);
    assert!(s.last_error().is_some_and(|m| m.contains("permission denied")));
}

#[test]
fn missing_model_never_reaches_detecting() {
    let mut s = Session::new(
        devices(tracking().with_model_error("model weights not found")),
        quick_opts(),
    );
    let err = s.start().unwrap_err();
    assert!(matches!(err, FacewarpError::DetectorUnavailable(_)));
    assert_eq!(s.state(), SessionState::Idle);
    assert_eq!(s.devices().captures_opened, 1);
    assert_eq!(s.feed_stats(), FeedStats::default());
}

struct PanicsOnLoad;

impl LandmarkDetector for PanicsOnLoad {
    fn load_model(&mut self) -> FacewarpResult<()> {
        panic!("corrupt model file");
    }

    fn detect(&mut self, _frame: &FrameRGBA) -> FacewarpResult<Vec<Detection>> {
        Ok(Vec::new())
    }
}

struct PanickingDetectorDevices;

impl SessionDevices for PanickingDetectorDevices {
    fn open_capture(&mut self, canvas: Canvas) -> FacewarpResult<Arc<dyn CaptureDevice>> {
        Ok(Arc::new(StillCapture::new(gradient_frame(canvas))))
    }

    fn open_detector(&mut self) -> FacewarpResult<Box<dyn LandmarkDetector>> {
        Ok(Box::new(PanicsOnLoad))
    }
}

#[test]
fn detector_panicking_during_load_fails_start() {
    let mut s = Session::new(PanickingDetectorDevices, quick_opts());
    let err = s.start().unwrap_err();
    assert!(matches!(err, FacewarpError::DetectorUnavailable(_)));
    assert!(err.to_string().contains("exited during model load"));
    assert_eq!(s.state(), SessionState::Idle);
    s.stop();
    assert_eq!(s.state(), SessionState::Stopped);
}

#[test]
fn stop_discards_the_in_flight_result() {
    let slow = ScriptedDetector::constant(vec![default_face()])
        .with_latency(Duration::from_millis(300));
    let mut s = Session::new(devices(slow), quick_opts());
    s.start().unwrap();
    std::thread::sleep(Duration::from_millis(30));
    s.stop();
    let stats = s.feed_stats();
    assert_eq!((stats.cycles, stats.discarded), (0, 1));
}

#[test]
fn failed_requests_are_reissued_by_default() {
    let flaky = ScriptedDetector::new(vec![
        ScriptStep::Fail {
            error: "timeout".to_owned(),
        },
        ScriptStep::Faces(vec![default_face()]),
    ])
    .with_latency(Duration::from_millis(1));
    let mut s = Session::new(devices(flaky), quick_opts());
    s.start().unwrap();
    assert!(wait_until(&s, |st| st.cycles > 0 && st.failures > 0));
    assert!(!s.feed_stats().stalled);
    s.stop();
}

#[test]
fn without_retry_a_failure_stalls_detection() {
    let flaky = ScriptedDetector::new(vec![
        ScriptStep::Fail {
            error: "timeout".to_owned(),
        },
        ScriptStep::Faces(vec![default_face()]),
    ]);
    let opts = SessionOpts {
        retry_on_error: false,
        ..quick_opts()
    };
    let mut s = Session::new(devices(flaky), opts);
    s.start().unwrap();
    assert!(wait_until(&s, |st| st.stalled));
    assert_eq!(s.state(), SessionState::Detecting);
    assert_eq!(s.feed_stats().cycles, 0);
    assert!(s.latest_detections().is_empty());
}
