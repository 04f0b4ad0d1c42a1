use super::*;
use crate::fixtures::{default_face, gradient_frame};

fn frame() -> FrameRGBA {
    gradient_frame(Canvas::CAPTURE)
}

#[test]
fn still_capture_serves_the_same_frame() {
    let cap = StillCapture::new(frame());
    assert_eq!(cap.canvas(), Canvas::CAPTURE);
    assert_eq!(cap.grab().unwrap(), frame());
    assert_eq!(cap.grab().unwrap(), cap.grab().unwrap());
}

#[test]
fn detector_replays_its_script_in_a_loop() {
    let mut det = ScriptedDetector::new(vec![
        ScriptStep::Faces(vec![default_face()]),
        ScriptStep::Fail {
            error: "lost tracking".to_owned(),
        },
    ]);
    det.load_model().unwrap();
    let f = frame();
    assert_eq!(det.detect(&f).unwrap().len(), 1);
    let err = det.detect(&f).unwrap_err();
    assert!(matches!(err, FacewarpError::Detection(ref m) if m == "lost tracking"));
    assert_eq!(det.detect(&f).unwrap().len(), 1);
}

#[test]
fn empty_script_finds_nobody() {
    let mut det = ScriptedDetector::default();
    assert!(det.detect(&frame()).unwrap().is_empty());
}

#[test]
fn model_error_is_detector_unavailable() {
    let mut det = ScriptedDetector::constant(vec![]).with_model_error("weights missing");
    assert!(matches!(
        det.load_model(),
        Err(FacewarpError::DetectorUnavailable(_))
    ));
}

#[test]
fn script_parses_faces_and_failures() {
    let face: Vec<String> = default_face()
        .points()
        .iter()
        .map(|p| format!(r#"{{"x":{},"y":{}}}"#, p.x, p.y))
        .collect();
    let json = format!(r#"[[[{}]], [], {{"error": "blink"}}]"#, face.join(","));
    let steps = script_from_json(&json).unwrap();
    assert_eq!(
        steps,
        vec![
            ScriptStep::Faces(vec![default_face()]),
            ScriptStep::Faces(vec![]),
            ScriptStep::Fail {
                error: "blink".to_owned()
            },
        ]
    );
    assert!(matches!(
        script_from_json("{}"),
        Err(FacewarpError::Serde(_))
    ));
}

#[test]
fn devices_hand_out_fresh_captures_and_report_denial() {
    let mut devices = ScriptedDevices::new(frame(), ScriptedDetector::default());
    devices.open_capture(Canvas::CAPTURE).unwrap();
    devices.open_capture(Canvas::CAPTURE).unwrap();
    assert_eq!(devices.captures_opened, 2);
    assert!(matches!(
        devices.open_capture(Canvas::new(320, 240).unwrap()),
        Err(FacewarpError::Acquisition(_))
    ));

    let mut denied = devices.with_capture_error("permission denied");
    let err = denied.open_capture(Canvas::CAPTURE).err().unwrap();
    assert!(err.to_string().contains("permission denied"));
    assert!(denied.open_detector().is_ok());
}
