use super::*;
use crate::fixtures::{changed_pixels, collapsed_face, default_face, render_face};

fn params(style: ContourStyle, ci: f64) -> DistortionParameters {
    let mut p = DistortionParameters::default().with_effect(EffectKind::Contour);
    p.style.contour = style;
    p.style.contour_intensity = ci;
    p
}

#[test]
fn dramatic_is_stronger_than_natural() {
    let face = default_face();
    let (snap, natural) = render_face(&Contour, &params(ContourStyle::Natural, 0.5), &face);
    let (_, dramatic) = render_face(&Contour, &params(ContourStyle::Dramatic, 0.5), &face);
    assert!(changed_pixels(&snap, &dramatic) > changed_pixels(&snap, &natural));
}

#[test]
fn dramatic_adds_under_eye_highlights() {
    let face = default_face();
    let f = FaceFeatures::extract(&face);
    let (_, out) = render_face(&Contour, &params(ContourStyle::Dramatic, 0.5), &face);
    for eye in [f.left_eye.center, f.right_eye.center] {
        assert_eq!(
            out.pixel(eye.x as i64, eye.y as i64 + 20),
            Some(HIGHLIGHT.to_array())
        );
    }
}

#[test]
fn avantgarde_differs_from_natural() {
    let face = default_face();
    let (snap, natural) = render_face(&Contour, &params(ContourStyle::Natural, 0.8), &face);
    let (_, avant) = render_face(&Contour, &params(ContourStyle::Avantgarde, 0.8), &face);
    assert!(changed_pixels(&snap, &avant) > 0);
    assert_ne!(natural, avant);
}

#[test]
fn zero_intensity_keeps_only_the_nose_bridge() {
    let face = default_face();
    let f = FaceFeatures::extract(&face);
    let (snap, out) = render_face(&Contour, &params(ContourStyle::Natural, 0.0), &face);
    assert!(changed_pixels(&snap, &out) > 0);
    let (l, m) = (f.left_eye.center, f.mouth.center);
    assert_eq!(out.pixel(l.x as i64 - 50, l.y as i64 - 80), snap.pixel(l.x as i64 - 50, l.y as i64 - 80));
    assert_eq!(out.pixel(m.x as i64, m.y as i64 + 60), snap.pixel(m.x as i64, m.y as i64 + 60));
}

#[test]
fn degenerate_face_draws_nothing() {
    let face = collapsed_face(Point::new(320.0, 240.0));
    for &style in ContourStyle::ALL {
        let (snap, out) = render_face(&Contour, &params(style, 1.0), &face);
        assert_eq!(changed_pixels(&snap, &out), 0, "{style}");
    }
}
