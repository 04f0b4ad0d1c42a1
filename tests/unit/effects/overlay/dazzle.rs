use super::*;
use crate::fixtures::{changed_pixels, collapsed_face, default_face, render_face};
use crate::foundation::core::Point;

fn params(pattern: DazzlePattern) -> DistortionParameters {
    let mut p = DistortionParameters::default().with_effect(EffectKind::Dazzle);
    p.style.dazzle = pattern;
    p
}

#[test]
fn every_pattern_draws_around_the_face_only() {
    for &pattern in DazzlePattern::ALL {
        let (snap, out) = render_face(&Dazzle, &params(pattern), &default_face());
        assert!(changed_pixels(&snap, &out) > 50, "{pattern}");
        assert_eq!(out.pixel(0, 0), snap.pixel(0, 0));
        assert_eq!(out.pixel(639, 479), snap.pixel(639, 479));
    }
}

#[test]
fn patterns_differ_from_each_other() {
    let face = default_face();
    let (_, a) = render_face(&Dazzle, &params(DazzlePattern::Geometric), &face);
    let (_, b) = render_face(&Dazzle, &params(DazzlePattern::Asymmetric), &face);
    let (_, c) = render_face(&Dazzle, &params(DazzlePattern::Minimal), &face);
    assert_ne!(a, b);
    assert_ne!(b, c);
    assert_ne!(a, c);
}

#[test]
fn geometric_pattern_is_stable_across_frames() {
    let face = default_face();
    let (_, a) = render_face(&Dazzle, &params(DazzlePattern::Geometric), &face);
    let (_, b) = render_face(&Dazzle, &params(DazzlePattern::Geometric), &face);
    assert_eq!(a, b);
}

#[test]
fn degenerate_face_draws_nothing() {
    for &pattern in DazzlePattern::ALL {
        let face = collapsed_face(Point::new(50.0, 50.0));
        let (snap, out) = render_face(&Dazzle, &params(pattern), &face);
        assert_eq!(changed_pixels(&snap, &out), 0);
    }
}

#[test]
fn minimal_nose_is_black() {
    let face = default_face();
    let f = FaceFeatures::extract(&face);
    let (_, out) = render_face(&Dazzle, &params(DazzlePattern::Minimal), &face);
    // Nose rect spans the central half of the box width, upper third of its height.
    let (x, y) = (f.nose.center.x as i64, (f.nose.center.y - f.nose.bbox.h * 0.2) as i64);
    assert_eq!(out.pixel(x, y), Some([0, 0, 0, 255]));
}
