//! Makeup-style contouring: shadow, highlight and blush ellipses placed at fixed offsets from the
//! eye and mouth centroids.

use std::f64::consts::{PI, TAU};

use super::{OverlayCanvas, anchor, jitter, paint};
use crate::effects::dispatch::Strategy;
use crate::effects::params::{ContourStyle, DistortionParameters, EffectKind};
use crate::foundation::core::{Point, Rgba8Premul};
use crate::foundation::error::FacewarpResult;
use crate::frame::buffer::{FrameRGBA, FrameSnapshot};
use crate::landmarks::regions::{FaceFeatures, FeatureRegion};

/// Highlight tone.
pub const HIGHLIGHT: Rgba8Premul = Rgba8Premul::opaque(255, 240, 220);
/// Shading tone.
pub const CONTOUR: Rgba8Premul = Rgba8Premul::opaque(120, 80, 60);
/// Cheek tone.
pub const BLUSH: Rgba8Premul = Rgba8Premul::opaque(220, 140, 120);

/// Strength multiplier of the dramatic style.
pub const DRAMATIC_BOOST: f64 = 1.5;

/// Makeup-style highlight and shading overlay.
#[derive(Clone, Copy, Debug, Default)]
pub struct Contour;

impl Strategy for Contour {
    fn kind(&self) -> EffectKind {
        EffectKind::Contour
    }

    fn apply(
        &self,
        _snapshot: &FrameSnapshot,
        features: &FaceFeatures,
        params: &DistortionParameters,
        out: &mut FrameRGBA,
    ) -> FacewarpResult<()> {
        let ci = params.style.contour_intensity;
        let anchors = Anchors::new(features);
        paint(out, |c| match params.style.contour {
            ContourStyle::Natural => shaded(c, &anchors, ci),
            ContourStyle::Dramatic => {
                shaded(c, &anchors, ci * DRAMATIC_BOOST);
                dramatic_highlights(c, &anchors);
            }
            ContourStyle::Avantgarde => abstract_pattern(c, &anchors, ci),
        })
    }
}

/// Centroids of the usable regions.
struct Anchors<'a> {
    left: Option<Point>,
    right: Option<Point>,
    mouth: Option<Point>,
    nose: Option<&'a FeatureRegion>,
}

impl<'a> Anchors<'a> {
    fn new(f: &'a FaceFeatures) -> Self {
        Self {
            left: anchor(&f.left_eye).map(|r| r.center),
            right: anchor(&f.right_eye).map(|r| r.center),
            mouth: anchor(&f.mouth).map(|r| r.center),
            nose: anchor(&f.nose),
        }
    }

    /// Eye centroid with the outward direction sign (`-1` for the left eye).
    fn eyes(&self) -> impl Iterator<Item = (Point, f64)> {
        [self.left.map(|p| (p, -1.0)), self.right.map(|p| (p, 1.0))]
            .into_iter()
            .flatten()
    }
}

fn shaded(c: &mut OverlayCanvas, a: &Anchors<'_>, k: f64) {
    // Cheek hollows, then blush on top.
    let (size, offset) = (60.0 * k, 30.0 * k);
    c.fill(CONTOUR);
    for (eye, side) in a.eyes() {
        c.push();
        c.translate(eye.x + side * offset, eye.y + offset);
        c.rotate(-side * PI / 4.0);
        c.ellipse(0.0, 0.0, size, size * 1.5);
        c.pop();
    }
    c.fill(BLUSH);
    for (eye, side) in a.eyes() {
        c.ellipse(eye.x + side * offset / 2.0, eye.y + offset, size / 2.0, size / 3.0);
    }

    if let Some(nose) = a.nose {
        let (w, h) = (nose.bbox.w * (1.0 + k), nose.bbox.h * (1.0 + k));
        let p = nose.center;
        c.fill(CONTOUR);
        c.rect(p.x - w / 4.0, p.y - h / 2.0, w / 2.0, h);
        c.fill(HIGHLIGHT);
        c.ellipse(p.x, p.y + h / 3.0, w / 3.0, h / 4.0);
    }

    // Temples and forehead.
    c.fill(CONTOUR);
    for (eye, side) in a.eyes() {
        c.ellipse(eye.x + side * 50.0, eye.y - 80.0, 40.0 * k, 40.0 * k);
    }
    if let (Some(l), Some(r)) = (a.left, a.right) {
        c.fill(HIGHLIGHT);
        c.ellipse((l.x + r.x) / 2.0, l.y - 100.0, 60.0 * k, 30.0 * k);
    }

    // Jawline and chin.
    if let Some(m) = a.mouth {
        c.fill(CONTOUR);
        let jaw = 50.0 * k;
        for (eye, side) in a.eyes() {
            c.ellipse(eye.x + side * 60.0, m.y + 50.0, jaw, jaw * 1.2);
        }
        c.fill(HIGHLIGHT);
        c.ellipse(m.x, m.y + 60.0, 40.0 * k, 30.0 * k);
    }
}

/// Under-eye, cupid's bow and brow-bone highlight points.
fn dramatic_highlights(c: &mut OverlayCanvas, a: &Anchors<'_>) {
    c.fill(HIGHLIGHT);
    for (eye, _) in a.eyes() {
        c.ellipse(eye.x, eye.y + 20.0, 30.0, 15.0);
    }
    if let Some(m) = a.mouth {
        c.ellipse(m.x, m.y - 10.0, 20.0, 10.0);
    }
    for (eye, side) in a.eyes() {
        c.ellipse(eye.x + side * 15.0, eye.y - 30.0, 20.0, 10.0);
    }
}

fn abstract_pattern(c: &mut OverlayCanvas, a: &Anchors<'_>, k: f64) {
    for (eye, side) in a.eyes() {
        c.push();
        c.translate(eye.x + side * 40.0, eye.y + 40.0);
        if side > 0.0 {
            c.rotate(PI);
        }
        petals(c, 50.0 * k);
        c.pop();
    }

    if let Some(nose) = a.nose {
        let (w, h) = (nose.bbox.w * (1.0 + k), nose.bbox.h * (1.0 + k));
        c.push();
        c.translate(nose.center.x, nose.center.y);
        for i in 0..3 {
            c.fill(alternate(i));
            c.rect(-w / 4.0, -h / 2.0 + i as f64 * h / 3.0, w / 2.0, h / 4.0);
        }
        c.pop();
    }

    if let (Some(l), Some(r)) = (a.left, a.right) {
        c.push();
        c.translate((l.x + r.x) / 2.0, l.y - 100.0);
        for i in 0..4 {
            let size = 40.0 + i as f64 * 20.0;
            c.fill(alternate(i));
            c.rotate(PI / 8.0);
            c.ellipse(0.0, 0.0, size, size * 0.7);
        }
        c.pop();
    }

    if let Some(m) = a.mouth {
        for (eye, side) in a.eyes() {
            c.push();
            c.translate(eye.x + side * 60.0, m.y + 50.0);
            if side > 0.0 {
                c.rotate(PI);
            }
            jaw_blob(c, 60.0 * k);
            c.pop();
        }
    }
}

fn alternate(i: usize) -> Rgba8Premul {
    if i % 2 == 0 { CONTOUR } else { HIGHLIGHT }
}

/// Five ellipses fanned around the origin at noise-jittered distances.
fn petals(c: &mut OverlayCanvas, size: f64) {
    const SHAPES: usize = 5;
    for i in 0..SHAPES {
        let radius = size * (0.5 + jitter("contour.petals", i as f64 * 0.1) * 0.5);
        c.fill(alternate(i));
        c.push();
        c.rotate(i as f64 * TAU / SHAPES as f64);
        c.ellipse(radius, 0.0, size / 3.0, size / 2.0);
        c.pop();
    }
}

/// Eight-point highlight blob with noise-jittered radii.
fn jaw_blob(c: &mut OverlayCanvas, size: f64) {
    const POINTS: usize = 8;
    let pts: Vec<Point> = (0..POINTS)
        .map(|i| {
            let a = i as f64 / POINTS as f64 * TAU;
            let r = size * (0.5 + jitter("contour.jaw", i as f64 * 0.1) * 0.5);
            Point::new(a.cos() * r, a.sin() * r)
        })
        .collect();
    c.fill(HIGHLIGHT);
    c.polygon(&pts);
}

#[cfg(test)]
#[path = "../../../tests/unit/effects/overlay/contour.rs"]
mod tests;
