//! Synthetic frames and faces shared by unit tests.

use crate::effects::dispatch::Strategy;
use crate::effects::params::DistortionParameters;
use crate::foundation::core::{Canvas, Point, Rgba8Premul};
use crate::frame::buffer::{FrameRGBA, FrameSnapshot};
use crate::landmarks::model::Detection;
use crate::landmarks::regions::FaceFeatures;

/// Opaque frame whose pixels encode their own position.
pub(crate) fn gradient_frame(canvas: Canvas) -> FrameRGBA {
    let mut data = Vec::with_capacity(canvas.rgba_len());
    for y in 0..canvas.height {
        for x in 0..canvas.width {
            let hi = ((x / 256) * 64 + y / 256) as u8;
            data.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, hi, 255]);
        }
    }
    FrameRGBA::from_premul(canvas.width, canvas.height, data).unwrap()
}

pub(crate) fn gradient_snapshot() -> FrameSnapshot {
    FrameSnapshot::new(gradient_frame(Canvas::CAPTURE))
}

pub(crate) fn uniform_snapshot(color: Rgba8Premul) -> FrameSnapshot {
    FrameSnapshot::new(FrameRGBA::filled(Canvas::CAPTURE, color))
}

fn mirrored(center: Point, half: &[(f64, f64)], scale: f64) -> Vec<Point> {
    let mut pts: Vec<Point> = half
        .iter()
        .map(|&(dx, dy)| Point::new(center.x + dx * scale, center.y + dy * scale))
        .collect();
    pts.extend(
        half.iter()
            .map(|&(dx, dy)| Point::new(center.x - dx * scale, center.y - dy * scale)),
    );
    pts
}

/// A face whose regions are point-symmetric, so every region centroid equals its box center.
///
/// Eyes sit at `center ± (30, 0)·scale` with 16×8 boxes, the nose at `+(0, 30)` (12×28), the
/// mouth at `+(0, 70)` (42×12) and the jaw along `y = center.y + 110·scale`.
pub(crate) fn symmetric_face(center: Point, scale: f64) -> Detection {
    let mut pts = Vec::with_capacity(Detection::LANDMARK_COUNT);
    for i in 0..17 {
        pts.push(Point::new(
            center.x + (i as f64 - 8.0) * 8.0 * scale,
            center.y + 110.0 * scale,
        ));
    }
    for i in 0..10 {
        pts.push(Point::new(
            center.x + (i as f64 - 4.5) * 10.0 * scale,
            center.y - 20.0 * scale,
        ));
    }
    let nose_c = Point::new(center.x, center.y + 30.0 * scale);
    pts.push(nose_c);
    let nose = [(6.0, 12.0), (-6.0, 12.0), (3.0, 0.0), (0.0, 14.0)];
    pts.extend(mirrored(nose_c, &nose, scale));
    let eye = [(8.0, 0.0), (4.0, 4.0), (-4.0, 4.0)];
    pts.extend(mirrored(Point::new(center.x - 30.0 * scale, center.y), &eye, scale));
    pts.extend(mirrored(Point::new(center.x + 30.0 * scale, center.y), &eye, scale));
    let mouth = [
        (21.0, 0.0),
        (16.0, 4.0),
        (12.0, 6.0),
        (8.0, 6.0),
        (4.0, 6.0),
        (0.0, 6.0),
        (-4.0, 6.0),
        (-8.0, 6.0),
        (-12.0, 6.0),
        (-16.0, 4.0),
    ];
    pts.extend(mirrored(Point::new(center.x, center.y + 70.0 * scale), &mouth, scale));
    Detection::new(pts).unwrap()
}

/// Background used by overlay tests; no palette uses it.
pub(crate) const BACKDROP: Rgba8Premul = Rgba8Premul::opaque(30, 160, 90);

/// Every landmark on one point: all regions are degenerate.
pub(crate) fn collapsed_face(at: Point) -> Detection {
    Detection::new(vec![at; Detection::LANDMARK_COUNT]).unwrap()
}

/// Run one strategy for one face over a uniform [`BACKDROP`] frame.
pub(crate) fn render_face(
    strategy: &dyn Strategy,
    params: &DistortionParameters,
    face: &Detection,
) -> (FrameSnapshot, FrameRGBA) {
    let snap = uniform_snapshot(BACKDROP);
    let mut out = snap.to_frame();
    strategy
        .apply(&snap, &FaceFeatures::extract(face), params, &mut out)
        .unwrap();
    (snap, out)
}

/// Count of pixels that differ between two equally sized frames.
pub(crate) fn changed_pixels(a: &FrameRGBA, b: &FrameRGBA) -> usize {
    a.data
        .chunks_exact(4)
        .zip(b.data.chunks_exact(4))
        .filter(|(x, y)| x != y)
        .count()
}

pub(crate) fn default_face() -> Detection {
    symmetric_face(Point::new(320.0, 200.0), 2.0)
}
