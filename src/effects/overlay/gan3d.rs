//! Layered pseudo-3D solids: each feature gets three shrinking layers whose side faces are offset
//! diagonally by a depth that grows with the style intensity.

use std::f64::consts::TAU;

use super::{OverlayCanvas, anchor, jitter, paint};
use crate::effects::dispatch::Strategy;
use crate::effects::params::{DistortionParameters, EffectKind, Gan3dStyle};
use crate::foundation::core::{Point, Rgba8Premul, Vec2};
use crate::foundation::error::FacewarpResult;
use crate::frame::buffer::{FrameRGBA, FrameSnapshot};
use crate::landmarks::regions::{FaceFeatures, FeatureRegion};

/// Layer colours: white, black, gray.
pub const PALETTE: [Rgba8Premul; 4] = [
    Rgba8Premul::WHITE,
    Rgba8Premul::BLACK,
    Rgba8Premul::opaque(100, 100, 100),
    Rgba8Premul::opaque(200, 200, 200),
];
const SIDE: Rgba8Premul = Rgba8Premul::opaque(200, 200, 200);
const TOP: Rgba8Premul = Rgba8Premul::opaque(150, 150, 150);

/// Stacked copies that fake depth.
pub const LAYERS: usize = 3;

/// Size multiplier and depth offset of layer `i` for a base size and style intensity.
pub fn layer(i: usize, base: f64, depth: f64) -> (f64, f64) {
    let i = i as f64;
    (base * (1.0 - i * 0.2), depth * (1.0 - i * 0.3))
}

/// Pseudo-3D solids over each feature.
#[derive(Clone, Copy, Debug, Default)]
pub struct Gan3d;

impl Strategy for Gan3d {
    fn kind(&self) -> EffectKind {
        EffectKind::Gan3d
    }

    fn apply(
        &self,
        _snapshot: &FrameSnapshot,
        features: &FaceFeatures,
        params: &DistortionParameters,
        out: &mut FrameRGBA,
    ) -> FacewarpResult<()> {
        let style = params.style.gan3d;
        let gi = params.style.gan3d_intensity;
        paint(out, |c| {
            eye(c, &features.left_eye, true, style, gi);
            eye(c, &features.right_eye, false, style, gi);
            nose(c, &features.nose, style, gi);
            mouth(c, &features.mouth, style, gi);
        })
    }
}

/// Whether layer `i` is a geometric solid (otherwise an organic blob).
fn is_solid(style: Gan3dStyle, i: usize) -> bool {
    match style {
        Gan3dStyle::Geometric => true,
        Gan3dStyle::Organic => false,
        Gan3dStyle::Hybrid => i % 2 == 0,
    }
}

fn eye(c: &mut OverlayCanvas, region: &FeatureRegion, left: bool, style: Gan3dStyle, gi: f64) {
    let Some(region) = anchor(region) else {
        return;
    };
    let size = region.bbox.w * (1.0 + gi);
    let depth = gi * 2.0;
    c.push();
    c.translate(region.center.x, region.center.y);
    for i in 0..LAYERS {
        let (s, d) = layer(i, size, depth);
        c.fill(PALETTE[i % PALETTE.len()]);
        if !is_solid(style, i) {
            organic(c, Point::ORIGIN, s / 2.0, s / 2.0, d);
        } else if left {
            cube(c, s, d);
        } else {
            pyramid(c, s, d);
        }
    }
    c.pop();
}

fn nose(c: &mut OverlayCanvas, region: &FeatureRegion, style: Gan3dStyle, gi: f64) {
    let Some(region) = anchor(region) else {
        return;
    };
    let (w, h) = (region.bbox.w * (1.0 + gi), region.bbox.h * (1.0 + gi));
    for i in 0..LAYERS {
        let (lw, d) = layer(i, w, gi * 2.0);
        let (lh, _) = layer(i, h, 0.0);
        c.fill(PALETTE[i % PALETTE.len()]);
        if is_solid(style, i) {
            ring(c, region.center, lw, lh, d, 12);
        } else {
            organic(c, region.center, lw / 2.0, lh / 2.0, d);
        }
    }
}

fn mouth(c: &mut OverlayCanvas, region: &FeatureRegion, style: Gan3dStyle, gi: f64) {
    let Some(region) = anchor(region) else {
        return;
    };
    let (w, h) = (region.bbox.w * (1.0 + gi), region.bbox.h * (1.0 + gi));
    for i in 0..LAYERS {
        let (lw, d) = layer(i, w, gi * 2.0);
        let (lh, _) = layer(i, h, 0.0);
        c.fill(PALETTE[i % PALETTE.len()]);
        if is_solid(style, i) {
            ring(c, region.center, lw, lh, d, 24);
        } else {
            organic(c, region.center, lw / 2.0, lh / 2.0, d);
        }
    }
}

/// Front square in the current fill, right and top faces shaded.
fn cube(c: &mut OverlayCanvas, size: f64, depth: f64) {
    let hs = size / 2.0;
    c.rect(-hs, -hs, size, size);
    c.fill(SIDE);
    c.quad(
        Point::new(hs, -hs),
        Point::new(hs + depth, -hs - depth),
        Point::new(hs + depth, hs - depth),
        Point::new(hs, hs),
    );
    c.fill(TOP);
    c.quad(
        Point::new(-hs, -hs),
        Point::new(-hs + depth, -hs - depth),
        Point::new(hs + depth, -hs - depth),
        Point::new(hs, -hs),
    );
}

/// Square base in the current fill with four faces meeting at an apex raised by `depth`.
fn pyramid(c: &mut OverlayCanvas, size: f64, depth: f64) {
    let hs = size / 2.0;
    c.rect(-hs, -hs, size, size);
    c.fill(SIDE);
    let apex = (0.0, -hs - depth);
    for (a, b) in [
        ((-hs, -hs), (hs, -hs)),
        ((hs, -hs), (hs, hs)),
        ((hs, hs), (-hs, hs)),
        ((-hs, hs), (-hs, -hs)),
    ] {
        c.triangle(a.0, a.1, apex.0, apex.1, b.0, b.1);
    }
}

/// Extruded elliptic band (cylinder for the nose, torus for the mouth) with lit front and shaded
/// back caps.
fn ring(c: &mut OverlayCanvas, center: Point, w: f64, h: f64, depth: f64, segments: usize) {
    let lift = Vec2::new(depth, -depth);
    let at = |k: usize| {
        let a = k as f64 * TAU / segments as f64;
        Point::new(center.x + a.cos() * w / 2.0, center.y + a.sin() * h / 2.0)
    };
    c.fill(SIDE);
    for k in 0..segments {
        let (p1, p2) = (at(k), at(k + 1));
        c.quad(p1, p1 + lift, p2 + lift, p2);
    }
    c.fill(Rgba8Premul::WHITE);
    c.ellipse(center.x, center.y, w, h);
    c.fill(TOP);
    c.ellipse(center.x + depth, center.y - depth, w, h);
}

/// Eight-point blob with noise-jittered radii in the current fill, then its extruded rim.
fn organic(c: &mut OverlayCanvas, center: Point, rx: f64, ry: f64, depth: f64) {
    const POINTS: usize = 8;
    let pts: Vec<Point> = (0..POINTS)
        .map(|i| {
            let a = i as f64 / POINTS as f64 * TAU;
            let r = 1.0 + jitter("gan3d.organic", i as f64 * 0.1) * 0.2;
            Point::new(center.x + a.cos() * rx * r, center.y + a.sin() * ry * r)
        })
        .collect();
    c.polygon(&pts);

    let lift = Vec2::new(depth, -depth);
    c.fill(SIDE);
    for i in 0..POINTS {
        let (p, q) = (pts[i], pts[(i + 1) % POINTS]);
        c.quad(p, p + lift, q + lift, q);
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/effects/overlay/gan3d.rs"]
mod tests;
