use super::{OverlayCanvas, anchor, paint};
use crate::effects::dispatch::Strategy;
use crate::effects::params::{DistortionParameters, EffectKind, FacePaintStyle};
use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::FacewarpResult;
use crate::frame::buffer::{FrameRGBA, FrameSnapshot};
use crate::landmarks::regions::{FaceFeatures, FeatureRegion};

/// Skin-tone paint, light.
pub const PAINT_LIGHT: Rgba8Premul = Rgba8Premul::opaque(255, 200, 150);
/// Skin-tone paint, dark.
pub const PAINT_DARK: Rgba8Premul = Rgba8Premul::opaque(200, 150, 100);
/// Scarf stripe.
pub const SCARF_DARK: Rgba8Premul = Rgba8Premul::opaque(100, 100, 100);
/// Scarf panel.
pub const SCARF_LIGHT: Rgba8Premul = Rgba8Premul::opaque(150, 150, 150);

/// Recursion depth of the fractal squares.
pub const FRACTAL_DEPTH: u32 = 3;

/// Artistic face paint: cubist blocks, striped fabric or recursive squares.
#[derive(Clone, Copy, Debug, Default)]
pub struct FacePaint;

impl Strategy for FacePaint {
    fn kind(&self) -> EffectKind {
        EffectKind::FacePaint
    }

    fn apply(
        &self,
        _snapshot: &FrameSnapshot,
        features: &FaceFeatures,
        params: &DistortionParameters,
        out: &mut FrameRGBA,
    ) -> FacewarpResult<()> {
        let style = params.style.facepaint;
        paint(out, |c| {
            for eye in [&features.left_eye, &features.right_eye] {
                if let Some(eye) = anchor(eye) {
                    at(c, eye, |c| match style {
                        FacePaintStyle::Cubist => cubist_eye(c, eye.bbox.w * 2.0),
                        FacePaintStyle::Scarf => {
                            let size = eye.bbox.w * 2.5;
                            scarf(c, size, size, 5);
                        }
                        FacePaintStyle::Fractal => fractal(c, 0.0, 0.0, eye.bbox.w * 2.0, FRACTAL_DEPTH),
                    });
                }
            }
            if let Some(nose) = anchor(&features.nose) {
                let (w, h) = (nose.bbox.w * 2.0, nose.bbox.h * 2.0);
                at(c, nose, |c| match style {
                    FacePaintStyle::Cubist => cubist_nose(c, w, h),
                    FacePaintStyle::Scarf => scarf(c, w, h, 3),
                    FacePaintStyle::Fractal => fractal(c, 0.0, 0.0, nose.bbox.h * 1.5, FRACTAL_DEPTH),
                });
            }
            if let Some(mouth) = anchor(&features.mouth) {
                let (w, h) = (mouth.bbox.w * 2.0, mouth.bbox.h * 1.5);
                at(c, mouth, |c| match style {
                    FacePaintStyle::Cubist => cubist_mouth(c, w, h),
                    FacePaintStyle::Scarf => scarf(c, w, h, 7),
                    FacePaintStyle::Fractal => fractal(c, 0.0, 0.0, mouth.bbox.w * 1.5, FRACTAL_DEPTH),
                });
            }
        })
    }
}

fn at(c: &mut OverlayCanvas, region: &FeatureRegion, draw: impl FnOnce(&mut OverlayCanvas)) {
    c.push();
    c.translate(region.center.x, region.center.y);
    draw(c);
    c.pop();
}

fn cubist_eye(c: &mut OverlayCanvas, size: f64) {
    let half = size / 2.0;
    c.fill(PAINT_LIGHT);
    c.rect(-half, -half, size, size);
    c.fill(PAINT_DARK);
    c.triangle(-half, -half, half, -half, 0.0, half);
    c.fill(SCARF_DARK);
    c.ellipse(size / 4.0, -size / 4.0, half, half);
}

fn cubist_nose(c: &mut OverlayCanvas, w: f64, h: f64) {
    c.fill(PAINT_LIGHT);
    c.rect(-w / 3.0, -h / 2.0, w / 1.5, h);
    c.fill(PAINT_DARK);
    c.triangle(-w / 4.0, -h / 2.0, w / 4.0, -h / 2.0, 0.0, 0.0);
    c.triangle(-w / 4.0, h / 2.0, w / 4.0, h / 2.0, 0.0, 0.0);
    c.fill(SCARF_DARK);
    c.ellipse(0.0, -h / 4.0, w / 3.0, h / 3.0);
    c.ellipse(0.0, h / 4.0, w / 3.0, h / 3.0);
}

fn cubist_mouth(c: &mut OverlayCanvas, w: f64, h: f64) {
    c.fill(PAINT_LIGHT);
    c.rect(-w / 2.0, -h / 2.0, w, h);
    c.fill(PAINT_DARK);
    c.triangle(-w / 3.0, -h / 2.0, w / 3.0, -h / 2.0, 0.0, 0.0);
    c.triangle(-w / 3.0, h / 2.0, w / 3.0, h / 2.0, 0.0, 0.0);
    c.fill(SCARF_DARK);
    c.ellipse(-w / 4.0, 0.0, w / 4.0, h / 3.0);
    c.ellipse(w / 4.0, 0.0, w / 4.0, h / 3.0);
}

/// Dark panel with `stripes` light vertical bands, each half a pitch wide.
fn scarf(c: &mut OverlayCanvas, w: f64, h: f64, stripes: u32) {
    c.fill(SCARF_DARK);
    c.rect(-w / 2.0, -h / 2.0, w, h);
    c.fill(SCARF_LIGHT);
    let pitch = w / f64::from(stripes);
    for i in 0..stripes {
        c.rect(-w / 2.0 + f64::from(i) * pitch, -h / 2.0, pitch / 2.0, h);
    }
}

/// A square with four half-size children on its corners, `depth` levels deep.
fn fractal(c: &mut OverlayCanvas, x: f64, y: f64, size: f64, depth: u32) {
    if depth == 0 {
        return;
    }
    c.fill(if depth % 2 == 0 { PAINT_LIGHT } else { PAINT_DARK });
    c.rect(x - size / 2.0, y - size / 2.0, size, size);
    let child = size / 2.0;
    for (dx, dy) in [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)] {
        fractal(c, x + dx * child, y + dy * child, child, depth - 1);
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/effects/overlay/facepaint.rs"]
mod tests;
