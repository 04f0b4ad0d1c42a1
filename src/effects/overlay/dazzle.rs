use std::f64::consts::PI;

use super::{OverlayCanvas, anchor, jitter, paint};
use crate::effects::dispatch::Strategy;
use crate::effects::params::{DazzlePattern, DistortionParameters, EffectKind};
use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::FacewarpResult;
use crate::frame::buffer::{FrameRGBA, FrameSnapshot};
use crate::landmarks::regions::{FaceFeatures, FeatureRegion};

/// White, black, red, blue.
pub const PALETTE: [Rgba8Premul; 4] = [
    Rgba8Premul::WHITE,
    Rgba8Premul::BLACK,
    Rgba8Premul::opaque(255, 0, 0),
    Rgba8Premul::opaque(0, 0, 255),
];

/// High-contrast camouflage patterns over eyes, nose bridge and mouth.
#[derive(Clone, Copy, Debug, Default)]
pub struct Dazzle;

impl Strategy for Dazzle {
    fn kind(&self) -> EffectKind {
        EffectKind::Dazzle
    }

    fn apply(
        &self,
        _snapshot: &FrameSnapshot,
        features: &FaceFeatures,
        params: &DistortionParameters,
        out: &mut FrameRGBA,
    ) -> FacewarpResult<()> {
        paint(out, |c| match params.style.dazzle {
            DazzlePattern::Geometric => draw_geometric(c, features),
            DazzlePattern::Asymmetric => draw_asymmetric(c, features, &PALETTE),
            DazzlePattern::Minimal => draw_minimal(c, features),
        })
    }
}

fn draw_geometric(c: &mut OverlayCanvas, f: &FaceFeatures) {
    for (i, eye) in [&f.left_eye, &f.right_eye].into_iter().enumerate() {
        if let Some(eye) = anchor(eye) {
            // Stable per-eye spin in [0, PI).
            let angle = jitter("dazzle.eye", i as f64) * PI;
            let size = eye.bbox.w * 1.5;
            for k in 0..3 {
                c.fill(PALETTE[k % PALETTE.len()]);
                c.push();
                c.translate(eye.center.x, eye.center.y);
                c.rotate(angle + k as f64 * PI / 3.0);
                c.triangle(-size / 2.0, -size / 2.0, size / 2.0, -size / 2.0, 0.0, size / 2.0);
                c.rect(-size / 3.0, -size / 3.0, size / 2.0, size / 2.0);
                c.pop();
            }
        }
    }

    if let Some(nose) = anchor(&f.nose) {
        let (w, h) = (nose.bbox.w * 1.2, nose.bbox.h * 1.5);
        for k in 0..4 {
            c.fill(PALETTE[k % PALETTE.len()]);
            c.rect(
                nose.center.x - w / 2.0 + k as f64 * w / 4.0,
                nose.center.y - h / 2.0,
                w / 4.0,
                h,
            );
        }
    }

    if let Some(mouth) = anchor(&f.mouth) {
        let (w, h) = (mouth.bbox.w * 1.5, mouth.bbox.h * 1.2);
        for k in 0..3 {
            c.fill(PALETTE[k % PALETTE.len()]);
            c.push();
            c.translate(mouth.center.x, mouth.center.y);
            c.rotate(k as f64 * PI / 4.0);
            c.rect(-w / 3.0, -h / 3.0, w / 2.0, h / 2.0);
            c.pop();
        }
    }
}

/// Mismatched shapes on each side of the face.
///
/// Also the `asymmetric` variant of `cvdazzle`, which passes its own palette.
pub(crate) fn draw_asymmetric(
    c: &mut OverlayCanvas,
    f: &FaceFeatures,
    colors: &[Rgba8Premul; 4],
) {
    asymmetric_eye(c, &f.left_eye, colors, true);
    asymmetric_eye(c, &f.right_eye, colors, false);

    if let Some(nose) = anchor(&f.nose) {
        let (w, h) = (nose.bbox.w * 1.2, nose.bbox.h * 1.5);
        let p = nose.center;
        c.fill(colors[2]);
        c.rect(p.x - w / 3.0, p.y - h / 2.0, w / 2.0, h);
        c.fill(colors[3]);
        c.triangle(
            p.x + w / 6.0,
            p.y - h / 2.0,
            p.x + w / 2.0,
            p.y,
            p.x + w / 6.0,
            p.y + h / 2.0,
        );
    }

    if let Some(mouth) = anchor(&f.mouth) {
        let (w, h) = (mouth.bbox.w * 1.5, mouth.bbox.h * 1.2);
        let p = mouth.center;
        c.fill(colors[0]);
        c.ellipse(p.x - w / 4.0, p.y, w / 3.0, h / 2.0);
        c.fill(colors[1]);
        c.rect(p.x + w / 6.0, p.y - h / 3.0, w / 3.0, h / 2.0);
    }
}

fn asymmetric_eye(
    c: &mut OverlayCanvas,
    eye: &FeatureRegion,
    colors: &[Rgba8Premul; 4],
    left: bool,
) {
    let Some(eye) = anchor(eye) else {
        return;
    };
    let size = eye.bbox.w * 1.5;
    c.fill(colors[if left { 0 } else { 1 }]);
    c.push();
    c.translate(eye.center.x, eye.center.y);
    c.rotate(if left { PI / 4.0 } else { -PI / 4.0 });
    if left {
        c.triangle(-size / 2.0, -size / 2.0, size / 2.0, -size / 2.0, 0.0, size / 2.0);
    } else {
        c.rect(-size / 3.0, -size / 3.0, size / 2.0, size / 2.0);
    }
    c.pop();
}

fn draw_minimal(c: &mut OverlayCanvas, f: &FaceFeatures) {
    let [white, black, ..] = PALETTE;
    for eye in [&f.left_eye, &f.right_eye] {
        if let Some(eye) = anchor(eye) {
            let size = eye.bbox.w * 0.8;
            c.fill(white);
            for k in 0..4 {
                let angle = k as f64 * PI / 2.0;
                c.ellipse(
                    eye.center.x + angle.cos() * size / 2.0,
                    eye.center.y + angle.sin() * size / 2.0,
                    size / 4.0,
                    size / 4.0,
                );
            }
        }
    }

    if let Some(nose) = anchor(&f.nose) {
        let (w, h) = (nose.bbox.w * 0.8, nose.bbox.h * 1.2);
        c.fill(black);
        c.rect(nose.center.x - w / 4.0, nose.center.y - h / 3.0, w / 2.0, h / 3.0);
    }

    if let Some(mouth) = anchor(&f.mouth) {
        let (w, h) = (mouth.bbox.w * 0.8, mouth.bbox.h * 0.8);
        c.fill(white);
        c.ellipse(mouth.center.x, mouth.center.y, w / 2.0, h / 2.0);
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/effects/overlay/dazzle.rs"]
mod tests;
