use std::f64::consts::FRAC_PI_4;

use super::{OverlayCanvas, anchor, dazzle, paint};
use crate::effects::dispatch::Strategy;
use crate::effects::params::{CvDazzleStyle, DistortionParameters, EffectKind};
use crate::foundation::core::{Point, Rgba8Premul};
use crate::foundation::error::FacewarpResult;
use crate::frame::buffer::{FrameRGBA, FrameSnapshot};
use crate::landmarks::regions::{FaceFeatures, FeatureRegion};

/// Main pattern colour.
pub const PRIMARY: Rgba8Premul = Rgba8Premul::WHITE;
/// Contrast colour.
pub const SECONDARY: Rgba8Premul = Rgba8Premul::BLACK;
/// Used sparingly to break symmetry.
pub const ACCENT: Rgba8Premul = Rgba8Premul::opaque(255, 0, 0);

/// Colours handed to the shared asymmetric pattern.
const ASYMMETRIC: [Rgba8Premul; 4] = [PRIMARY, SECONDARY, ACCENT, SECONDARY];

/// Anti-recognition camouflage: checkerboard meshes, asymmetric blocks or occluding blobs.
#[derive(Clone, Copy, Debug, Default)]
pub struct CvDazzle;

impl Strategy for CvDazzle {
    fn kind(&self) -> EffectKind {
        EffectKind::CvDazzle
    }

    fn apply(
        &self,
        _snapshot: &FrameSnapshot,
        features: &FaceFeatures,
        params: &DistortionParameters,
        out: &mut FrameRGBA,
    ) -> FacewarpResult<()> {
        paint(out, |c| match params.style.cvdazzle {
            CvDazzleStyle::Mesh => draw_mesh(c, features),
            CvDazzleStyle::Asymmetric => dazzle::draw_asymmetric(c, features, &ASYMMETRIC),
            CvDazzleStyle::Occlusion => draw_occlusion(c, features),
        })
    }
}

fn checker(i: i32, j: i32) -> Rgba8Premul {
    if (i + j).rem_euclid(2) == 0 {
        PRIMARY
    } else {
        SECONDARY
    }
}

/// `cols × rows` checkerboard of `cell`-sized squares centred on the origin.
fn grid(c: &mut OverlayCanvas, cols: i32, rows: i32, cell: f64, rotate_cells: bool, slashes: bool) {
    for i in -cols..=cols {
        for j in -rows..=rows {
            let (x, y) = (f64::from(i) * cell, f64::from(j) * cell);
            c.fill(checker(i, j));
            if rotate_cells {
                c.push();
                c.rotate(FRAC_PI_4);
                c.rect(x - cell / 2.0, y - cell / 2.0, cell, cell);
                c.pop();
            } else {
                c.rect(x - cell / 2.0, y - cell / 2.0, cell, cell);
            }
            if slashes && checker(i, j) == PRIMARY {
                c.line(
                    Point::new(x - cell / 2.0, y - cell / 2.0),
                    Point::new(x + cell / 2.0, y + cell / 2.0),
                    1.0,
                    ACCENT,
                );
            }
        }
    }
}

fn draw_mesh(c: &mut OverlayCanvas, f: &FaceFeatures) {
    for eye in [&f.left_eye, &f.right_eye] {
        if let Some(eye) = anchor(eye) {
            c.push();
            c.translate(eye.center.x, eye.center.y);
            grid(c, 2, 2, eye.bbox.w * 2.0 / 4.0, false, true);
            c.pop();
        }
    }
    if let Some(nose) = anchor(&f.nose) {
        c.push();
        c.translate(nose.center.x, nose.center.y);
        grid(c, 3, 2, nose.bbox.w * 2.0 / 6.0, false, false);
        c.pop();
    }
    if let Some(mouth) = anchor(&f.mouth) {
        c.push();
        c.translate(mouth.center.x, mouth.center.y);
        grid(c, 3, 2, mouth.bbox.w * 2.0 / 5.0, true, false);
        c.pop();
    }
}

/// Dark blob with a light block and a red wedge, `w × h` around the origin.
fn occluder(c: &mut OverlayCanvas, w: f64, h: f64) {
    c.fill(SECONDARY);
    c.ellipse(0.0, 0.0, w, h * 1.2);
    c.fill(PRIMARY);
    c.rect(-w / 3.0, -h / 3.0, w / 2.0, h / 2.0);
    c.fill(ACCENT);
    c.triangle(w / 4.0, -h / 4.0, w / 2.0, h / 4.0, w / 4.0, h / 2.0);
}

fn draw_occlusion(c: &mut OverlayCanvas, f: &FaceFeatures) {
    for eye in [&f.left_eye, &f.right_eye] {
        if let Some(eye) = anchor(eye) {
            let size = eye.bbox.w * 2.5;
            occlude_at(c, eye, size, size);
        }
    }
    if let Some(nose) = anchor(&f.nose) {
        occlude_at(c, nose, nose.bbox.w * 2.5, nose.bbox.h * 1.2);
    }
    if let Some(mouth) = anchor(&f.mouth) {
        occlude_at(c, mouth, mouth.bbox.w * 1.5, mouth.bbox.h * 2.5);
    }
}

fn occlude_at(c: &mut OverlayCanvas, region: &FeatureRegion, w: f64, h: f64) {
    c.push();
    c.translate(region.center.x, region.center.y);
    occluder(c, w, h);
    c.pop();
}

#[cfg(test)]
#[path = "../../../tests/unit/effects/overlay/cvdazzle.rs"]
mod tests;
