use super::{OverlayCanvas, anchor, paint};
use crate::effects::dispatch::Strategy;
use crate::effects::params::{DistortionParameters, EffectKind, JuggaloStyle};
use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::FacewarpResult;
use crate::frame::buffer::{FrameRGBA, FrameSnapshot};
use crate::landmarks::regions::FaceFeatures;

const BLACK: Rgba8Premul = Rgba8Premul::BLACK;
const ACCENT: Rgba8Premul = Rgba8Premul::opaque(255, 0, 0);

/// Bold black face paint with red accents.
#[derive(Clone, Copy, Debug, Default)]
pub struct Juggalo;

impl Strategy for Juggalo {
    fn kind(&self) -> EffectKind {
        EffectKind::Juggalo
    }

    fn apply(
        &self,
        _snapshot: &FrameSnapshot,
        features: &FaceFeatures,
        params: &DistortionParameters,
        out: &mut FrameRGBA,
    ) -> FacewarpResult<()> {
        let style = params.style.juggalo;
        paint(out, |c| draw(c, features, style))
    }
}

fn draw(c: &mut OverlayCanvas, f: &FaceFeatures, style: JuggaloStyle) {
    let eye_scale = match style {
        JuggaloStyle::Classic | JuggaloStyle::Modern => 2.0,
        JuggaloStyle::Extreme => 2.5,
    };
    for (eye, left) in [(&f.left_eye, true), (&f.right_eye, false)] {
        let Some(eye) = anchor(eye) else {
            continue;
        };
        let s = eye.bbox.w * eye_scale / 2.0;
        c.fill(BLACK);
        c.push();
        c.translate(eye.center.x, eye.center.y);
        match (style, left) {
            (JuggaloStyle::Classic, true) => c.triangle(-s, -s, s, -s, 0.0, s),
            (JuggaloStyle::Classic, false) => c.triangle(-s, s, s, s, 0.0, -s),
            (JuggaloStyle::Modern, true) => {
                c.triangle(-s, -s, s, -s, 0.0, s);
                c.rect(-s / 2.0, -s / 2.0, s, s);
            }
            (JuggaloStyle::Modern, false) => {
                c.ellipse(0.0, 0.0, 2.0 * s, 2.0 * s);
                c.triangle(-s, s, s, s, 0.0, -s);
            }
            (JuggaloStyle::Extreme, true) => {
                c.triangle(-s, -s, s, -s, 0.0, s);
                c.rect(-2.0 * s / 3.0, -2.0 * s / 3.0, s, s);
                c.fill(ACCENT);
                c.ellipse(0.0, 0.0, s, s);
            }
            (JuggaloStyle::Extreme, false) => {
                c.ellipse(0.0, 0.0, 2.0 * s, 2.0 * s);
                c.fill(ACCENT);
                c.triangle(-s, s, s, s, 0.0, -s);
                c.fill(BLACK);
                c.rect(-s / 2.0, -s / 2.0, s, s);
            }
        }
        c.pop();
    }

    if let Some(nose) = anchor(&f.nose) {
        let p = nose.center;
        c.fill(BLACK);
        match style {
            JuggaloStyle::Classic | JuggaloStyle::Modern => {
                let (w, h) = (nose.bbox.w * 1.5, nose.bbox.h * 2.0);
                c.rect(p.x - w / 4.0, p.y - h / 2.0, w / 2.0, h);
                if style == JuggaloStyle::Modern {
                    c.fill(ACCENT);
                    c.triangle(p.x - w / 3.0, p.y - h / 2.0, p.x + w / 3.0, p.y - h / 2.0, p.x, p.y);
                }
            }
            JuggaloStyle::Extreme => {
                let (w, h) = (nose.bbox.w * 2.0, nose.bbox.h * 2.5);
                c.rect(p.x - w / 3.0, p.y - h / 2.0, w / 1.5, h);
                c.fill(ACCENT);
                c.triangle(p.x - w / 3.0, p.y - h / 2.0, p.x + w / 3.0, p.y - h / 2.0, p.x, p.y);
                c.ellipse(p.x, p.y + h / 4.0, w / 2.0, h / 3.0);
            }
        }
    }

    if let Some(mouth) = anchor(&f.mouth) {
        let p = mouth.center;
        c.fill(BLACK);
        match style {
            JuggaloStyle::Classic => {
                c.ellipse(p.x, p.y, mouth.bbox.w * 2.0, mouth.bbox.h * 1.5);
            }
            JuggaloStyle::Modern => {
                let (w, h) = (mouth.bbox.w * 2.0, mouth.bbox.h * 1.5);
                c.ellipse(p.x, p.y, w, h);
                c.fill(ACCENT);
                c.rect(p.x - w / 4.0, p.y - h / 4.0, w / 2.0, h / 2.0);
            }
            JuggaloStyle::Extreme => {
                let (w, h) = (mouth.bbox.w * 2.5, mouth.bbox.h * 2.0);
                c.ellipse(p.x, p.y, w, h);
                c.fill(ACCENT);
                c.rect(p.x - w / 3.0, p.y - h / 3.0, w / 1.5, h / 1.5);
                c.triangle(
                    p.x - w / 4.0,
                    p.y + h / 4.0,
                    p.x + w / 4.0,
                    p.y + h / 4.0,
                    p.x,
                    p.y - h / 4.0,
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/effects/overlay/juggalo.rs"]
mod tests;
