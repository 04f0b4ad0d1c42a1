use crate::effects::geometric::{Bulge, Stretch, Twist};
use crate::effects::obfuscate::{Blur, Mosaic};
use crate::effects::overlay::{
    contour::Contour, cvdazzle::CvDazzle, dazzle::Dazzle, facepaint::FacePaint, gan3d::Gan3d,
    juggalo::Juggalo,
};
use crate::effects::params::{DistortionParameters, EffectKind};
use crate::foundation::error::FacewarpResult;
use crate::frame::buffer::{FrameRGBA, FrameSnapshot};
use crate::landmarks::regions::FaceFeatures;

/// One per-face rendering strategy.
///
/// Implementations read pixels only from `snapshot` and draw into `out`; both have the same
/// dimensions. A degenerate region is skipped, never reported as an error.
pub trait Strategy: Send + Sync {
    /// The effect this strategy implements.
    fn kind(&self) -> EffectKind;

    /// Draw the effect for one face.
    fn apply(
        &self,
        snapshot: &FrameSnapshot,
        features: &FaceFeatures,
        params: &DistortionParameters,
        out: &mut FrameRGBA,
    ) -> FacewarpResult<()>;
}

static STRETCH: Stretch = Stretch;
static BULGE: Bulge = Bulge;
static TWIST: Twist = Twist;
static DAZZLE: Dazzle = Dazzle;
static JUGGALO: Juggalo = Juggalo;
static GAN3D: Gan3d = Gan3d;
static CONTOUR: Contour = Contour;
static CVDAZZLE: CvDazzle = CvDazzle;
static FACEPAINT: FacePaint = FacePaint;
static BLUR: Blur = Blur;
static MOSAIC: Mosaic = Mosaic;

/// Strategy for an effect.
pub fn dispatch(kind: EffectKind) -> &'static dyn Strategy {
    match kind {
        EffectKind::Stretch => &STRETCH,
        EffectKind::Bulge => &BULGE,
        EffectKind::Twist => &TWIST,
        EffectKind::Dazzle => &DAZZLE,
        EffectKind::Juggalo => &JUGGALO,
        EffectKind::Gan3d => &GAN3D,
        EffectKind::Contour => &CONTOUR,
        EffectKind::CvDazzle => &CVDAZZLE,
        EffectKind::FacePaint => &FACEPAINT,
        EffectKind::Blur => &BLUR,
        EffectKind::Mosaic => &MOSAIC,
    }
}

/// Strategy for a symbolic identifier; unknown identifiers get `stretch`.
pub fn dispatch_str(name: &str) -> &'static dyn Strategy {
    dispatch(EffectKind::parse(name))
}

#[cfg(test)]
#[path = "../../tests/unit/effects/dispatch.rs"]
mod tests;
