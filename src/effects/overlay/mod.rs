//! Procedural overlay strategies: synthetic shapes anchored at feature centroids, drawn on an
//! [`OverlayCanvas`] and composited over the output. None of them samples the snapshot.

pub(crate) mod canvas;
pub mod contour;
/// Anti-recognition camouflage patterns.
pub mod cvdazzle;
/// High-contrast dazzle camouflage.
pub mod dazzle;
/// Painted cubist, scarf and fractal patterns.
pub mod facepaint;
pub mod gan3d;
/// Black and white face paint.
pub mod juggalo;

pub use canvas::OverlayCanvas;

use crate::foundation::error::FacewarpResult;
use crate::foundation::math::{Fnv1a64, value_noise};
use crate::frame::buffer::FrameRGBA;
use crate::landmarks::regions::FeatureRegion;

/// Draw one layer for one face and composite it over `out`.
pub(crate) fn paint(
    out: &mut FrameRGBA,
    draw: impl FnOnce(&mut OverlayCanvas),
) -> FacewarpResult<()> {
    let mut canvas = OverlayCanvas::new(out.canvas())?;
    draw(&mut canvas);
    canvas.composite_onto(out)
}

/// `region` if it can anchor shapes.
pub(crate) fn anchor(region: &FeatureRegion) -> Option<&FeatureRegion> {
    if region.is_degenerate() {
        tracing::debug!(region = region.kind.as_str(), "skipping degenerate region");
        return None;
    }
    Some(region)
}

/// Deterministic jitter in `[0, 1)` for a named shape family and sample index.
pub(crate) fn jitter(family: &str, sample: f64) -> f64 {
    let mut h = Fnv1a64::new_default();
    h.write_bytes(family.as_bytes());
    value_noise(h.finish(), sample)
}
