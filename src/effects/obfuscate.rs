//! Obfuscation strategies: each expanded feature box is processed offscreen and written back in
//! place.

use crate::effects::blur::{blur_rgba8_premul, radius_for_intensity};
use crate::effects::dispatch::Strategy;
use crate::effects::geometric::EXPAND_FACTOR;
use crate::effects::params::{DistortionParameters, EffectKind};
use crate::foundation::error::FacewarpResult;
use crate::frame::buffer::{FrameRGBA, FrameSnapshot, PixelRect};
use crate::landmarks::regions::FaceFeatures;

/// Each usable region's expanded box, in drawing order. Boxes may extend past the frame.
fn region_rects(features: &FaceFeatures) -> impl Iterator<Item = PixelRect> + '_ {
    features
        .inner()
        .filter(|r| {
            if r.is_degenerate() {
                tracing::debug!(region = r.kind.as_str(), "skipping degenerate region");
            }
            !r.is_degenerate()
        })
        .map(|r| {
            let e = r.bbox.expand(EXPAND_FACTOR);
            PixelRect::truncated(e.x, e.y, e.w, e.h)
        })
}

/// Gaussian-blurs each inner feature box.
#[derive(Clone, Copy, Debug, Default)]
pub struct Blur;

impl Strategy for Blur {
    fn kind(&self) -> EffectKind {
        EffectKind::Blur
    }

    fn apply(
        &self,
        snapshot: &FrameSnapshot,
        features: &FaceFeatures,
        params: &DistortionParameters,
        out: &mut FrameRGBA,
    ) -> FacewarpResult<()> {
        let (radius, sigma) = radius_for_intensity(params.style.blur_intensity);
        let canvas = snapshot.canvas();
        let rects: Vec<PixelRect> = region_rects(features)
            .map(|r| r.clip_to(canvas))
            .filter(|r| !r.is_empty())
            .collect();
        for rect in rects {
            let mut patch = snapshot.crop(rect)?;
            patch.data = blur_rgba8_premul(&patch.data, patch.width, patch.height, radius, sigma)?;
            out.blit(&patch, rect.x, rect.y);
        }
        Ok(())
    }
}

/// Pixelates each inner feature box.
#[derive(Clone, Copy, Debug, Default)]
pub struct Mosaic;

impl Mosaic {
    /// Tile side for a base size and global intensity.
    pub fn tile_size(mosaic_size: f64, intensity: f64) -> f64 {
        mosaic_size * (1.0 + intensity)
    }
}

impl Strategy for Mosaic {
    fn kind(&self) -> EffectKind {
        EffectKind::Mosaic
    }

    fn apply(
        &self,
        snapshot: &FrameSnapshot,
        features: &FaceFeatures,
        params: &DistortionParameters,
        out: &mut FrameRGBA,
    ) -> FacewarpResult<()> {
        let tile = Self::tile_size(params.style.mosaic_size, params.intensity);
        for rect in region_rects(features) {
            pixelate_region(snapshot, rect, tile, out);
        }
        Ok(())
    }
}

/// Tile spans `[start, end)` of a grid laid from `origin` over `len` pixels, keeping only the
/// spans that overlap `[0, limit)`.
fn tile_spans(origin: i64, len: i64, tile: f64, limit: i64) -> Vec<(i64, i64)> {
    let end = origin + len;
    let edge = |k: i64| origin + (k as f64 * tile).floor() as i64;
    let mut k = if origin < 0 {
        ((-origin) as f64 / tile).floor() as i64 - 1
    } else {
        0
    }
    .max(0);
    let mut spans = Vec::new();
    while edge(k) < end.min(limit) {
        let span = (edge(k), edge(k + 1).min(end));
        if span.1 > 0 {
            spans.push(span);
        }
        k += 1;
    }
    spans
}

/// Block-quantize `region` of `src` into `out`: every `tile`-sided cell takes the colour at its
/// centre.
///
/// The grid is anchored at the region's top-left corner, which may lie outside the frame. The
/// centre sample of a partial edge cell is clamped into the region; a cell whose sample falls
/// outside the frame is left as it is. Tiles smaller than one pixel leave `out` unchanged.
pub fn pixelate_region(src: &FrameRGBA, region: PixelRect, tile: f64, out: &mut FrameRGBA) {
    if !tile.is_finite() || tile < 1.0 || region.is_empty() {
        return;
    }
    let canvas = src.canvas();
    let (rx, ry) = (i64::from(region.x), i64::from(region.y));
    let (rw, rh) = (i64::from(region.w), i64::from(region.h));
    let xs = tile_spans(rx, rw, tile, i64::from(canvas.width));
    let ys = tile_spans(ry, rh, tile, i64::from(canvas.height));
    let centre = |start: i64, origin: i64, len: i64| {
        let rel = start - origin;
        origin + ((rel as f64 + tile / 2.0) as i64).min(len - 1)
    };

    for &(y0, y1) in &ys {
        let cy = centre(y0, ry, rh);
        for &(x0, x1) in &xs {
            let Some(px) = src.pixel(centre(x0, rx, rw), cy) else {
                continue;
            };
            for y in y0.max(0)..y1.min(i64::from(canvas.height)) {
                for x in x0.max(0)..x1.min(i64::from(canvas.width)) {
                    out.set_pixel(x, y, px);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/obfuscate.rs"]
mod tests;
