//! Displacement strategies: rigid same-size copies of each expanded feature box.

use std::f64::consts::FRAC_PI_4;

use crate::effects::dispatch::Strategy;
use crate::effects::params::{DistortionParameters, EffectKind};
use crate::foundation::core::{Affine, Point, Rect, Vec2};
use crate::foundation::error::FacewarpResult;
use crate::frame::buffer::{FrameRGBA, FrameSnapshot, PixelRect};
use crate::landmarks::regions::{BoundingBox, FaceFeatures, FeatureKind, FeatureRegion};

/// Source boxes are grown by this factor before copying.
pub const EXPAND_FACTOR: f64 = 1.4;

/// Direction each feature is pushed by `stretch`, in units of its own box size per unit of
/// intensity.
pub fn stretch_direction(kind: FeatureKind) -> Vec2 {
    match kind {
        FeatureKind::LeftEye => Vec2::new(-0.3, 0.4),
        FeatureKind::RightEye => Vec2::new(0.3, 0.4),
        FeatureKind::Nose => Vec2::new(0.0, 0.2),
        FeatureKind::Mouth => Vec2::new(0.0, 0.5),
        FeatureKind::Jaw => Vec2::ZERO,
    }
}

fn source_rect(expanded: BoundingBox) -> PixelRect {
    PixelRect::truncated(expanded.x, expanded.y, expanded.w, expanded.h)
}

fn dest_rect(center: Point, expanded: BoundingBox) -> PixelRect {
    PixelRect::truncated(
        center.x - expanded.w / 2.0,
        center.y - expanded.h / 2.0,
        expanded.w,
        expanded.h,
    )
}

/// Copy `src` from the snapshot to `(dst.x, dst.y)` at the same size.
///
/// Only the in-frame part of `src` is read; `dst` shifts by the amount clipped off its top-left.
fn copy_region(
    snapshot: &FrameSnapshot,
    src: PixelRect,
    dst: PixelRect,
    out: &mut FrameRGBA,
) -> FacewarpResult<()> {
    let clipped = src.clip_to(snapshot.canvas());
    if clipped.is_empty() {
        return Ok(());
    }
    let dx = i64::from(clipped.x) - i64::from(src.x);
    let dy = i64::from(clipped.y) - i64::from(src.y);
    let patch = snapshot.crop(clipped)?;
    out.blit(&patch, saturate_i32(i64::from(dst.x) + dx), saturate_i32(i64::from(dst.y) + dy));
    Ok(())
}

fn saturate_i32(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

fn usable(region: &FeatureRegion) -> bool {
    if region.is_degenerate() {
        tracing::debug!(region = region.kind.as_str(), "skipping degenerate region");
        return false;
    }
    true
}

/// Pushes each inner feature along its own direction vector.
#[derive(Clone, Copy, Debug, Default)]
pub struct Stretch;

impl Strategy for Stretch {
    fn kind(&self) -> EffectKind {
        EffectKind::Stretch
    }

    fn apply(
        &self,
        snapshot: &FrameSnapshot,
        features: &FaceFeatures,
        params: &DistortionParameters,
        out: &mut FrameRGBA,
    ) -> FacewarpResult<()> {
        for region in features.inner().filter(|r| usable(r)) {
            let bbox = region.bbox;
            let expanded = bbox.expand(EXPAND_FACTOR);
            let dir = stretch_direction(region.kind) * params.intensity;
            let moved = region.center + Vec2::new(bbox.w * dir.x, bbox.h * dir.y);
            copy_region(snapshot, source_rect(expanded), dest_rect(moved, expanded), out)?;
        }
        Ok(())
    }
}

/// Enlarges the copied area around each inner feature.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bulge;

impl Bulge {
    /// Box expansion factor for a global intensity.
    pub fn factor(intensity: f64) -> f64 {
        EXPAND_FACTOR * (1.0 + intensity * 0.5)
    }
}

impl Strategy for Bulge {
    fn kind(&self) -> EffectKind {
        EffectKind::Bulge
    }

    fn apply(
        &self,
        snapshot: &FrameSnapshot,
        features: &FaceFeatures,
        params: &DistortionParameters,
        out: &mut FrameRGBA,
    ) -> FacewarpResult<()> {
        let factor = Self::factor(params.intensity);
        for region in features.inner().filter(|r| usable(r)) {
            let expanded = region.bbox.expand(factor);
            copy_region(
                snapshot,
                source_rect(expanded),
                dest_rect(region.center, expanded),
                out,
            )?;
        }
        Ok(())
    }
}

/// Rotates each inner feature about its centre.
#[derive(Clone, Copy, Debug, Default)]
pub struct Twist;

impl Twist {
    /// Rotation in radians: a quarter turn per unit of intensity.
    pub fn angle(intensity: f64) -> f64 {
        intensity * FRAC_PI_4
    }
}

impl Strategy for Twist {
    fn kind(&self) -> EffectKind {
        EffectKind::Twist
    }

    fn apply(
        &self,
        snapshot: &FrameSnapshot,
        features: &FaceFeatures,
        params: &DistortionParameters,
        out: &mut FrameRGBA,
    ) -> FacewarpResult<()> {
        let angle = Self::angle(params.intensity);
        for region in features.inner().filter(|r| usable(r)) {
            let expanded = region.bbox.expand(EXPAND_FACTOR);
            rotated_copy(
                snapshot,
                source_rect(expanded),
                dest_rect(region.center, expanded),
                Affine::rotate_about(angle, region.center),
                out,
            );
        }
        Ok(())
    }
}

/// Draw `src` at `dst` transformed by `xf`, resampled nearest-neighbour by inverse mapping.
fn rotated_copy(
    snapshot: &FrameSnapshot,
    src: PixelRect,
    dst: PixelRect,
    xf: Affine,
    out: &mut FrameRGBA,
) {
    if src.is_empty() || xf.determinant().abs() < f64::EPSILON {
        return;
    }
    let dst_rect = Rect::new(
        f64::from(dst.x),
        f64::from(dst.y),
        f64::from(dst.x) + f64::from(dst.w),
        f64::from(dst.y) + f64::from(dst.h),
    );
    let bounds = xf.transform_rect_bbox(dst_rect);
    let inv = xf.inverse();

    let canvas = out.canvas();
    let x0 = bounds.x0.floor().max(0.0) as i64;
    let y0 = bounds.y0.floor().max(0.0) as i64;
    let x1 = bounds.x1.ceil().min(f64::from(canvas.width)) as i64;
    let y1 = bounds.y1.ceil().min(f64::from(canvas.height)) as i64;

    for y in y0..y1 {
        for x in x0..x1 {
            let q = inv * Point::new(x as f64 + 0.5, y as f64 + 0.5);
            let u = (q.x - f64::from(dst.x)).floor() as i64;
            let v = (q.y - f64::from(dst.y)).floor() as i64;
            if u < 0 || v < 0 || u >= i64::from(src.w) || v >= i64::from(src.h) {
                continue;
            }
            if let Some(px) = snapshot.pixel(i64::from(src.x) + u, i64::from(src.y) + v) {
                out.set_pixel(x, y, px);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/geometric.rs"]
mod tests;
