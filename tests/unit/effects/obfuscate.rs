use super::*;
use crate::fixtures::{gradient_frame, gradient_snapshot, symmetric_face, uniform_snapshot};
use crate::foundation::core::{Canvas, Point, Rgba8Premul};

fn features() -> FaceFeatures {
    FaceFeatures::extract(&symmetric_face(Point::new(320.0, 200.0), 2.0))
}

fn apply(s: &dyn Strategy, snap: &FrameSnapshot, params: &DistortionParameters) -> FrameRGBA {
    let mut out = snap.to_frame();
    s.apply(snap, &features(), params, &mut out).unwrap();
    out
}

#[test]
fn mosaic_on_uniform_frame_is_identity() {
    let snap = uniform_snapshot(Rgba8Premul::opaque(12, 140, 77));
    for intensity in [0.0, 0.7, 2.0] {
        let params = DistortionParameters::default()
            .with_effect(EffectKind::Mosaic)
            .with_intensity(intensity);
        assert_eq!(apply(&Mosaic, &snap, &params).data, snap.data);
    }
}

fn whole(frame: &FrameRGBA) -> PixelRect {
    PixelRect::truncated(0.0, 0.0, f64::from(frame.width), f64::from(frame.height))
}

#[test]
fn pixelate_fills_each_tile_with_its_centre_sample() {
    let before = gradient_frame(Canvas::new(8, 4).unwrap());
    let mut frame = before.clone();
    pixelate_region(&before, whole(&before), 4.0, &mut frame);
    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(frame.pixel(x, y), before.pixel(2, 2));
            assert_eq!(frame.pixel(x + 4, y), before.pixel(6, 2));
        }
    }
}

#[test]
fn pixelate_partial_edge_tile_samples_inside_region() {
    let before = gradient_frame(Canvas::new(5, 1).unwrap());
    let mut frame = before.clone();
    pixelate_region(&before, whole(&before), 4.0, &mut frame);
    assert_eq!(frame.pixel(4, 0), before.pixel(4, 0));
    assert_eq!(frame.pixel(0, 0), before.pixel(2, 0));
}

#[test]
fn pixelate_grid_is_anchored_at_an_off_frame_origin() {
    let before = gradient_frame(Canvas::new(12, 4).unwrap());
    let mut frame = before.clone();
    let region = PixelRect::truncated(-2.0, 0.0, 14.0, 4.0);
    pixelate_region(&before, region, 4.0, &mut frame);
    // First cell spans x = -2..2 and samples x = 0; the next spans 2..6 and samples x = 4.
    assert_eq!(frame.pixel(1, 0), before.pixel(0, 2));
    assert_eq!(frame.pixel(2, 0), before.pixel(4, 2));
    assert_eq!(frame.pixel(5, 3), before.pixel(4, 2));
    assert_eq!(frame.pixel(6, 0), before.pixel(8, 2));
}

#[test]
fn pixelate_leaves_cells_whose_sample_is_off_frame() {
    let before = gradient_frame(Canvas::new(8, 4).unwrap());
    let mut frame = before.clone();
    let region = PixelRect::truncated(-6.0, 0.0, 14.0, 4.0);
    pixelate_region(&before, region, 8.0, &mut frame);
    // First cell spans x = -6..2 with its sample at x = -2.
    assert_eq!(frame.pixel(0, 0), before.pixel(0, 0));
    assert_eq!(frame.pixel(1, 3), before.pixel(1, 3));
    assert_eq!(frame.pixel(2, 0), before.pixel(6, 3));
}

#[test]
fn pixelate_far_off_region_touches_only_visible_cells() {
    let before = gradient_frame(Canvas::new(8, 4).unwrap());
    let mut frame = before.clone();
    let region = PixelRect::truncated(-2e9, -2e9, 4e9, 4e9);
    pixelate_region(&before, region, 10.0, &mut frame);
    assert_eq!(frame.canvas(), before.canvas());
}

#[test]
fn mosaic_tile_grows_with_intensity() {
    assert_eq!(Mosaic::tile_size(10.0, 0.0), 10.0);
    assert_eq!(Mosaic::tile_size(10.0, 1.0), 20.0);
    let snap = gradient_snapshot();
    let params = DistortionParameters::default().with_effect(EffectKind::Mosaic);
    let out = apply(&Mosaic, &snap, &params);
    assert_ne!(out.data, snap.data);
    assert_eq!(out.pixel(0, 0), snap.pixel(0, 0));
}

#[test]
fn blur_changes_regions_only() {
    let snap = gradient_snapshot();
    let params = DistortionParameters::default().with_effect(EffectKind::Blur);
    let out = apply(&Blur, &snap, &params);
    assert_ne!(out.data, snap.data);
    assert_eq!(out.pixel(600, 20), snap.pixel(600, 20));
}

#[test]
fn blur_with_zero_style_intensity_is_identity() {
    let snap = gradient_snapshot();
    let mut params = DistortionParameters::default().with_effect(EffectKind::Blur);
    params.style.blur_intensity = 0.0;
    assert_eq!(apply(&Blur, &snap, &params).data, snap.data);
}

#[test]
fn blur_on_uniform_frame_is_identity() {
    let snap = uniform_snapshot(Rgba8Premul::opaque(90, 91, 92));
    let params = DistortionParameters::default().with_effect(EffectKind::Blur);
    assert_eq!(apply(&Blur, &snap, &params).data, snap.data);
}
