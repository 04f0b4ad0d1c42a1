use super::*;

#[test]
fn canvas_rejects_zero_and_oversized() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert!(Canvas::new(70_000, 10).is_err());
    assert_eq!(Canvas::new(640, 480).unwrap(), Canvas::CAPTURE);
}

#[test]
fn canvas_rgba_len_is_four_bytes_per_pixel() {
    assert_eq!(Canvas::CAPTURE.rgba_len(), 640 * 480 * 4);
}

#[test]
fn premul_from_straight_scales_channels() {
    let c = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    assert_eq!(c.a, 128);
    assert_eq!(c.r, 128);
    assert_eq!(c.g, 64);
    assert_eq!(c.b, 0);
    assert_eq!(Rgba8Premul::WHITE.to_array(), [255, 255, 255, 255]);
}
