use super::*;

fn black() -> FrameRGBA {
    FrameRGBA::filled(Canvas::new(64, 48).unwrap(), Rgba8Premul::BLACK)
}

fn px(frame: &FrameRGBA, x: i64, y: i64) -> [u8; 4] {
    frame.pixel(x, y).unwrap()
}

#[test]
fn filled_rect_covers_its_interior_only() {
    let mut out = black();
    let mut c = OverlayCanvas::new(out.canvas()).unwrap();
    c.fill(Rgba8Premul::WHITE);
    c.rect(10.0, 10.0, 20.0, 10.0);
    assert_eq!(c.shape_count(), 1);
    c.composite_onto(&mut out).unwrap();

    assert_eq!(px(&out, 20, 15), [255, 255, 255, 255]);
    assert_eq!(px(&out, 5, 5), [0, 0, 0, 255]);
    assert_eq!(px(&out, 40, 15), [0, 0, 0, 255]);
}

#[test]
fn translate_and_pop_restore_state() {
    let mut out = black();
    let mut c = OverlayCanvas::new(out.canvas()).unwrap();
    c.fill(Rgba8Premul::opaque(255, 0, 0));
    c.push();
    c.translate(40.0, 30.0);
    c.fill(Rgba8Premul::opaque(0, 0, 255));
    c.rect(-4.0, -4.0, 8.0, 8.0);
    c.pop();
    c.rect(0.0, 0.0, 8.0, 8.0);
    c.composite_onto(&mut out).unwrap();

    assert_eq!(px(&out, 40, 30), [0, 0, 255, 255]);
    assert_eq!(px(&out, 4, 4), [255, 0, 0, 255]);
}

#[test]
fn rotation_turns_a_wide_rect_tall() {
    let mut out = black();
    let mut c = OverlayCanvas::new(out.canvas()).unwrap();
    c.fill(Rgba8Premul::WHITE);
    c.translate(32.0, 24.0);
    c.rotate(std::f64::consts::FRAC_PI_2);
    c.rect(-15.0, -3.0, 30.0, 6.0);
    c.composite_onto(&mut out).unwrap();

    assert_eq!(px(&out, 32, 12), [255, 255, 255, 255]);
    assert_eq!(px(&out, 20, 24), [0, 0, 0, 255]);
}

#[test]
fn ellipse_and_triangle_fill_their_centres() {
    let mut out = black();
    let mut c = OverlayCanvas::new(out.canvas()).unwrap();
    c.fill(Rgba8Premul::WHITE);
    c.ellipse(16.0, 16.0, 20.0, 12.0);
    c.triangle(40.0, 10.0, 60.0, 10.0, 50.0, 40.0);
    c.composite_onto(&mut out).unwrap();

    assert_eq!(px(&out, 16, 16), [255, 255, 255, 255]);
    assert_eq!(px(&out, 16, 28), [0, 0, 0, 255]);
    assert_eq!(px(&out, 50, 15), [255, 255, 255, 255]);
}

#[test]
fn degenerate_shapes_are_ignored() {
    let mut c = OverlayCanvas::new(Canvas::new(8, 8).unwrap()).unwrap();
    c.ellipse(4.0, 4.0, 0.0, 3.0);
    c.polygon(&[Point::new(1.0, 1.0), Point::new(2.0, 2.0)]);
    c.line(Point::new(1.0, 1.0), Point::new(1.0, 1.0), 1.0, Rgba8Premul::WHITE);
    assert_eq!(c.shape_count(), 0);
}

#[test]
fn empty_layer_leaves_frame_untouched() {
    let mut out = black();
    let before = out.clone();
    OverlayCanvas::new(out.canvas())
        .unwrap()
        .composite_onto(&mut out)
        .unwrap();
    assert_eq!(out, before);
}

#[test]
fn size_mismatch_is_a_render_error() {
    let c = OverlayCanvas::new(Canvas::new(8, 8).unwrap()).unwrap();
    let mut out = black();
    assert!(matches!(
        c.composite_onto(&mut out),
        Err(FacewarpError::Render(_))
    ));
}
