use super::*;

#[test]
fn blur_radius_0_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    let out = blur_rgba8_premul(&src, 1, 2, 0, 1.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_constant_image_is_identity() {
    let (w, h) = (6u32, 4u32);
    let px = [10u8, 20, 30, 255];
    let src = px.repeat((w * h) as usize);
    let out = blur_rgba8_premul(&src, w, h, 10, 5.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let (w, h) = (5u32, 5u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((2 * w + 2) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = blur_rgba8_premul(&src, w, h, 2, 1.2).unwrap();

    assert!(out.chunks_exact(4).filter(|px| px[3] != 0).count() > 1);
    let sum_a: u32 = out.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 4);
}

#[test]
fn blur_rejects_wrong_length() {
    assert!(blur_rgba8_premul(&[0u8; 7], 1, 2, 1, 1.0).is_err());
}

#[test]
fn radius_scales_with_intensity() {
    assert_eq!(radius_for_intensity(0.0).0, 0);
    assert_eq!(radius_for_intensity(0.5).0, 10);
    assert_eq!(radius_for_intensity(1.0), (20, 10.0));
    assert_eq!(radius_for_intensity(7.0).0, 20);
    assert_eq!(radius_for_intensity(f64::NAN).0, 0);
}
