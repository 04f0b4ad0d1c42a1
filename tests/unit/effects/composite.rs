use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn half_transparent_layer_mixes_with_opaque_frame() {
    let dst = [0, 0, 200, 255];
    let src = [128, 0, 0, 128];
    let out = over(dst, src, 1.0);
    assert_eq!(out[3], 255);
    assert_eq!(out[0], 128);
    assert!(out[2] > 90 && out[2] < 110);
}

#[test]
fn over_in_place_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4], 1.0).is_err());
}

#[test]
fn over_in_place_leaves_uncovered_pixels() {
    let mut dst = [9u8, 9, 9, 255, 9, 9, 9, 255].to_vec();
    let src = [0u8, 0, 0, 0, 255, 255, 255, 255];
    over_in_place(&mut dst, &src, 1.0).unwrap();
    assert_eq!(dst, [9, 9, 9, 255, 255, 255, 255, 255]);
}
