use super::*;

#[test]
fn png_write_then_read_preserves_opaque_pixels() {
    let dir = std::path::PathBuf::from("target").join("unit_frame_io");
    let path = dir.join("gradient.png");

    let mut data = Vec::new();
    for y in 0..3u8 {
        for x in 0..5u8 {
            data.extend_from_slice(&[x * 40, y * 80, 9, 255]);
        }
    }
    let frame = FrameRGBA::from_premul(5, 3, data).unwrap();
    write_png(&frame, &path).unwrap();

    let back = read_frame(&path).unwrap();
    assert_eq!(back, frame);
}

#[test]
fn decode_rejects_garbage() {
    let err = decode_frame(b"definitely not an image").unwrap_err();
    assert!(matches!(err, FacewarpError::Other(_)));
}
