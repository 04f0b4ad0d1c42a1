#![allow(dead_code)]

use facewarp::{Canvas, Detection, FrameRGBA, Point};

/// Opaque frame whose pixels encode their own position.
pub fn gradient_frame(canvas: Canvas) -> FrameRGBA {
    let mut data = Vec::with_capacity(canvas.rgba_len());
    for y in 0..canvas.height {
        for x in 0..canvas.width {
            data.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, (x / 256 * 64 + y / 256) as u8, 255]);
        }
    }
    FrameRGBA::from_premul(canvas.width, canvas.height, data).unwrap()
}

fn mirrored(pts: &mut Vec<Point>, center: Point, half: &[(f64, f64)]) {
    let at = |dx: f64, dy: f64| Point::new(center.x + dx, center.y + dy);
    pts.extend(half.iter().map(|&(dx, dy)| at(dx, dy)));
    pts.extend(half.iter().map(|&(dx, dy)| at(-dx, -dy)));
}

/// Face with point-symmetric regions on integer coordinates, so region centroids are exactly
/// the bounding-box centers. `center` must be integral.
pub fn face_at(center: Point) -> Detection {
    let (cx, cy) = (center.x, center.y);
    let mut pts = Vec::with_capacity(Detection::LANDMARK_COUNT);
    pts.extend((0..17).map(|i| Point::new(cx + (f64::from(i) - 8.0) * 12.0, cy + 160.0)));
    pts.extend((0..10).map(|i| Point::new(cx + (f64::from(i) - 4.5) * 14.0, cy - 30.0)));
    let nose = Point::new(cx, cy + 45.0);
    pts.push(nose);
    mirrored(&mut pts, nose, &[(9.0, 18.0), (-9.0, 18.0), (4.0, 0.0), (0.0, 21.0)]);
    let eye = [(12.0, 0.0), (6.0, 6.0), (-6.0, 6.0)];
    mirrored(&mut pts, Point::new(cx - 45.0, cy), &eye);
    mirrored(&mut pts, Point::new(cx + 45.0, cy), &eye);
    mirrored(
        &mut pts,
        Point::new(cx, cy + 105.0),
        &[
            (31.0, 0.0),
            (24.0, 6.0),
            (18.0, 9.0),
            (12.0, 9.0),
            (6.0, 9.0),
            (0.0, 9.0),
            (-6.0, 9.0),
            (-12.0, 9.0),
            (-18.0, 9.0),
            (-24.0, 6.0),
        ],
    );
    Detection::new(pts).unwrap()
}

/// Detections as the JSON the CLI reads.
pub fn detections_json(faces: &[Detection]) -> String {
    serde_json::to_string(faces).unwrap()
}
