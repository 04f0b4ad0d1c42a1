use crate::foundation::core::Point;
use crate::landmarks::model::Detection;

/// Temporally stabilize a detection list against the previous frame's raw detections.
///
/// Each landmark becomes `current * (1 - factor) + previous * factor`, per axis. An empty
/// `previous` returns `current` unchanged, and a face with no counterpart at the same index in
/// `previous` (it just appeared) is passed through unsmoothed. `factor` is clamped to `[0, 1]`.
pub fn smooth(current: &[Detection], previous: &[Detection], factor: f64) -> Vec<Detection> {
    if previous.is_empty() {
        return current.to_vec();
    }
    let factor = if factor.is_finite() {
        factor.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let keep = 1.0 - factor;

    current
        .iter()
        .enumerate()
        .map(|(i, cur)| match previous.get(i) {
            None => cur.clone(),
            Some(prev) => Detection::from_points_unchecked(
                cur.points()
                    .iter()
                    .zip(prev.points())
                    .map(|(c, p)| Point::new(c.x * keep + p.x * factor, c.y * keep + p.y * factor))
                    .collect(),
            ),
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/landmarks/smooth.rs"]
mod tests;
