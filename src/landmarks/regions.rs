use std::ops::Range;

use crate::foundation::core::{Point, Rect};
use crate::landmarks::model::{Detection, LandmarkPoint};

/// Named facial region of the 68-point layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    /// Points 36..42.
    LeftEye,
    /// Points 42..48.
    RightEye,
    /// Points 27..36.
    Nose,
    /// Points 48..68.
    Mouth,
    /// Points 0..17, ear to ear.
    Jaw,
}

impl FeatureKind {
    /// Drawing order used by every strategy.
    pub const ORDER: [FeatureKind; 5] = [
        FeatureKind::LeftEye,
        FeatureKind::RightEye,
        FeatureKind::Nose,
        FeatureKind::Mouth,
        FeatureKind::Jaw,
    ];

    /// Regions touched by the displacement and obfuscation families.
    pub const INNER: [FeatureKind; 4] = [
        FeatureKind::LeftEye,
        FeatureKind::RightEye,
        FeatureKind::Nose,
        FeatureKind::Mouth,
    ];

    /// Landmark indices belonging to this feature.
    pub fn landmark_range(self) -> Range<usize> {
        match self {
            FeatureKind::Jaw => 0..17,
            FeatureKind::Nose => 27..36,
            FeatureKind::LeftEye => 36..42,
            FeatureKind::RightEye => 42..48,
            FeatureKind::Mouth => 48..68,
        }
    }

    /// camelCase feature name.
    pub fn as_str(self) -> &'static str {
        match self {
            FeatureKind::LeftEye => "leftEye",
            FeatureKind::RightEye => "rightEye",
            FeatureKind::Nose => "nose",
            FeatureKind::Mouth => "mouth",
            FeatureKind::Jaw => "jaw",
        }
    }
}

/// Axis-aligned box over a region's points. `w` and `h` are never negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
}

impl BoundingBox {
    /// Box from its top-left corner and size.
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x,
            y,
            w: w.max(0.0),
            h: h.max(0.0),
        }
    }

    /// Min/max scan. No points yields a zero box at the origin; one point yields a zero-size box
    /// at that point.
    pub fn from_points(points: &[LandmarkPoint]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };
        let (mut x0, mut y0, mut x1, mut y1) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Scale about the box's own center. A non-finite or negative factor collapses the box onto
    /// its center.
    pub fn expand(self, factor: f64) -> Self {
        let factor = if factor.is_finite() { factor.max(0.0) } else { 0.0 };
        let w = self.w * factor;
        let h = self.h * factor;
        Self {
            x: self.x - (w - self.w) / 2.0,
            y: self.y - (h - self.h) / 2.0,
            w,
            h,
        }
    }

    /// Geometric centre.
    pub fn center(self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Zero-area boxes are skipped by every strategy.
    pub fn is_degenerate(self) -> bool {
        !(self.w > 0.0 && self.h > 0.0)
    }

    /// As a kurbo rectangle.
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.w, self.y + self.h)
    }
}

/// Arithmetic mean of `points`; the origin for an empty slice.
pub fn centroid(points: &[LandmarkPoint]) -> Point {
    if points.is_empty() {
        return Point::ORIGIN;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sx / n, sy / n)
}

/// One named feature of a face.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureRegion {
    /// Which feature this is.
    pub kind: FeatureKind,
    /// Axis-aligned bounds of `points`.
    pub bbox: BoundingBox,
    /// Centroid of `points`.
    pub center: Point,
    /// The feature's landmarks.
    pub points: Vec<LandmarkPoint>,
}

impl FeatureRegion {
    fn from_detection(detection: &Detection, kind: FeatureKind) -> Self {
        let points = detection
            .points()
            .get(kind.landmark_range())
            .unwrap_or(&[])
            .to_vec();
        Self {
            kind,
            bbox: BoundingBox::from_points(&points),
            center: centroid(&points),
            points,
        }
    }

    /// Too few points or zero area; strategies skip such regions.
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 2 || self.bbox.is_degenerate()
    }
}

/// The five named regions of one face, recomputed every cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceFeatures {
    /// Left eye.
    pub left_eye: FeatureRegion,
    /// Right eye.
    pub right_eye: FeatureRegion,
    /// Nose.
    pub nose: FeatureRegion,
    /// Mouth.
    pub mouth: FeatureRegion,
    /// Jaw.
    pub jaw: FeatureRegion,
}

impl FaceFeatures {
    /// Split one detection into its five regions.
    pub fn extract(detection: &Detection) -> Self {
        Self {
            left_eye: FeatureRegion::from_detection(detection, FeatureKind::LeftEye),
            right_eye: FeatureRegion::from_detection(detection, FeatureKind::RightEye),
            nose: FeatureRegion::from_detection(detection, FeatureKind::Nose),
            mouth: FeatureRegion::from_detection(detection, FeatureKind::Mouth),
            jaw: FeatureRegion::from_detection(detection, FeatureKind::Jaw),
        }
    }

    /// The region for `kind`.
    pub fn region(&self, kind: FeatureKind) -> &FeatureRegion {
        match kind {
            FeatureKind::LeftEye => &self.left_eye,
            FeatureKind::RightEye => &self.right_eye,
            FeatureKind::Nose => &self.nose,
            FeatureKind::Mouth => &self.mouth,
            FeatureKind::Jaw => &self.jaw,
        }
    }

    /// Regions in [`FeatureKind::ORDER`].
    pub fn iter(&self) -> impl Iterator<Item = &FeatureRegion> + '_ {
        FeatureKind::ORDER.into_iter().map(|k| self.region(k))
    }

    /// The four non-jaw regions, in order.
    pub fn inner(&self) -> impl Iterator<Item = &FeatureRegion> + '_ {
        FeatureKind::INNER.into_iter().map(|k| self.region(k))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/landmarks/regions.rs"]
mod tests;
