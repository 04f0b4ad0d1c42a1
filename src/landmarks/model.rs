use crate::foundation::core::Point;
use crate::foundation::error::{FacewarpError, FacewarpResult};

/// One detected `(x, y)` landmark in frame pixel coordinates.
pub type LandmarkPoint = Point;

/// Full landmark set for one face in one frame.
///
/// Always holds exactly [`Detection::LANDMARK_COUNT`] points in the standard 68-point layout
/// (jaw 0..17, brows 17..27, nose 27..36, eyes 36..48, mouth 48..68). A detection's face index
/// is its position in the detector's output list.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<LandmarkPoint>", into = "Vec<LandmarkPoint>")]
pub struct Detection {
    points: Vec<LandmarkPoint>,
}

impl Detection {
    /// Points per face in the 68-point layout.
    pub const LANDMARK_COUNT: usize = 68;

    /// Validate and wrap a landmark array.
    pub fn new(points: Vec<LandmarkPoint>) -> FacewarpResult<Self> {
        if points.len() != Self::LANDMARK_COUNT {
            return Err(FacewarpError::validation(format!(
                "detection must have {} landmarks, got {}",
                Self::LANDMARK_COUNT,
                points.len()
            )));
        }
        if let Some(i) = points
            .iter()
            .position(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(FacewarpError::validation(format!(
                "landmark {i} is not finite"
            )));
        }
        Ok(Self { points })
    }

    /// The landmarks in layout order.
    pub fn points(&self) -> &[LandmarkPoint] {
        &self.points
    }

    /// Same landmarks shifted by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            points: self
                .points
                .iter()
                .map(|p| Point::new(p.x + dx, p.y + dy))
                .collect(),
        }
    }

    pub(crate) fn from_points_unchecked(points: Vec<LandmarkPoint>) -> Self {
        debug_assert_eq!(points.len(), Self::LANDMARK_COUNT);
        Self { points }
    }
}

impl TryFrom<Vec<LandmarkPoint>> for Detection {
    type Error = FacewarpError;

    fn try_from(points: Vec<LandmarkPoint>) -> FacewarpResult<Self> {
        Self::new(points)
    }
}

impl From<Detection> for Vec<LandmarkPoint> {
    fn from(d: Detection) -> Self {
        d.points
    }
}

/// Parse a JSON list of detections (each a list of 68 `{ "x", "y" }` points).
pub fn detections_from_json(json: &str) -> FacewarpResult<Vec<Detection>> {
    serde_json::from_str(json).map_err(|e| FacewarpError::serde(e.to_string()))
}

#[cfg(test)]
#[path = "../../tests/unit/landmarks/model.rs"]
mod tests;
