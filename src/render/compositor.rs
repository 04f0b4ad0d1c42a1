use crate::effects::dispatch::{Strategy, dispatch};
use crate::effects::params::DistortionParameters;
use crate::foundation::core::Canvas;
use crate::foundation::error::FacewarpResult;
use crate::frame::buffer::{FrameRGBA, FrameSnapshot};
use crate::landmarks::model::Detection;
use crate::landmarks::regions::FaceFeatures;
use crate::landmarks::smooth::smooth;
use crate::render::placeholder::render_placeholder;

/// Run the selected strategy once per face, in detection-list order, over a copy of `snapshot`.
///
/// Parameters are normalized first. No smoothing happens here; faces later in the list draw over
/// earlier ones where their regions intersect.
pub fn compose_frame(
    snapshot: &FrameSnapshot,
    faces: &[Detection],
    params: &DistortionParameters,
) -> FacewarpResult<FrameRGBA> {
    let params = params.normalized()?;
    Ok(compose_faces(dispatch(params.effect_type), snapshot, faces, &params))
}

/// A face whose strategy fails is logged and skipped; the faces after it still draw.
fn compose_faces(
    strategy: &dyn Strategy,
    snapshot: &FrameSnapshot,
    faces: &[Detection],
    params: &DistortionParameters,
) -> FrameRGBA {
    let mut out = snapshot.to_frame();
    for (index, face) in faces.iter().enumerate() {
        let features = FaceFeatures::extract(face);
        if let Err(err) = strategy.apply(snapshot, &features, params, &mut out) {
            tracing::warn!(
                face = index,
                effect = params.effect_type.as_str(),
                error = %err,
                "effect failed for face"
            );
        }
    }
    out
}

/// Per-cycle counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompositorStats {
    /// Cycles that rendered the idle placeholder.
    pub idle_cycles: u64,
    /// Cycles with an active session but no detected face.
    pub passthrough_cycles: u64,
    /// Cycles that applied an effect to at least one face.
    pub effect_cycles: u64,
}

/// Render-loop side of a session: turns the latest frame and detections into an output frame.
///
/// Holds the previous cycle's *raw* detections so landmark smoothing never feeds on its own
/// output.
#[derive(Debug, Default)]
pub struct FrameCompositor {
    previous: Vec<Detection>,
    placeholder: Option<FrameRGBA>,
    stats: CompositorStats,
}

impl FrameCompositor {
    /// Compositor with no history and no cached placeholder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters since creation.
    pub fn stats(&self) -> CompositorStats {
        self.stats
    }

    /// Raw detections remembered for the next smoothing call.
    pub fn previous(&self) -> &[Detection] {
        &self.previous
    }

    /// Forget smoothing history, e.g. when a session stops.
    pub fn reset(&mut self) {
        self.previous.clear();
    }

    /// Idle cycle: the placeholder card, rasterized once per canvas size.
    pub fn idle(&mut self, canvas: Canvas) -> FacewarpResult<FrameRGBA> {
        self.stats.idle_cycles += 1;
        if let Some(card) = &self.placeholder
            && card.canvas() == canvas
        {
            return Ok(card.clone());
        }
        tracing::debug!(width = canvas.width, height = canvas.height, "rasterizing placeholder");
        let card = render_placeholder(canvas)?;
        self.placeholder = Some(card.clone());
        Ok(card)
    }

    /// Active cycle over one captured frame and the latest raw detections.
    ///
    /// With no detections the raw frame is returned and smoothing history is kept. Otherwise the
    /// detections are smoothed against the previous raw list, which is then replaced by this
    /// cycle's raw list, and every smoothed face goes through the selected strategy.
    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(faces = detections.len(), effect = params.effect_type.as_str())
    )]
    pub fn draw(
        &mut self,
        snapshot: &FrameSnapshot,
        detections: &[Detection],
        params: &DistortionParameters,
    ) -> FacewarpResult<FrameRGBA> {
        let params = params.normalized()?;
        if detections.is_empty() {
            tracing::trace!("no faces, passing frame through");
            self.stats.passthrough_cycles += 1;
            return Ok(snapshot.to_frame());
        }

        let smoothed = smooth(detections, &self.previous, params.smoothing_factor);
        self.previous = detections.to_vec();

        let out = compose_faces(dispatch(params.effect_type), snapshot, &smoothed, &params);
        self.stats.effect_cycles += 1;
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
