//! facewarp distorts, decorates and obfuscates faces in live video frames, driven by 68-point
//! facial landmarks.
//!
//! Per frame the pipeline is:
//!
//! - Smooth the latest detections against the previous cycle's raw detections
//! - Extract named feature regions (eyes, nose, mouth, jaw) per face
//! - Run the selected [`Strategy`] for every face over a copy of the frame
//!
//! A [`Session`] owns the capture device and landmark detector, runs detection on its own thread
//! and renders frames through a [`FrameCompositor`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod frame;
mod landmarks;

/// Distortion strategies, their parameters and dispatch.
pub mod effects;
/// Frame composition and the idle placeholder.
pub mod render;
/// Capture sessions and detection feed.
pub mod session;

pub use crate::foundation::core::{Affine, Canvas, Point, Rect, Rgba8Premul, Vec2};
pub use crate::foundation::error::{FacewarpError, FacewarpResult};

pub use crate::effects::dispatch::{Strategy, dispatch, dispatch_str};
pub use crate::effects::params::{
    ContourStyle, CvDazzleStyle, DazzlePattern, DistortionParameters, EffectKind, FacePaintStyle,
    Gan3dStyle, JuggaloStyle, StyleParams,
};
pub use crate::frame::buffer::{FrameRGBA, FrameSnapshot, PixelRect};
pub use crate::frame::io::{decode_frame, read_frame, write_png};
pub use crate::landmarks::model::{Detection, LandmarkPoint, detections_from_json};
pub use crate::landmarks::regions::{
    BoundingBox, FaceFeatures, FeatureKind, FeatureRegion, centroid,
};
pub use crate::landmarks::smooth::smooth;
pub use crate::render::compositor::{CompositorStats, FrameCompositor, compose_frame};
pub use crate::session::lifecycle::{Session, SessionOpts, SessionState};

#[cfg(test)]
#[path = "../tests/unit/fixtures.rs"]
pub(crate) mod fixtures;
