//! Distortion strategies and the pieces they share.
//!
//! Every [`EffectKind`] maps to one [`Strategy`] through [`dispatch`]. Geometric strategies
//! move pixels sampled from the frame snapshot, obfuscation strategies degrade them in place and
//! overlay strategies paint procedural shapes on top.

/// Separable gaussian blur on premultiplied pixels.
pub mod blur;
/// Premultiplied source-over.
pub mod composite;
/// Effect identifier to strategy lookup.
pub mod dispatch;
pub mod geometric;
pub mod obfuscate;
pub mod overlay;
/// Effect selection and tuning parameters.
pub mod params;

pub use dispatch::{Strategy, dispatch, dispatch_str};
pub use params::{DistortionParameters, EffectKind, StyleParams};
