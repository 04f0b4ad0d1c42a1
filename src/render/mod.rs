//! Per-cycle frame composition and the idle placeholder.

/// Per-cycle frame composition.
pub mod compositor;
/// Idle card shown while no session is detecting.
pub mod placeholder;

pub use compositor::{CompositorStats, FrameCompositor, compose_frame};
