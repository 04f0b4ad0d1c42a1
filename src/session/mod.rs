//! Capture sessions: device capabilities, the detection feed and the session state machine.

/// Capture and detector capabilities.
pub mod devices;
/// Background detection loop and its shared slot.
pub mod feed;
/// The `Session` state machine.
pub mod lifecycle;
pub mod scripted;

pub use devices::{CaptureDevice, LandmarkDetector, SessionDevices};
pub use feed::{DetectionSlot, FeedStats};
pub use lifecycle::{Session, SessionOpts, SessionState};
pub use scripted::{ScriptStep, ScriptedDetector, ScriptedDevices, StillCapture, script_from_json};
