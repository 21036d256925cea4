//! Per-frame tracking engine: phase advancement, rep counting, adaptive
//! timing, and rep scoring.

pub mod phase;
pub mod rep;
pub mod scoring;
pub mod timing;
pub mod types;

pub use rep::{EngineStep, RepEngine};
pub use scoring::{score_rep, FaultHit, RepScore};
pub use timing::{adaptive_phase_hold_ms, adaptive_rep_duration_ms, RecentDurations};
pub use types::{
    FrameOutput, JointAngles, JointId, JointPair, Landmark, PoseFrame, RepContext,
    RepIndexTracker, RepSummary,
};
