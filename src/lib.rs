//! RepSense - Exercise Rep Tracking and Form Analysis
//!
//! A pose-driven strength-training engine: per-frame phase tracking and rep
//! counting over declarative exercise models, form-quality scoring with
//! fault detection, shadow pose-provider reconciliation, and post-session
//! fatigue and coaching analytics.

pub mod analysis;
pub mod config;
pub mod engine;
pub mod models;
pub mod session;
pub mod shadow;

// Re-export commonly used types
pub use analysis::{analyze_session, analyze_session_with, SessionAnalytics, SessionInputs};
pub use config::EngineConfig;
pub use engine::types::{FrameOutput, JointAngles, PoseFrame};
pub use engine::RepEngine;
pub use models::ExerciseKind;
pub use session::TrackingSession;
pub use shadow::{PoseProvider, ShadowSelector};
