//! Core types for the per-frame tracking pipeline.
//!
//! Everything here is plain data: joint identifiers, one frame of joint
//! angles, the per-rep aggregate context, and the session-scoped rep index
//! tracker. Angle values that are absent or non-finite are treated as
//! untracked, never as errors.

use serde::{Deserialize, Serialize};

use crate::shadow::PoseProvider;

/// One of the eight tracked joints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointId {
    LeftElbow,
    RightElbow,
    LeftShoulder,
    RightShoulder,
    LeftKnee,
    RightKnee,
    LeftHip,
    RightHip,
}

impl JointId {
    /// All joints in declaration order.
    pub const ALL: [JointId; 8] = [
        JointId::LeftElbow,
        JointId::RightElbow,
        JointId::LeftShoulder,
        JointId::RightShoulder,
        JointId::LeftKnee,
        JointId::RightKnee,
        JointId::LeftHip,
        JointId::RightHip,
    ];

    /// Get display label.
    pub fn label(&self) -> &'static str {
        match self {
            JointId::LeftElbow => "Left Elbow",
            JointId::RightElbow => "Right Elbow",
            JointId::LeftShoulder => "Left Shoulder",
            JointId::RightShoulder => "Right Shoulder",
            JointId::LeftKnee => "Left Knee",
            JointId::RightKnee => "Right Knee",
            JointId::LeftHip => "Left Hip",
            JointId::RightHip => "Right Hip",
        }
    }
}

/// A left/right joint pair.
///
/// Declaration order is load-bearing: pair selection in the analytics
/// module resolves ties to the first pair in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JointPair {
    Elbow,
    Shoulder,
    Knee,
    Hip,
}

impl JointPair {
    /// All candidate pairs in fixed declaration order.
    pub const ALL: [JointPair; 4] = [
        JointPair::Elbow,
        JointPair::Shoulder,
        JointPair::Knee,
        JointPair::Hip,
    ];

    /// The (left, right) joints of this pair.
    pub fn joints(&self) -> (JointId, JointId) {
        match self {
            JointPair::Elbow => (JointId::LeftElbow, JointId::RightElbow),
            JointPair::Shoulder => (JointId::LeftShoulder, JointId::RightShoulder),
            JointPair::Knee => (JointId::LeftKnee, JointId::RightKnee),
            JointPair::Hip => (JointId::LeftHip, JointId::RightHip),
        }
    }

    /// Get display label.
    pub fn label(&self) -> &'static str {
        match self {
            JointPair::Elbow => "Elbow",
            JointPair::Shoulder => "Shoulder",
            JointPair::Knee => "Knee",
            JointPair::Hip => "Hip",
        }
    }
}

impl std::fmt::Display for JointPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One frame of joint angles in degrees.
///
/// Any angle may be absent or non-finite; both mean the joint is untracked
/// for this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct JointAngles {
    pub left_elbow: Option<f64>,
    pub right_elbow: Option<f64>,
    pub left_shoulder: Option<f64>,
    pub right_shoulder: Option<f64>,
    pub left_knee: Option<f64>,
    pub right_knee: Option<f64>,
    pub left_hip: Option<f64>,
    pub right_hip: Option<f64>,
}

impl JointAngles {
    /// Get the angle for a joint, filtering out non-finite values.
    pub fn get(&self, joint: JointId) -> Option<f64> {
        let raw = match joint {
            JointId::LeftElbow => self.left_elbow,
            JointId::RightElbow => self.right_elbow,
            JointId::LeftShoulder => self.left_shoulder,
            JointId::RightShoulder => self.right_shoulder,
            JointId::LeftKnee => self.left_knee,
            JointId::RightKnee => self.right_knee,
            JointId::LeftHip => self.left_hip,
            JointId::RightHip => self.right_hip,
        };
        raw.filter(|v| v.is_finite())
    }

    /// Set the angle for a joint.
    pub fn set(&mut self, joint: JointId, value: Option<f64>) {
        let slot = match joint {
            JointId::LeftElbow => &mut self.left_elbow,
            JointId::RightElbow => &mut self.right_elbow,
            JointId::LeftShoulder => &mut self.left_shoulder,
            JointId::RightShoulder => &mut self.right_shoulder,
            JointId::LeftKnee => &mut self.left_knee,
            JointId::RightKnee => &mut self.right_knee,
            JointId::LeftHip => &mut self.left_hip,
            JointId::RightHip => &mut self.right_hip,
        };
        *slot = value;
    }

    /// Mean of the left and right angle of a pair.
    ///
    /// Falls back to the single tracked side when only one is available;
    /// `None` when neither side is tracked.
    pub fn pair_mean(&self, pair: JointPair) -> Option<f64> {
        let (left, right) = pair.joints();
        match (self.get(left), self.get(right)) {
            (Some(l), Some(r)) => Some((l + r) / 2.0),
            (Some(v), None) | (None, Some(v)) => Some(v),
            (None, None) => None,
        }
    }

    /// Mean absolute per-joint difference against another frame, over
    /// joints tracked in both. `None` when no joint is tracked in both.
    pub fn mean_abs_delta(&self, other: &JointAngles) -> Option<f64> {
        let mut sum = 0.0;
        let mut count = 0usize;
        for joint in JointId::ALL {
            if let (Some(a), Some(b)) = (self.get(joint), other.get(joint)) {
                sum += (a - b).abs();
                count += 1;
            }
        }
        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }
}

/// A pose landmark position with tracking metadata.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Whether the estimator considers this landmark tracked
    pub tracked: bool,
    /// Estimator confidence in [0, 1]
    pub confidence: f64,
}

/// One input frame from the pose-capture pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoseFrame {
    /// Capture timestamp in seconds (caller clock, monotone per session)
    pub timestamp: f64,
    /// Joint angles for this frame
    pub angles: JointAngles,
    /// Optional landmark positions for coverage estimation
    pub landmarks: Option<Vec<Landmark>>,
    /// Optional shadow-provider observation for this frame
    pub shadow: Option<crate::shadow::ShadowObservation>,
}

impl PoseFrame {
    /// Fraction of landmarks flagged as tracked, 1.0 when none supplied.
    pub fn landmark_coverage(&self) -> f64 {
        match &self.landmarks {
            Some(lms) if !lms.is_empty() => {
                let tracked = lms.iter().filter(|l| l.tracked).count();
                tracked as f64 / lms.len() as f64
            }
            _ => 1.0,
        }
    }
}

/// Per-rep aggregate built incrementally while a rep is open.
///
/// Holds the start/end angle snapshots and component-wise extrema across
/// the rep. Finalized when the rep ends, then discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepContext {
    /// Angles at rep start
    pub start_angles: JointAngles,
    /// Angles at rep end (set by `finalize`)
    pub end_angles: JointAngles,
    /// Component-wise minimum across the rep
    pub min_angles: JointAngles,
    /// Component-wise maximum across the rep
    pub max_angles: JointAngles,
    /// Rep start timestamp in seconds
    pub start_ts: f64,
    /// Elapsed duration in milliseconds (set by `finalize`)
    pub duration_ms: f64,
}

impl RepContext {
    /// Open a new context at the given frame.
    pub fn open(angles: JointAngles, ts: f64) -> Self {
        Self {
            start_angles: angles,
            end_angles: JointAngles::default(),
            min_angles: angles,
            max_angles: angles,
            start_ts: ts,
            duration_ms: 0.0,
        }
    }

    /// Fold one frame of angles into the running extrema.
    ///
    /// Untracked joints are skipped; a joint that was untracked at rep
    /// start picks up its first tracked value here.
    pub fn update(&mut self, angles: &JointAngles) {
        for joint in JointId::ALL {
            if let Some(v) = angles.get(joint) {
                let min = self.min_angles.get(joint).map_or(v, |m| m.min(v));
                let max = self.max_angles.get(joint).map_or(v, |m| m.max(v));
                self.min_angles.set(joint, Some(min));
                self.max_angles.set(joint, Some(max));
            }
        }
    }

    /// Close the context at the given frame.
    pub fn finalize(&mut self, angles: JointAngles, ts: f64) {
        self.update(&angles);
        self.end_angles = angles;
        self.duration_ms = (ts - self.start_ts).max(0.0) * 1000.0;
    }
}

/// Session-scoped tracker for the currently open rep.
///
/// Holds the 1-based index of the open rep or none. Set on rep start,
/// cleared on rep end, abandonment, or session reset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepIndexTracker {
    open: Option<u32>,
    completed: u32,
}

impl RepIndexTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the currently open rep, if any.
    pub fn active(&self) -> Option<u32> {
        self.open
    }

    /// Number of reps counted so far this session.
    pub fn completed(&self) -> u32 {
        self.completed
    }

    /// Open a rep; index is completed count + 1. No-op if one is open.
    pub fn open_rep(&mut self) -> u32 {
        if let Some(idx) = self.open {
            return idx;
        }
        let idx = self.completed + 1;
        self.open = Some(idx);
        idx
    }

    /// Close the open rep and count it, returning its index.
    pub fn close_rep(&mut self) -> Option<u32> {
        let idx = self.open.take()?;
        self.completed += 1;
        Some(idx)
    }

    /// Abandon the open rep without counting it.
    pub fn abandon(&mut self) -> Option<u32> {
        self.open.take()
    }

    /// Reset to a fresh session.
    pub fn reset(&mut self) {
        self.open = None;
        self.completed = 0;
    }
}

/// Scoring summary for one completed rep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepSummary {
    /// 1-based rep index within the session
    pub rep_index: u32,
    /// Form Quality Index in [0, 100]; `None` when no scored input was tracked
    pub fqi: Option<f64>,
    /// Ids of the faults that triggered on this rep
    pub fault_ids: Vec<String>,
    /// Coaching cues for the triggered faults
    pub cues: Vec<String>,
    /// Rep duration in milliseconds
    pub duration_ms: f64,
}

/// Per-frame output of a tracking session.
#[derive(Debug, Clone)]
pub struct FrameOutput {
    /// Index of the active phase in the exercise model
    pub phase: usize,
    /// Label of the active phase
    pub phase_label: &'static str,
    /// Index of the currently open rep, if any
    pub active_rep: Option<u32>,
    /// Summary of a rep completed on this frame, if any
    pub completed: Option<RepSummary>,
    /// Tracking quality in [0, 1] for this frame
    pub tracking_quality: f64,
    /// Adaptive phase-hold duration in milliseconds for downstream cue display
    pub phase_hold_ms: f64,
    /// Pose source selected for this frame
    pub provider: PoseProvider,
}
