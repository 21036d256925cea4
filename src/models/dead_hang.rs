//! Dead hang movement model.
//!
//! An isometric hold: a rep is one hang interval, opened when the arms
//! reach full extension and counted when the grip releases. Depth here is
//! extension, so the straighter the arms, the better the hang.

use crate::engine::types::{JointId, JointPair};
use crate::models::types::{
    AngleRange, Cmp, Condition, DepthDirection, ExerciseModel, FaultRule, FqiWeights, Metric,
    PhaseDef, RepBoundary, RepMetric, Thresholds, TransitionRule,
};

const SETUP: usize = 0;
const HANG: usize = 1;
const RELEASE: usize = 2;

const ENTER_HANG_DEG: f64 = 160.0;
const LEAVE_HANG_DEG: f64 = 140.0;
const REENTER_HANG_DEG: f64 = 162.0;
const FINISH_RELEASE_DEG: f64 = 125.0;

fn elbow(cmp: Cmp, threshold: f64) -> Condition {
    Condition::new(Metric::PairMean(JointPair::Elbow), cmp, threshold)
}

/// Build the dead hang model.
pub fn model() -> ExerciseModel {
    ExerciseModel {
        id: "dead_hang",
        name: "Dead Hang",
        phases: vec![
            PhaseDef {
                id: "setup",
                label: "Setup",
                cue: Some("Grip the bar, step off"),
            },
            PhaseDef {
                id: "hang",
                label: "Hang",
                cue: Some("Arms straight, breathe"),
            },
            PhaseDef {
                id: "release",
                label: "Release",
                cue: Some("Land soft"),
            },
        ],
        initial_phase: SETUP,
        transitions: vec![
            TransitionRule {
                from: SETUP,
                to: HANG,
                conditions: vec![elbow(Cmp::Ge, ENTER_HANG_DEG)],
            },
            TransitionRule {
                from: HANG,
                to: RELEASE,
                conditions: vec![elbow(Cmp::Le, LEAVE_HANG_DEG)],
            },
            TransitionRule {
                from: RELEASE,
                to: HANG,
                conditions: vec![elbow(Cmp::Ge, REENTER_HANG_DEG)],
            },
            TransitionRule {
                from: RELEASE,
                to: SETUP,
                conditions: vec![elbow(Cmp::Le, FINISH_RELEASE_DEG)],
            },
        ],
        boundary: RepBoundary {
            start_phase: HANG,
            end_phase: RELEASE,
            min_duration_ms: 3000.0,
        },
        thresholds: Thresholds(vec![
            ("enter_hang_deg", ENTER_HANG_DEG),
            ("leave_hang_deg", LEAVE_HANG_DEG),
            ("reenter_hang_deg", REENTER_HANG_DEG),
            ("finish_release_deg", FINISH_RELEASE_DEG),
        ]),
        primary_pair: JointPair::Elbow,
        required_joints: vec![JointId::LeftElbow, JointId::RightElbow],
        angle_ranges: vec![(
            JointPair::Elbow,
            AngleRange {
                min: 140.0,
                max: 180.0,
                optimal: 172.0,
                tolerance: 8.0,
            },
        )],
        depth_direction: DepthDirection::Extension,
        faults: vec![
            FaultRule {
                id: "bent-arm-hang",
                severity: 2,
                metric: RepMetric::MaxPairMean(JointPair::Elbow),
                cmp: Cmp::Le,
                threshold: 158.0,
                penalty: 20.0,
                cue: "Relax into a full hang, arms straight",
            },
            FaultRule {
                id: "uneven-hang",
                severity: 1,
                metric: RepMetric::PairAsymmetry(JointPair::Elbow),
                cmp: Cmp::Ge,
                threshold: 10.0,
                penalty: 8.0,
                cue: "Weight both hands evenly",
            },
            FaultRule {
                id: "short-hold",
                severity: 1,
                metric: RepMetric::DurationMs,
                cmp: Cmp::Le,
                threshold: 10_000.0,
                penalty: 10.0,
                cue: "Hold longer, build up grip time",
            },
        ],
        weights: FqiWeights {
            rom: 0.2,
            depth: 0.5,
            faults: 0.3,
        },
    }
}
