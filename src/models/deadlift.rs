//! Deadlift movement model.
//!
//! Mean hip angle drives the phases: the lift starts from a flexed setup
//! and counts a rep when the bar returns to the floor. Depth here means
//! reaching full hip extension at lockout, so the depth direction is
//! inverted relative to the squat-pattern lifts.

use crate::engine::types::{JointId, JointPair};
use crate::models::types::{
    AngleRange, Cmp, Condition, DepthDirection, ExerciseModel, FaultRule, FqiWeights, Metric,
    PhaseDef, RepBoundary, RepMetric, Thresholds, TransitionRule,
};

const SETUP: usize = 0;
const PULL: usize = 1;
const LOCKOUT: usize = 2;
const LOWERING: usize = 3;

const ENTER_PULL_DEG: f64 = 120.0;
const REENTER_SETUP_DEG: f64 = 105.0;
const ENTER_LOCKOUT_DEG: f64 = 165.0;
const LEAVE_LOCKOUT_DEG: f64 = 150.0;
const REENTER_LOCKOUT_DEG: f64 = 168.0;
const FINISH_LOWERING_DEG: f64 = 110.0;

fn hip(cmp: Cmp, threshold: f64) -> Condition {
    Condition::new(Metric::PairMean(JointPair::Hip), cmp, threshold)
}

/// Build the deadlift model.
pub fn model() -> ExerciseModel {
    ExerciseModel {
        id: "deadlift",
        name: "Deadlift",
        phases: vec![
            PhaseDef {
                id: "setup",
                label: "Setup",
                cue: Some("Hips down, back flat, bar close"),
            },
            PhaseDef {
                id: "pull",
                label: "Pull",
                cue: Some("Push the floor away"),
            },
            PhaseDef {
                id: "lockout",
                label: "Lockout",
                cue: Some("Stand tall, squeeze the glutes"),
            },
            PhaseDef {
                id: "lowering",
                label: "Lowering",
                cue: Some("Hinge back, bar stays close"),
            },
        ],
        initial_phase: SETUP,
        transitions: vec![
            TransitionRule {
                from: SETUP,
                to: PULL,
                conditions: vec![hip(Cmp::Ge, ENTER_PULL_DEG)],
            },
            TransitionRule {
                from: PULL,
                to: LOCKOUT,
                conditions: vec![hip(Cmp::Ge, ENTER_LOCKOUT_DEG)],
            },
            TransitionRule {
                from: PULL,
                to: SETUP,
                conditions: vec![hip(Cmp::Le, REENTER_SETUP_DEG)],
            },
            TransitionRule {
                from: LOCKOUT,
                to: LOWERING,
                conditions: vec![hip(Cmp::Le, LEAVE_LOCKOUT_DEG)],
            },
            TransitionRule {
                from: LOWERING,
                to: LOCKOUT,
                conditions: vec![hip(Cmp::Ge, REENTER_LOCKOUT_DEG)],
            },
            TransitionRule {
                from: LOWERING,
                to: SETUP,
                conditions: vec![hip(Cmp::Le, FINISH_LOWERING_DEG)],
            },
        ],
        boundary: RepBoundary {
            start_phase: PULL,
            end_phase: SETUP,
            min_duration_ms: 1400.0,
        },
        thresholds: Thresholds(vec![
            ("enter_pull_deg", ENTER_PULL_DEG),
            ("reenter_setup_deg", REENTER_SETUP_DEG),
            ("enter_lockout_deg", ENTER_LOCKOUT_DEG),
            ("leave_lockout_deg", LEAVE_LOCKOUT_DEG),
            ("finish_lowering_deg", FINISH_LOWERING_DEG),
        ]),
        primary_pair: JointPair::Hip,
        required_joints: vec![JointId::LeftHip, JointId::RightHip],
        angle_ranges: vec![
            (
                JointPair::Hip,
                AngleRange {
                    min: 85.0,
                    max: 175.0,
                    optimal: 172.0,
                    tolerance: 8.0,
                },
            ),
            (
                JointPair::Knee,
                AngleRange {
                    min: 110.0,
                    max: 178.0,
                    optimal: 175.0,
                    tolerance: 10.0,
                },
            ),
        ],
        depth_direction: DepthDirection::Extension,
        faults: vec![
            FaultRule {
                id: "incomplete-lockout",
                severity: 3,
                metric: RepMetric::MaxPairMean(JointPair::Hip),
                cmp: Cmp::Le,
                threshold: 160.0,
                penalty: 20.0,
                cue: "Stand tall, squeeze the glutes at the top",
            },
            FaultRule {
                id: "uneven-hips",
                severity: 2,
                metric: RepMetric::PairAsymmetry(JointPair::Hip),
                cmp: Cmp::Ge,
                threshold: 8.0,
                penalty: 10.0,
                cue: "Keep the hips square through the pull",
            },
            FaultRule {
                id: "rushed-lowering",
                severity: 1,
                metric: RepMetric::DurationMs,
                cmp: Cmp::Le,
                threshold: 1200.0,
                penalty: 8.0,
                cue: "Control the bar back to the floor",
            },
        ],
        weights: FqiWeights {
            rom: 0.35,
            depth: 0.4,
            faults: 0.25,
        },
    }
}
