//! Back squat movement model.
//!
//! Mean knee angle drives the phases; depth means breaking parallel, so
//! the shallow-depth fault carries the heaviest penalty in the catalog.

use crate::engine::types::{JointId, JointPair};
use crate::models::types::{
    AngleRange, Cmp, Condition, DepthDirection, ExerciseModel, FaultRule, FqiWeights, Metric,
    PhaseDef, RepBoundary, RepMetric, Thresholds, TransitionRule,
};

const STANDING: usize = 0;
const DESCENT: usize = 1;
const BOTTOM: usize = 2;
const ASCENT: usize = 3;

const ENTER_DESCENT_DEG: f64 = 140.0;
const REENTER_STANDING_DEG: f64 = 160.0;
const ENTER_BOTTOM_DEG: f64 = 100.0;
const LEAVE_BOTTOM_DEG: f64 = 115.0;
const REENTER_BOTTOM_DEG: f64 = 95.0;
const FINISH_ASCENT_DEG: f64 = 165.0;

fn knee(cmp: Cmp, threshold: f64) -> Condition {
    Condition::new(Metric::PairMean(JointPair::Knee), cmp, threshold)
}

/// Build the squat model.
pub fn model() -> ExerciseModel {
    ExerciseModel {
        id: "squat",
        name: "Squat",
        phases: vec![
            PhaseDef {
                id: "standing",
                label: "Standing",
                cue: Some("Brace before the descent"),
            },
            PhaseDef {
                id: "descent",
                label: "Descent",
                cue: Some("Sit back and down"),
            },
            PhaseDef {
                id: "bottom",
                label: "Bottom",
                cue: Some("Hips below parallel"),
            },
            PhaseDef {
                id: "ascent",
                label: "Ascent",
                cue: Some("Drive up through the floor"),
            },
        ],
        initial_phase: STANDING,
        transitions: vec![
            TransitionRule {
                from: STANDING,
                to: DESCENT,
                conditions: vec![knee(Cmp::Le, ENTER_DESCENT_DEG)],
            },
            TransitionRule {
                from: DESCENT,
                to: BOTTOM,
                conditions: vec![knee(Cmp::Le, ENTER_BOTTOM_DEG)],
            },
            TransitionRule {
                from: DESCENT,
                to: STANDING,
                conditions: vec![knee(Cmp::Ge, REENTER_STANDING_DEG)],
            },
            TransitionRule {
                from: BOTTOM,
                to: ASCENT,
                conditions: vec![knee(Cmp::Ge, LEAVE_BOTTOM_DEG)],
            },
            TransitionRule {
                from: ASCENT,
                to: BOTTOM,
                conditions: vec![knee(Cmp::Le, REENTER_BOTTOM_DEG)],
            },
            TransitionRule {
                from: ASCENT,
                to: STANDING,
                conditions: vec![knee(Cmp::Ge, FINISH_ASCENT_DEG)],
            },
        ],
        boundary: RepBoundary {
            start_phase: DESCENT,
            end_phase: STANDING,
            min_duration_ms: 1200.0,
        },
        thresholds: Thresholds(vec![
            ("enter_descent_deg", ENTER_DESCENT_DEG),
            ("reenter_standing_deg", REENTER_STANDING_DEG),
            ("enter_bottom_deg", ENTER_BOTTOM_DEG),
            ("leave_bottom_deg", LEAVE_BOTTOM_DEG),
            ("finish_ascent_deg", FINISH_ASCENT_DEG),
        ]),
        primary_pair: JointPair::Knee,
        required_joints: vec![JointId::LeftKnee, JointId::RightKnee],
        angle_ranges: vec![
            (
                JointPair::Knee,
                AngleRange {
                    min: 80.0,
                    max: 175.0,
                    optimal: 95.0,
                    tolerance: 10.0,
                },
            ),
            (
                JointPair::Hip,
                AngleRange {
                    min: 70.0,
                    max: 175.0,
                    optimal: 90.0,
                    tolerance: 15.0,
                },
            ),
        ],
        depth_direction: DepthDirection::Flexion,
        faults: vec![
            FaultRule {
                id: "shallow-depth",
                severity: 3,
                metric: RepMetric::MinPairMean(JointPair::Knee),
                cmp: Cmp::Ge,
                threshold: 110.0,
                penalty: 22.0,
                cue: "Sit deeper, hips below parallel",
            },
            FaultRule {
                id: "uneven-knees",
                severity: 2,
                metric: RepMetric::PairAsymmetry(JointPair::Knee),
                cmp: Cmp::Ge,
                threshold: 10.0,
                penalty: 10.0,
                cue: "Track both knees evenly over the toes",
            },
            FaultRule {
                id: "incomplete-lockout",
                severity: 1,
                metric: RepMetric::MaxPairMean(JointPair::Knee),
                cmp: Cmp::Le,
                threshold: 160.0,
                penalty: 8.0,
                cue: "Stand all the way up between reps",
            },
            FaultRule {
                id: "rushed-rep",
                severity: 1,
                metric: RepMetric::DurationMs,
                cmp: Cmp::Le,
                threshold: 1000.0,
                penalty: 8.0,
                cue: "Slow the descent, stay in control",
            },
        ],
        weights: FqiWeights {
            rom: 0.3,
            depth: 0.45,
            faults: 0.25,
        },
    }
}
