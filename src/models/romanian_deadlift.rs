//! Romanian deadlift movement model.
//!
//! A hip hinge with near-straight knees: mean hip angle drives the phases
//! and a knee-bend fault fires when the pattern collapses into a squat.

use crate::engine::types::{JointId, JointPair};
use crate::models::types::{
    AngleRange, Cmp, Condition, DepthDirection, ExerciseModel, FaultRule, FqiWeights, Metric,
    PhaseDef, RepBoundary, RepMetric, Thresholds, TransitionRule,
};

const STANDING: usize = 0;
const HINGE: usize = 1;
const BOTTOM: usize = 2;
const RETURN: usize = 3;

const ENTER_HINGE_DEG: f64 = 145.0;
const REENTER_STANDING_DEG: f64 = 165.0;
const ENTER_BOTTOM_DEG: f64 = 105.0;
const LEAVE_BOTTOM_DEG: f64 = 120.0;
const REENTER_BOTTOM_DEG: f64 = 100.0;
const FINISH_RETURN_DEG: f64 = 168.0;

fn hip(cmp: Cmp, threshold: f64) -> Condition {
    Condition::new(Metric::PairMean(JointPair::Hip), cmp, threshold)
}

/// Build the Romanian deadlift model.
pub fn model() -> ExerciseModel {
    ExerciseModel {
        id: "romanian_deadlift",
        name: "Romanian Deadlift",
        phases: vec![
            PhaseDef {
                id: "standing",
                label: "Standing",
                cue: Some("Tall, soft knees"),
            },
            PhaseDef {
                id: "hinge",
                label: "Hinge",
                cue: Some("Push the hips back"),
            },
            PhaseDef {
                id: "bottom",
                label: "Bottom",
                cue: Some("Stretch, back flat"),
            },
            PhaseDef {
                id: "return",
                label: "Return",
                cue: Some("Drive the hips through"),
            },
        ],
        initial_phase: STANDING,
        transitions: vec![
            TransitionRule {
                from: STANDING,
                to: HINGE,
                conditions: vec![hip(Cmp::Le, ENTER_HINGE_DEG)],
            },
            TransitionRule {
                from: HINGE,
                to: BOTTOM,
                conditions: vec![hip(Cmp::Le, ENTER_BOTTOM_DEG)],
            },
            TransitionRule {
                from: HINGE,
                to: STANDING,
                conditions: vec![hip(Cmp::Ge, REENTER_STANDING_DEG)],
            },
            TransitionRule {
                from: BOTTOM,
                to: RETURN,
                conditions: vec![hip(Cmp::Ge, LEAVE_BOTTOM_DEG)],
            },
            TransitionRule {
                from: RETURN,
                to: BOTTOM,
                conditions: vec![hip(Cmp::Le, REENTER_BOTTOM_DEG)],
            },
            TransitionRule {
                from: RETURN,
                to: STANDING,
                conditions: vec![hip(Cmp::Ge, FINISH_RETURN_DEG)],
            },
        ],
        boundary: RepBoundary {
            start_phase: HINGE,
            end_phase: STANDING,
            min_duration_ms: 1300.0,
        },
        thresholds: Thresholds(vec![
            ("enter_hinge_deg", ENTER_HINGE_DEG),
            ("reenter_standing_deg", REENTER_STANDING_DEG),
            ("enter_bottom_deg", ENTER_BOTTOM_DEG),
            ("leave_bottom_deg", LEAVE_BOTTOM_DEG),
            ("finish_return_deg", FINISH_RETURN_DEG),
        ]),
        primary_pair: JointPair::Hip,
        required_joints: vec![JointId::LeftHip, JointId::RightHip],
        angle_ranges: vec![
            (
                JointPair::Hip,
                AngleRange {
                    min: 90.0,
                    max: 175.0,
                    optimal: 100.0,
                    tolerance: 12.0,
                },
            ),
            (
                JointPair::Knee,
                AngleRange {
                    min: 150.0,
                    max: 178.0,
                    optimal: 165.0,
                    tolerance: 10.0,
                },
            ),
        ],
        depth_direction: DepthDirection::Flexion,
        faults: vec![
            FaultRule {
                id: "shallow-hinge",
                severity: 2,
                metric: RepMetric::MinPairMean(JointPair::Hip),
                cmp: Cmp::Ge,
                threshold: 125.0,
                penalty: 18.0,
                cue: "Hinge further, feel the hamstrings load",
            },
            FaultRule {
                id: "knee-bend",
                severity: 2,
                metric: RepMetric::MinPairMean(JointPair::Knee),
                cmp: Cmp::Le,
                threshold: 140.0,
                penalty: 14.0,
                cue: "Keep only a soft knee bend, hinge at the hips",
            },
            FaultRule {
                id: "uneven-hips",
                severity: 1,
                metric: RepMetric::PairAsymmetry(JointPair::Hip),
                cmp: Cmp::Ge,
                threshold: 8.0,
                penalty: 10.0,
                cue: "Keep the hips square",
            },
            FaultRule {
                id: "rushed-rep",
                severity: 1,
                metric: RepMetric::DurationMs,
                cmp: Cmp::Le,
                threshold: 1100.0,
                penalty: 6.0,
                cue: "Slow the eccentric",
            },
        ],
        weights: FqiWeights {
            rom: 0.35,
            depth: 0.4,
            faults: 0.25,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_validates() {
        assert!(model().validate().is_ok());
    }
}
