//! Push-up movement model.
//!
//! Mean elbow angle drives the phases; the hip pair backs the hip-sag
//! fault check.

use crate::engine::types::{JointId, JointPair};
use crate::models::types::{
    AngleRange, Cmp, Condition, DepthDirection, ExerciseModel, FaultRule, FqiWeights, Metric,
    PhaseDef, RepBoundary, RepMetric, Thresholds, TransitionRule,
};

const PLANK: usize = 0;
const DESCENT: usize = 1;
const BOTTOM: usize = 2;
const PRESS: usize = 3;

const ENTER_DESCENT_DEG: f64 = 130.0;
const REENTER_PLANK_DEG: f64 = 150.0;
const ENTER_BOTTOM_DEG: f64 = 95.0;
const LEAVE_BOTTOM_DEG: f64 = 110.0;
const REENTER_BOTTOM_DEG: f64 = 90.0;
const FINISH_PRESS_DEG: f64 = 155.0;

fn elbow(cmp: Cmp, threshold: f64) -> Condition {
    Condition::new(Metric::PairMean(JointPair::Elbow), cmp, threshold)
}

/// Build the push-up model.
pub fn model() -> ExerciseModel {
    ExerciseModel {
        id: "push_up",
        name: "Push-Up",
        phases: vec![
            PhaseDef {
                id: "plank",
                label: "Plank",
                cue: Some("Brace, body in one line"),
            },
            PhaseDef {
                id: "descent",
                label: "Descent",
                cue: Some("Lower with control"),
            },
            PhaseDef {
                id: "bottom",
                label: "Bottom",
                cue: Some("Chest to the floor"),
            },
            PhaseDef {
                id: "press",
                label: "Press",
                cue: Some("Push the floor away"),
            },
        ],
        initial_phase: PLANK,
        transitions: vec![
            TransitionRule {
                from: PLANK,
                to: DESCENT,
                conditions: vec![elbow(Cmp::Le, ENTER_DESCENT_DEG)],
            },
            TransitionRule {
                from: DESCENT,
                to: BOTTOM,
                conditions: vec![elbow(Cmp::Le, ENTER_BOTTOM_DEG)],
            },
            TransitionRule {
                from: DESCENT,
                to: PLANK,
                conditions: vec![elbow(Cmp::Ge, REENTER_PLANK_DEG)],
            },
            TransitionRule {
                from: BOTTOM,
                to: PRESS,
                conditions: vec![elbow(Cmp::Ge, LEAVE_BOTTOM_DEG)],
            },
            TransitionRule {
                from: PRESS,
                to: BOTTOM,
                conditions: vec![elbow(Cmp::Le, REENTER_BOTTOM_DEG)],
            },
            TransitionRule {
                from: PRESS,
                to: PLANK,
                conditions: vec![elbow(Cmp::Ge, FINISH_PRESS_DEG)],
            },
        ],
        boundary: RepBoundary {
            start_phase: DESCENT,
            end_phase: PLANK,
            min_duration_ms: 800.0,
        },
        thresholds: Thresholds(vec![
            ("enter_descent_deg", ENTER_DESCENT_DEG),
            ("reenter_plank_deg", REENTER_PLANK_DEG),
            ("enter_bottom_deg", ENTER_BOTTOM_DEG),
            ("leave_bottom_deg", LEAVE_BOTTOM_DEG),
            ("finish_press_deg", FINISH_PRESS_DEG),
        ]),
        primary_pair: JointPair::Elbow,
        required_joints: vec![JointId::LeftElbow, JointId::RightElbow],
        angle_ranges: vec![(
            JointPair::Elbow,
            AngleRange {
                min: 75.0,
                max: 165.0,
                optimal: 85.0,
                tolerance: 12.0,
            },
        )],
        depth_direction: DepthDirection::Flexion,
        faults: vec![
            FaultRule {
                id: "shallow-depth",
                severity: 2,
                metric: RepMetric::MinPairMean(JointPair::Elbow),
                cmp: Cmp::Ge,
                threshold: 110.0,
                penalty: 20.0,
                cue: "Lower further, chest close to the floor",
            },
            FaultRule {
                id: "hip-sag",
                severity: 2,
                metric: RepMetric::MinPairMean(JointPair::Hip),
                cmp: Cmp::Le,
                threshold: 150.0,
                penalty: 12.0,
                cue: "Keep the hips level, brace your core",
            },
            FaultRule {
                id: "uneven-press",
                severity: 1,
                metric: RepMetric::PairAsymmetry(JointPair::Elbow),
                cmp: Cmp::Ge,
                threshold: 10.0,
                penalty: 8.0,
                cue: "Press evenly through both arms",
            },
            FaultRule {
                id: "rushed-rep",
                severity: 1,
                metric: RepMetric::DurationMs,
                cmp: Cmp::Le,
                threshold: 700.0,
                penalty: 6.0,
                cue: "Slow down, own the tempo",
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

    #[test]
    fn test_plank_is_both_initial_and_rep_end() {
        let m = model();
        assert_eq!(m.initial_phase, m.boundary.end_phase);
        assert_ne!(m.boundary.start_phase, m.initial_phase);
    }
}
