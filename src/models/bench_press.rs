//! Bench press movement model.
//!
//! Mean elbow angle drives the phases. Bar-path evenness matters more here
//! than in bodyweight pressing, so the asymmetry fault is tighter.

use crate::engine::types::{JointId, JointPair};
use crate::models::types::{
    AngleRange, Cmp, Condition, DepthDirection, ExerciseModel, FaultRule, FqiWeights, Metric,
    PhaseDef, RepBoundary, RepMetric, Thresholds, TransitionRule,
};

const LOCKOUT: usize = 0;
const LOWER: usize = 1;
const CHEST: usize = 2;
const PRESS: usize = 3;

const ENTER_LOWER_DEG: f64 = 140.0;
const REENTER_LOCKOUT_DEG: f64 = 155.0;
const ENTER_CHEST_DEG: f64 = 90.0;
const LEAVE_CHEST_DEG: f64 = 105.0;
const REENTER_CHEST_DEG: f64 = 85.0;
const FINISH_PRESS_DEG: f64 = 160.0;

fn elbow(cmp: Cmp, threshold: f64) -> Condition {
    Condition::new(Metric::PairMean(JointPair::Elbow), cmp, threshold)
}

/// Build the bench press model.
pub fn model() -> ExerciseModel {
    ExerciseModel {
        id: "bench_press",
        name: "Bench Press",
        phases: vec![
            PhaseDef {
                id: "lockout",
                label: "Lockout",
                cue: Some("Arms locked over the chest"),
            },
            PhaseDef {
                id: "lower",
                label: "Lower",
                cue: Some("Control the bar down"),
            },
            PhaseDef {
                id: "chest",
                label: "Chest",
                cue: Some("Touch, stay tight"),
            },
            PhaseDef {
                id: "press",
                label: "Press",
                cue: Some("Drive to lockout"),
            },
        ],
        initial_phase: LOCKOUT,
        transitions: vec![
            TransitionRule {
                from: LOCKOUT,
                to: LOWER,
                conditions: vec![elbow(Cmp::Le, ENTER_LOWER_DEG)],
            },
            TransitionRule {
                from: LOWER,
                to: CHEST,
                conditions: vec![elbow(Cmp::Le, ENTER_CHEST_DEG)],
            },
            TransitionRule {
                from: LOWER,
                to: LOCKOUT,
                conditions: vec![elbow(Cmp::Ge, REENTER_LOCKOUT_DEG)],
            },
            TransitionRule {
                from: CHEST,
                to: PRESS,
                conditions: vec![elbow(Cmp::Ge, LEAVE_CHEST_DEG)],
            },
            TransitionRule {
                from: PRESS,
                to: CHEST,
                conditions: vec![elbow(Cmp::Le, REENTER_CHEST_DEG)],
            },
            TransitionRule {
                from: PRESS,
                to: LOCKOUT,
                conditions: vec![elbow(Cmp::Ge, FINISH_PRESS_DEG)],
            },
        ],
        boundary: RepBoundary {
            start_phase: LOWER,
            end_phase: LOCKOUT,
            min_duration_ms: 1100.0,
        },
        thresholds: Thresholds(vec![
            ("enter_lower_deg", ENTER_LOWER_DEG),
            ("reenter_lockout_deg", REENTER_LOCKOUT_DEG),
            ("enter_chest_deg", ENTER_CHEST_DEG),
            ("leave_chest_deg", LEAVE_CHEST_DEG),
            ("finish_press_deg", FINISH_PRESS_DEG),
        ]),
        primary_pair: JointPair::Elbow,
        required_joints: vec![JointId::LeftElbow, JointId::RightElbow],
        angle_ranges: vec![(
            JointPair::Elbow,
            AngleRange {
                min: 70.0,
                max: 170.0,
                optimal: 80.0,
                tolerance: 12.0,
            },
        )],
        depth_direction: DepthDirection::Flexion,
        faults: vec![
            FaultRule {
                id: "shallow-touch",
                severity: 2,
                metric: RepMetric::MinPairMean(JointPair::Elbow),
                cmp: Cmp::Ge,
                threshold: 100.0,
                penalty: 18.0,
                cue: "Bring the bar all the way to the chest",
            },
            FaultRule {
                id: "soft-lockout",
                severity: 2,
                metric: RepMetric::MaxPairMean(JointPair::Elbow),
                cmp: Cmp::Le,
                threshold: 155.0,
                penalty: 10.0,
                cue: "Finish the press, lock the elbows",
            },
            FaultRule {
                id: "uneven-bar",
                severity: 2,
                metric: RepMetric::PairAsymmetry(JointPair::Elbow),
                cmp: Cmp::Ge,
                threshold: 8.0,
                penalty: 12.0,
                cue: "Level the bar, press both sides together",
            },
            FaultRule {
                id: "rushed-rep",
                severity: 1,
                metric: RepMetric::DurationMs,
                cmp: Cmp::Le,
                threshold: 900.0,
                penalty: 6.0,
                cue: "Control the descent",
            },
        ],
        weights: FqiWeights {
            rom: 0.35,
            depth: 0.35,
            faults: 0.3,
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
