//! Farmer's walk movement model.
//!
//! A loaded carry: each stride cycle counts as one rep, tracked by the
//! mean knee angle oscillating between stance and stride. Shoulder
//! asymmetry flags an uneven grip.

use crate::engine::types::{JointId, JointPair};
use crate::models::types::{
    AngleRange, Cmp, Condition, DepthDirection, ExerciseModel, FaultRule, FqiWeights, Metric,
    PhaseDef, RepBoundary, RepMetric, Thresholds, TransitionRule,
};

const STANCE: usize = 0;
const STRIDE: usize = 1;

const ENTER_STRIDE_DEG: f64 = 150.0;
const REENTER_STANCE_DEG: f64 = 168.0;

fn knee(cmp: Cmp, threshold: f64) -> Condition {
    Condition::new(Metric::PairMean(JointPair::Knee), cmp, threshold)
}

/// Build the farmer's walk model.
pub fn model() -> ExerciseModel {
    ExerciseModel {
        id: "farmers_walk",
        name: "Farmer's Walk",
        phases: vec![
            PhaseDef {
                id: "stance",
                label: "Stance",
                cue: Some("Tall posture, shoulders packed"),
            },
            PhaseDef {
                id: "stride",
                label: "Stride",
                cue: Some("Short, quick steps"),
            },
        ],
        initial_phase: STANCE,
        transitions: vec![
            TransitionRule {
                from: STANCE,
                to: STRIDE,
                conditions: vec![knee(Cmp::Le, ENTER_STRIDE_DEG)],
            },
            TransitionRule {
                from: STRIDE,
                to: STANCE,
                conditions: vec![knee(Cmp::Ge, REENTER_STANCE_DEG)],
            },
        ],
        boundary: RepBoundary {
            start_phase: STRIDE,
            end_phase: STANCE,
            min_duration_ms: 350.0,
        },
        thresholds: Thresholds(vec![
            ("enter_stride_deg", ENTER_STRIDE_DEG),
            ("reenter_stance_deg", REENTER_STANCE_DEG),
        ]),
        primary_pair: JointPair::Knee,
        required_joints: vec![JointId::LeftKnee, JointId::RightKnee],
        angle_ranges: vec![(
            JointPair::Knee,
            AngleRange {
                min: 130.0,
                max: 178.0,
                optimal: 140.0,
                tolerance: 15.0,
            },
        )],
        depth_direction: DepthDirection::Flexion,
        faults: vec![
            FaultRule {
                id: "uneven-carry",
                severity: 2,
                metric: RepMetric::PairAsymmetry(JointPair::Shoulder),
                cmp: Cmp::Ge,
                threshold: 6.0,
                penalty: 12.0,
                cue: "Level the shoulders, grip both handles evenly",
            },
            FaultRule {
                id: "shuffling-stride",
                severity: 1,
                metric: RepMetric::PairRom(JointPair::Knee),
                cmp: Cmp::Le,
                threshold: 15.0,
                penalty: 8.0,
                cue: "Take full strides, heel to toe",
            },
            FaultRule {
                id: "rushed-step",
                severity: 1,
                metric: RepMetric::DurationMs,
                cmp: Cmp::Le,
                threshold: 250.0,
                penalty: 4.0,
                cue: "Settle the weight before the next step",
            },
        ],
        weights: FqiWeights {
            rom: 0.3,
            depth: 0.3,
            faults: 0.4,
        },
    }
}
