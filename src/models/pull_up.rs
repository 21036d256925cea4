//! Pull-up movement model.
//!
//! Progress is tracked by the mean elbow angle: full hang near 170 degrees,
//! chin over the bar near 65. Phase entry uses two-sided hysteresis: the
//! pull starts at 135 degrees but the hang is only re-entered at 145.

use crate::engine::types::{JointId, JointPair};
use crate::models::types::{
    AngleRange, Cmp, Condition, DepthDirection, ExerciseModel, FaultRule, FqiWeights, Metric,
    PhaseDef, RepBoundary, RepMetric, Thresholds, TransitionRule,
};

const HANG: usize = 0;
const PULL: usize = 1;
const TOP: usize = 2;
const DESCENT: usize = 3;

const ENTER_PULL_DEG: f64 = 135.0;
const REENTER_HANG_DEG: f64 = 145.0;
const ENTER_TOP_DEG: f64 = 75.0;
const LEAVE_TOP_DEG: f64 = 95.0;
const REENTER_TOP_DEG: f64 = 70.0;

fn elbow(cmp: Cmp, threshold: f64) -> Condition {
    Condition::new(Metric::PairMean(JointPair::Elbow), cmp, threshold)
}

/// Build the pull-up model.
pub fn model() -> ExerciseModel {
    ExerciseModel {
        id: "pull_up",
        name: "Pull-Up",
        phases: vec![
            PhaseDef {
                id: "hang",
                label: "Hang",
                cue: Some("Full hang, shoulders engaged"),
            },
            PhaseDef {
                id: "pull",
                label: "Pull",
                cue: Some("Drive elbows down"),
            },
            PhaseDef {
                id: "top",
                label: "Top",
                cue: Some("Chin over the bar"),
            },
            PhaseDef {
                id: "descent",
                label: "Descent",
                cue: Some("Lower under control"),
            },
        ],
        initial_phase: HANG,
        transitions: vec![
            TransitionRule {
                from: HANG,
                to: PULL,
                conditions: vec![elbow(Cmp::Le, ENTER_PULL_DEG)],
            },
            TransitionRule {
                from: PULL,
                to: TOP,
                conditions: vec![elbow(Cmp::Le, ENTER_TOP_DEG)],
            },
            TransitionRule {
                from: PULL,
                to: HANG,
                conditions: vec![elbow(Cmp::Ge, REENTER_HANG_DEG)],
            },
            TransitionRule {
                from: TOP,
                to: DESCENT,
                conditions: vec![elbow(Cmp::Ge, LEAVE_TOP_DEG)],
            },
            TransitionRule {
                from: DESCENT,
                to: TOP,
                conditions: vec![elbow(Cmp::Le, REENTER_TOP_DEG)],
            },
            TransitionRule {
                from: DESCENT,
                to: HANG,
                conditions: vec![elbow(Cmp::Ge, REENTER_HANG_DEG)],
            },
        ],
        boundary: RepBoundary {
            start_phase: PULL,
            end_phase: HANG,
            min_duration_ms: 900.0,
        },
        thresholds: Thresholds(vec![
            ("enter_pull_deg", ENTER_PULL_DEG),
            ("reenter_hang_deg", REENTER_HANG_DEG),
            ("enter_top_deg", ENTER_TOP_DEG),
            ("leave_top_deg", LEAVE_TOP_DEG),
        ]),
        primary_pair: JointPair::Elbow,
        required_joints: vec![JointId::LeftElbow, JointId::RightElbow],
        angle_ranges: vec![(
            JointPair::Elbow,
            AngleRange {
                min: 60.0,
                max: 170.0,
                optimal: 65.0,
                tolerance: 15.0,
            },
        )],
        depth_direction: DepthDirection::Flexion,
        faults: vec![
            FaultRule {
                id: "partial-rom-top",
                severity: 2,
                metric: RepMetric::MinPairMean(JointPair::Elbow),
                cmp: Cmp::Ge,
                threshold: 85.0,
                penalty: 18.0,
                cue: "Pull all the way up, chin over the bar",
            },
            FaultRule {
                id: "incomplete-extension",
                severity: 2,
                metric: RepMetric::MaxPairMean(JointPair::Elbow),
                cmp: Cmp::Le,
                threshold: 150.0,
                penalty: 12.0,
                cue: "Reach a full hang at the bottom",
            },
            FaultRule {
                id: "uneven-pull",
                severity: 1,
                metric: RepMetric::PairAsymmetry(JointPair::Elbow),
                cmp: Cmp::Ge,
                threshold: 12.0,
                penalty: 10.0,
                cue: "Drive both arms evenly",
            },
            FaultRule {
                id: "rushed-rep",
                severity: 1,
                metric: RepMetric::DurationMs,
                cmp: Cmp::Le,
                threshold: 1000.0,
                penalty: 8.0,
                cue: "Slow the descent",
            },
        ],
        weights: FqiWeights {
            rom: 0.4,
            depth: 0.35,
            faults: 0.25,
        },
    }
}
