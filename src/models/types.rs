//! Declarative exercise model vocabulary.
//!
//! An `ExerciseModel` is pure data: ordered phases, a transition table with
//! two-sided hysteresis thresholds, a rep boundary, per-pair angle ranges,
//! tagged fault rules, and FQI weights. One generic interpreter in the
//! engine drives every exercise; adding an exercise is additive data, not a
//! new code path.

use serde::Serialize;
use thiserror::Error;

use crate::engine::types::{JointAngles, JointId, JointPair};

/// Comparison direction for threshold rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Cmp {
    /// Value must be less than or equal to the threshold
    Le,
    /// Value must be greater than or equal to the threshold
    Ge,
}

impl Cmp {
    /// Evaluate `value cmp threshold`.
    pub fn eval(&self, value: f64, threshold: f64) -> bool {
        match self {
            Cmp::Le => value <= threshold,
            Cmp::Ge => value >= threshold,
        }
    }
}

/// A per-frame movement metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Metric {
    /// Mean of the left/right angle of a joint pair, in degrees
    PairMean(JointPair),
}

impl Metric {
    /// Compute the metric from one frame of angles.
    pub fn value(&self, angles: &JointAngles) -> Option<f64> {
        match self {
            Metric::PairMean(pair) => angles.pair_mean(*pair),
        }
    }
}

/// One condition of a transition rule. All conditions of a rule must hold.
#[derive(Debug, Clone, Serialize)]
pub struct Condition {
    pub metric: Metric,
    pub cmp: Cmp,
    pub threshold: f64,
}

impl Condition {
    /// Shorthand constructor used by the model builders.
    pub fn new(metric: Metric, cmp: Cmp, threshold: f64) -> Self {
        Self {
            metric,
            cmp,
            threshold,
        }
    }

    /// Whether the condition holds for this frame. Untracked metric values
    /// never satisfy a condition.
    pub fn holds(&self, angles: &JointAngles) -> bool {
        self.metric
            .value(angles)
            .map(|v| self.cmp.eval(v, self.threshold))
            .unwrap_or(false)
    }
}

/// A declarative phase transition. Rules are evaluated in table order; the
/// first rule whose `from` matches the current phase and whose conditions
/// all hold wins.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionRule {
    pub from: usize,
    pub to: usize,
    pub conditions: Vec<Condition>,
}

/// One phase of an exercise.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseDef {
    /// Stable identifier
    pub id: &'static str,
    /// Display label
    pub label: &'static str,
    /// Optional static coaching cue shown while this phase is active
    pub cue: Option<&'static str>,
}

/// The start/end phase pair that marks one countable repetition.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RepBoundary {
    /// Phase whose entry opens a rep
    pub start_phase: usize,
    /// Phase whose entry (from a non-initial phase) counts a rep
    pub end_phase: usize,
    /// Static debounce floor between counted reps, in milliseconds
    pub min_duration_ms: f64,
}

/// Target angle range for a joint pair.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AngleRange {
    pub min: f64,
    pub max: f64,
    /// Angle the lifter should reach at the deepest point of the movement
    pub optimal: f64,
    /// Acceptable deviation from optimal, in degrees
    pub tolerance: f64,
}

/// Which direction counts as "deeper" for the depth sub-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DepthDirection {
    /// Lower angle is deeper (squat bottom, pull-up top)
    Flexion,
    /// Higher angle is deeper (deadlift lockout, dead hang)
    Extension,
}

/// FQI aggregation weights. Documented as roughly summing to 1.0 per
/// exercise; treated as configuration, not a runtime invariant.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FqiWeights {
    pub rom: f64,
    pub depth: f64,
    pub faults: f64,
}

/// A scalar extracted from a finalized rep context, used by fault rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum RepMetric {
    /// Mean of the left/right minima of a pair across the rep
    MinPairMean(JointPair),
    /// Mean of the left/right maxima of a pair across the rep
    MaxPairMean(JointPair),
    /// Max pair mean minus min pair mean (achieved range of motion)
    PairRom(JointPair),
    /// Worst left/right disagreement at the rep extremes
    PairAsymmetry(JointPair),
    /// Rep duration in milliseconds
    DurationMs,
}

/// A tagged, data-driven fault rule interpreted by the shared evaluator.
#[derive(Debug, Clone, Serialize)]
pub struct FaultRule {
    /// Stable identifier reported to collaborators
    pub id: &'static str,
    /// Severity 1 (minor) to 3 (major)
    pub severity: u8,
    /// Rep metric the rule inspects
    pub metric: RepMetric,
    pub cmp: Cmp,
    pub threshold: f64,
    /// FQI penalty in points, subtracted from the fault sub-score
    pub penalty: f64,
    /// Dynamic coaching cue emitted when the fault triggers
    pub cue: &'static str,
}

/// Named numeric cutoffs an exercise model was built from. Kept on the
/// model for tooling and test generation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Thresholds(pub Vec<(&'static str, f64)>);

impl Thresholds {
    /// Look up a named threshold.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }
}

/// Immutable, declarative movement model for one exercise.
///
/// Created at startup, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct ExerciseModel {
    /// Stable identifier
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Ordered phase set; fixed per exercise
    pub phases: Vec<PhaseDef>,
    /// Index of the idle/setup phase
    pub initial_phase: usize,
    /// Declarative transition table with hysteresis thresholds
    pub transitions: Vec<TransitionRule>,
    /// Rep boundary definition
    pub boundary: RepBoundary,
    /// Named cutoffs the tables were built from
    pub thresholds: Thresholds,
    /// Dominant joint pair tracking movement progress
    pub primary_pair: JointPair,
    /// Joints that must be tracked for phase logic to run
    pub required_joints: Vec<JointId>,
    /// Target ranges per scored pair
    pub angle_ranges: Vec<(JointPair, AngleRange)>,
    /// Direction that counts as deeper for the depth sub-score
    pub depth_direction: DepthDirection,
    /// Fault rules evaluated on rep completion
    pub faults: Vec<FaultRule>,
    /// FQI aggregation weights
    pub weights: FqiWeights,
}

impl ExerciseModel {
    /// Target range for the primary pair, if declared.
    pub fn primary_range(&self) -> Option<&AngleRange> {
        self.angle_ranges
            .iter()
            .find(|(pair, _)| *pair == self.primary_pair)
            .map(|(_, range)| range)
    }

    /// Validate internal consistency of the model.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.phases.is_empty() {
            return Err(ModelError::EmptyPhases(self.id));
        }
        let n = self.phases.len();
        if self.initial_phase >= n {
            return Err(ModelError::PhaseOutOfRange {
                model: self.id,
                phase: self.initial_phase,
            });
        }
        if self.boundary.start_phase >= n || self.boundary.end_phase >= n {
            return Err(ModelError::InvalidBoundary(self.id));
        }
        if self.boundary.start_phase == self.initial_phase {
            // A rep must start by leaving the idle/setup phase.
            return Err(ModelError::InvalidBoundary(self.id));
        }
        if self.boundary.min_duration_ms <= 0.0 {
            return Err(ModelError::InvalidBoundary(self.id));
        }
        for rule in &self.transitions {
            if rule.from >= n || rule.to >= n {
                return Err(ModelError::PhaseOutOfRange {
                    model: self.id,
                    phase: rule.from.max(rule.to),
                });
            }
            if rule.conditions.is_empty() {
                return Err(ModelError::EmptyTransition {
                    model: self.id,
                    from: rule.from,
                    to: rule.to,
                });
            }
        }
        let w = &self.weights;
        for value in [w.rom, w.depth, w.faults] {
            if !value.is_finite() || value < 0.0 {
                return Err(ModelError::InvalidWeights(self.id));
            }
        }
        if self.required_joints.is_empty() {
            return Err(ModelError::NoRequiredJoints(self.id));
        }
        for fault in &self.faults {
            if !(1..=3).contains(&fault.severity) || fault.penalty <= 0.0 {
                return Err(ModelError::InvalidFault {
                    model: self.id,
                    fault: fault.id,
                });
            }
        }
        Ok(())
    }
}

/// Exercise model validation errors.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Model declares no phases.
    #[error("model '{0}' has no phases")]
    EmptyPhases(&'static str),

    /// A phase index points outside the phase list.
    #[error("model '{model}' references phase index {phase} out of range")]
    PhaseOutOfRange { model: &'static str, phase: usize },

    /// Rep boundary is inconsistent with the phase set.
    #[error("model '{0}' has an invalid rep boundary")]
    InvalidBoundary(&'static str),

    /// A transition rule has no conditions.
    #[error("model '{model}' has an unconditional transition {from} -> {to}")]
    EmptyTransition {
        model: &'static str,
        from: usize,
        to: usize,
    },

    /// FQI weights are negative or non-finite.
    #[error("model '{0}' has invalid FQI weights")]
    InvalidWeights(&'static str),

    /// Model declares no required joints.
    #[error("model '{0}' declares no required joints")]
    NoRequiredJoints(&'static str),

    /// A fault rule has an out-of-range severity or non-positive penalty.
    #[error("model '{model}' fault '{fault}' is invalid")]
    InvalidFault {
        model: &'static str,
        fault: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_model() -> ExerciseModel {
        ExerciseModel {
            id: "test",
            name: "Test",
            phases: vec![
                PhaseDef {
                    id: "idle",
                    label: "Idle",
                    cue: None,
                },
                PhaseDef {
                    id: "work",
                    label: "Work",
                    cue: Some("Go"),
                },
            ],
            initial_phase: 0,
            transitions: vec![TransitionRule {
                from: 0,
                to: 1,
                conditions: vec![Condition::new(
                    Metric::PairMean(JointPair::Elbow),
                    Cmp::Le,
                    120.0,
                )],
            }],
            boundary: RepBoundary {
                start_phase: 1,
                end_phase: 0,
                min_duration_ms: 500.0,
            },
            thresholds: Thresholds(vec![("enter_work", 120.0)]),
            primary_pair: JointPair::Elbow,
            required_joints: vec![JointId::LeftElbow, JointId::RightElbow],
            angle_ranges: vec![(
                JointPair::Elbow,
                AngleRange {
                    min: 60.0,
                    max: 170.0,
                    optimal: 70.0,
                    tolerance: 15.0,
                },
            )],
            depth_direction: DepthDirection::Flexion,
            faults: vec![],
            weights: FqiWeights {
                rom: 0.4,
                depth: 0.35,
                faults: 0.25,
            },
        }
    }

    #[test]
    fn test_valid_model_passes() {
        assert!(tiny_model().validate().is_ok());
    }

    #[test]
    fn test_boundary_start_must_leave_initial() {
        let mut model = tiny_model();
        model.boundary.start_phase = 0;
        assert!(matches!(
            model.validate(),
            Err(ModelError::InvalidBoundary(_))
        ));
    }

    #[test]
    fn test_transition_out_of_range_rejected() {
        let mut model = tiny_model();
        model.transitions[0].to = 9;
        assert!(matches!(
            model.validate(),
            Err(ModelError::PhaseOutOfRange { .. })
        ));
    }

    #[test]
    fn test_condition_untracked_never_holds() {
        let cond = Condition::new(Metric::PairMean(JointPair::Knee), Cmp::Le, 120.0);
        let angles = JointAngles::default();
        assert!(!cond.holds(&angles));
    }

    #[test]
    fn test_named_threshold_lookup() {
        let model = tiny_model();
        assert_eq!(model.thresholds.get("enter_work"), Some(120.0));
        assert_eq!(model.thresholds.get("missing"), None);
    }
}
