//! Generic hysteresis-FSM interpreter for exercise phases.
//!
//! One interpreter drives every exercise: it evaluates the model's
//! declarative transition table against the current frame. Two-sided
//! hysteresis lives entirely in the table thresholds; this code has no
//! per-exercise branches.

use crate::engine::types::JointAngles;
use crate::models::types::ExerciseModel;

/// Whether every required joint of the model is tracked in this frame.
pub fn required_tracked(model: &ExerciseModel, angles: &JointAngles) -> bool {
    model
        .required_joints
        .iter()
        .all(|joint| angles.get(*joint).is_some())
}

/// Advance the phase by one frame.
///
/// Pure function of (current phase, frame, model): evaluates the transition
/// table in order and returns the target of the first rule whose `from`
/// matches and whose conditions all hold, else the current phase.
/// Required-joint tracking loss is handled by the caller as a hard
/// override, not here.
pub fn next_phase(model: &ExerciseModel, current: usize, angles: &JointAngles) -> usize {
    for rule in &model.transitions {
        if rule.from == current && rule.conditions.iter().all(|c| c.holds(angles)) {
            return rule.to;
        }
    }
    current
}
