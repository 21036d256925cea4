//! Declarative exercise model catalog.
//!
//! Each exercise is an instantiation of the same declarative shape; the
//! generic interpreter in the engine drives all of them. Adding an
//! exercise means adding a data file here, not a new code path.

pub mod types;

mod bench_press;
mod dead_hang;
mod deadlift;
mod farmers_walk;
mod pull_up;
mod push_up;
mod romanian_deadlift;
mod squat;

use serde::{Deserialize, Serialize};

pub use types::{
    AngleRange, Cmp, Condition, DepthDirection, ExerciseModel, FaultRule, FqiWeights, Metric,
    ModelError, PhaseDef, RepBoundary, RepMetric, Thresholds, TransitionRule,
};

/// The supported exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    PullUp,
    PushUp,
    BenchPress,
    Deadlift,
    Squat,
    RomanianDeadlift,
    FarmersWalk,
    DeadHang,
}

impl ExerciseKind {
    /// All exercises in catalog order.
    pub const ALL: [ExerciseKind; 8] = [
        ExerciseKind::PullUp,
        ExerciseKind::PushUp,
        ExerciseKind::BenchPress,
        ExerciseKind::Deadlift,
        ExerciseKind::Squat,
        ExerciseKind::RomanianDeadlift,
        ExerciseKind::FarmersWalk,
        ExerciseKind::DeadHang,
    ];

    /// Get display label.
    pub fn label(&self) -> &'static str {
        match self {
            ExerciseKind::PullUp => "Pull-Up",
            ExerciseKind::PushUp => "Push-Up",
            ExerciseKind::BenchPress => "Bench Press",
            ExerciseKind::Deadlift => "Deadlift",
            ExerciseKind::Squat => "Squat",
            ExerciseKind::RomanianDeadlift => "Romanian Deadlift",
            ExerciseKind::FarmersWalk => "Farmer's Walk",
            ExerciseKind::DeadHang => "Dead Hang",
        }
    }
}

impl std::fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Build the model for an exercise.
///
/// Models are immutable data created at startup; callers typically wrap
/// the result in an `Arc` and share it for the session lifetime.
pub fn model(kind: ExerciseKind) -> ExerciseModel {
    match kind {
        ExerciseKind::PullUp => pull_up::model(),
        ExerciseKind::PushUp => push_up::model(),
        ExerciseKind::BenchPress => bench_press::model(),
        ExerciseKind::Deadlift => deadlift::model(),
        ExerciseKind::Squat => squat::model(),
        ExerciseKind::RomanianDeadlift => romanian_deadlift::model(),
        ExerciseKind::FarmersWalk => farmers_walk::model(),
        ExerciseKind::DeadHang => dead_hang::model(),
    }
}

/// Build and validate every model in the catalog.
pub fn all_models() -> Result<Vec<ExerciseModel>, ModelError> {
    let mut models = Vec::with_capacity(ExerciseKind::ALL.len());
    for kind in ExerciseKind::ALL {
        let m = model(kind);
        m.validate()?;
        models.push(m);
    }
    Ok(models)
}
