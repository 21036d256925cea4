//! Unit tests for the exercise model catalog.

use repsense::models::{self, Cmp, ExerciseKind, FqiWeights};

/// Every catalog model passes structural validation.
#[test]
fn test_catalog_validates() {
    let catalog = models::all_models().expect("catalog must validate");
    assert_eq!(catalog.len(), ExerciseKind::ALL.len());
}

/// Fault ids are unique within each model.
#[test]
fn test_fault_ids_unique_per_model() {
    for model in models::all_models().unwrap() {
        for (i, a) in model.faults.iter().enumerate() {
            for b in model.faults.iter().skip(i + 1) {
                assert_ne!(a.id, b.id, "duplicate fault id in model '{}'", model.id);
            }
        }
    }
}

/// Every model's rep boundary points at declared phases and the end phase
/// differs from the start phase.
#[test]
fn test_rep_boundaries_are_well_formed() {
    for model in models::all_models().unwrap() {
        assert!(model.boundary.start_phase < model.phases.len());
        assert!(model.boundary.end_phase < model.phases.len());
        assert_ne!(model.boundary.start_phase, model.boundary.end_phase);
        assert_ne!(model.boundary.start_phase, model.initial_phase);
        assert!(model.boundary.min_duration_ms > 0.0);
    }
}

/// FQI weights sum to one for every model.
#[test]
fn test_weights_sum_to_one() {
    for model in models::all_models().unwrap() {
        let FqiWeights { rom, depth, faults } = model.weights;
        assert!(((rom + depth + faults) - 1.0).abs() < 1e-9, "model '{}'", model.id);
    }
}

/// The pull-up transition table has a genuine hysteresis gap: the angle
/// that enters the pull is not the angle that falls back to the hang.
#[test]
fn test_pull_up_hysteresis_gap() {
    let model = models::model(ExerciseKind::PullUp);
    let enter = model
        .transitions
        .iter()
        .find(|t| t.from == model.initial_phase && t.conditions[0].cmp == Cmp::Le)
        .expect("hang to pull rule");
    let fall_back = model
        .transitions
        .iter()
        .find(|t| t.to == model.initial_phase && t.conditions[0].cmp == Cmp::Ge)
        .expect("fall back to hang rule");
    assert!(fall_back.conditions[0].threshold > enter.conditions[0].threshold);
}

/// Each exercise carries a distinct display label.
#[test]
fn test_kind_labels_are_distinct() {
    for (i, a) in ExerciseKind::ALL.iter().enumerate() {
        for b in ExerciseKind::ALL.iter().skip(i + 1) {
            assert_ne!(a.label(), b.label());
        }
    }
}
