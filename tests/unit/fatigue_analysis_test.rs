//! Unit tests for fatigue scoring, confidence grading, and coaching
//! actions.

use repsense::analysis::{
    assess_confidence, coach_actions, fatigue_level, fatigue_score, ActionPriority,
    ConfidenceLevel, FatigueLevel, FatigueSignals,
};

/// A 20% form-quality drop alone scores 22 and classifies as low fatigue.
#[test]
fn test_fqi_drop_alone_scores_twenty_two() {
    let signals = FatigueSignals {
        fqi_drop_pct: Some(20.0),
        ..Default::default()
    };
    let score = fatigue_score(&signals).expect("one signal is enough");
    assert!((score - 22.0).abs() < 1e-9);
    assert_eq!(fatigue_level(score), FatigueLevel::Low);
}

/// No signals means no score; the caller must not read this as low fatigue.
#[test]
fn test_no_signals_means_no_score() {
    assert!(fatigue_score(&FatigueSignals::default()).is_none());
}

/// Each term saturates at its own cap, and the sum caps at 100.
#[test]
fn test_score_saturates_at_one_hundred() {
    let signals = FatigueSignals {
        fqi_drop_pct: Some(1000.0),
        tempo_drift_pct: Some(1000.0),
        asymmetry_drift_deg: Some(1000.0),
        heart_rate_strain_bpm: Some(1000.0),
        ..Default::default()
    };
    let score = fatigue_score(&signals).unwrap();
    assert_eq!(score, 100.0);
    assert_eq!(fatigue_level(score), FatigueLevel::High);
}

/// Confidence collapses to insufficient with a null score when there is no
/// evidence at all, regardless of tracking quality.
#[test]
fn test_confidence_insufficient_without_evidence() {
    let conf = assess_confidence(0, 10, 0, 1.0, &FatigueSignals::default());
    assert!(conf.score.is_none());
    assert_eq!(conf.level, ConfidenceLevel::Insufficient);
}

/// A long well-tracked session with every signal present grades high with
/// no missing-signal note.
#[test]
fn test_confidence_high_for_rich_session() {
    let signals = FatigueSignals {
        fqi_drop_pct: Some(4.0),
        tempo_drift_pct: Some(2.0),
        asymmetry_drift_deg: Some(0.4),
        heart_rate_bpm: Some(72.0),
        heart_rate_baseline_bpm: Some(64.0),
        heart_rate_strain_bpm: Some(8.0),
    };
    let conf = assess_confidence(15, 700, 4, 0.92, &signals);
    assert_eq!(conf.level, ConfidenceLevel::High);
    assert!(conf.note.is_none());
}

/// High fatigue always leads with load reduction and rest extension, in
/// that order, ahead of any signal-specific action.
#[test]
fn test_high_fatigue_action_ordering() {
    let signals = FatigueSignals {
        tempo_drift_pct: Some(19.0),
        asymmetry_drift_deg: Some(7.0),
        heart_rate_strain_bpm: Some(14.0),
        ..Default::default()
    };
    let actions = coach_actions(Some(FatigueLevel::High), &signals);
    assert_eq!(actions.len(), 3);
    assert_eq!(actions[0].id, "reduce-load");
    assert_eq!(actions[1].id, "extend-rest");
    assert!(actions.iter().all(|a| a.priority == ActionPriority::High));
}

/// Action list is capped at three even when more signals fire.
#[test]
fn test_actions_capped_at_three() {
    let signals = FatigueSignals {
        tempo_drift_pct: Some(13.0),
        asymmetry_drift_deg: Some(4.0),
        heart_rate_strain_bpm: Some(9.0),
        ..Default::default()
    };
    let actions = coach_actions(Some(FatigueLevel::High), &signals);
    assert_eq!(actions.len(), 3);
    // The high-priority lead actions push the medium ones off the list.
    assert!(actions.iter().any(|a| a.id == "reduce-load"));
    assert!(actions.iter().any(|a| a.id == "extend-rest"));
}

/// A session with no fatigue markers gets the progression suggestion.
#[test]
fn test_quiet_session_gets_progression() {
    let actions = coach_actions(None, &FatigueSignals::default());
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].id, "progressive-overload");
}
