//! Post-session analytics: joint-pair selection, waveform bucketing,
//! asymmetry, fatigue signals, confidence grading, and coaching actions.

pub mod coaching;
pub mod confidence;
pub mod error;
pub mod fatigue;
pub mod joint_pair;

pub use coaching::{coach_actions, ActionPriority, CoachAction};
pub use confidence::{assess_confidence, ConfidenceLevel, FatigueConfidence};
pub use error::{AnalyticsError, AnalyticsResult};
pub use fatigue::{
    build_signals, fatigue_level, fatigue_score, CompletedRep, DailyHeartRate, FatigueLevel,
    FatigueSignals,
};
pub use joint_pair::{
    build_wave_points, compute_asymmetry, rep_asymmetry_series, select_best_joint_pair,
    AsymmetryStats, PairSelection, PoseRow, WavePoint,
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::AnalysisSettings;
use crate::engine::types::JointPair;

/// Everything the analytics pipeline needs about one finished session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInputs {
    /// Completed reps in session order
    pub reps: Vec<CompletedRep>,
    /// Full pose-sample history in timestamp order
    pub rows: Vec<PoseRow>,
    /// Calendar day the session took place
    pub session_day: NaiveDate,
    /// Daily heart-rate summaries covering the session day and prior week
    pub heart_rate: Vec<DailyHeartRate>,
    /// Number of prior sessions available for trend context
    pub trend_sessions: usize,
    /// Session-wide mean tracking quality in [0, 1]
    pub tracking_confidence: f64,
}

/// The full analytics result for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionAnalytics {
    pub signals: FatigueSignals,
    pub fatigue_score: Option<f64>,
    pub fatigue_level: Option<FatigueLevel>,
    pub confidence: FatigueConfidence,
    pub coach_actions: Vec<CoachAction>,
    pub asymmetry: Option<AsymmetryStats>,
    pub wave_points: Vec<WavePoint>,
    pub selected_pair: Option<JointPair>,
}

/// Run the full analytics pipeline over one session with default settings.
///
/// Rejects rep histories whose indices are not strictly increasing; all
/// other gaps in the data degrade to null signals rather than errors.
pub fn analyze_session(inputs: &SessionInputs) -> AnalyticsResult<SessionAnalytics> {
    analyze_session_with(inputs, &AnalysisSettings::default())
}

/// Run the full analytics pipeline with explicit settings.
///
/// `heart_rate_window_days` bounds the baseline window and `trend_sessions`
/// caps how much trend history counts toward confidence.
pub fn analyze_session_with(
    inputs: &SessionInputs,
    settings: &AnalysisSettings,
) -> AnalyticsResult<SessionAnalytics> {
    for pair in inputs.reps.windows(2) {
        if pair[1].rep_index <= pair[0].rep_index {
            return Err(AnalyticsError::InvalidInput(format!(
                "rep indices out of order: {} then {}",
                pair[0].rep_index, pair[1].rep_index
            )));
        }
    }

    let selection = select_best_joint_pair(&inputs.rows);
    let selected_pair = selection.map(|s| s.pair);
    debug!(?selected_pair, rows = inputs.rows.len(), "selected joint pair");

    let wave_points = selected_pair
        .map(|pair| build_wave_points(&inputs.rows, pair))
        .unwrap_or_default();
    let asymmetry = compute_asymmetry(&wave_points);
    let asymmetry_series = selected_pair
        .map(|pair| rep_asymmetry_series(&inputs.rows, pair))
        .unwrap_or_default();

    let signals = build_signals(
        &inputs.reps,
        &asymmetry_series,
        inputs.session_day,
        &inputs.heart_rate,
        settings.heart_rate_window_days,
    );
    let fatigue_score = fatigue_score(&signals);
    let fatigue_level = fatigue_score.map(fatigue_level);

    let confidence = assess_confidence(
        inputs.reps.len(),
        inputs.rows.len(),
        inputs.trend_sessions.min(settings.trend_sessions),
        inputs.tracking_confidence,
        &signals,
    );
    let coach_actions = coach_actions(fatigue_level, &signals);

    info!(
        reps = inputs.reps.len(),
        fatigue_score,
        level = fatigue_level.map(|l| l.label()),
        confidence = confidence.level.label(),
        "session analytics complete"
    );

    Ok(SessionAnalytics {
        signals,
        fatigue_score,
        fatigue_level,
        confidence,
        coach_actions,
        asymmetry,
        wave_points,
        selected_pair,
    })
}
