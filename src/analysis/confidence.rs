//! Confidence grading for the fatigue assessment.
//!
//! The fatigue score is only as good as the data behind it. This grades the
//! available evidence (rep count, frame volume, historical trend, signal
//! coverage, tracking quality) into a 0-100 confidence score and a coarse
//! level, with a note naming what is missing.

use serde::{Deserialize, Serialize};

use super::fatigue::FatigueSignals;

/// Coarse confidence grade over the 0-100 confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    /// Score >= 75
    High,
    /// Score >= 55
    Medium,
    /// Score >= 35
    Low,
    /// Score < 35, or no evidence at all
    Insufficient,
}

impl ConfidenceLevel {
    /// Get display label.
    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "High",
            ConfidenceLevel::Medium => "Medium",
            ConfidenceLevel::Low => "Low",
            ConfidenceLevel::Insufficient => "Insufficient",
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Confidence in the fatigue assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FatigueConfidence {
    /// Confidence score 0-100; `None` when there is no evidence at all
    pub score: Option<f64>,
    pub level: ConfidenceLevel,
    /// Names up to two missing signal types when confidence is not high
    pub note: Option<String>,
}

fn rep_points(rep_count: usize) -> f64 {
    if rep_count < 2 {
        0.0
    } else if rep_count < 4 {
        10.0
    } else if rep_count < 8 {
        18.0
    } else {
        25.0
    }
}

fn frame_points(pose_frames: usize) -> f64 {
    if pose_frames < 80 {
        0.0
    } else if pose_frames < 200 {
        8.0
    } else if pose_frames < 600 {
        14.0
    } else {
        20.0
    }
}

fn trend_points(trend_sessions: usize) -> f64 {
    if trend_sessions == 0 {
        0.0
    } else if trend_sessions < 2 {
        5.0
    } else {
        10.0
    }
}

fn tracking_points(tracking_confidence: f64) -> f64 {
    if tracking_confidence < 0.72 {
        3.0
    } else if tracking_confidence < 0.85 {
        6.0
    } else {
        10.0
    }
}

/// Assess confidence in the fatigue signals.
pub fn assess_confidence(
    rep_count: usize,
    pose_frames: usize,
    trend_sessions: usize,
    tracking_confidence: f64,
    signals: &FatigueSignals,
) -> FatigueConfidence {
    let mut score = rep_points(rep_count)
        + frame_points(pose_frames)
        + trend_points(trend_sessions)
        + tracking_points(tracking_confidence);

    if signals.fqi_drop_pct.is_some() {
        score += 15.0;
    }
    if signals.tempo_drift_pct.is_some() {
        score += 15.0;
    }
    if signals.asymmetry_drift_deg.is_some() {
        score += 10.0;
    }
    if signals.heart_rate_strain_bpm.is_some() {
        score += 8.0;
    }
    if signals.heart_rate_baseline_bpm.is_some() {
        score += 7.0;
    }

    // Tracking points alone do not count as evidence.
    let has_evidence = rep_count >= 2
        || pose_frames >= 80
        || trend_sessions > 0
        || signals.any_present()
        || signals.heart_rate_baseline_bpm.is_some();
    if !has_evidence {
        return FatigueConfidence {
            score: None,
            level: ConfidenceLevel::Insufficient,
            note: Some("No usable session data".to_string()),
        };
    }

    let score = score.clamp(0.0, 100.0);
    let level = if score >= 75.0 {
        ConfidenceLevel::High
    } else if score >= 55.0 {
        ConfidenceLevel::Medium
    } else if score >= 35.0 {
        ConfidenceLevel::Low
    } else {
        ConfidenceLevel::Insufficient
    };

    let note = if level == ConfidenceLevel::High {
        None
    } else {
        missing_signal_note(signals)
    };

    FatigueConfidence {
        score: Some(score),
        level,
        note,
    }
}

/// Name up to two missing signal types, in fixed priority order.
fn missing_signal_note(signals: &FatigueSignals) -> Option<String> {
    let mut missing: Vec<&str> = Vec::new();
    if signals.fqi_drop_pct.is_none() {
        missing.push("form quality trend");
    }
    if signals.tempo_drift_pct.is_none() {
        missing.push("tempo trend");
    }
    if signals.asymmetry_drift_deg.is_none() {
        missing.push("asymmetry trend");
    }
    if signals.heart_rate_strain_bpm.is_none() {
        missing.push("heart rate");
    }
    if missing.is_empty() {
        return None;
    }
    missing.truncate(2);
    Some(format!("Missing: {}", missing.join(", ")))
}
