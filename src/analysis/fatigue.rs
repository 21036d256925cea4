//! Fatigue drift signals and fatigue scoring.
//!
//! Drift signals compare a first-third window against a last-third window
//! of an ordered series; heart-rate strain compares the session day against
//! the median of the trailing week. Every component is independently
//! nullable: a missing input yields a null signal, never an error, and a
//! fully null signal set yields a null fatigue score.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A completed rep record from the session history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedRep {
    /// 1-based rep index within the session
    pub rep_index: u32,
    /// Form Quality Index, if the rep was scorable
    pub fqi: Option<f64>,
    /// Rep start time
    pub start_ts: DateTime<Utc>,
    /// Rep end time
    pub end_ts: DateTime<Utc>,
    /// Fault ids detected on this rep
    pub faults_detected: Vec<String>,
}

impl CompletedRep {
    /// Rep duration in seconds; `None` when the record is inverted.
    pub fn duration_secs(&self) -> Option<f64> {
        let millis = (self.end_ts - self.start_ts).num_milliseconds();
        if millis >= 0 {
            Some(millis as f64 / 1000.0)
        } else {
            None
        }
    }
}

/// Daily heart-rate summary from the history collaborator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DailyHeartRate {
    pub date: NaiveDate,
    pub mean_bpm: f64,
}

/// The fatigue signal set. Each component is independently nullable.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FatigueSignals {
    /// FQI decline from first-third to last-third window, percent
    pub fqi_drop_pct: Option<f64>,
    /// Rep-duration increase from first-third to last-third window, percent
    pub tempo_drift_pct: Option<f64>,
    /// Asymmetry increase from first-third to last-third window, degrees
    pub asymmetry_drift_deg: Option<f64>,
    /// Session-day mean heart rate
    pub heart_rate_bpm: Option<f64>,
    /// Median heart rate of the trailing week before the session
    pub heart_rate_baseline_bpm: Option<f64>,
    /// Session heart rate minus baseline
    pub heart_rate_strain_bpm: Option<f64>,
}

impl FatigueSignals {
    /// Whether any signal is present.
    pub fn any_present(&self) -> bool {
        self.fqi_drop_pct.is_some()
            || self.tempo_drift_pct.is_some()
            || self.asymmetry_drift_deg.is_some()
            || self.heart_rate_strain_bpm.is_some()
    }
}

/// Fatigue classification thresholds over the 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FatigueLevel {
    /// Score <= 30
    Low,
    /// Score <= 60
    Moderate,
    /// Score > 60
    High,
}

impl FatigueLevel {
    /// Get display label.
    pub fn label(&self) -> &'static str {
        match self {
            FatigueLevel::Low => "Low Fatigue",
            FatigueLevel::Moderate => "Moderate Fatigue",
            FatigueLevel::High => "High Fatigue",
        }
    }
}

impl std::fmt::Display for FatigueLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Mean of the first-third and last-third windows of an ordered series.
///
/// Window size is max(1, n / 3); `None` when fewer than two values exist.
fn window_means(series: &[f64]) -> Option<(f64, f64)> {
    if series.len() < 2 {
        return None;
    }
    let window = (series.len() / 3).max(1);
    let first = &series[..window];
    let last = &series[series.len() - window..];
    let mean = |s: &[f64]| s.iter().sum::<f64>() / s.len() as f64;
    Some((mean(first), mean(last)))
}

/// Tempo drift over a rep-duration series: positive when reps slow down.
pub fn tempo_drift_pct(durations_secs: &[f64]) -> Option<f64> {
    let (first, last) = window_means(durations_secs)?;
    if first <= 0.0 {
        return None;
    }
    Some((last - first) / first * 100.0)
}

/// FQI drop over a quality series: positive when form degrades.
pub fn fqi_drop_pct(fqi_series: &[f64]) -> Option<f64> {
    let (first, last) = window_means(fqi_series)?;
    if first <= 0.0 {
        return None;
    }
    Some((first - last) / first * 100.0)
}

/// Asymmetry drift over a per-rep asymmetry series, in raw degrees.
pub fn asymmetry_drift_deg(asymmetry_series: &[f64]) -> Option<f64> {
    let (first, last) = window_means(asymmetry_series)?;
    Some(last - first)
}

fn median(values: &mut Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

/// Baseline heart rate: median of the daily summaries within the trailing
/// `window_days` window strictly before the session date.
pub fn heart_rate_baseline(
    session_date: NaiveDate,
    history: &[DailyHeartRate],
    window_days: u32,
) -> Option<f64> {
    let window_start = session_date - Duration::days(window_days as i64);
    let mut prior: Vec<f64> = history
        .iter()
        .filter(|d| d.date < session_date && d.date >= window_start)
        .map(|d| d.mean_bpm)
        .collect();
    median(&mut prior)
}

/// Heart-rate strain: session-day heart rate minus the trailing baseline.
/// `None` when either side is missing.
pub fn heart_rate_strain(
    session_hr_bpm: Option<f64>,
    baseline_bpm: Option<f64>,
) -> Option<f64> {
    Some(session_hr_bpm? - baseline_bpm?)
}

/// Build the full signal set from session history. `heart_rate_window_days`
/// bounds the trailing window the baseline draws from.
pub fn build_signals(
    reps: &[CompletedRep],
    asymmetry_series: &[f64],
    session_date: NaiveDate,
    heart_rate_history: &[DailyHeartRate],
    heart_rate_window_days: u32,
) -> FatigueSignals {
    let durations: Vec<f64> = reps.iter().filter_map(|r| r.duration_secs()).collect();
    let fqis: Vec<f64> = reps.iter().filter_map(|r| r.fqi).collect();

    let heart_rate_bpm = heart_rate_history
        .iter()
        .find(|d| d.date == session_date)
        .map(|d| d.mean_bpm);
    let heart_rate_baseline_bpm =
        heart_rate_baseline(session_date, heart_rate_history, heart_rate_window_days);

    FatigueSignals {
        fqi_drop_pct: fqi_drop_pct(&fqis),
        tempo_drift_pct: tempo_drift_pct(&durations),
        asymmetry_drift_deg: asymmetry_drift_deg(asymmetry_series),
        heart_rate_bpm,
        heart_rate_baseline_bpm,
        heart_rate_strain_bpm: heart_rate_strain(heart_rate_bpm, heart_rate_baseline_bpm),
    }
}

/// Fatigue score in [0, 100] from up to four independently clamped terms.
///
/// `None` when no term is available: a missing score must read as
/// "insufficient data", never as low fatigue.
pub fn fatigue_score(signals: &FatigueSignals) -> Option<f64> {
    let mut sum = 0.0;
    let mut terms = 0usize;

    if let Some(drop) = signals.fqi_drop_pct {
        sum += (drop.max(0.0) * 1.1).clamp(0.0, 30.0);
        terms += 1;
    }
    if let Some(drift) = signals.tempo_drift_pct {
        sum += (drift.max(0.0) * 0.9).clamp(0.0, 25.0);
        terms += 1;
    }
    if let Some(drift) = signals.asymmetry_drift_deg {
        sum += (drift.max(0.0) * 2.2).clamp(0.0, 25.0);
        terms += 1;
    }
    if let Some(strain) = signals.heart_rate_strain_bpm {
        sum += ((strain - 2.0).max(0.0) * 1.8).clamp(0.0, 20.0);
        terms += 1;
    }

    if terms == 0 {
        None
    } else {
        Some(sum.clamp(0.0, 100.0))
    }
}

/// Classify a fatigue score.
pub fn fatigue_level(score: f64) -> FatigueLevel {
    if score <= 30.0 {
        FatigueLevel::Low
    } else if score <= 60.0 {
        FatigueLevel::Moderate
    } else {
        FatigueLevel::High
    }
}
