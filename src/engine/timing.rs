//! Adaptive debounce and hold timing.
//!
//! Keeps the rep debounce tight when tracking is clean and loosens it when
//! tracking is noisy, avoiding both double-counts and missed reps. All
//! inputs come from the session (recent cadence, tracking quality, shadow
//! disagreement); nothing here reads the clock.

use std::collections::VecDeque;

/// Hard floor for any rep debounce, in milliseconds.
pub const MIN_REP_DURATION_MS: f64 = 120.0;

/// Cadence fraction applied to the mean of recent rep durations.
const CADENCE_FACTOR: f64 = 0.45;

/// Clamp band for the cadence candidate, relative to the configured base.
const CADENCE_CLAMP_LOW: f64 = 0.65;
const CADENCE_CLAMP_HIGH: f64 = 1.6;

/// Quality penalty slope: a fully untrusted frame stream inflates the
/// debounce by 35 percent.
const QUALITY_PENALTY: f64 = 0.35;

/// Bounded window of recent rep durations, in milliseconds.
#[derive(Debug, Clone)]
pub struct RecentDurations {
    buffer: VecDeque<f64>,
    window_size: usize,
    sum: f64,
}

impl RecentDurations {
    /// Create a window holding the most recent `window_size` durations.
    pub fn new(window_size: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(window_size),
            window_size: window_size.max(1),
            sum: 0.0,
        }
    }

    /// Record a completed rep duration.
    pub fn push(&mut self, duration_ms: f64) {
        if !duration_ms.is_finite() || duration_ms <= 0.0 {
            return;
        }
        self.buffer.push_back(duration_ms);
        self.sum += duration_ms;
        if self.buffer.len() > self.window_size {
            if let Some(old) = self.buffer.pop_front() {
                self.sum -= old;
            }
        }
    }

    /// Mean of the recorded durations, `None` when empty.
    pub fn mean(&self) -> Option<f64> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(self.sum / self.buffer.len() as f64)
        }
    }

    /// Number of recorded durations.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether no durations are recorded.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Clear the window.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.sum = 0.0;
    }
}

/// Adaptive minimum rep duration in milliseconds.
///
/// Starts from `max(120, configured_base)`, pulls toward 45 percent of the
/// recent mean cadence when history exists (clamped to 0.65x..1.6x of the
/// base), inflates with poor tracking quality, and clamps to
/// [120, 2 x base].
pub fn adaptive_rep_duration_ms(
    configured_base_ms: f64,
    recent_mean_ms: Option<f64>,
    tracking_quality: f64,
) -> f64 {
    let base = configured_base_ms.max(MIN_REP_DURATION_MS);
    let candidate = match recent_mean_ms {
        Some(mean) if mean.is_finite() && mean > 0.0 => {
            (mean * CADENCE_FACTOR).clamp(base * CADENCE_CLAMP_LOW, base * CADENCE_CLAMP_HIGH)
        }
        _ => base,
    };
    let quality = tracking_quality.clamp(0.0, 1.0);
    let penalized = candidate * (1.0 + (1.0 - quality) * QUALITY_PENALTY);
    penalized.clamp(MIN_REP_DURATION_MS, base * 2.0)
}

/// Adaptive phase-hold duration in milliseconds.
///
/// Grows with poor tracking quality and with angular disagreement between
/// the two pose sources; clamped to [40, 220].
pub fn adaptive_phase_hold_ms(tracking_quality: f64, shadow_mean_abs_delta: f64) -> f64 {
    let quality = tracking_quality.clamp(0.0, 1.0);
    let delta = if shadow_mean_abs_delta.is_finite() {
        shadow_mean_abs_delta.max(0.0)
    } else {
        0.0
    };
    (40.0 + (1.0 - quality) * 120.0 + delta * 2.0).clamp(40.0, 220.0)
}
