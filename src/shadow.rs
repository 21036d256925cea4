//! Shadow pose-provider reconciliation.
//!
//! Two pose-estimation sources run side by side: the MediaPipe stream and a
//! proxy fallback. Per frame the selector reconciles them into one trusted
//! choice. Timestamp invalidity or excessive skew is a hard override that
//! always forces the proxy; inside an active rep a sticky minimum-hold
//! policy prevents single-frame jitter from alternating the selection.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::engine::types::JointAngles;

/// Maximum tolerated skew between the primary and MediaPipe timestamps.
pub const MAX_SKEW_SEC: f64 = 0.4;

/// Minimum hold before a sticky proxy selection may flip back to MediaPipe
/// while a rep is active.
pub const ACTIVE_REP_STICKY_WINDOW_SEC: f64 = 0.15;

/// A pose-estimation source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoseProvider {
    MediaPipe,
    Proxy,
}

impl PoseProvider {
    /// Get display label.
    pub fn label(&self) -> &'static str {
        match self {
            PoseProvider::MediaPipe => "MediaPipe",
            PoseProvider::Proxy => "Proxy",
        }
    }
}

impl std::fmt::Display for PoseProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Per-frame observation of the two pose sources.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShadowObservation {
    /// Provider the app currently prefers
    pub preferred: Option<PoseProvider>,
    /// Primary stream timestamp in seconds
    pub primary_ts: f64,
    /// MediaPipe stream timestamp in seconds, if a sample arrived
    pub mediapipe_ts: Option<f64>,
    /// MediaPipe joint angles for disagreement measurement
    pub mediapipe_angles: Option<JointAngles>,
}

impl Default for PoseProvider {
    fn default() -> Self {
        PoseProvider::Proxy
    }
}

/// Session-scoped provider selector with anti-flicker hysteresis.
///
/// State machine over {MediaPipe, Proxy}. Hard overrides (wrong preferred
/// provider, invalid MediaPipe timestamp, excessive skew) are never subject
/// to hysteresis; the sticky window only applies to the proxy -> MediaPipe
/// flip inside an active rep.
#[derive(Debug, Clone)]
pub struct ShadowSelector {
    max_skew_sec: f64,
    sticky_window_sec: f64,
    /// Provider currently anchored for the open rep
    sticky: Option<PoseProvider>,
    /// Primary timestamp at which the sticky anchor was set
    sticky_since_primary_ts: Option<f64>,
}

impl ShadowSelector {
    /// Create a selector with the default skew and sticky windows.
    pub fn new() -> Self {
        Self::with_windows(MAX_SKEW_SEC, ACTIVE_REP_STICKY_WINDOW_SEC)
    }

    /// Create a selector with custom windows.
    pub fn with_windows(max_skew_sec: f64, sticky_window_sec: f64) -> Self {
        Self {
            max_skew_sec,
            sticky_window_sec,
            sticky: None,
            sticky_since_primary_ts: None,
        }
    }

    /// The currently anchored provider, if a rep is holding one.
    pub fn sticky(&self) -> Option<PoseProvider> {
        self.sticky
    }

    /// Whether the observation forces the proxy regardless of hysteresis.
    fn forced_proxy(&self, obs: &ShadowObservation) -> bool {
        if obs.preferred != Some(PoseProvider::MediaPipe) {
            return true;
        }
        let mp_ts = match obs.mediapipe_ts {
            Some(ts) if ts.is_finite() => ts,
            _ => return true,
        };
        (obs.primary_ts - mp_ts).abs() > self.max_skew_sec
    }

    /// Select the trusted provider for this frame.
    pub fn select(&mut self, obs: &ShadowObservation, in_active_rep: bool) -> PoseProvider {
        let candidate = if self.forced_proxy(obs) {
            PoseProvider::Proxy
        } else {
            PoseProvider::MediaPipe
        };

        if !in_active_rep {
            self.reset();
            return candidate;
        }

        match self.sticky {
            // First selection in the rep is taken as-is and becomes sticky.
            None => {
                self.anchor(candidate, obs.primary_ts);
                candidate
            }
            Some(sticky) => {
                if candidate == PoseProvider::Proxy {
                    // A forced proxy always wins immediately and re-anchors.
                    if sticky != PoseProvider::Proxy {
                        tracing::debug!("shadow selection forced to proxy mid-rep");
                    }
                    self.anchor(PoseProvider::Proxy, obs.primary_ts);
                    PoseProvider::Proxy
                } else if sticky == PoseProvider::MediaPipe {
                    PoseProvider::MediaPipe
                } else {
                    // Sticky proxy, compliant MediaPipe candidate: only flip
                    // back once the proxy anchor has held long enough.
                    let held = self
                        .sticky_since_primary_ts
                        .map(|since| obs.primary_ts - since)
                        .unwrap_or(0.0);
                    if held >= self.sticky_window_sec {
                        self.anchor(PoseProvider::MediaPipe, obs.primary_ts);
                        PoseProvider::MediaPipe
                    } else {
                        PoseProvider::Proxy
                    }
                }
            }
        }
    }

    fn anchor(&mut self, provider: PoseProvider, primary_ts: f64) {
        self.sticky = Some(provider);
        self.sticky_since_primary_ts = Some(primary_ts);
    }

    /// Clear sticky state; called whenever no rep is active and on session
    /// reset.
    pub fn reset(&mut self) {
        self.sticky = None;
        self.sticky_since_primary_ts = None;
    }
}

impl Default for ShadowSelector {
    fn default() -> Self {
        Self::new()
    }
}

/// Bounded window of per-frame angular disagreement between the two pose
/// sources, in degrees.
#[derive(Debug, Clone)]
pub struct DisagreementWindow {
    buffer: VecDeque<f64>,
    window_size: usize,
    sum: f64,
}

impl DisagreementWindow {
    /// Create a window holding the most recent `window_size` samples.
    pub fn new(window_size: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(window_size),
            window_size: window_size.max(1),
            sum: 0.0,
        }
    }

    /// Add a new disagreement sample and return the current mean.
    pub fn add(&mut self, delta: f64) -> f64 {
        if delta.is_finite() {
            self.buffer.push_back(delta);
            self.sum += delta;
            if self.buffer.len() > self.window_size {
                if let Some(old) = self.buffer.pop_front() {
                    self.sum -= old;
                }
            }
        }
        self.mean()
    }

    /// Current mean absolute disagreement; 0 when no samples are available.
    pub fn mean(&self) -> f64 {
        if self.buffer.is_empty() {
            0.0
        } else {
            self.sum / self.buffer.len() as f64
        }
    }

    /// Number of samples in the window.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the window is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Clear all samples.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.sum = 0.0;
    }
}

/// Combine landmark coverage and shadow disagreement into a tracking
/// quality signal in [0, 1].
///
/// Coverage dominates; disagreement of 30 degrees or more halves the
/// result.
pub fn tracking_quality(coverage: f64, mean_abs_delta: f64) -> f64 {
    let coverage = coverage.clamp(0.0, 1.0);
    let delta = if mean_abs_delta.is_finite() {
        mean_abs_delta.max(0.0)
    } else {
        0.0
    };
    let disagreement_factor = 1.0 - (delta / 30.0).min(1.0) * 0.5;
    (coverage * disagreement_factor).clamp(0.0, 1.0)
}
