//! Per-frame phase advancement and rep counting.
//!
//! The engine consumes one frame of joint angles at a time, advances the
//! phase through the model's transition table, and counts reps at the
//! model's rep boundary with an adaptive debounce. All state is owned by
//! the engine instance; two engines never share anything.

use std::sync::Arc;

use crate::engine::phase::{next_phase, required_tracked};
use crate::engine::scoring::score_rep;
use crate::engine::timing::{adaptive_rep_duration_ms, RecentDurations};
use crate::engine::types::{JointAngles, RepContext, RepIndexTracker, RepSummary};
use crate::models::types::ExerciseModel;

/// Default number of consecutive lost-tracking frames after which an open
/// rep is abandoned (about half a second at 30 fps).
pub const DEFAULT_ABANDON_STREAK: u32 = 15;

/// Default length of the recent rep duration window feeding the adaptive
/// debounce.
pub const DEFAULT_RECENT_WINDOW: usize = 8;

/// Result of processing one frame.
#[derive(Debug, Clone)]
pub struct EngineStep {
    /// Active phase after this frame
    pub phase: usize,
    /// Index of the currently open rep, if any
    pub active_rep: Option<u32>,
    /// Summary of a rep completed on this frame, if any
    pub completed: Option<RepSummary>,
}

/// Phase/rep state machine for one tracking session.
pub struct RepEngine {
    model: Arc<ExerciseModel>,
    phase: usize,
    tracker: RepIndexTracker,
    context: Option<RepContext>,
    /// Timestamp of the last counted rep, in seconds
    last_rep_ts: Option<f64>,
    /// Consecutive frames with required-joint tracking lost
    lost_streak: u32,
    abandon_streak: u32,
    recent: RecentDurations,
}

impl RepEngine {
    /// Create an engine for the given model.
    pub fn new(model: Arc<ExerciseModel>) -> Self {
        Self::with_settings(model, DEFAULT_ABANDON_STREAK, DEFAULT_RECENT_WINDOW)
    }

    /// Create an engine with custom abandonment and cadence settings.
    pub fn with_settings(
        model: Arc<ExerciseModel>,
        abandon_streak: u32,
        recent_window: usize,
    ) -> Self {
        let phase = model.initial_phase;
        Self {
            model,
            phase,
            tracker: RepIndexTracker::new(),
            context: None,
            last_rep_ts: None,
            lost_streak: 0,
            abandon_streak: abandon_streak.max(1),
            recent: RecentDurations::new(recent_window),
        }
    }

    /// The exercise model this engine runs.
    pub fn model(&self) -> &ExerciseModel {
        &self.model
    }

    /// Index of the active phase.
    pub fn phase(&self) -> usize {
        self.phase
    }

    /// Label of the active phase.
    pub fn phase_label(&self) -> &'static str {
        self.model.phases[self.phase].label
    }

    /// Index of the currently open rep, if any.
    pub fn active_rep(&self) -> Option<u32> {
        self.tracker.active()
    }

    /// Number of reps counted this session.
    pub fn completed_reps(&self) -> u32 {
        self.tracker.completed()
    }

    /// Mean of the recent rep durations, in milliseconds.
    pub fn recent_mean_ms(&self) -> Option<f64> {
        self.recent.mean()
    }

    /// Process one frame.
    ///
    /// `ts` is the frame timestamp in seconds; `tracking_quality` is the
    /// session's current [0, 1] quality signal. Total function: untracked
    /// or non-finite angles force the idle/setup phase, never an error.
    pub fn process(
        &mut self,
        ts: f64,
        angles: &JointAngles,
        tracking_quality: f64,
    ) -> EngineStep {
        // Required-joint loss is a hard override to the initial phase,
        // ahead of any hysteresis.
        if !required_tracked(&self.model, angles) {
            self.lost_streak = self.lost_streak.saturating_add(1);
            if self.tracker.active().is_some() && self.lost_streak >= self.abandon_streak {
                let abandoned = self.tracker.abandon();
                self.context = None;
                tracing::warn!(
                    exercise = self.model.id,
                    rep = ?abandoned,
                    "tracking lost, abandoning open rep"
                );
            }
            self.phase = self.model.initial_phase;
            return EngineStep {
                phase: self.phase,
                active_rep: self.tracker.active(),
                completed: None,
            };
        }
        self.lost_streak = 0;

        let next = next_phase(&self.model, self.phase, angles);

        if let Some(ctx) = self.context.as_mut() {
            ctx.update(angles);
        }

        let mut completed = None;
        let boundary = self.model.boundary;

        // Rep boundary: counted only on a genuine transition into the end
        // phase from a non-initial phase, debounced by the adaptive
        // minimum duration.
        if next != self.phase
            && next == boundary.end_phase
            && self.phase != self.model.initial_phase
        {
            let min_ms = adaptive_rep_duration_ms(
                boundary.min_duration_ms,
                self.recent.mean(),
                tracking_quality,
            );
            let debounced = self
                .last_rep_ts
                .map(|last| (ts - last) * 1000.0 >= min_ms)
                .unwrap_or(true);

            if debounced {
                if let Some(mut ctx) = self.context.take() {
                    ctx.finalize(*angles, ts);
                    if let Some(rep_index) = self.tracker.close_rep() {
                        let score = score_rep(&self.model, &ctx);
                        self.recent.push(ctx.duration_ms);
                        self.last_rep_ts = Some(ts);
                        tracing::debug!(
                            exercise = self.model.id,
                            rep = rep_index,
                            fqi = ?score.fqi,
                            faults = score.faults.len(),
                            "rep counted"
                        );
                        completed = Some(RepSummary {
                            rep_index,
                            fqi: score.fqi,
                            fault_ids: score.faults.iter().map(|f| f.id.clone()).collect(),
                            cues: score.faults.iter().map(|f| f.cue.clone()).collect(),
                            duration_ms: ctx.duration_ms,
                        });
                    }
                }
            }
        }

        // Rep start: entering the start phase while no rep is open.
        if next == boundary.start_phase && self.tracker.active().is_none() {
            let rep_index = self.tracker.open_rep();
            self.context = Some(RepContext::open(*angles, ts));
            tracing::debug!(exercise = self.model.id, rep = rep_index, "rep opened");
        }

        if next != self.phase {
            tracing::debug!(
                exercise = self.model.id,
                from = self.model.phases[self.phase].id,
                to = self.model.phases[next].id,
                "phase transition"
            );
        }
        self.phase = next;

        EngineStep {
            phase: self.phase,
            active_rep: self.tracker.active(),
            completed,
        }
    }

    /// Reset to a fresh session: initial phase, no open rep, empty cadence
    /// history.
    pub fn reset(&mut self) {
        self.phase = self.model.initial_phase;
        self.tracker.reset();
        self.context = None;
        self.last_rep_ts = None;
        self.lost_streak = 0;
        self.recent.reset();
    }
}
