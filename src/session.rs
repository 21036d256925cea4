//! A live tracking session: one exercise, one engine, one shadow selector.
//!
//! The session is the per-frame entry point. It turns a raw pose frame into
//! a tracking-quality signal, reconciles the shadow pose provider, advances
//! the rep engine, and emits one `FrameOutput` per frame.

use std::sync::Arc;

use uuid::Uuid;

use crate::config::EngineConfig;
use crate::engine::timing::adaptive_phase_hold_ms;
use crate::engine::types::{FrameOutput, PoseFrame};
use crate::engine::RepEngine;
use crate::models::types::ExerciseModel;
use crate::models::{self, ExerciseKind};
use crate::shadow::{tracking_quality, DisagreementWindow, PoseProvider, ShadowSelector};

/// One live tracking session.
pub struct TrackingSession {
    id: Uuid,
    kind: ExerciseKind,
    model: Arc<ExerciseModel>,
    engine: RepEngine,
    shadow: ShadowSelector,
    disagreement: DisagreementWindow,
}

impl TrackingSession {
    /// Start a session for the given exercise with default settings.
    pub fn new(kind: ExerciseKind) -> Self {
        Self::with_config(kind, &EngineConfig::default())
    }

    /// Start a session for the given exercise with explicit settings.
    pub fn with_config(kind: ExerciseKind, config: &EngineConfig) -> Self {
        let model = Arc::new(models::model(kind));
        let id = Uuid::new_v4();
        tracing::info!(session = %id, exercise = model.id, "tracking session started");
        Self {
            id,
            kind,
            engine: RepEngine::with_settings(
                Arc::clone(&model),
                config.timing.abandon_streak,
                config.timing.recent_window,
            ),
            shadow: ShadowSelector::with_windows(
                config.shadow.max_skew_sec,
                config.shadow.sticky_window_sec,
            ),
            disagreement: DisagreementWindow::new(config.shadow.disagreement_window),
            model,
        }
    }

    /// Session identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The exercise this session tracks.
    pub fn exercise(&self) -> ExerciseKind {
        self.kind
    }

    /// The exercise model this session runs.
    pub fn model(&self) -> &ExerciseModel {
        &self.model
    }

    /// Number of reps counted this session.
    pub fn completed_reps(&self) -> u32 {
        self.engine.completed_reps()
    }

    /// Index of the currently open rep, if any.
    pub fn active_rep(&self) -> Option<u32> {
        self.engine.active_rep()
    }

    /// Process one pose frame.
    ///
    /// Total function over frame content: untracked joints, missing
    /// landmarks, and missing shadow data all degrade the quality signal
    /// instead of erroring.
    pub fn process_frame(&mut self, frame: &PoseFrame) -> FrameOutput {
        let coverage = frame.landmark_coverage();

        // Provider selection sees the rep state from before this frame;
        // the frame that closes a rep is still inside it.
        let in_active_rep = self.engine.active_rep().is_some();
        let provider = match &frame.shadow {
            Some(obs) => {
                if let Some(delta) = obs
                    .mediapipe_angles
                    .as_ref()
                    .and_then(|mp| frame.angles.mean_abs_delta(mp))
                {
                    self.disagreement.add(delta);
                }
                self.shadow.select(obs, in_active_rep)
            }
            None => PoseProvider::Proxy,
        };

        let mean_delta = self.disagreement.mean();
        let quality = tracking_quality(coverage, mean_delta);

        let step = self
            .engine
            .process(frame.timestamp, &frame.angles, quality);

        FrameOutput {
            phase: step.phase,
            phase_label: self.model.phases[step.phase].label,
            active_rep: step.active_rep,
            completed: step.completed,
            tracking_quality: quality,
            phase_hold_ms: adaptive_phase_hold_ms(quality, mean_delta),
            provider,
        }
    }

    /// Reset to a fresh session: rep counter, phase, shadow anchor, and
    /// disagreement history all clear atomically.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.shadow.reset();
        self.disagreement.reset();
        self.id = Uuid::new_v4();
        tracing::info!(session = %self.id, exercise = self.model.id, "session reset");
    }

    /// Switch to a different exercise, discarding all session state.
    pub fn switch_exercise(&mut self, kind: ExerciseKind) {
        let model = Arc::new(models::model(kind));
        self.engine = RepEngine::new(Arc::clone(&model));
        self.shadow.reset();
        self.disagreement.reset();
        self.kind = kind;
        self.model = model;
        self.id = Uuid::new_v4();
        tracing::info!(
            session = %self.id,
            exercise = self.model.id,
            "switched exercise"
        );
    }
}
