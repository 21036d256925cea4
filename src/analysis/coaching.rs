//! Coaching action recommendations from fatigue signals.

use serde::{Deserialize, Serialize};

use super::fatigue::{FatigueLevel, FatigueSignals};

/// Priority for a recommended action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionPriority {
    High,
    Medium,
    Low,
}

impl ActionPriority {
    /// Sort rank: higher means more urgent.
    pub fn rank(&self) -> u8 {
        match self {
            ActionPriority::High => 2,
            ActionPriority::Medium => 1,
            ActionPriority::Low => 0,
        }
    }

    /// Get display label.
    pub fn label(&self) -> &'static str {
        match self {
            ActionPriority::High => "High",
            ActionPriority::Medium => "Medium",
            ActionPriority::Low => "Low",
        }
    }
}

/// A single recommended coaching action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachAction {
    /// Stable identifier, e.g. "reduce-load"
    pub id: String,
    pub title: String,
    pub detail: String,
    pub priority: ActionPriority,
}

impl CoachAction {
    fn new(id: &str, title: &str, detail: String, priority: ActionPriority) -> Self {
        CoachAction {
            id: id.to_string(),
            title: title.to_string(),
            detail,
            priority,
        }
    }
}

/// Build up to three recommendations, most urgent first.
///
/// High fatigue always leads with load and rest reductions. Individual
/// drift signals add targeted actions; a quiet session falls through to a
/// single progression suggestion.
pub fn coach_actions(
    level: Option<FatigueLevel>,
    signals: &FatigueSignals,
) -> Vec<CoachAction> {
    let mut actions: Vec<CoachAction> = Vec::new();

    if level == Some(FatigueLevel::High) {
        actions.push(CoachAction::new(
            "reduce-load",
            "Reduce working load",
            "Fatigue markers are high. Drop load 10-15% for the remaining sets."
                .to_string(),
            ActionPriority::High,
        ));
        actions.push(CoachAction::new(
            "extend-rest",
            "Extend rest intervals",
            "Add 60-90 seconds between sets until tempo and form recover.".to_string(),
            ActionPriority::High,
        ));
    }

    if let Some(tempo) = signals.tempo_drift_pct {
        if tempo >= 12.0 {
            let priority = if tempo >= 18.0 {
                ActionPriority::High
            } else {
                ActionPriority::Medium
            };
            actions.push(CoachAction::new(
                "tempo-reset",
                "Reset rep tempo",
                format!(
                    "Rep speed slowed {:.0}% across the session. End the set when tempo slips again.",
                    tempo
                ),
                priority,
            ));
        }
    }

    if let Some(asym) = signals.asymmetry_drift_deg {
        if asym >= 3.5 {
            let priority = if asym >= 6.0 {
                ActionPriority::High
            } else {
                ActionPriority::Medium
            };
            actions.push(CoachAction::new(
                "balance-block",
                "Add a unilateral balance block",
                format!(
                    "Left/right difference grew {:.1} degrees. Finish with light single-side work on the weaker side.",
                    asym
                ),
                priority,
            ));
        }
    }

    if let Some(strain) = signals.heart_rate_strain_bpm {
        if strain >= 8.0 {
            let priority = if strain >= 12.0 {
                ActionPriority::High
            } else {
                ActionPriority::Medium
            };
            actions.push(CoachAction::new(
                "reduce-density",
                "Reduce session density",
                format!(
                    "Heart rate is {:.0} bpm above your weekly baseline. Cut a set or slow the pace.",
                    strain
                ),
                priority,
            ));
        }
    }

    if actions.is_empty() {
        actions.push(CoachAction::new(
            "progressive-overload",
            "Progress next session",
            "No fatigue markers detected. Add a rep or a small load increase next time."
                .to_string(),
            ActionPriority::Low,
        ));
        return actions;
    }

    actions.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank()));
    actions.truncate(3);
    actions
}
