//! Fault evaluation and Form Quality Index scoring.
//!
//! One shared evaluator interprets every exercise's tagged fault rules
//! against a finalized rep context. Missing angle data for a rule's input
//! means that fault is treated as not triggered, never as an error.

use serde::{Deserialize, Serialize};

use crate::engine::types::RepContext;
use crate::models::types::{DepthDirection, ExerciseModel, FaultRule, RepMetric};

/// A fault that triggered on a completed rep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaultHit {
    pub id: String,
    pub severity: u8,
    pub penalty: f64,
    pub cue: String,
}

/// Scoring result for one completed rep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepScore {
    /// Aggregate FQI in [0, 100]; `None` when no scored input was tracked
    pub fqi: Option<f64>,
    /// Faults that triggered, in rule declaration order
    pub faults: Vec<FaultHit>,
    /// Range-of-motion adherence sub-score
    pub rom_score: Option<f64>,
    /// Depth/bottom-position adherence sub-score
    pub depth_score: Option<f64>,
    /// Sum of triggered fault penalties
    pub penalty_total: f64,
}

/// Extract a rep metric from a finalized context.
///
/// `None` whenever a required side is untracked across the whole rep.
pub fn rep_metric_value(metric: &RepMetric, ctx: &RepContext) -> Option<f64> {
    match metric {
        RepMetric::MinPairMean(pair) => ctx.min_angles.pair_mean(*pair),
        RepMetric::MaxPairMean(pair) => ctx.max_angles.pair_mean(*pair),
        RepMetric::PairRom(pair) => {
            let min = ctx.min_angles.pair_mean(*pair)?;
            let max = ctx.max_angles.pair_mean(*pair)?;
            Some(max - min)
        }
        RepMetric::PairAsymmetry(pair) => {
            let (left, right) = pair.joints();
            let min_delta =
                (ctx.min_angles.get(left)? - ctx.min_angles.get(right)?).abs();
            let max_delta =
                (ctx.max_angles.get(left)? - ctx.max_angles.get(right)?).abs();
            Some(min_delta.max(max_delta))
        }
        RepMetric::DurationMs => Some(ctx.duration_ms),
    }
}

fn fault_triggers(rule: &FaultRule, ctx: &RepContext) -> bool {
    rep_metric_value(&rule.metric, ctx)
        .map(|v| rule.cmp.eval(v, rule.threshold))
        .unwrap_or(false)
}

/// Evaluate every fault rule of the model against a finalized rep.
pub fn evaluate_faults(model: &ExerciseModel, ctx: &RepContext) -> Vec<FaultHit> {
    model
        .faults
        .iter()
        .filter(|rule| fault_triggers(rule, ctx))
        .map(|rule| FaultHit {
            id: rule.id.to_string(),
            severity: rule.severity,
            penalty: rule.penalty,
            cue: rule.cue.to_string(),
        })
        .collect()
}

/// Range-of-motion adherence over the model's scored pairs.
///
/// Per pair: achieved span of the pair mean vs the declared range span,
/// ratio clamped to [0, 1] and scaled to 100. Untracked pairs are skipped;
/// `None` when no scored pair was tracked.
fn rom_score(model: &ExerciseModel, ctx: &RepContext) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for (pair, range) in &model.angle_ranges {
        let min = match ctx.min_angles.pair_mean(*pair) {
            Some(v) => v,
            None => continue,
        };
        let max = match ctx.max_angles.pair_mean(*pair) {
            Some(v) => v,
            None => continue,
        };
        let target_span = range.max - range.min;
        if target_span <= 0.0 {
            continue;
        }
        let achieved = (max - min).max(0.0);
        sum += (achieved / target_span).clamp(0.0, 1.0) * 100.0;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Depth adherence for the primary pair.
///
/// 100 when the rep reaches the optimal angle on the deep side; linear
/// falloff over the declared tolerance otherwise.
fn depth_score(model: &ExerciseModel, ctx: &RepContext) -> Option<f64> {
    let range = model.primary_range()?;
    let overshoot = match model.depth_direction {
        DepthDirection::Flexion => {
            let deepest = ctx.min_angles.pair_mean(model.primary_pair)?;
            (deepest - range.optimal).max(0.0)
        }
        DepthDirection::Extension => {
            let deepest = ctx.max_angles.pair_mean(model.primary_pair)?;
            (range.optimal - deepest).max(0.0)
        }
    };
    if range.tolerance <= 0.0 {
        return Some(if overshoot == 0.0 { 100.0 } else { 0.0 });
    }
    Some((100.0 - overshoot / range.tolerance * 100.0).clamp(0.0, 100.0))
}

/// Score a completed rep against its model.
///
/// FQI is the weighted combination of the ROM and depth sub-scores and the
/// fault penalty term, clamped to [0, 100]. Penalties are additive with no
/// cap other than the final clamp. When only one sub-score is available it
/// stands in for the missing one; when neither is, FQI is `None`.
pub fn score_rep(model: &ExerciseModel, ctx: &RepContext) -> RepScore {
    let faults = evaluate_faults(model, ctx);
    let penalty_total: f64 = faults.iter().map(|f| f.penalty).sum();

    let rom = rom_score(model, ctx);
    let depth = depth_score(model, ctx);

    let fqi = match (rom, depth) {
        (None, None) => None,
        (rom, depth) => {
            let rom_value = rom.or(depth).unwrap_or(0.0);
            let depth_value = depth.or(rom).unwrap_or(0.0);
            let fault_value = 100.0 - penalty_total;
            let w = &model.weights;
            let raw = rom_value * w.rom + depth_value * w.depth + fault_value * w.faults;
            Some(raw.clamp(0.0, 100.0))
        }
    };

    RepScore {
        fqi,
        faults,
        rom_score: rom,
        depth_score: depth,
        penalty_total,
    }
}
