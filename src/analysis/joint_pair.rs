//! Joint-pair selection, wave-point bucketing, and asymmetry statistics.
//!
//! Operates on a session's ordered pose-sample series. Everything here is
//! deterministic: identical rows always yield the identical selection,
//! buckets, and statistics.

use serde::{Deserialize, Serialize};

use crate::engine::types::{JointAngles, JointPair};

/// Maximum number of wave-point buckets per session.
const MAX_WAVE_POINTS: usize = 80;

/// Pair-selection score weights.
const TRACKED_WEIGHT: f64 = 0.85;
const AMPLITUDE_WEIGHT: f64 = 0.15;
const LR_DIFF_WEIGHT: f64 = 0.02;

/// One pose sample row from the session history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoseRow {
    /// Sample timestamp in seconds
    pub ts: f64,
    /// Joint angles at this sample
    pub angles: JointAngles,
    /// Rep number the sample fell inside, if any
    pub rep: Option<f64>,
    /// Phase label at this sample, if known
    pub phase: Option<String>,
}

/// Result of joint-pair selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PairSelection {
    pub pair: JointPair,
    pub score: f64,
    /// Rows where both sides of the pair were tracked
    pub tracked_rows: usize,
}

/// Pick the most informative joint pair from a pose-sample series.
///
/// Score per pair = trackedCount x 0.85 + amplitude x 0.15 −
/// meanLRDiff x 0.02, computed over rows where both sides are tracked;
/// amplitude is the range of the per-row pair means. Ties resolve to the
/// first pair in fixed declaration order (elbow, shoulder, knee, hip).
pub fn select_best_joint_pair(rows: &[PoseRow]) -> Option<PairSelection> {
    if rows.is_empty() {
        return None;
    }

    let mut best: Option<PairSelection> = None;
    for pair in JointPair::ALL {
        let (left_id, right_id) = pair.joints();

        let mut tracked = 0usize;
        let mut lr_diff_sum = 0.0;
        let mut min_mean = f64::INFINITY;
        let mut max_mean = f64::NEG_INFINITY;
        for row in rows {
            if let (Some(l), Some(r)) = (row.angles.get(left_id), row.angles.get(right_id)) {
                tracked += 1;
                lr_diff_sum += (l - r).abs();
                let mean = (l + r) / 2.0;
                min_mean = min_mean.min(mean);
                max_mean = max_mean.max(mean);
            }
        }

        let amplitude = if tracked > 0 { max_mean - min_mean } else { 0.0 };
        let mean_lr_diff = if tracked > 0 {
            lr_diff_sum / tracked as f64
        } else {
            0.0
        };
        let score = tracked as f64 * TRACKED_WEIGHT + amplitude * AMPLITUDE_WEIGHT
            - mean_lr_diff * LR_DIFF_WEIGHT;

        // Strict comparison keeps the first pair on ties.
        if best.map(|b| score > b.score).unwrap_or(true) {
            best = Some(PairSelection {
                pair,
                score,
                tracked_rows: tracked,
            });
        }
    }
    best
}

/// Bucketed, time-ordered sample for waveform display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WavePoint {
    /// Bucket index
    pub index: usize,
    /// Mean left angle over rows with both sides numeric
    pub left: Option<f64>,
    /// Mean right angle over rows with both sides numeric
    pub right: Option<f64>,
    /// Rounded mean rep number over rows with a defined rep
    pub rep: Option<u32>,
    /// Most frequent non-empty phase label in the bucket
    pub phase: Option<String>,
}

/// Partition the row sequence into at most 80 buckets.
///
/// Bucket size is ceil(n / 80). Per bucket: mean left/right angle over
/// rows where both values are numeric, a rounded mean rep number over rows
/// with a defined rep, and the most frequent non-empty phase label
/// (first-seen wins on ties).
pub fn build_wave_points(rows: &[PoseRow], pair: JointPair) -> Vec<WavePoint> {
    if rows.is_empty() {
        return Vec::new();
    }
    let bucket_size = rows.len().div_ceil(MAX_WAVE_POINTS);
    let (left_id, right_id) = pair.joints();

    rows.chunks(bucket_size)
        .enumerate()
        .map(|(index, chunk)| {
            let mut left_sum = 0.0;
            let mut right_sum = 0.0;
            let mut angle_count = 0usize;
            let mut rep_sum = 0.0;
            let mut rep_count = 0usize;
            // First-seen ordering so ties resolve deterministically.
            let mut label_counts: Vec<(&str, usize)> = Vec::new();

            for row in chunk {
                if let (Some(l), Some(r)) = (row.angles.get(left_id), row.angles.get(right_id)) {
                    left_sum += l;
                    right_sum += r;
                    angle_count += 1;
                }
                if let Some(rep) = row.rep.filter(|r| r.is_finite()) {
                    rep_sum += rep;
                    rep_count += 1;
                }
                if let Some(label) = row.phase.as_deref().filter(|l| !l.is_empty()) {
                    match label_counts.iter_mut().find(|(l, _)| *l == label) {
                        Some((_, count)) => *count += 1,
                        None => label_counts.push((label, 1)),
                    }
                }
            }

            let (left, right) = if angle_count > 0 {
                (
                    Some(left_sum / angle_count as f64),
                    Some(right_sum / angle_count as f64),
                )
            } else {
                (None, None)
            };
            let rep = if rep_count > 0 {
                Some((rep_sum / rep_count as f64).round().max(0.0) as u32)
            } else {
                None
            };
            // Strict comparison keeps the earliest label on tied counts.
            let mut modal: Option<(&str, usize)> = None;
            for &(label, count) in &label_counts {
                if modal.map(|(_, c)| count > c).unwrap_or(true) {
                    modal = Some((label, count));
                }
            }
            let phase = modal.map(|(label, _)| label.to_string());

            WavePoint {
                index,
                left,
                right,
                rep,
                phase,
            }
        })
        .collect()
}

/// Left/right asymmetry statistics over a wave-point series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AsymmetryStats {
    /// Mean absolute left-right delta in degrees
    pub mean_deg: f64,
    /// 95th percentile delta (nearest rank)
    pub p95_deg: f64,
    /// Maximum delta
    pub max_deg: f64,
    /// Symmetry score in [0, 100]; higher is more symmetric
    pub score: f64,
}

/// Compute asymmetry statistics from wave points with both sides present.
///
/// `None` when no point carries a left/right pair.
pub fn compute_asymmetry(points: &[WavePoint]) -> Option<AsymmetryStats> {
    let mut deltas: Vec<f64> = points
        .iter()
        .filter_map(|p| match (p.left, p.right) {
            (Some(l), Some(r)) => Some((l - r).abs()),
            _ => None,
        })
        .collect();
    if deltas.is_empty() {
        return None;
    }

    let mean = deltas.iter().sum::<f64>() / deltas.len() as f64;
    let max = deltas.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    deltas.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let rank = ((deltas.len() as f64 * 0.95).ceil() as usize).clamp(1, deltas.len());
    let p95 = deltas[rank - 1];

    let score = (100.0 - mean * 2.4 - p95 * 0.8).clamp(0.0, 100.0);
    Some(AsymmetryStats {
        mean_deg: mean,
        p95_deg: p95,
        max_deg: max,
        score,
    })
}

/// Per-rep mean absolute left/right delta, ordered by rep number.
///
/// Feeds the asymmetry-drift fatigue signal.
pub fn rep_asymmetry_series(rows: &[PoseRow], pair: JointPair) -> Vec<f64> {
    use std::collections::BTreeMap;

    let (left_id, right_id) = pair.joints();
    let mut per_rep: BTreeMap<u32, (f64, usize)> = BTreeMap::new();
    for row in rows {
        let rep = match row.rep.filter(|r| r.is_finite() && *r >= 0.0) {
            Some(r) => r.round() as u32,
            None => continue,
        };
        if let (Some(l), Some(r)) = (row.angles.get(left_id), row.angles.get(right_id)) {
            let entry = per_rep.entry(rep).or_insert((0.0, 0));
            entry.0 += (l - r).abs();
            entry.1 += 1;
        }
    }
    per_rep
        .into_values()
        .filter(|(_, count)| *count > 0)
        .map(|(sum, count)| sum / count as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(left: f64, right: f64, rep: Option<f64>, phase: Option<&str>) -> PoseRow {
        PoseRow {
            ts: 0.0,
            angles: JointAngles {
                left_elbow: Some(left),
                right_elbow: Some(right),
                ..Default::default()
            },
            rep,
            phase: phase.map(str::to_string),
        }
    }

    #[test]
    fn test_asymmetry_worked_example() {
        let points = vec![
            WavePoint {
                index: 0,
                left: Some(10.0),
                right: Some(12.0),
                rep: None,
                phase: None,
            },
            WavePoint {
                index: 1,
                left: Some(8.0),
                right: Some(8.0),
                rep: None,
                phase: None,
            },
            WavePoint {
                index: 2,
                left: Some(20.0),
                right: Some(14.0),
                rep: None,
                phase: None,
            },
        ];
        let stats = compute_asymmetry(&points).unwrap();
        assert!((stats.mean_deg - 8.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.max_deg, 6.0);
        assert_eq!(stats.p95_deg, 6.0);
        let expected = 100.0 - (8.0 / 3.0) * 2.4 - 6.0 * 0.8;
        assert!((stats.score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_asymmetry_empty_is_none() {
        assert!(compute_asymmetry(&[]).is_none());
    }

    #[test]
    fn test_selection_is_deterministic() {
        let rows: Vec<PoseRow> = (0..50)
            .map(|i| row(100.0 + i as f64, 102.0 + i as f64, None, None))
            .collect();
        let first = select_best_joint_pair(&rows).unwrap();
        for _ in 0..5 {
            let again = select_best_joint_pair(&rows).unwrap();
            assert_eq!(first.pair, again.pair);
            assert_eq!(first.score, again.score);
        }
        assert_eq!(first.pair, JointPair::Elbow);
        assert_eq!(first.tracked_rows, 50);
    }

    #[test]
    fn test_tie_resolves_to_first_declared_pair() {
        // No pair tracked at all: every score is zero, elbow wins.
        let rows = vec![PoseRow::default(), PoseRow::default()];
        let selection = select_best_joint_pair(&rows).unwrap();
        assert_eq!(selection.pair, JointPair::Elbow);
        assert_eq!(selection.tracked_rows, 0);
    }

    #[test]
    fn test_better_tracked_pair_wins() {
        // Knees tracked on every row, elbows on none.
        let rows: Vec<PoseRow> = (0..20)
            .map(|i| PoseRow {
                ts: i as f64,
                angles: JointAngles {
                    left_knee: Some(150.0 - i as f64),
                    right_knee: Some(150.0 - i as f64),
                    ..Default::default()
                },
                rep: None,
                phase: None,
            })
            .collect();
        assert_eq!(select_best_joint_pair(&rows).unwrap().pair, JointPair::Knee);
    }

    #[test]
    fn test_wave_points_empty_input() {
        assert!(build_wave_points(&[], JointPair::Elbow).is_empty());
    }

    #[test]
    fn test_wave_points_capped_at_eighty() {
        let rows: Vec<PoseRow> = (0..1000)
            .map(|i| row(100.0, 100.0, Some((i / 100) as f64), Some("pull")))
            .collect();
        let points = build_wave_points(&rows, JointPair::Elbow);
        assert!(points.len() <= 80);
        assert!(!points.is_empty());
    }

    #[test]
    fn test_wave_point_bucket_aggregation() {
        // Three rows, one bucket: means, rounded rep, modal phase.
        let rows = vec![
            row(10.0, 12.0, Some(1.0), Some("pull")),
            row(20.0, 22.0, Some(1.0), Some("hang")),
            row(30.0, 32.0, Some(2.0), Some("pull")),
        ];
        let points = build_wave_points(&rows, JointPair::Elbow);
        assert_eq!(points.len(), 3); // bucket size 1 for small inputs

        let rows_repeated: Vec<PoseRow> = std::iter::repeat(rows)
            .take(40)
            .flatten()
            .collect();
        let points = build_wave_points(&rows_repeated, JointPair::Elbow);
        assert_eq!(points.len(), 60); // 120 rows, bucket size 2
        assert_eq!(points[0].left, Some(15.0));
        assert_eq!(points[0].right, Some(17.0));
        assert_eq!(points[0].rep, Some(1));
        assert_eq!(points[0].phase.as_deref(), Some("pull"));
    }

    #[test]
    fn test_modal_phase_first_seen_wins_tie() {
        // 160 alternating rows: bucket size 2, so every bucket holds one
        // "hang" and one "pull". The tie must go to the label seen first.
        let mut rows = Vec::new();
        for _ in 0..80 {
            rows.push(row(10.0, 10.0, None, Some("hang")));
            rows.push(row(10.0, 10.0, None, Some("pull")));
        }
        let points = build_wave_points(&rows, JointPair::Elbow);
        assert_eq!(points.len(), 80);
        for point in &points {
            assert_eq!(point.phase.as_deref(), Some("hang"));
        }
    }

    #[test]
    fn test_modal_phase_majority_beats_earlier_label() {
        // 162 rows in a hang/pull/pull pattern: bucket size 3, so each
        // bucket counts pull twice and hang once.
        let mut rows = Vec::new();
        for _ in 0..54 {
            rows.push(row(10.0, 10.0, None, Some("hang")));
            rows.push(row(10.0, 10.0, None, Some("pull")));
            rows.push(row(10.0, 10.0, None, Some("pull")));
        }
        let points = build_wave_points(&rows, JointPair::Elbow);
        assert_eq!(points.len(), 54);
        for point in &points {
            assert_eq!(point.phase.as_deref(), Some("pull"));
        }
    }

    #[test]
    fn test_rep_asymmetry_series_grouping() {
        let rows = vec![
            row(10.0, 12.0, Some(1.0), None),
            row(10.0, 14.0, Some(1.0), None),
            row(10.0, 10.0, Some(2.0), None),
            row(10.0, 18.0, None, None), // no rep: skipped
        ];
        let series = rep_asymmetry_series(&rows, JointPair::Elbow);
        assert_eq!(series.len(), 2);
        assert!((series[0] - 3.0).abs() < 1e-9);
        assert!((series[1] - 0.0).abs() < 1e-9);
    }
}
