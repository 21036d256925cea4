//! Integration tests for the post-session analytics pipeline.
//!
//! Runs a live tracking session, records its outputs as the analytics
//! inputs, and verifies the full pipeline from joint-pair selection through
//! coaching actions.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use repsense::analysis::{
    analyze_session, AnalyticsError, CompletedRep, DailyHeartRate, PoseRow, SessionInputs,
};
use repsense::engine::types::{JointAngles, JointPair, PoseFrame};
use repsense::models::ExerciseKind;
use repsense::session::TrackingSession;

fn session_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
}

/// Run a pull-up session where asymmetry grows and reps slow over time,
/// returning the recorded rows and completed reps.
fn run_degrading_session() -> (Vec<PoseRow>, Vec<CompletedRep>) {
    let mut session = TrackingSession::new(ExerciseKind::PullUp);
    let session_start = Utc.timestamp_opt(1_718_000_000, 0).unwrap();

    let mut rows = Vec::new();
    let mut reps = Vec::new();

    // Nine reps; each later rep is slower and more lopsided.
    for r in 0..9u32 {
        let period = 2.4 + r as f64 * 0.2;
        let spread = r as f64 * 0.8;
        let t0 = r as f64 * 4.0;
        let frames = (period * 30.0) as usize;
        let mut rep_start_ts = None;

        for i in 0..=frames {
            let t = t0 + i as f64 / 30.0;
            let phase = (i as f64 / frames as f64) * 2.0 * std::f64::consts::PI;
            let center = 120.0 + 50.0 * phase.cos();
            let angles = JointAngles {
                left_elbow: Some(center - spread / 2.0),
                right_elbow: Some(center + spread / 2.0),
                ..Default::default()
            };
            let out = session.process_frame(&PoseFrame {
                timestamp: t,
                angles,
                ..Default::default()
            });

            rows.push(PoseRow {
                ts: t,
                angles,
                rep: out.active_rep.map(f64::from),
                phase: Some(out.phase_label.to_string()),
            });

            if out.active_rep.is_some() && rep_start_ts.is_none() {
                rep_start_ts = Some(t);
            }
            if let Some(summary) = out.completed {
                let start_s = rep_start_ts.take().unwrap_or(t0);
                reps.push(CompletedRep {
                    rep_index: summary.rep_index,
                    fqi: summary.fqi,
                    start_ts: session_start + Duration::milliseconds((start_s * 1000.0) as i64),
                    end_ts: session_start + Duration::milliseconds((t * 1000.0) as i64),
                    faults_detected: summary.fault_ids,
                });
            }
        }
    }

    (rows, reps)
}

#[test]
fn test_full_pipeline_on_degrading_session() {
    tracing_subscriber::fmt().with_test_writer().try_init().ok();

    let (rows, reps) = run_degrading_session();
    assert!(reps.len() >= 6, "expected most reps to count, got {}", reps.len());

    let inputs = SessionInputs {
        reps,
        rows,
        session_day: session_day(),
        heart_rate: vec![
            DailyHeartRate {
                date: session_day() - Duration::days(3),
                mean_bpm: 58.0,
            },
            DailyHeartRate {
                date: session_day() - Duration::days(1),
                mean_bpm: 60.0,
            },
            DailyHeartRate {
                date: session_day(),
                mean_bpm: 71.0,
            },
        ],
        trend_sessions: 4,
        tracking_confidence: 0.9,
    };

    let result = analyze_session(&inputs).unwrap();

    // The elbows are the only tracked pair.
    assert_eq!(result.selected_pair, Some(JointPair::Elbow));
    assert!(!result.wave_points.is_empty());
    assert!(result.wave_points.len() <= 80);

    // Growing spread shows up as asymmetry and asymmetry drift.
    let asym = result.asymmetry.unwrap();
    assert!(asym.mean_deg > 0.0);
    assert!(asym.score < 100.0);
    assert!(result.signals.asymmetry_drift_deg.unwrap() > 0.0);

    // Slowing reps show up as tempo drift.
    assert!(result.signals.tempo_drift_pct.unwrap() > 0.0);

    // Heart rate sits above the trailing baseline.
    assert!((result.signals.heart_rate_baseline_bpm.unwrap() - 59.0).abs() < 1e-9);
    assert!((result.signals.heart_rate_strain_bpm.unwrap() - 12.0).abs() < 1e-9);

    assert!(result.fatigue_score.is_some());
    assert!(result.fatigue_level.is_some());
    assert!(!result.coach_actions.is_empty());
    assert!(result.coach_actions.len() <= 3);

    // The full result serializes for storage and survives a round trip.
    let json = serde_json::to_string(&result).unwrap();
    let restored: repsense::analysis::SessionAnalytics = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.selected_pair, result.selected_pair);
    assert_eq!(restored.fatigue_score, result.fatigue_score);
    assert_eq!(restored.coach_actions.len(), result.coach_actions.len());
}

#[test]
fn test_pipeline_rejects_out_of_order_reps() {
    let now = Utc.timestamp_opt(1_718_000_000, 0).unwrap();
    let rep = |index| CompletedRep {
        rep_index: index,
        fqi: Some(90.0),
        start_ts: now,
        end_ts: now + Duration::seconds(2),
        faults_detected: vec![],
    };
    let inputs = SessionInputs {
        reps: vec![rep(1), rep(3), rep(2)],
        rows: vec![],
        session_day: session_day(),
        heart_rate: vec![],
        trend_sessions: 0,
        tracking_confidence: 0.9,
    };
    assert!(matches!(
        analyze_session(&inputs),
        Err(AnalyticsError::InvalidInput(_))
    ));
}

#[test]
fn test_pipeline_on_empty_session_yields_nulls_not_errors() {
    let inputs = SessionInputs {
        reps: vec![],
        rows: vec![],
        session_day: session_day(),
        heart_rate: vec![],
        trend_sessions: 0,
        tracking_confidence: 0.5,
    };
    let result = analyze_session(&inputs).unwrap();
    assert!(result.fatigue_score.is_none());
    assert!(result.fatigue_level.is_none());
    assert!(result.asymmetry.is_none());
    assert!(result.wave_points.is_empty());
}
