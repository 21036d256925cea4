//! Unit tests for shadow pose-provider selection.

use repsense::shadow::{
    tracking_quality, PoseProvider, ShadowObservation, ShadowSelector, ACTIVE_REP_STICKY_WINDOW_SEC,
    MAX_SKEW_SEC,
};

fn obs(primary_ts: f64, mediapipe_ts: Option<f64>) -> ShadowObservation {
    ShadowObservation {
        preferred: Some(PoseProvider::MediaPipe),
        primary_ts,
        mediapipe_ts,
        mediapipe_angles: None,
    }
}

/// Skew beyond the limit forces the proxy; skew within it does not. The
/// limit applies in both directions.
#[test]
fn test_skew_limit_both_directions() {
    let mut selector = ShadowSelector::new();
    assert!(MAX_SKEW_SEC < 0.45);
    assert_eq!(
        selector.select(&obs(10.0, Some(10.3)), false),
        PoseProvider::MediaPipe
    );
    assert_eq!(
        selector.select(&obs(10.0, Some(10.45)), false),
        PoseProvider::Proxy
    );
    assert_eq!(
        selector.select(&obs(10.0, Some(9.55)), false),
        PoseProvider::Proxy
    );
}

/// Outside a rep the selection follows each frame with no hysteresis.
#[test]
fn test_no_hysteresis_outside_rep() {
    let mut selector = ShadowSelector::new();
    assert_eq!(selector.select(&obs(1.0, None), false), PoseProvider::Proxy);
    assert_eq!(
        selector.select(&obs(1.1, Some(1.1)), false),
        PoseProvider::MediaPipe
    );
    assert_eq!(selector.select(&obs(1.2, None), false), PoseProvider::Proxy);
}

/// Inside a rep a proxy anchor holds through the full sticky window even
/// when every subsequent frame is compliant.
#[test]
fn test_sticky_window_prevents_flicker() {
    let mut selector = ShadowSelector::new();
    assert_eq!(selector.select(&obs(5.0, None), true), PoseProvider::Proxy);

    let mut ts = 5.0;
    while ts < 5.0 + ACTIVE_REP_STICKY_WINDOW_SEC - 0.02 {
        ts += 0.033;
        if ts >= 5.0 + ACTIVE_REP_STICKY_WINDOW_SEC {
            break;
        }
        assert_eq!(
            selector.select(&obs(ts, Some(ts)), true),
            PoseProvider::Proxy,
            "flipped early at {ts}"
        );
    }

    let after = 5.0 + ACTIVE_REP_STICKY_WINDOW_SEC + 0.01;
    assert_eq!(
        selector.select(&obs(after, Some(after)), true),
        PoseProvider::MediaPipe
    );
}

/// A mid-rep hard override defeats a sticky MediaPipe anchor immediately.
#[test]
fn test_hard_override_beats_sticky_anchor() {
    let mut selector = ShadowSelector::new();
    assert_eq!(
        selector.select(&obs(2.0, Some(2.0)), true),
        PoseProvider::MediaPipe
    );
    assert_eq!(
        selector.select(&obs(2.05, Some(f64::NAN)), true),
        PoseProvider::Proxy
    );
}

/// Tracking quality halves at 30 degrees of disagreement and saturates.
#[test]
fn test_tracking_quality_disagreement_floor() {
    assert_eq!(tracking_quality(1.0, 0.0), 1.0);
    assert!((tracking_quality(0.8, 15.0) - 0.6).abs() < 1e-9);
    assert!((tracking_quality(1.0, 30.0) - 0.5).abs() < 1e-9);
    assert!((tracking_quality(1.0, 300.0) - 0.5).abs() < 1e-9);
}
