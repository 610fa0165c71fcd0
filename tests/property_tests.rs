//! Property-based tests for the pure evaluators and the engine.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use chrono::Utc;
use motion_sense::classify::{
    classify_speed, HardwareAssistedClassifier, MotionClassifier, PauseTracker,
    PureSpeedClassifier, ShakeDetector,
};
use motion_sense::core::{AccelerationSample, MotionType, SpeedSample, ThresholdConfig};
use motion_sense::engine::{MotionEngine, MotionEvent};
use parking_lot::Mutex;
use proptest::prelude::*;
use std::sync::Arc;

prop_compose! {
    fn ordered_config()(
        minimum_speed in 0.0..5.0f64,
        walking_span in 0.0..5.0f64,
        running_span in 0.0..20.0f64,
        minimum_running_acceleration in 0.0..10.0f64,
    ) -> ThresholdConfig {
        ThresholdConfig {
            minimum_speed,
            maximum_walking_speed: minimum_speed + walking_span,
            maximum_running_speed: minimum_speed + walking_span + running_span,
            minimum_running_acceleration,
        }
    }
}

prop_compose! {
    fn arbitrary_motion_type()(variant in 0..4u8) -> MotionType {
        MotionType::ALL[variant as usize]
    }
}

fn band_contains(motion: MotionType, speed: f64, cfg: &ThresholdConfig) -> bool {
    match motion {
        MotionType::NotMoving => speed < cfg.minimum_speed,
        MotionType::Walking => cfg.minimum_speed <= speed && speed <= cfg.maximum_walking_speed,
        MotionType::Running => {
            cfg.maximum_walking_speed < speed && speed <= cfg.maximum_running_speed
        }
        MotionType::Automotive => speed > cfg.maximum_running_speed,
    }
}

proptest! {
    #[test]
    fn classification_is_deterministic(speed in 0.0..50.0f64, cfg in ordered_config()) {
        let first = PureSpeedClassifier.classify(speed, &cfg, None);
        let second = PureSpeedClassifier.classify(speed, &cfg, None);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn returned_band_contains_speed(speed in 0.0..50.0f64, cfg in ordered_config()) {
        let motion = classify_speed(speed, &cfg);
        prop_assert!(band_contains(motion, speed, &cfg));
    }

    #[test]
    fn exactly_one_band_contains_speed(speed in 0.0..50.0f64, cfg in ordered_config()) {
        let matching = MotionType::ALL
            .iter()
            .filter(|m| band_contains(**m, speed, &cfg))
            .count();
        prop_assert_eq!(matching, 1);
    }

    #[test]
    fn faster_never_classifies_lower(
        a in 0.0..50.0f64,
        b in 0.0..50.0f64,
        cfg in ordered_config(),
    ) {
        let (slow, fast) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            classify_speed(slow, &cfg).band_index() <= classify_speed(fast, &cfg).band_index()
        );
    }

    #[test]
    fn hint_always_wins_when_present(
        speed in 0.0..50.0f64,
        cfg in ordered_config(),
        hint in arbitrary_motion_type(),
    ) {
        prop_assert_eq!(HardwareAssistedClassifier.classify(speed, &cfg, Some(hint)), hint);
        prop_assert_eq!(
            HardwareAssistedClassifier.classify(speed, &cfg, None),
            classify_speed(speed, &cfg)
        );
    }

    #[test]
    fn shaking_is_strictly_above_threshold(
        x in -10.0..10.0f64,
        y in -10.0..10.0f64,
        z in -10.0..10.0f64,
        threshold in 0.0..10.0f64,
    ) {
        let sample = AccelerationSample::new(x, y, z);
        let cfg = ThresholdConfig { minimum_running_acceleration: threshold, ..Default::default() };
        prop_assert_eq!(ShakeDetector::evaluate(&sample, &cfg), sample.magnitude() > threshold);
    }

    #[test]
    fn pause_edges_alternate(validity in prop::collection::vec(any::<bool>(), 0..30)) {
        let now = Utc::now();
        let mut paused = false;
        let mut edges = Vec::new();

        for valid in &validity {
            let fix = if *valid { SpeedSample::valid(1.0, now) } else { SpeedSample::invalid(now) };
            if let Some(next) = PauseTracker::edge(&fix, paused) {
                edges.push(next);
                paused = next;
            }
        }

        // Edges start with a pause and strictly alternate.
        for (i, edge) in edges.iter().enumerate() {
            prop_assert_eq!(*edge, i % 2 == 0);
        }
        prop_assert_eq!(paused, validity.last().map(|v| !v).unwrap_or(false));
    }

    #[test]
    fn engine_never_repeats_motion_type_notifications(
        speeds in prop::collection::vec(0.0..20.0f64, 1..40),
        cfg in ordered_config(),
    ) {
        let engine = MotionEngine::new();
        engine.set_thresholds(cfg).unwrap();
        let changes = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&changes);
        engine.subscribe(move |event: &MotionEvent| {
            if let MotionEvent::MotionTypeChanged(t) = event {
                sink.lock().push(*t);
            }
        });
        engine.start();

        for speed in &speeds {
            engine.ingest(SpeedSample::valid(*speed, Utc::now()).into());
        }

        let changes = changes.lock();
        let mut current = MotionType::NotMoving;
        for t in changes.iter() {
            prop_assert_eq!(t.from, current);
            prop_assert_ne!(t.from, t.to);
            current = t.to;
        }
        prop_assert_eq!(current, engine.motion_type());
        prop_assert_eq!(
            engine.motion_type(),
            classify_speed(*speeds.last().unwrap(), &cfg)
        );
    }
}
