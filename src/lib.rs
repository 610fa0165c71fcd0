//! Motion Sense: coarse activity awareness from speed and acceleration
//!
//! The crate classifies a device's motion state (not moving, walking,
//! running, automotive), detects shaking and tracks whether location updates
//! have paused, from a stream of location-derived speed samples and
//! accelerometer samples. Sensor acquisition stays outside: sources push
//! samples in, observers get change notifications out.
//!
//! # Core Concepts
//!
//! - **Pure core**: speed bands, the shake threshold and pause edges are pure
//!   functions of their inputs and a `ThresholdConfig` (`core`, `classify`)
//! - **Engine**: `MotionEngine` owns the derived state, serializes mutation
//!   and emits `MotionEvent`s only when a tracked value changes (`engine`)
//! - **Strategies**: pure-speed or hardware-assisted classification, chosen
//!   once per start from the configuration and source capability
//!
//! # Example
//!
//! ```rust
//! use motion_sense::builder::EngineBuilder;
//! use motion_sense::core::{AccelerationSample, MotionType, SpeedSample};
//! use motion_sense::engine::MotionEvent;
//! use chrono::Utc;
//!
//! let engine = EngineBuilder::new()
//!     .minimum_speed(0.5)
//!     .maximum_walking_speed(2.0)
//!     .maximum_running_speed(5.0)
//!     .minimum_running_acceleration(2.5)
//!     .build()
//!     .unwrap();
//!
//! engine.subscribe(|event: &MotionEvent| {
//!     if let MotionEvent::MotionTypeChanged(t) = event {
//!         println!("{} -> {}", t.from, t.to);
//!     }
//! });
//!
//! engine.start();
//! engine.ingest(SpeedSample::valid(1.2, Utc::now()).into());
//! engine.ingest(AccelerationSample::new(0.0, 3.0, 0.0).into());
//!
//! assert_eq!(engine.motion_type(), MotionType::Walking);
//! assert!(engine.is_shaking());
//! ```

pub mod builder;
pub mod classify;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use builder::{BuildError, EngineBuilder};
pub use self::core::{
    AccelerationSample, MotionType, Sample, SpeedSample, State, ThresholdConfig, ThresholdError,
    ThresholdViolation,
};
pub use engine::{EngineState, MotionEngine, MotionEvent, SampleSink, SampleSource, SubscriptionId};
