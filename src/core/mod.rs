//! Core motion types, samples and configuration.
//!
//! Everything in this module is plain data plus pure functions:
//! - `MotionType` / `Lifecycle` state values via the `State` trait
//! - `StateTransition` records
//! - Raw samples delivered by the external sources
//! - `ThresholdConfig` and its validation
//!
//! Nothing here holds locks or performs I/O.

mod error;
mod sample;
mod state;
mod thresholds;
mod transition;

pub(crate) use thresholds::check_field;

pub use error::{SampleError, ThresholdError, ThresholdViolation};
pub use sample::{AccelerationSample, Sample, SampleKind, SpeedSample};
pub use state::{Lifecycle, MotionType, State};
pub use thresholds::ThresholdConfig;
pub use transition::StateTransition;
