//! Shake detection over acceleration magnitude.

use crate::core::{AccelerationSample, ThresholdConfig};

/// Stateless shake detector. Each sample is judged on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShakeDetector;

impl ShakeDetector {
    /// True iff the magnitude is strictly above `minimum_running_acceleration`.
    pub fn evaluate(sample: &AccelerationSample, config: &ThresholdConfig) -> bool {
        sample.magnitude() > config.minimum_running_acceleration
    }
}
