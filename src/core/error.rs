//! Error types for samples and threshold configuration.

use stillwater::NonEmptyVec;
use thiserror::Error;

/// Reasons a raw sample is rejected before it reaches the engine state.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SampleError {
    #[error("Speed must be non-negative (got {0})")]
    NegativeSpeed(f64),

    #[error("Speed must be finite (got {0})")]
    NonFiniteSpeed(f64),

    #[error("Acceleration components must be finite (got x={x}, y={y}, z={z})")]
    NonFiniteAcceleration { x: f64, y: f64, z: f64 },
}

/// A single rule broken by a threshold configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ThresholdViolation {
    /// A single threshold is negative, NaN or infinite
    #[error("Threshold '{field}' must be a finite non-negative number (got {value})")]
    InvalidValue { field: &'static str, value: f64 },

    /// Speed bands are not ordered `minimum <= max walking <= max running`
    #[error(
        "Speed bands are misordered: minimum_speed={minimum_speed}, \
         maximum_walking_speed={maximum_walking_speed}, \
         maximum_running_speed={maximum_running_speed}"
    )]
    Misordered {
        minimum_speed: f64,
        maximum_walking_speed: f64,
        maximum_running_speed: f64,
    },
}

/// Errors raised when validating or loading a threshold configuration.
#[derive(Debug, Error)]
pub enum ThresholdError {
    /// Every rule the configuration breaks, not just the first
    #[error("Invalid thresholds: {}", describe(.0))]
    Invalid(NonEmptyVec<ThresholdViolation>),

    /// Configuration document could not be parsed
    #[error("Failed to parse threshold configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ThresholdError {
    /// Violations carried by this error. Empty for parse failures.
    pub fn violations(&self) -> Vec<&ThresholdViolation> {
        match self {
            Self::Invalid(violations) => violations.iter().collect(),
            Self::Parse(_) => Vec::new(),
        }
    }
}

fn describe(violations: &NonEmptyVec<ThresholdViolation>) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
