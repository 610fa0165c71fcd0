//! Raw inputs delivered by the external sources.

use super::error::SampleError;
use super::state::MotionType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One location fix, reduced to the fields the engine needs.
///
/// `speed` is `None` when the platform reported the fix as invalid.
/// `location_paused` is set when the platform signalled that location
/// services paused delivery; such a fix is treated as invalid as well.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeedSample {
    /// Speed in metres per second
    pub speed: Option<f64>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub location_paused: bool,
}

impl SpeedSample {
    /// A fix carrying a usable speed.
    pub fn valid(speed: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            speed: Some(speed),
            timestamp,
            location_paused: false,
        }
    }

    /// A fix the platform marked as invalid.
    pub fn invalid(timestamp: DateTime<Utc>) -> Self {
        Self {
            speed: None,
            timestamp,
            location_paused: false,
        }
    }

    /// The platform's "location updates paused" condition.
    pub fn paused(timestamp: DateTime<Utc>) -> Self {
        Self {
            speed: None,
            timestamp,
            location_paused: true,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.speed.is_some() && !self.location_paused
    }

    /// Reject malformed speeds. Invalid fixes are well-formed.
    pub fn validate(&self) -> Result<(), SampleError> {
        match self.speed {
            Some(s) if !s.is_finite() => Err(SampleError::NonFiniteSpeed(s)),
            Some(s) if s < 0.0 => Err(SampleError::NegativeSpeed(s)),
            _ => Ok(()),
        }
    }
}

/// Raw acceleration reading in g.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AccelerationSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl AccelerationSample {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean norm of the three components.
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn validate(&self) -> Result<(), SampleError> {
        if self.x.is_finite() && self.y.is_finite() && self.z.is_finite() {
            Ok(())
        } else {
            Err(SampleError::NonFiniteAcceleration {
                x: self.x,
                y: self.y,
                z: self.z,
            })
        }
    }
}

/// Which source produced a sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleKind {
    Speed,
    Acceleration,
    HardwareHint,
}

/// A tagged sample as handed to `MotionEngine::ingest`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Sample {
    Speed(SpeedSample),
    Acceleration(AccelerationSample),
    HardwareHint(MotionType),
}

impl Sample {
    pub fn kind(&self) -> SampleKind {
        match self {
            Self::Speed(_) => SampleKind::Speed,
            Self::Acceleration(_) => SampleKind::Acceleration,
            Self::HardwareHint(_) => SampleKind::HardwareHint,
        }
    }

    pub fn validate(&self) -> Result<(), SampleError> {
        match self {
            Self::Speed(s) => s.validate(),
            Self::Acceleration(a) => a.validate(),
            Self::HardwareHint(_) => Ok(()),
        }
    }
}

impl From<SpeedSample> for Sample {
    fn from(sample: SpeedSample) -> Self {
        Self::Speed(sample)
    }
}

impl From<AccelerationSample> for Sample {
    fn from(sample: AccelerationSample) -> Self {
        Self::Acceleration(sample)
    }
}

impl From<MotionType> for Sample {
    fn from(hint: MotionType) -> Self {
        Self::HardwareHint(hint)
    }
}
