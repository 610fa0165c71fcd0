//! Speed-to-motion-type classification strategies.

use crate::core::{MotionType, ThresholdConfig};

/// Map a speed onto its band. First match wins, in increasing band order:
///
/// - `speed < minimum_speed` → `NotMoving`
/// - `speed <= maximum_walking_speed` → `Walking`
/// - `speed <= maximum_running_speed` → `Running`
/// - otherwise → `Automotive`
///
/// With misordered bands the same evaluation order still applies, so the
/// result is deterministic but may skip bands.
///
/// ```rust
/// use motion_sense::classify::classify_speed;
/// use motion_sense::core::{MotionType, ThresholdConfig};
///
/// let cfg = ThresholdConfig::default();
/// assert_eq!(classify_speed(0.1, &cfg), MotionType::NotMoving);
/// assert_eq!(classify_speed(1.0, &cfg), MotionType::Walking);
/// ```
pub fn classify_speed(speed: f64, config: &ThresholdConfig) -> MotionType {
    if speed < config.minimum_speed {
        MotionType::NotMoving
    } else if speed <= config.maximum_walking_speed {
        MotionType::Walking
    } else if speed <= config.maximum_running_speed {
        MotionType::Running
    } else {
        MotionType::Automotive
    }
}

/// Strategy deciding the motion type from the latest speed and, where
/// supported, a hint from a hardware activity classifier.
///
/// Implementations must be pure: the same inputs always give the same type.
pub trait MotionClassifier: Send + Sync {
    fn classify(
        &self,
        speed: f64,
        config: &ThresholdConfig,
        hardware_hint: Option<MotionType>,
    ) -> MotionType;

    /// Name for logging.
    fn name(&self) -> &'static str;

    /// Whether hardware hints are consulted at all.
    fn accepts_hints(&self) -> bool;
}

/// Classifies from speed alone; hints are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct PureSpeedClassifier;

impl MotionClassifier for PureSpeedClassifier {
    fn classify(
        &self,
        speed: f64,
        config: &ThresholdConfig,
        _hardware_hint: Option<MotionType>,
    ) -> MotionType {
        classify_speed(speed, config)
    }

    fn name(&self) -> &'static str {
        "pure_speed"
    }

    fn accepts_hints(&self) -> bool {
        false
    }
}

/// Prefers the hardware hint, falling back to speed bands until one arrives.
#[derive(Debug, Clone, Copy, Default)]
pub struct HardwareAssistedClassifier;

impl MotionClassifier for HardwareAssistedClassifier {
    fn classify(
        &self,
        speed: f64,
        config: &ThresholdConfig,
        hardware_hint: Option<MotionType>,
    ) -> MotionType {
        hardware_hint.unwrap_or_else(|| classify_speed(speed, config))
    }

    fn name(&self) -> &'static str {
        "hardware_assisted"
    }

    fn accepts_hints(&self) -> bool {
        true
    }
}

/// The classifier strategy chosen for one run of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassifierStrategy {
    #[default]
    PureSpeed,
    HardwareAssisted,
}

impl ClassifierStrategy {
    /// Hardware assistance is used only when requested and present.
    pub fn select(use_hardware_assist: bool, hardware_available: bool) -> Self {
        if use_hardware_assist && hardware_available {
            Self::HardwareAssisted
        } else {
            Self::PureSpeed
        }
    }

    pub fn classifier(&self) -> &'static dyn MotionClassifier {
        match self {
            Self::PureSpeed => &PureSpeedClassifier,
            Self::HardwareAssisted => &HardwareAssistedClassifier,
        }
    }
}
