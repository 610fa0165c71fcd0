//! Discrete state values tracked by the engine.
//!
//! Both the motion classification and the engine lifecycle are small,
//! closed enumerations. They share the `State` trait so transitions can be
//! recorded and logged uniformly.

use serde::{de::DeserializeOwned, Serialize};
use std::fmt::{self, Debug};

/// Trait for discrete state values.
///
/// All methods are pure. Implementors are plain `Copy` values so snapshots
/// can be handed out without holding any lock.
///
/// # Example
///
/// ```rust
/// use motion_sense::core::{MotionType, State};
///
/// assert_eq!(MotionType::Walking.name(), "walking");
/// ```
pub trait State: Copy + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync {
    /// Stable name for display and structured logging.
    fn name(&self) -> &'static str;
}

/// Discrete motion classification of the device.
///
/// Variants are declared in order of increasing speed band.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionType {
    #[default]
    NotMoving,
    Walking,
    Running,
    Automotive,
}

impl MotionType {
    /// All variants in band order.
    pub const ALL: [MotionType; 4] = [
        MotionType::NotMoving,
        MotionType::Walking,
        MotionType::Running,
        MotionType::Automotive,
    ];

    /// Position of this type's speed band, 0 (slowest) to 3 (fastest).
    pub fn band_index(&self) -> u8 {
        match self {
            Self::NotMoving => 0,
            Self::Walking => 1,
            Self::Running => 2,
            Self::Automotive => 3,
        }
    }

    /// Whether the device is considered to be moving at all.
    pub fn is_moving(&self) -> bool {
        !matches!(self, Self::NotMoving)
    }
}

impl State for MotionType {
    fn name(&self) -> &'static str {
        match self {
            Self::NotMoving => "not_moving",
            Self::Walking => "walking",
            Self::Running => "running",
            Self::Automotive => "automotive",
        }
    }
}

impl fmt::Display for MotionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Engine lifecycle. `Idle --start--> Running --stop--> Idle`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    #[default]
    Idle,
    Running,
}

impl State for Lifecycle {
    fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
