//! Records of individual state changes.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of a single state transition.
///
/// Transitions are immutable values describing a move from one state to
/// another at a specific point in time. For speed-driven motion changes the
/// timestamp is the fix timestamp; otherwise it is the time of ingestion.
///
/// # Example
///
/// ```rust
/// use motion_sense::core::{MotionType, StateTransition};
/// use chrono::Utc;
///
/// let transition = StateTransition::new(MotionType::NotMoving, MotionType::Walking, Utc::now());
/// assert!(transition.is_change());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

impl<S: State> StateTransition<S> {
    pub fn new(from: S, to: S, timestamp: DateTime<Utc>) -> Self {
        Self {
            from,
            to,
            timestamp,
        }
    }

    /// Whether the record describes an actual change of state.
    pub fn is_change(&self) -> bool {
        self.from != self.to
    }
}
