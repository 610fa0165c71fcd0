//! Observer registration and change notifications.

use crate::core::{AccelerationSample, MotionType, SpeedSample, StateTransition};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Change notification emitted by the engine.
///
/// Observers run after the engine's state lock is released. Events produced
/// by one accepted sample arrive in order: pause edge, then location, then
/// motion type. Events from samples ingested concurrently by different
/// sources may interleave, and a later state change can be observed before
/// an earlier one. Use [`MotionEngine::snapshot`](super::MotionEngine::snapshot)
/// for the current state rather than replaying events.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum MotionEvent {
    /// Motion type moved to a different band
    MotionTypeChanged(StateTransition<MotionType>),
    /// A valid location fix was accepted
    LocationChanged(SpeedSample),
    /// An acceleration sample was accepted
    AccelerationChanged {
        acceleration: AccelerationSample,
        is_shaking: bool,
    },
    /// Location updates paused (`true`) or resumed (`false`)
    LocationPaused(bool),
}

impl MotionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MotionTypeChanged(_) => "motion_type_changed",
            Self::LocationChanged(_) => "location_changed",
            Self::AccelerationChanged { .. } => "acceleration_changed",
            Self::LocationPaused(_) => "location_paused",
        }
    }
}

/// Opaque handle returned by `subscribe`, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Callback invoked for every emitted event.
pub type Observer = Arc<dyn Fn(&MotionEvent) + Send + Sync>;

/// Zero-to-many observers. Notification iterates over a snapshot, so a
/// callback may subscribe or unsubscribe without deadlocking.
#[derive(Default)]
pub(crate) struct ObserverRegistry {
    observers: RwLock<Vec<(SubscriptionId, Observer)>>,
}

impl ObserverRegistry {
    pub fn subscribe(&self, observer: Observer) -> SubscriptionId {
        let id = SubscriptionId::new();
        self.observers.write().push((id, observer));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.write();
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    pub fn len(&self) -> usize {
        self.observers.read().len()
    }

    pub fn notify(&self, events: &[MotionEvent]) {
        if events.is_empty() {
            return;
        }

        let snapshot: Vec<Observer> = self
            .observers
            .read()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();

        for event in events {
            for observer in &snapshot {
                observer(event);
            }
        }
    }
}
