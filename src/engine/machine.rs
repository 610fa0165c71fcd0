//! The motion engine: owns the derived state, runs the pure evaluators on
//! every accepted sample, and notifies observers of changes.

use super::observer::{MotionEvent, ObserverRegistry, SubscriptionId};
use super::source::{SampleSink, SampleSource, SourceRole};
use crate::builder::EngineBuilder;
use crate::classify::{ClassifierStrategy, PauseTracker, ShakeDetector};
use crate::core::{
    check_field, AccelerationSample, Lifecycle, MotionType, Sample, SpeedSample, State,
    StateTransition, ThresholdConfig, ThresholdError,
};
use chrono::Utc;
use parking_lot::{Mutex, ReentrantMutex};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// Snapshot of everything the engine derives from its inputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineState {
    pub motion_type: MotionType,
    pub current_speed: f64,
    pub acceleration: AccelerationSample,
    pub is_shaking: bool,
    pub is_paused: bool,
}

struct Inner {
    lifecycle: Lifecycle,
    state: EngineState,
    config: ThresholdConfig,
    use_hardware_assist: bool,
    strategy: ClassifierStrategy,
    last_hint: Option<MotionType>,
    // Bumped by every start and stop.
    generation: u64,
}

impl Inner {
    fn apply_speed(&mut self, sample: SpeedSample) -> Vec<MotionEvent> {
        let mut events = Vec::new();

        if let Some(paused) = PauseTracker::edge(&sample, self.state.is_paused) {
            self.state.is_paused = paused;
            debug!(paused, "location_pause_changed");
            events.push(MotionEvent::LocationPaused(paused));
        }

        let Some(speed) = sample.speed.filter(|_| sample.is_valid()) else {
            return events;
        };

        self.state.current_speed = speed;
        events.push(MotionEvent::LocationChanged(sample));

        let next = self
            .strategy
            .classifier()
            .classify(speed, &self.config, self.last_hint);
        if let Some(transition) = self.transition_to(next, sample.timestamp) {
            events.push(MotionEvent::MotionTypeChanged(transition));
        }
        events
    }

    fn apply_acceleration(&mut self, sample: AccelerationSample) -> Vec<MotionEvent> {
        let is_shaking = ShakeDetector::evaluate(&sample, &self.config);
        if is_shaking != self.state.is_shaking {
            debug!(is_shaking, magnitude = sample.magnitude(), "shaking_changed");
        }

        self.state.acceleration = sample;
        self.state.is_shaking = is_shaking;
        vec![MotionEvent::AccelerationChanged {
            acceleration: sample,
            is_shaking,
        }]
    }

    fn apply_hint(&mut self, hint: MotionType) -> Option<Vec<MotionEvent>> {
        let classifier = self.strategy.classifier();
        if !classifier.accepts_hints() {
            trace!(hint = %hint, "hardware_hint_ignored");
            return None;
        }

        self.last_hint = Some(hint);
        let next = classifier.classify(self.state.current_speed, &self.config, self.last_hint);
        Some(
            self.transition_to(next, Utc::now())
                .map(MotionEvent::MotionTypeChanged)
                .into_iter()
                .collect(),
        )
    }

    fn transition_to(
        &mut self,
        next: MotionType,
        timestamp: chrono::DateTime<Utc>,
    ) -> Option<StateTransition<MotionType>> {
        let transition = StateTransition::new(self.state.motion_type, next, timestamp);
        if !transition.is_change() {
            return None;
        }

        debug!(
            from = transition.from.name(),
            to = transition.to.name(),
            classifier = self.strategy.classifier().name(),
            "motion_type_changed"
        );
        self.state.motion_type = next;
        Some(transition)
    }
}

pub(crate) struct Shared {
    inner: Mutex<Inner>,
    observers: ObserverRegistry,
    sources: Vec<(SourceRole, Arc<dyn SampleSource>)>,
    // Serializes start/stop across threads. Reentrant because a source may
    // deliver from inside `subscribe`, and observers may then call start or
    // stop on the same thread. Never borrowed across a source call.
    // Lock order: subscriptions, then inner.
    subscriptions: ReentrantMutex<RefCell<Vec<Arc<dyn SampleSource>>>>,
}

impl Shared {
    pub(crate) fn ingest(&self, sample: Sample) -> bool {
        if let Err(e) = sample.validate() {
            trace!(kind = ?sample.kind(), error = %e, "sample_discarded_malformed");
            return false;
        }

        let events = {
            let mut inner = self.inner.lock();
            if inner.lifecycle != Lifecycle::Running {
                trace!(kind = ?sample.kind(), "sample_discarded_idle");
                return false;
            }

            match sample {
                Sample::Speed(s) => inner.apply_speed(s),
                Sample::Acceleration(a) => inner.apply_acceleration(a),
                Sample::HardwareHint(h) => match inner.apply_hint(h) {
                    Some(events) => events,
                    None => return false,
                },
            }
        };

        self.observers.notify(&events);
        true
    }

    fn generation(&self) -> (u64, Lifecycle) {
        let inner = self.inner.lock();
        (inner.generation, inner.lifecycle)
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        for source in self.subscriptions.get_mut().get_mut().drain(..) {
            source.unsubscribe();
        }
    }
}

/// Motion-state engine.
///
/// A cheaply cloneable handle; clones share the same state. Each
/// `MotionEngine::new` / builder call creates an independent engine.
///
/// # Example
///
/// ```rust
/// use motion_sense::core::{MotionType, SpeedSample};
/// use motion_sense::engine::MotionEngine;
/// use chrono::Utc;
///
/// let engine = MotionEngine::new();
/// engine.start();
/// engine.ingest(SpeedSample::valid(1.2, Utc::now()).into());
/// assert_eq!(engine.motion_type(), MotionType::Walking);
/// ```
#[derive(Clone)]
pub struct MotionEngine {
    shared: Arc<Shared>,
}

impl MotionEngine {
    /// Engine with default thresholds and no attached sources.
    pub fn new() -> Self {
        Self::from_parts(ThresholdConfig::default(), false, Vec::new())
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub(crate) fn from_parts(
        config: ThresholdConfig,
        use_hardware_assist: bool,
        sources: Vec<(SourceRole, Arc<dyn SampleSource>)>,
    ) -> Self {
        let inner = Inner {
            lifecycle: Lifecycle::Idle,
            state: EngineState::default(),
            config,
            use_hardware_assist,
            strategy: ClassifierStrategy::default(),
            last_hint: None,
            generation: 0,
        };

        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(inner),
                observers: ObserverRegistry::default(),
                sources,
                subscriptions: ReentrantMutex::new(RefCell::new(Vec::new())),
            }),
        }
    }

    /// Select the classifier strategy and subscribe to the sources.
    /// Calling it while already running does nothing.
    ///
    /// Sources are subscribed without holding the state lock, so a source
    /// may deliver from inside `subscribe` and observers may call `stop` or
    /// `start` in response.
    pub fn start(&self) {
        let subscriptions = self.shared.subscriptions.lock();

        let (strategy, generation) = {
            let mut inner = self.shared.inner.lock();
            if inner.lifecycle == Lifecycle::Running {
                debug!("motion_engine_already_running");
                return;
            }

            let hardware_available = self
                .shared
                .sources
                .iter()
                .any(|(role, s)| *role == SourceRole::HardwareClassifier && s.is_available());
            inner.strategy =
                ClassifierStrategy::select(inner.use_hardware_assist, hardware_available);
            inner.last_hint = None;
            inner.lifecycle = Lifecycle::Running;
            inner.generation += 1;
            (inner.strategy, inner.generation)
        };

        for (role, source) in &self.shared.sources {
            if *role == SourceRole::HardwareClassifier
                && strategy != ClassifierStrategy::HardwareAssisted
            {
                continue;
            }
            if !source.is_available() {
                warn!(role = %role, "source_unavailable");
                continue;
            }

            source.subscribe(self.sink(*role));

            // A stop (and possibly a restart) ran during `subscribe`.
            let (current, lifecycle) = self.shared.generation();
            if current != generation {
                if lifecycle == Lifecycle::Idle {
                    source.unsubscribe();
                }
                debug!(role = %role, "motion_engine_start_superseded");
                return;
            }
            subscriptions.borrow_mut().push(Arc::clone(source));
        }

        info!(
            classifier = strategy.classifier().name(),
            sources = subscriptions.borrow().len(),
            "motion_engine_started"
        );
    }

    /// Unsubscribe from every source. In-flight samples finish; later ones
    /// are discarded. Calling it while idle does nothing.
    pub fn stop(&self) {
        let subscriptions = self.shared.subscriptions.lock();

        {
            let mut inner = self.shared.inner.lock();
            if inner.lifecycle == Lifecycle::Idle {
                debug!("motion_engine_already_idle");
                return;
            }
            inner.lifecycle = Lifecycle::Idle;
            inner.generation += 1;
        }

        let drained: Vec<_> = subscriptions.borrow_mut().drain(..).collect();
        for source in &drained {
            source.unsubscribe();
        }
        info!(sources = drained.len(), "motion_engine_stopped");
    }

    /// Feed one sample. Returns whether it was accepted.
    ///
    /// Malformed samples, samples received while idle, and hardware hints
    /// without an active hardware-assisted classifier are discarded without
    /// touching state or notifying observers.
    pub fn ingest(&self, sample: Sample) -> bool {
        self.shared.ingest(sample)
    }

    /// A delivery handle for a source driven outside the engine.
    pub fn sink(&self, role: SourceRole) -> SampleSink {
        SampleSink::new(Arc::downgrade(&self.shared), role)
    }

    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&MotionEvent) + Send + Sync + 'static,
    {
        self.shared.observers.subscribe(Arc::new(observer))
    }

    /// Returns `false` if the handle was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.shared.observers.unsubscribe(id)
    }

    pub fn observer_count(&self) -> usize {
        self.shared.observers.len()
    }

    pub fn snapshot(&self) -> EngineState {
        self.shared.inner.lock().state
    }

    pub fn motion_type(&self) -> MotionType {
        self.snapshot().motion_type
    }

    pub fn current_speed(&self) -> f64 {
        self.snapshot().current_speed
    }

    pub fn acceleration(&self) -> AccelerationSample {
        self.snapshot().acceleration
    }

    pub fn is_shaking(&self) -> bool {
        self.snapshot().is_shaking
    }

    pub fn is_paused(&self) -> bool {
        self.snapshot().is_paused
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.shared.inner.lock().lifecycle
    }

    pub fn thresholds(&self) -> ThresholdConfig {
        self.shared.inner.lock().config
    }

    /// Whether the running engine classifies with hardware hints.
    pub fn uses_hardware_assist(&self) -> bool {
        let inner = self.shared.inner.lock();
        inner.lifecycle == Lifecycle::Running
            && inner.strategy == ClassifierStrategy::HardwareAssisted
    }

    pub fn set_minimum_speed(&self, speed: f64) -> Result<(), ThresholdError> {
        self.update_threshold("minimum_speed", speed, |cfg| cfg.minimum_speed = speed)
    }

    pub fn set_maximum_walking_speed(&self, speed: f64) -> Result<(), ThresholdError> {
        self.update_threshold("maximum_walking_speed", speed, |cfg| {
            cfg.maximum_walking_speed = speed
        })
    }

    pub fn set_maximum_running_speed(&self, speed: f64) -> Result<(), ThresholdError> {
        self.update_threshold("maximum_running_speed", speed, |cfg| {
            cfg.maximum_running_speed = speed
        })
    }

    pub fn set_minimum_running_acceleration(
        &self,
        acceleration: f64,
    ) -> Result<(), ThresholdError> {
        self.update_threshold("minimum_running_acceleration", acceleration, |cfg| {
            cfg.minimum_running_acceleration = acceleration
        })
    }

    /// Replace every threshold at once. Misordered bands are rejected.
    pub fn set_thresholds(&self, config: ThresholdConfig) -> Result<(), ThresholdError> {
        config.validate()?;
        self.shared.inner.lock().config = config;
        debug!(?config, "thresholds_replaced");
        Ok(())
    }

    /// Takes effect on the next `start`.
    pub fn set_use_hardware_assist(&self, enabled: bool) {
        let mut inner = self.shared.inner.lock();
        if inner.lifecycle == Lifecycle::Running {
            warn!(enabled, "hardware_assist_change_deferred_until_restart");
        }
        inner.use_hardware_assist = enabled;
    }

    // Single-field updates may leave the bands misordered mid-sequence, so
    // ordering only warns here; classification stays first-match.
    fn update_threshold(
        &self,
        field: &'static str,
        value: f64,
        apply: impl FnOnce(&mut ThresholdConfig),
    ) -> Result<(), ThresholdError> {
        check_field(field, value)?;

        let mut inner = self.shared.inner.lock();
        apply(&mut inner.config);
        if !inner.config.is_ordered() {
            warn!(field, value, config = ?inner.config, "thresholds_misordered");
        }
        debug!(field, value, "threshold_updated");
        Ok(())
    }
}

impl Default for MotionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MotionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.shared.inner.lock();
        f.debug_struct("MotionEngine")
            .field("lifecycle", &inner.lifecycle)
            .field("state", &inner.state)
            .field("config", &inner.config)
            .field("strategy", &inner.strategy)
            .finish()
    }
}
