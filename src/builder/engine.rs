//! Builder for constructing motion engines.

use crate::builder::error::BuildError;
use crate::core::ThresholdConfig;
use crate::engine::{MotionEngine, SampleSource, SourceRole};
use std::collections::HashSet;
use std::sync::Arc;

/// Builder for constructing a [`MotionEngine`] with a fluent API.
///
/// Thresholds and the hardware-assist flag are fixed here so the first
/// classification after `start` is deterministic.
///
/// # Example
///
/// ```rust
/// use motion_sense::builder::EngineBuilder;
///
/// let engine = EngineBuilder::new()
///     .minimum_speed(0.5)
///     .maximum_walking_speed(2.0)
///     .maximum_running_speed(5.0)
///     .minimum_running_acceleration(2.5)
///     .build()
///     .unwrap();
///
/// assert_eq!(engine.thresholds().maximum_walking_speed, 2.0);
/// ```
pub struct EngineBuilder {
    config: ThresholdConfig,
    use_hardware_assist: bool,
    sources: Vec<(SourceRole, Arc<dyn SampleSource>)>,
}

impl EngineBuilder {
    /// Create a new builder with default thresholds.
    pub fn new() -> Self {
        Self {
            config: ThresholdConfig::default(),
            use_hardware_assist: false,
            sources: Vec::new(),
        }
    }

    /// Replace all thresholds.
    pub fn thresholds(mut self, config: ThresholdConfig) -> Self {
        self.config = config;
        self
    }

    pub fn minimum_speed(mut self, speed: f64) -> Self {
        self.config.minimum_speed = speed;
        self
    }

    pub fn maximum_walking_speed(mut self, speed: f64) -> Self {
        self.config.maximum_walking_speed = speed;
        self
    }

    pub fn maximum_running_speed(mut self, speed: f64) -> Self {
        self.config.maximum_running_speed = speed;
        self
    }

    pub fn minimum_running_acceleration(mut self, acceleration: f64) -> Self {
        self.config.minimum_running_acceleration = acceleration;
        self
    }

    /// Consult the hardware classifier when one is attached and available.
    pub fn use_hardware_assist(mut self, enabled: bool) -> Self {
        self.use_hardware_assist = enabled;
        self
    }

    pub fn speed_source(self, source: Arc<dyn SampleSource>) -> Self {
        self.source(SourceRole::Speed, source)
    }

    pub fn acceleration_source(self, source: Arc<dyn SampleSource>) -> Self {
        self.source(SourceRole::Acceleration, source)
    }

    pub fn hardware_classifier(self, source: Arc<dyn SampleSource>) -> Self {
        self.source(SourceRole::HardwareClassifier, source)
    }

    /// Attach a source for the given role.
    pub fn source(mut self, role: SourceRole, source: Arc<dyn SampleSource>) -> Self {
        self.sources.push((role, source));
        self
    }

    /// Build the engine.
    /// Returns an error if thresholds are unusable or misordered, or if a
    /// role has more than one source.
    pub fn build(self) -> Result<MotionEngine, BuildError> {
        self.config.validate()?;

        let mut seen = HashSet::new();
        for (role, _) in &self.sources {
            if !seen.insert(*role) {
                return Err(BuildError::DuplicateSource(*role));
            }
        }

        Ok(MotionEngine::from_parts(
            self.config,
            self.use_hardware_assist,
            self.sources,
        ))
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
