//! Seams to the external sample sources.
//!
//! Acquisition of location fixes, accelerometer readings and hardware
//! activity hints lives outside this crate. A source is handed a
//! [`SampleSink`] when the engine starts and pushes samples into it from
//! whatever thread its platform callback runs on.

use super::machine::Shared;
use crate::core::{Sample, SampleKind};
use std::fmt;
use std::sync::Weak;
use tracing::trace;

/// The role a source plays for the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceRole {
    Speed,
    Acceleration,
    HardwareClassifier,
}

impl SourceRole {
    /// Sample kind this role is expected to deliver.
    pub fn sample_kind(&self) -> SampleKind {
        match self {
            Self::Speed => SampleKind::Speed,
            Self::Acceleration => SampleKind::Acceleration,
            Self::HardwareClassifier => SampleKind::HardwareHint,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Speed => "speed",
            Self::Acceleration => "acceleration",
            Self::HardwareClassifier => "hardware_classifier",
        }
    }
}

impl fmt::Display for SourceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An external producer of samples.
///
/// `subscribe` is called once per engine start and `unsubscribe` once per
/// stop. A source that cannot deliver (missing hardware, denied permission)
/// reports `false` from `is_available`; the engine still starts without it.
pub trait SampleSource: Send + Sync {
    fn is_available(&self) -> bool {
        true
    }

    fn subscribe(&self, sink: SampleSink);

    fn unsubscribe(&self);
}

/// Delivery handle given to a subscribed source.
///
/// Holds only a weak reference to the engine, so a source that outlives
/// the engine simply has its samples dropped.
#[derive(Clone)]
pub struct SampleSink {
    engine: Weak<Shared>,
    role: SourceRole,
}

impl SampleSink {
    pub(crate) fn new(engine: Weak<Shared>, role: SourceRole) -> Self {
        Self { engine, role }
    }

    pub fn role(&self) -> SourceRole {
        self.role
    }

    /// Forward a sample to the engine. Returns whether it was accepted.
    ///
    /// Samples that do not match the source's role are dropped.
    pub fn deliver(&self, sample: impl Into<Sample>) -> bool {
        let sample = sample.into();
        if sample.kind() != self.role.sample_kind() {
            trace!(role = %self.role, kind = ?sample.kind(), "sample_discarded_wrong_role");
            return false;
        }

        match self.engine.upgrade() {
            Some(engine) => engine.ingest(sample),
            None => {
                trace!(role = %self.role, "sample_discarded_engine_dropped");
                false
            }
        }
    }
}

impl fmt::Debug for SampleSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SampleSink")
            .field("role", &self.role)
            .field("engine_alive", &(self.engine.strong_count() > 0))
            .finish()
    }
}
