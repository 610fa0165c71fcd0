//! Errors raised while building an engine.

use crate::core::ThresholdError;
use crate::engine::SourceRole;
use thiserror::Error;

/// Errors that can occur when building a motion engine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Invalid thresholds: {0}")]
    InvalidThresholds(#[from] ThresholdError),

    #[error("A {0} source was already attached")]
    DuplicateSource(SourceRole),
}
