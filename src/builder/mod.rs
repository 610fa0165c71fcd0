//! Builder API for engine construction.
//!
//! Collects thresholds, the hardware-assist flag and the external sources,
//! validating them before an engine exists.

pub mod engine;
pub mod error;

pub use engine::EngineBuilder;
pub use error::BuildError;
