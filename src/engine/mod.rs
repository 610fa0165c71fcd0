//! The stateful shell around the pure evaluators.
//!
//! - `machine` - `MotionEngine`, its lifecycle and `EngineState`
//! - `observer` - subscribe/unsubscribe and `MotionEvent`
//! - `source` - the `SampleSource` seam and `SampleSink` delivery handle
//!
//! All state mutation goes through `MotionEngine::ingest`, which is
//! serialized behind a single lock. Observers are invoked after that lock
//! is released.

mod machine;
mod observer;
mod source;

pub use machine::{EngineState, MotionEngine};
pub use observer::{MotionEvent, Observer, SubscriptionId};
pub use source::{SampleSink, SampleSource, SourceRole};
