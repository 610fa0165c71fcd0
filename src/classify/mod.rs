//! Pure evaluators run by the engine on every accepted sample.
//!
//! - `classifier` - speed bands and the hardware-assist strategy
//! - `shake` - acceleration magnitude threshold
//! - `pause` - location stream pause/resume edges

mod classifier;
mod pause;
mod shake;

pub use classifier::{
    classify_speed, ClassifierStrategy, HardwareAssistedClassifier, MotionClassifier,
    PureSpeedClassifier,
};
pub use pause::PauseTracker;
pub use shake::ShakeDetector;
