//! Threshold configuration consulted on every evaluation.

use super::error::{ThresholdError, ThresholdViolation};
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Speed bands (m/s) and the shake threshold (g).
///
/// Bands are expected to satisfy
/// `minimum_speed <= maximum_walking_speed <= maximum_running_speed`.
/// The type does not enforce it; see [`ThresholdConfig::validate`].
///
/// Missing fields fall back to their defaults when deserializing:
///
/// ```rust
/// use motion_sense::core::ThresholdConfig;
///
/// let cfg = ThresholdConfig::from_json_str(r#"{ "minimum_speed": 0.5 }"#).unwrap();
/// assert_eq!(cfg.minimum_speed, 0.5);
/// assert_eq!(cfg.maximum_walking_speed, 1.9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Below this speed the device is not moving
    #[serde(default = "default_minimum_speed")]
    pub minimum_speed: f64,
    /// Above this speed the device is at least running
    #[serde(default = "default_maximum_walking_speed")]
    pub maximum_walking_speed: f64,
    /// Above this speed the device is in a vehicle
    #[serde(default = "default_maximum_running_speed")]
    pub maximum_running_speed: f64,
    /// Acceleration magnitude above which the device is shaking
    #[serde(default = "default_minimum_running_acceleration")]
    pub minimum_running_acceleration: f64,
}

fn default_minimum_speed() -> f64 {
    0.3
}

fn default_maximum_walking_speed() -> f64 {
    1.9
}

fn default_maximum_running_speed() -> f64 {
    7.5
}

fn default_minimum_running_acceleration() -> f64 {
    3.5
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            minimum_speed: default_minimum_speed(),
            maximum_walking_speed: default_maximum_walking_speed(),
            maximum_running_speed: default_maximum_running_speed(),
            minimum_running_acceleration: default_minimum_running_acceleration(),
        }
    }
}

impl ThresholdConfig {
    /// Load a configuration from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ThresholdError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value is usable and the speed bands are ordered.
    ///
    /// All broken rules are reported together in [`ThresholdError::Invalid`].
    pub fn validate(&self) -> Result<(), ThresholdError> {
        into_result(self.checks())
    }

    /// Whether the speed bands are monotonically ordered.
    pub fn is_ordered(&self) -> bool {
        self.minimum_speed <= self.maximum_walking_speed
            && self.maximum_walking_speed <= self.maximum_running_speed
    }

    fn checks(&self) -> Validation<(), NonEmptyVec<ThresholdViolation>> {
        let checks = vec![
            check_value("minimum_speed", self.minimum_speed),
            check_value("maximum_walking_speed", self.maximum_walking_speed),
            check_value("maximum_running_speed", self.maximum_running_speed),
            check_value(
                "minimum_running_acceleration",
                self.minimum_running_acceleration,
            ),
            self.check_order(),
        ];

        Validation::all_vec(checks).map(|_| ())
    }

    /// Ordering is only meaningful once every speed band is itself valid.
    fn check_order(&self) -> Validation<(), NonEmptyVec<ThresholdViolation>> {
        let speeds = [
            self.minimum_speed,
            self.maximum_walking_speed,
            self.maximum_running_speed,
        ];
        if speeds.iter().any(|v| !is_usable(*v)) || self.is_ordered() {
            Validation::success(())
        } else {
            Validation::fail(ThresholdViolation::Misordered {
                minimum_speed: self.minimum_speed,
                maximum_walking_speed: self.maximum_walking_speed,
                maximum_running_speed: self.maximum_running_speed,
            })
        }
    }
}

fn is_usable(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Reject negative, NaN and infinite thresholds.
fn check_value(
    field: &'static str,
    value: f64,
) -> Validation<(), NonEmptyVec<ThresholdViolation>> {
    if is_usable(value) {
        Validation::success(())
    } else {
        Validation::fail(ThresholdViolation::InvalidValue { field, value })
    }
}

/// Single-field form of [`check_value`] used by the engine setters.
pub(crate) fn check_field(field: &'static str, value: f64) -> Result<(), ThresholdError> {
    into_result(check_value(field, value))
}

fn into_result(
    validation: Validation<(), NonEmptyVec<ThresholdViolation>>,
) -> Result<(), ThresholdError> {
    match validation {
        Validation::Success(_) => Ok(()),
        Validation::Failure(violations) => Err(ThresholdError::Invalid(violations)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violations(cfg: &ThresholdConfig) -> Vec<ThresholdViolation> {
        match cfg.validate() {
            Err(err) => err.violations().into_iter().cloned().collect(),
            Ok(()) => panic!("Expected violations, got success"),
        }
    }

    #[test]
    fn default_config_is_valid() {
        let cfg = ThresholdConfig::default();
        assert!(cfg.validate().is_ok());
        assert!(cfg.is_ordered());
    }

    #[test]
    fn misordered_bands_are_reported() {
        let cfg = ThresholdConfig {
            minimum_speed: 3.0,
            maximum_walking_speed: 2.0,
            ..Default::default()
        };

        assert!(!cfg.is_ordered());
        let found = violations(&cfg);
        assert_eq!(found.len(), 1);
        assert!(matches!(
            found[0],
            ThresholdViolation::Misordered { minimum_speed, .. } if minimum_speed == 3.0
        ));
    }

    #[test]
    fn negative_and_nan_values_are_rejected() {
        let cfg = ThresholdConfig {
            minimum_running_acceleration: -1.0,
            ..Default::default()
        };
        assert_eq!(
            violations(&cfg),
            vec![ThresholdViolation::InvalidValue {
                field: "minimum_running_acceleration",
                value: -1.0,
            }]
        );

        let cfg = ThresholdConfig {
            maximum_running_speed: f64::NAN,
            ..Default::default()
        };
        let found = violations(&cfg);
        assert_eq!(found.len(), 1);
        assert!(matches!(
            found[0],
            ThresholdViolation::InvalidValue { field: "maximum_running_speed", .. }
        ));
    }

    #[test]
    fn every_invalid_field_is_reported_at_once() {
        let cfg = ThresholdConfig {
            minimum_speed: f64::NAN,
            maximum_walking_speed: -1.0,
            maximum_running_speed: f64::INFINITY,
            minimum_running_acceleration: -3.0,
        };

        let fields: Vec<&str> = violations(&cfg)
            .iter()
            .map(|v| match v {
                ThresholdViolation::InvalidValue { field, .. } => *field,
                ThresholdViolation::Misordered { .. } => "misordered",
            })
            .collect();

        assert_eq!(
            fields,
            vec![
                "minimum_speed",
                "maximum_walking_speed",
                "maximum_running_speed",
                "minimum_running_acceleration",
            ]
        );
    }

    #[test]
    fn invalid_value_and_misordering_are_reported_together() {
        let cfg = ThresholdConfig {
            minimum_speed: 5.0,
            maximum_walking_speed: 2.0,
            maximum_running_speed: 7.5,
            minimum_running_acceleration: -0.5,
        };

        let found = violations(&cfg);
        assert_eq!(found.len(), 2);
        assert!(found.iter().any(|v| matches!(
            v,
            ThresholdViolation::InvalidValue {
                field: "minimum_running_acceleration",
                ..
            }
        )));
        assert!(found
            .iter()
            .any(|v| matches!(v, ThresholdViolation::Misordered { .. })));

        let message = cfg.validate().unwrap_err().to_string();
        assert!(message.contains("minimum_running_acceleration"));
        assert!(message.contains("misordered"));
    }

    #[test]
    fn equal_bands_are_ordered() {
        let cfg = ThresholdConfig {
            minimum_speed: 2.0,
            maximum_walking_speed: 2.0,
            maximum_running_speed: 2.0,
            minimum_running_acceleration: 1.0,
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn json_loader_fills_defaults() {
        let cfg = ThresholdConfig::from_json_str(
            r#"{ "maximum_running_speed": 9.0, "minimum_running_acceleration": 2.5 }"#,
        )
        .unwrap();

        assert_eq!(cfg.minimum_speed, 0.3);
        assert_eq!(cfg.maximum_walking_speed, 1.9);
        assert_eq!(cfg.maximum_running_speed, 9.0);
        assert_eq!(cfg.minimum_running_acceleration, 2.5);
    }

    #[test]
    fn json_loader_rejects_garbage_and_misordering() {
        let garbage = ThresholdConfig::from_json_str("not json").unwrap_err();
        assert!(matches!(garbage, ThresholdError::Parse(_)));
        assert!(garbage.violations().is_empty());

        let misordered = ThresholdConfig::from_json_str(r#"{ "minimum_speed": 10.0 }"#).unwrap_err();
        assert!(matches!(
            misordered.violations().as_slice(),
            [ThresholdViolation::Misordered { .. }]
        ));
    }
}
