//! Calibration for wind-field synthesis.
//!
//! None of these values come from a physical model. They are empirical
//! knobs, kept out of the algorithms so they can be tuned per run.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Nautical miles to kilometers.
pub const NM_TO_KM: f64 = 1.852;

/// Radius given to a silent quadrant of an active threshold, in nautical miles.
pub const DEFAULT_ZERO_QUADRANT_FLOOR_NM: f64 = 0.5;

/// Divisor applied to the sum of the two neighbouring cardinal extents when a
/// diagonal quadrant has no radius of its own.
pub const DEFAULT_FUDGE_DIVISOR: f64 = 2.0;

/// Minimum gap, in kilometers, between a threshold ring and the next ring in.
pub const DEFAULT_CONTAINMENT_MARGIN_KM: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindFieldConfig {
    pub zero_quadrant_floor_nm: f64,
    pub fudge_divisor: f64,
    pub containment_margin_km: f64,
}

impl Default for WindFieldConfig {
    fn default() -> Self {
        Self {
            zero_quadrant_floor_nm: DEFAULT_ZERO_QUADRANT_FLOOR_NM,
            fudge_divisor: DEFAULT_FUDGE_DIVISOR,
            containment_margin_km: DEFAULT_CONTAINMENT_MARGIN_KM,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a positive finite number, got {value}")]
    NotPositive { name: &'static str, value: f64 },
}

impl WindFieldConfig {
    /// Reject values that would leave zero quadrants in an active set,
    /// collapse an annulus onto its hole, or divide by zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("zero_quadrant_floor_nm", self.zero_quadrant_floor_nm),
            ("fudge_divisor", self.fudge_divisor),
            ("containment_margin_km", self.containment_margin_km),
        ];
        for (name, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: WindFieldConfig =
            serde_json::from_str(r#"{"containment_margin_km": 5.0}"#).unwrap();
        assert_eq!(config.containment_margin_km, 5.0);
        assert_eq!(config.zero_quadrant_floor_nm, DEFAULT_ZERO_QUADRANT_FLOOR_NM);
        assert_eq!(config.fudge_divisor, DEFAULT_FUDGE_DIVISOR);
    }

    #[test]
    fn defaults_are_valid() {
        assert_eq!(WindFieldConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_margin_is_rejected() {
        let config = WindFieldConfig {
            containment_margin_km: 0.0,
            ..WindFieldConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive {
                name: "containment_margin_km",
                value: 0.0
            })
        );
    }

    #[test]
    fn non_positive_floor_and_divisor_are_rejected() {
        let floor = WindFieldConfig {
            zero_quadrant_floor_nm: 0.0,
            ..WindFieldConfig::default()
        };
        assert!(floor.validate().is_err());

        let divisor = WindFieldConfig {
            fudge_divisor: -2.0,
            ..WindFieldConfig::default()
        };
        assert!(divisor.validate().is_err());

        let margin = WindFieldConfig {
            containment_margin_km: f64::NAN,
            ..WindFieldConfig::default()
        };
        assert!(margin.validate().is_err());
    }
}
