//! Selector tolerances
//!
//! Both tolerances absorb floating-point noise from the modeling kernel.
//! They can be set in code or loaded from a TOML table:
//!
//! ```toml
//! angular_tolerance = 1e-6
//! linear_tolerance = 1e-4
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default angular tolerance in radians
pub const DEFAULT_ANGULAR_TOLERANCE: f64 = 1e-6;

/// Default linear tolerance for tie groups, in model length units
pub const DEFAULT_LINEAR_TOLERANCE: f64 = 1e-4;

/// Tolerance configuration for selector evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Maximum angle (radians) between a direction and an axis for
    /// aligned, parallel and perpendicular tests
    pub angular_tolerance: f64,
    /// Maximum gap between adjacent sorted projections within one tie group
    pub linear_tolerance: f64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            angular_tolerance: DEFAULT_ANGULAR_TOLERANCE,
            linear_tolerance: DEFAULT_LINEAR_TOLERANCE,
        }
    }
}

impl SelectorConfig {
    /// Set the angular tolerance
    pub fn with_angular_tolerance(mut self, radians: f64) -> Self {
        self.angular_tolerance = radians;
        self
    }

    /// Set the linear tolerance
    pub fn with_linear_tolerance(mut self, distance: f64) -> Self {
        self.linear_tolerance = distance;
        self
    }

    /// Parse and validate a configuration from TOML
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: SelectorConfig =
            toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that both tolerances are finite and non-negative
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.angular_tolerance.is_finite() || self.angular_tolerance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "angular_tolerance must be finite and non-negative, got {}",
                self.angular_tolerance
            )));
        }
        if self.angular_tolerance >= std::f64::consts::FRAC_PI_4 {
            return Err(ConfigError::Invalid(format!(
                "angular_tolerance must be below pi/4, got {}",
                self.angular_tolerance
            )));
        }
        if !self.linear_tolerance.is_finite() || self.linear_tolerance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "linear_tolerance must be finite and non-negative, got {}",
                self.linear_tolerance
            )));
        }
        Ok(())
    }

    /// Sine of the angular tolerance, the bound used by direction tests
    pub(crate) fn angular_sine(&self) -> f64 {
        self.angular_tolerance.sin()
    }
}
