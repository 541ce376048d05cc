use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tuning constants of the altitude capture control law.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AltCapConfig {
    /// Vertical speeds below this magnitude are replaced by it when the
    /// capture flight path angle is latched, ft/min.
    pub min_capture_vs_fpm: f64,
    /// Altitude error at which the latched FPA starts blending out, ft.
    pub blend_distance_ft: f64,
    /// Symmetric limit on the FPA contribution to the pitch target, deg.
    pub pitch_limit_deg: f64,
    /// Capture deadband is |vertical speed| / divisor.
    pub deadband_divisor: f64,
}

impl Default for AltCapConfig {
    fn default() -> Self {
        Self {
            min_capture_vs_fpm: 400.0,
            blend_distance_ft: 100.0,
            pitch_limit_deg: 6.0,
            deadband_divisor: 6.0,
        }
    }
}

impl AltCapConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_capture_vs_fpm.is_finite() && self.min_capture_vs_fpm > 0.0) {
            return Err(ConfigError::invalid("min_capture_vs_fpm", "must be positive"));
        }
        if !(self.blend_distance_ft.is_finite() && self.blend_distance_ft > 0.0) {
            return Err(ConfigError::invalid("blend_distance_ft", "must be positive"));
        }
        if !(self.pitch_limit_deg.is_finite() && self.pitch_limit_deg >= 0.0) {
            return Err(ConfigError::invalid("pitch_limit_deg", "must be non-negative"));
        }
        if !(self.deadband_divisor.is_finite() && self.deadband_divisor > 0.0) {
            return Err(ConfigError::invalid("deadband_divisor", "must be positive"));
        }
        Ok(())
    }
}
