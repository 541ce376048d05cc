use std::path::Path;

use serde::{Deserialize, Serialize};

use super::aircraft::AircraftParams;
use crate::autopilot::AltCapConfig;
use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Simulation config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub dt: f64,
    pub max_time: f64,
    /// Control cycles between ground speed samples.
    pub ground_speed_period: u32,
    /// Altitude error at which the capture hands over to altitude hold, ft.
    pub hold_band_ft: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 0.1,           // 10 Hz autopilot cycle
            max_time: 240.0,
            ground_speed_period: 10,
            hold_band_ft: 20.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Scenario: aircraft initial conditions plus autopilot selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub selected_altitude_ft: f64,
    pub aircraft: AircraftParams,
    #[serde(default)]
    pub sim: SimConfig,
    #[serde(default)]
    pub director: AltCapConfig,
}

impl Scenario {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let scenario: Scenario = serde_json::from_str(json)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = |field: &'static str, v: f64| {
            if v.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::invalid(field, format!("must be finite, got {v}")))
            }
        };
        finite("selected_altitude_ft", self.selected_altitude_ft)?;
        finite("aircraft.initial_altitude_ft", self.aircraft.initial_altitude_ft)?;
        finite("aircraft.initial_vs_fpm", self.aircraft.initial_vs_fpm)?;
        finite("aircraft.aoa_deg", self.aircraft.aoa_deg)?;

        if !(self.aircraft.ground_speed_kt > 0.0 && self.aircraft.ground_speed_kt.is_finite()) {
            return Err(ConfigError::invalid("aircraft.ground_speed_kt", "must be positive"));
        }
        if !(self.aircraft.pitch_time_constant_s > 0.0 && self.aircraft.pitch_time_constant_s.is_finite()) {
            return Err(ConfigError::invalid("aircraft.pitch_time_constant_s", "must be positive"));
        }
        if !(self.sim.dt > 0.0 && self.sim.dt.is_finite()) {
            return Err(ConfigError::invalid("sim.dt", "must be positive"));
        }
        if !(self.sim.max_time >= self.sim.dt && self.sim.max_time.is_finite()) {
            return Err(ConfigError::invalid("sim.max_time", "must be finite and cover at least one step"));
        }
        if self.sim.ground_speed_period == 0 {
            return Err(ConfigError::invalid("sim.ground_speed_period", "must be at least 1"));
        }
        if !(self.sim.hold_band_ft >= 0.0) {
            return Err(ConfigError::invalid("sim.hold_band_ft", "must be non-negative"));
        }
        self.director.validate()
    }
}

// ---------------------------------------------------------------------------
// Preset scenarios
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;

    pub const NAMES: [&str; 3] = ["climb", "descent", "level-off"];

    /// 1000 fpm climb at 120 kt from 3000 ft to 5000 ft.
    pub fn climb_to_5000() -> Scenario {
        Scenario {
            name: "Climb to 5000".into(),
            selected_altitude_ft: 5000.0,
            aircraft: AircraftParams {
                initial_altitude_ft: 3000.0,
                initial_vs_fpm: 1000.0,
                ground_speed_kt: 120.0,
                aoa_deg: 2.0,
                pitch_time_constant_s: 1.0,
            },
            sim: SimConfig::default(),
            director: AltCapConfig::default(),
        }
    }

    /// 800 fpm descent at 140 kt from 5500 ft to 3000 ft.
    pub fn descent_to_3000() -> Scenario {
        Scenario {
            name: "Descent to 3000".into(),
            selected_altitude_ft: 3000.0,
            aircraft: AircraftParams {
                initial_altitude_ft: 5500.0,
                initial_vs_fpm: -800.0,
                ground_speed_kt: 140.0,
                aoa_deg: 1.5,
                pitch_time_constant_s: 1.0,
            },
            sim: SimConfig { max_time: 300.0, ..SimConfig::default() },
            director: AltCapConfig::default(),
        }
    }

    /// Drifting up at 50 fpm toward a target 100 ft above.
    pub fn level_off_near_target() -> Scenario {
        Scenario {
            name: "Level-off near target".into(),
            selected_altitude_ft: 5000.0,
            aircraft: AircraftParams {
                initial_altitude_ft: 4900.0,
                initial_vs_fpm: 50.0,
                ground_speed_kt: 100.0,
                aoa_deg: 3.0,
                pitch_time_constant_s: 1.0,
            },
            sim: SimConfig::default(),
            director: AltCapConfig::default(),
        }
    }

    pub fn by_name(name: &str) -> Result<Scenario, ConfigError> {
        match name {
            "climb" => Ok(climb_to_5000()),
            "descent" => Ok(descent_to_3000()),
            "level-off" => Ok(level_off_near_target()),
            other => Err(ConfigError::UnknownPreset(other.to_string())),
        }
    }
}
