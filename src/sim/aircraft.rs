use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::integrator::rk4_step;
use crate::data::{Actuator, AdcSample};
use crate::units::{fps_to_fpm, knots_to_feet_per_minute, SECONDS_PER_MINUTE};

// ---------------------------------------------------------------------------
// Aircraft parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AircraftParams {
    pub initial_altitude_ft: f64,
    pub initial_vs_fpm: f64,
    pub ground_speed_kt: f64,
    /// Held constant; the model has no lift/drag polar.
    #[serde(default = "default_aoa")]
    pub aoa_deg: f64,
    /// First-order lag of pitch attitude toward the commanded pitch.
    #[serde(default = "default_pitch_lag")]
    pub pitch_time_constant_s: f64,
}

fn default_aoa() -> f64 {
    2.0
}

fn default_pitch_lag() -> f64 {
    1.0
}

// ---------------------------------------------------------------------------
// Longitudinal state: along-track distance, altitude, pitch attitude
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightState {
    pub time: f64,          // s
    pub pos: Vector2<f64>,  // ft [along-track, altitude]
    pub pitch: f64,         // deg, nose up positive
}

impl FlightState {
    pub fn altitude(&self) -> f64 {
        self.pos.y
    }

    pub fn apply(&self, d: &Deriv, dt: f64) -> FlightState {
        FlightState {
            time: self.time + dt,
            pos: self.pos + d.dpos * dt,
            pitch: self.pitch + d.dpitch * dt,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Deriv {
    pub dpos: Vector2<f64>, // ft/s
    pub dpitch: f64,        // deg/s
}

// ---------------------------------------------------------------------------
// Aircraft
// ---------------------------------------------------------------------------

/// Point-mass aircraft flying a constant ground speed and angle of attack.
/// Flight path angle is pitch minus angle of attack.
#[derive(Debug, Clone)]
pub struct Aircraft {
    pub params: AircraftParams,
    pub state: FlightState,
    pitch_cmd: f64,
    pitch_hold_ref: Option<f64>,
    altitude_hold: bool,
}

impl Aircraft {
    /// Trimmed at the initial vertical speed.
    pub fn new(params: AircraftParams) -> Self {
        let gamma = (params.initial_vs_fpm / knots_to_feet_per_minute(params.ground_speed_kt))
            .atan()
            .to_degrees();
        let pitch = params.aoa_deg + gamma;
        Self {
            params,
            state: FlightState {
                time: 0.0,
                pos: Vector2::new(0.0, params.initial_altitude_ft),
                pitch,
            },
            pitch_cmd: pitch,
            pitch_hold_ref: None,
            altitude_hold: false,
        }
    }

    fn ground_speed_fps(&self) -> f64 {
        knots_to_feet_per_minute(self.params.ground_speed_kt) / SECONDS_PER_MINUTE
    }

    /// Flight path angle, deg.
    pub fn flight_path_angle(&self) -> f64 {
        self.state.pitch - self.params.aoa_deg
    }

    pub fn vertical_speed(&self) -> f64 {
        fps_to_fpm(self.ground_speed_fps() * self.flight_path_angle().to_radians().tan())
    }

    pub fn altitude(&self) -> f64 {
        self.state.altitude()
    }

    pub fn pitch_cmd(&self) -> f64 {
        self.pitch_cmd
    }

    /// Last pitch hold reference written by an autopilot mode.
    pub fn pitch_hold_ref(&self) -> Option<f64> {
        self.pitch_hold_ref
    }

    pub fn altitude_hold(&self) -> bool {
        self.altitude_hold
    }

    /// Air data and GNSS samples for the current state.
    pub fn samples(&self) -> [AdcSample; 3] {
        [
            AdcSample::GroundSpeed(self.params.ground_speed_kt),
            AdcSample::IndicatedAltitude(self.altitude()),
            AdcSample::VerticalSpeed(self.vertical_speed()),
        ]
    }

    pub fn derivatives(&self, state: &FlightState) -> Deriv {
        let gs = self.ground_speed_fps();
        let gamma = (state.pitch - self.params.aoa_deg).to_radians();
        Deriv {
            dpos: Vector2::new(gs, gs * gamma.tan()),
            dpitch: (self.pitch_cmd - state.pitch) / self.params.pitch_time_constant_s,
        }
    }

    pub fn step(&mut self, dt: f64) {
        self.state = rk4_step(self, &self.state, dt);
    }
}

impl Actuator for Aircraft {
    fn angle_of_attack(&self) -> f64 {
        self.params.aoa_deg
    }

    fn set_pitch_hold_ref(&mut self, degrees: f64) {
        self.pitch_hold_ref = Some(degrees);
        self.pitch_cmd = -degrees;
    }

    fn set_altitude_hold(&mut self, engaged: bool) {
        self.altitude_hold = engaged;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(vs: f64) -> AircraftParams {
        AircraftParams {
            initial_altitude_ft: 3000.0,
            initial_vs_fpm: vs,
            ground_speed_kt: 120.0,
            aoa_deg: 2.0,
            pitch_time_constant_s: 1.0,
        }
    }

    #[test]
    fn trimmed_at_initial_vertical_speed() {
        let ac = Aircraft::new(params(1000.0));
        assert!((ac.vertical_speed() - 1000.0).abs() < 1e-6);
        assert!(ac.state.pitch > 2.0);
    }

    #[test]
    fn steady_climb_gains_expected_altitude() {
        let mut ac = Aircraft::new(params(600.0));
        for _ in 0..600 {
            ac.step(0.1);
        }
        // one minute at 600 fpm
        assert!((ac.altitude() - 3600.0).abs() < 0.5, "got {}", ac.altitude());
        assert!((ac.state.time - 60.0).abs() < 1e-9);
    }

    #[test]
    fn pitch_lags_toward_command() {
        let mut ac = Aircraft::new(params(0.0));
        ac.set_pitch_hold_ref(-7.0);
        assert_eq!(ac.pitch_cmd(), 7.0);
        for _ in 0..10 {
            ac.step(0.1);
        }
        // one time constant: ~63% of the 5 deg step
        let moved = ac.state.pitch - 2.0;
        assert!((moved - 5.0 * (1.0 - (-1.0_f64).exp())).abs() < 0.01, "got {moved}");
    }

    #[test]
    fn samples_reflect_state() {
        let ac = Aircraft::new(params(-500.0));
        let [gs, alt, vs] = ac.samples();
        assert_eq!(gs, AdcSample::GroundSpeed(120.0));
        assert_eq!(alt, AdcSample::IndicatedAltitude(3000.0));
        match vs {
            AdcSample::VerticalSpeed(v) => assert!((v + 500.0).abs() < 1e-6),
            other => panic!("unexpected {other:?}"),
        }
    }
}
