use std::rc::Rc;

use tracing::{debug, info, warn};

use super::capture_law::{capture_fpa, pitch_target, within_deadband};
use super::config::AltCapConfig;
use super::director::{DirectorHook, DirectorState, PlaneDirector};
use crate::data::{Actuator, AdcSample, FlightData, SensorFeed};
use crate::error::ConfigError;
use crate::values::ApValues;

// ---------------------------------------------------------------------------
// Altitude capture director
// ---------------------------------------------------------------------------

/// Captures the selected altitude.
///
/// While armed, capture starts once the altitude error falls inside a
/// deadband proportional to vertical speed. While active, the director
/// flies the flight path angle latched at activation and blends it out over
/// the last `blend_distance_ft` feet.
pub struct AltitudeCaptureDirector<A: Actuator> {
    state: DirectorState,
    config: AltCapConfig,
    values: Rc<ApValues>,
    actuator: A,
    data: FlightData,
    initial_fpa: f64,
    on_arm: Option<DirectorHook>,
    on_activate: Option<DirectorHook>,
    /// Set while non-finite pitch targets are being dropped.
    suppressing: bool,
}

impl<A: Actuator> AltitudeCaptureDirector<A> {
    pub fn new(values: Rc<ApValues>, actuator: A) -> Self {
        Self::build(values, actuator, AltCapConfig::default())
    }

    /// Director with custom tuning. Rejects configs that fail
    /// [`AltCapConfig::validate`].
    pub fn with_config(values: Rc<ApValues>, actuator: A, config: AltCapConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(values, actuator, config))
    }

    fn build(values: Rc<ApValues>, actuator: A, config: AltCapConfig) -> Self {
        Self {
            state: DirectorState::Inactive,
            config,
            values,
            actuator,
            data: FlightData::default(),
            initial_fpa: 0.0,
            on_arm: None,
            on_activate: None,
            suppressing: false,
        }
    }

    /// Push a single sample.
    pub fn on_sample(&mut self, sample: AdcSample) {
        self.data.apply(sample);
    }

    pub fn flight_data(&self) -> &FlightData {
        &self.data
    }

    /// FPA (deg) latched at the last activation.
    pub fn initial_fpa(&self) -> f64 {
        self.initial_fpa
    }

    pub fn config(&self) -> &AltCapConfig {
        &self.config
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    fn try_activate(&mut self) {
        let selected = self.values.selected_altitude.get();
        if within_deadband(selected, self.data.indicated_altitude, self.data.vertical_speed, &self.config) {
            info!(
                selected_ft = selected,
                indicated_ft = self.data.indicated_altitude,
                vs_fpm = self.data.vertical_speed,
                "altitude capture"
            );
            self.activate();
        }
    }

    fn capture_altitude(&mut self) {
        let target = self.values.captured_altitude.get().round();
        let deviation = self.data.indicated_altitude - target;
        let aoa = self.actuator.angle_of_attack();
        let pitch = pitch_target(self.initial_fpa, deviation, aoa, &self.config);
        self.set_pitch(pitch);
    }

    fn set_capture_fpa(&mut self) {
        self.initial_fpa = capture_fpa(
            self.data.ground_speed,
            self.data.vertical_speed,
            self.data.indicated_altitude,
            self.values.selected_altitude.get(),
            &self.config,
        );
    }

    fn set_pitch(&mut self, target_pitch: f64) {
        if target_pitch.is_finite() {
            if self.suppressing {
                self.suppressing = false;
                debug!(target_pitch, "pitch target finite again");
            }
            self.actuator.set_pitch_hold_ref(-target_pitch);
        } else if !self.suppressing {
            self.suppressing = true;
            warn!(target_pitch, "non-finite pitch target suppressed");
        }
    }
}

impl<A: Actuator> PlaneDirector for AltitudeCaptureDirector<A> {
    fn state(&self) -> DirectorState {
        self.state
    }

    fn arm(&mut self) {
        self.state = DirectorState::Armed;
        if let Some(hook) = self.on_arm.as_mut() {
            hook();
        }
        debug!(selected_ft = self.values.selected_altitude.get(), "ALTS armed");
    }

    fn activate(&mut self) {
        self.state = DirectorState::Active;
        let captured = self.values.selected_altitude.get().round();
        self.values.captured_altitude.set(captured);
        if let Some(hook) = self.on_activate.as_mut() {
            hook();
        }
        self.set_capture_fpa();
        self.actuator.set_altitude_hold(true);
        debug!(captured_ft = captured, initial_fpa_deg = self.initial_fpa, "ALT capture active");
    }

    fn deactivate(&mut self, captured: bool) {
        self.state = DirectorState::Inactive;
        if !captured {
            self.actuator.set_altitude_hold(false);
        }
        debug!(captured, "ALT capture off");
    }

    fn update(&mut self) {
        match self.state {
            DirectorState::Active => self.capture_altitude(),
            DirectorState::Armed => self.try_activate(),
            DirectorState::Inactive => {}
        }
    }

    fn ingest(&mut self, feed: &mut dyn SensorFeed) {
        while let Some(sample) = feed.next_sample() {
            self.data.apply(sample);
        }
    }

    fn set_on_arm(&mut self, hook: DirectorHook) {
        self.on_arm = Some(hook);
    }

    fn set_on_activate(&mut self, hook: DirectorHook) {
        self.on_activate = Some(hook);
    }

    fn name(&self) -> &str {
        "AltitudeCapture"
    }
}
