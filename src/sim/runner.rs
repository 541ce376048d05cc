use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info};

use super::aircraft::{Aircraft, FlightState};
use super::event::{AltitudeDetector, EventDetector, EventKind, ModeChangeDetector, SimEvent};
use super::scenario::Scenario;
use crate::autopilot::{AltitudeCaptureDirector, DirectorState, PlaneDirector};
use crate::data::{Actuator, QueuedFeed};
use crate::error::SimError;
use crate::values::ApValues;

pub type SharedAircraft = Rc<RefCell<Aircraft>>;

/// Proportional gain of the altitude hold that follows a capture, deg/ft.
const HOLD_GAIN: f64 = 0.02;
/// Limit on the hold's flight path correction, deg.
const HOLD_PITCH_LIMIT: f64 = 3.0;

// ---------------------------------------------------------------------------
// Recorded trajectory
// ---------------------------------------------------------------------------

/// One control cycle as seen by the harness.
#[derive(Debug, Clone)]
pub struct FlightRecord {
    pub state: FlightState,
    pub vertical_speed: f64,
    pub pitch_hold_ref: Option<f64>,
    pub director: DirectorState,
    pub altitude_hold: bool,
    pub captured_altitude: f64,
}

impl FlightRecord {
    fn snapshot(aircraft: &Aircraft, director: DirectorState, values: &ApValues) -> Self {
        Self {
            state: aircraft.state,
            vertical_speed: aircraft.vertical_speed(),
            pitch_hold_ref: aircraft.pitch_hold_ref(),
            director,
            altitude_hold: aircraft.altitude_hold(),
            captured_altitude: values.captured_altitude.get(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SimRun {
    pub trajectory: Vec<FlightRecord>,
    pub events: Vec<SimEvent>,
}

impl SimRun {
    pub fn first_event(&self, pred: impl Fn(&EventKind) -> bool) -> Option<&SimEvent> {
        self.events.iter().find(|e| pred(&e.kind))
    }

    pub fn capture_event(&self) -> Option<&SimEvent> {
        self.first_event(|k| matches!(k, EventKind::Captured { .. }))
    }

    pub fn hold_event(&self) -> Option<&SimEvent> {
        self.first_event(|k| matches!(k, EventKind::HoldEngaged))
    }
}

// ---------------------------------------------------------------------------
// Closed loop
// ---------------------------------------------------------------------------

/// Pitch (deg) flown by the altitude hold that takes over after capture.
pub fn hold_pitch(target: f64, altitude: f64, aoa: f64) -> f64 {
    aoa + (HOLD_GAIN * (target - altitude)).clamp(-HOLD_PITCH_LIMIT, HOLD_PITCH_LIMIT)
}

fn detect(
    detectors: &mut [Box<dyn EventDetector>],
    prev: &FlightRecord,
    current: &FlightRecord,
    events: &mut Vec<SimEvent>,
) {
    for det in detectors.iter_mut() {
        if let Some(kind) = det.check(prev, current) {
            debug!(time = current.state.time, ?kind, "event");
            events.push(SimEvent { time: current.state.time, kind, record: current.clone() });
        }
    }
}

/// Fly a scenario with a supervisor-owned director.
///
/// The director must command `aircraft` and share `values`. It is armed at
/// t = 0; once active and inside the hold band it is released with
/// `deactivate(true)` and a level altitude hold flies the rest of the run.
pub fn simulate_with(
    scenario: &Scenario,
    director: &mut dyn PlaneDirector,
    aircraft: &SharedAircraft,
    values: &ApValues,
) -> Result<SimRun, SimError> {
    scenario.validate()?;
    if director.state() != DirectorState::Inactive {
        return Err(SimError::DirectorBusy(director.name().to_string()));
    }

    let config = &scenario.sim;
    let steps = (config.max_time / config.dt).ceil() as usize;
    let ascending = aircraft.borrow().altitude() < scenario.selected_altitude_ft;

    let mut detectors: Vec<Box<dyn EventDetector>> = vec![
        Box::new(ModeChangeDetector),
        Box::new(AltitudeDetector::new(scenario.selected_altitude_ft, ascending)),
    ];
    let mut feed = QueuedFeed::whole_units();
    let mut trajectory = Vec::with_capacity(steps.min(200_000) + 2);
    let mut events = Vec::new();

    trajectory.push(FlightRecord::snapshot(&aircraft.borrow(), director.state(), values));
    director.arm();
    let armed = FlightRecord::snapshot(&aircraft.borrow(), director.state(), values);
    detect(&mut detectors, &trajectory[0], &armed, &mut events);
    trajectory.push(armed);

    info!(
        scenario = %scenario.name,
        director = director.name(),
        selected_ft = scenario.selected_altitude_ft,
        steps,
        "simulation start"
    );

    let mut holding = false;
    for cycle in 0..steps {
        {
            let ac = aircraft.borrow();
            let [gs, alt, vs] = ac.samples();
            if cycle % config.ground_speed_period as usize == 0 {
                feed.publish(gs);
            }
            feed.publish(alt);
            feed.publish(vs);
        }

        let was_active = director.state() == DirectorState::Active;
        director.ingest(&mut feed);
        director.update();

        // The capture cycle itself is always recorded as active.
        if was_active && director.state() == DirectorState::Active {
            let error = aircraft.borrow().altitude() - values.captured_altitude.get();
            if error.abs() <= config.hold_band_ft {
                director.deactivate(true);
                holding = true;
                info!(error_ft = error, "handing over to altitude hold");
            }
        }

        if holding {
            let mut ac = aircraft.borrow_mut();
            let pitch = hold_pitch(values.captured_altitude.get(), ac.altitude(), ac.params.aoa_deg);
            ac.set_pitch_hold_ref(-pitch);
        }

        aircraft.borrow_mut().step(config.dt);

        let record = FlightRecord::snapshot(&aircraft.borrow(), director.state(), values);
        if let Some(prev) = trajectory.last() {
            detect(&mut detectors, prev, &record, &mut events);
        }
        trajectory.push(record);
    }

    info!(events = events.len(), records = trajectory.len(), "simulation done");
    Ok(SimRun { trajectory, events })
}

/// Fly a scenario with a fresh altitude capture director.
pub fn simulate(scenario: &Scenario) -> Result<SimRun, SimError> {
    let aircraft: SharedAircraft = Rc::new(RefCell::new(Aircraft::new(scenario.aircraft)));
    let values = ApValues::shared(scenario.selected_altitude_ft);
    let mut director =
        AltitudeCaptureDirector::with_config(Rc::clone(&values), Rc::clone(&aircraft), scenario.director)?;
    simulate_with(scenario, &mut director, &aircraft, &values)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::scenario::presets;

    #[test]
    fn climb_captures_and_holds() {
        let run = simulate(&presets::climb_to_5000()).unwrap();
        let capture = run.capture_event().expect("should capture");
        assert_eq!(capture.kind, EventKind::Captured { altitude: 5000.0 });
        // 1000 fpm -> ~167 ft deadband
        assert!(capture.record.state.altitude() > 4800.0 && capture.record.state.altitude() < 4850.0);
        let hold = run.hold_event().expect("should hand over to hold");
        assert!(hold.time > capture.time);

        let last = run.trajectory.last().unwrap();
        assert!((last.state.altitude() - 5000.0).abs() < 10.0, "ended at {}", last.state.altitude());
        assert!(last.altitude_hold);
    }

    #[test]
    fn first_event_is_armed() {
        let run = simulate(&presets::descent_to_3000()).unwrap();
        assert_eq!(run.events[0].kind, EventKind::Armed);
        assert_eq!(run.events[0].time, 0.0);
    }

    #[test]
    fn capture_does_not_overshoot_climb() {
        let run = simulate(&presets::climb_to_5000()).unwrap();
        let peak = run.trajectory.iter().map(|r| r.state.altitude()).fold(f64::MIN, f64::max);
        assert!(peak < 5010.0, "peak {peak}");
    }

    #[test]
    fn busy_director_rejected() {
        let scenario = presets::climb_to_5000();
        let aircraft: SharedAircraft = Rc::new(RefCell::new(Aircraft::new(scenario.aircraft)));
        let values = ApValues::shared(scenario.selected_altitude_ft);
        let mut director = AltitudeCaptureDirector::new(Rc::clone(&values), Rc::clone(&aircraft));
        director.arm();
        let err = simulate_with(&scenario, &mut director, &aircraft, &values).unwrap_err();
        assert!(matches!(err, SimError::DirectorBusy(_)));
    }

    #[test]
    fn hold_pitch_is_limited() {
        assert_eq!(hold_pitch(5000.0, 5000.0, 2.0), 2.0);
        assert_eq!(hold_pitch(5000.0, 4000.0, 2.0), 5.0);
        assert_eq!(hold_pitch(5000.0, 6000.0, 2.0), -1.0);
    }
}
