use super::runner::FlightRecord;
use crate::autopilot::DirectorState;

// ---------------------------------------------------------------------------
// Simulation events
// ---------------------------------------------------------------------------

/// Kinds of simulation events.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Armed,
    Captured { altitude: f64 },
    HoldEngaged,
    Disengaged,
    Custom(String),
}

/// A discrete event that occurred during simulation.
#[derive(Debug, Clone)]
pub struct SimEvent {
    pub time: f64,
    pub kind: EventKind,
    pub record: FlightRecord,
}

/// Trait for passive event detectors.
/// Implementations inspect consecutive records and report events.
pub trait EventDetector {
    fn check(&mut self, prev: &FlightRecord, current: &FlightRecord) -> Option<EventKind>;
}

/// Reports director state edges.
pub struct ModeChangeDetector;

impl EventDetector for ModeChangeDetector {
    fn check(&mut self, prev: &FlightRecord, current: &FlightRecord) -> Option<EventKind> {
        use DirectorState::*;
        match (prev.director, current.director) {
            (Armed, Armed) | (Active, Active) | (Inactive, Inactive) => None,
            (_, Armed) => Some(EventKind::Armed),
            (_, Active) => Some(EventKind::Captured { altitude: current.captured_altitude }),
            (_, Inactive) if current.altitude_hold => Some(EventKind::HoldEngaged),
            (_, Inactive) => Some(EventKind::Disengaged),
        }
    }
}

/// Detects when altitude crosses a threshold (ascending or descending).
pub struct AltitudeDetector {
    pub altitude: f64,
    pub ascending: bool,
    fired: bool,
}

impl AltitudeDetector {
    pub fn new(altitude: f64, ascending: bool) -> Self {
        Self { altitude, ascending, fired: false }
    }
}

impl EventDetector for AltitudeDetector {
    fn check(&mut self, prev: &FlightRecord, current: &FlightRecord) -> Option<EventKind> {
        if self.fired {
            return None;
        }
        let (a, b) = (prev.state.altitude(), current.state.altitude());
        let crossed = if self.ascending {
            a < self.altitude && b >= self.altitude
        } else {
            a > self.altitude && b <= self.altitude
        };
        if crossed {
            self.fired = true;
            Some(EventKind::Custom(format!(
                "Altitude {:.0} ft ({})",
                self.altitude,
                if self.ascending { "ascending" } else { "descending" }
            )))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::aircraft::FlightState;
    use nalgebra::Vector2;

    fn make_record(alt: f64, director: DirectorState, hold: bool) -> FlightRecord {
        FlightRecord {
            state: FlightState { time: 0.0, pos: Vector2::new(0.0, alt), pitch: 0.0 },
            vertical_speed: 0.0,
            pitch_hold_ref: None,
            director,
            altitude_hold: hold,
            captured_altitude: 5000.0,
        }
    }

    #[test]
    fn mode_edges_detected() {
        let mut det = ModeChangeDetector;
        let off = make_record(4000.0, DirectorState::Inactive, false);
        let arm = make_record(4000.0, DirectorState::Armed, false);
        let act = make_record(4900.0, DirectorState::Active, true);
        let held = make_record(4990.0, DirectorState::Inactive, true);
        let dropped = make_record(4990.0, DirectorState::Inactive, false);

        assert_eq!(det.check(&off, &arm), Some(EventKind::Armed));
        assert_eq!(det.check(&arm, &arm), None);
        assert_eq!(det.check(&arm, &act), Some(EventKind::Captured { altitude: 5000.0 }));
        assert_eq!(det.check(&act, &held), Some(EventKind::HoldEngaged));
        assert_eq!(det.check(&act, &dropped), Some(EventKind::Disengaged));
    }

    #[test]
    fn altitude_detector_descending_fires_once() {
        let mut det = AltitudeDetector::new(3000.0, false);
        let prev = make_record(3010.0, DirectorState::Armed, false);
        let curr = make_record(2995.0, DirectorState::Armed, false);
        assert!(det.check(&prev, &curr).is_some());
        assert!(det.check(&prev, &curr).is_none());
    }
}
