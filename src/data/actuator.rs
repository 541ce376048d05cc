use std::cell::RefCell;
use std::rc::Rc;

/// Control-surface side of the autopilot boundary.
///
/// Writes are fire-and-forget: the director never reads back what it sent.
pub trait Actuator {
    /// Current angle of attack, degrees.
    fn angle_of_attack(&self) -> f64;

    /// Autopilot pitch hold reference, degrees. Positive is nose down.
    fn set_pitch_hold_ref(&mut self, degrees: f64);

    /// Engage or release the altitude hold flag.
    fn set_altitude_hold(&mut self, engaged: bool);
}

/// Shared handle, so a simulation can keep integrating the same aircraft
/// the director is commanding.
impl<A: Actuator> Actuator for Rc<RefCell<A>> {
    fn angle_of_attack(&self) -> f64 {
        self.borrow().angle_of_attack()
    }

    fn set_pitch_hold_ref(&mut self, degrees: f64) {
        self.borrow_mut().set_pitch_hold_ref(degrees)
    }

    fn set_altitude_hold(&mut self, engaged: bool) {
        self.borrow_mut().set_altitude_hold(engaged)
    }
}

// ---------------------------------------------------------------------------
// Recording actuator
// ---------------------------------------------------------------------------

/// A single write observed by [`RecordingActuator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActuatorWrite {
    PitchHoldRef(f64),
    AltitudeHold(bool),
}

/// Actuator with a fixed angle of attack that records every write.
#[derive(Debug, Clone, Default)]
pub struct RecordingActuator {
    pub aoa: f64,
    pub writes: Vec<ActuatorWrite>,
}

impl RecordingActuator {
    pub fn with_aoa(aoa: f64) -> Self {
        Self { aoa, writes: Vec::new() }
    }

    pub fn shared(aoa: f64) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::with_aoa(aoa)))
    }

    pub fn last_pitch_ref(&self) -> Option<f64> {
        self.writes.iter().rev().find_map(|w| match w {
            ActuatorWrite::PitchHoldRef(p) => Some(*p),
            _ => None,
        })
    }

    pub fn altitude_hold(&self) -> Option<bool> {
        self.writes.iter().rev().find_map(|w| match w {
            ActuatorWrite::AltitudeHold(b) => Some(*b),
            _ => None,
        })
    }
}

impl Actuator for RecordingActuator {
    fn angle_of_attack(&self) -> f64 {
        self.aoa
    }

    fn set_pitch_hold_ref(&mut self, degrees: f64) {
        self.writes.push(ActuatorWrite::PitchHoldRef(degrees));
    }

    fn set_altitude_hold(&mut self, engaged: bool) {
        self.writes.push(ActuatorWrite::AltitudeHold(engaged));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_handle_forwards_writes() {
        let rec = RecordingActuator::shared(2.5);
        let mut handle = Rc::clone(&rec);
        handle.set_altitude_hold(true);
        handle.set_pitch_hold_ref(-3.0);
        assert_eq!(handle.angle_of_attack(), 2.5);
        assert_eq!(rec.borrow().last_pitch_ref(), Some(-3.0));
        assert_eq!(rec.borrow().altitude_hold(), Some(true));
    }
}
