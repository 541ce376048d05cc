use super::aircraft::{Aircraft, FlightState};

// ---------------------------------------------------------------------------
// RK4 integrator with constant pitch command over the step
// ---------------------------------------------------------------------------

/// Single RK4 step with the aircraft's current pitch command held constant.
pub fn rk4_step(aircraft: &Aircraft, state: &FlightState, dt: f64) -> FlightState {
    let k1 = aircraft.derivatives(state);
    let k2 = aircraft.derivatives(&state.apply(&k1, dt * 0.5));
    let k3 = aircraft.derivatives(&state.apply(&k2, dt * 0.5));
    let k4 = aircraft.derivatives(&state.apply(&k3, dt));

    FlightState {
        time: state.time + dt,
        pos: state.pos + (k1.dpos + 2.0 * k2.dpos + 2.0 * k3.dpos + k4.dpos) * (dt / 6.0),
        pitch: state.pitch + (k1.dpitch + 2.0 * k2.dpitch + 2.0 * k3.dpitch + k4.dpitch) * (dt / 6.0),
    }
}
