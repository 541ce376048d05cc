pub mod aircraft;
pub mod event;
pub mod integrator;
pub mod runner;
pub mod scenario;

pub use aircraft::{Aircraft, AircraftParams, FlightState};
pub use event::{EventKind, SimEvent};
pub use integrator::rk4_step;
pub use runner::{hold_pitch, simulate, simulate_with, FlightRecord, SharedAircraft, SimRun};
pub use scenario::{presets, Scenario, SimConfig};
