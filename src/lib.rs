pub mod autopilot;
pub mod data;
pub mod error;
pub mod io;
pub mod sim;
pub mod units;
pub mod values;

pub use error::{ConfigError, SimError};

// Flat re-exports for supervisors that only wire one director
pub mod prelude {
    pub use crate::autopilot::{AltCapConfig, AltitudeCaptureDirector, DirectorState, PlaneDirector};
    pub use crate::data::{Actuator, AdcSample, QueuedFeed, SensorFeed};
    pub use crate::values::{ApValues, ObservableValue};
}
