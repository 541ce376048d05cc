pub mod actuator;
pub mod feed;
pub mod sample;

pub use actuator::{Actuator, ActuatorWrite, RecordingActuator};
pub use feed::{QueuedFeed, SensorFeed};
pub use sample::{AdcSample, FlightData, Precision};
