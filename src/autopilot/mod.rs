pub mod altitude_capture;
pub mod capture_law;
pub mod config;
pub mod director;

pub use altitude_capture::AltitudeCaptureDirector;
pub use config::AltCapConfig;
pub use director::{DirectorHook, DirectorState, PlaneDirector};
