use serde::{Deserialize, Serialize};

use crate::data::SensorFeed;

/// Lifecycle state shared by every autopilot director.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DirectorState {
    #[default]
    Inactive,
    Armed,
    Active,
}

impl DirectorState {
    pub fn label(&self) -> &'static str {
        match self {
            DirectorState::Inactive => "OFF",
            DirectorState::Armed => "ARM",
            DirectorState::Active => "ACT",
        }
    }
}

/// Notification hook invoked synchronously on a transition.
pub type DirectorHook = Box<dyn FnMut()>;

/// Trait for autopilot directors.
///
/// A supervisor arms, activates and deactivates directors, and calls
/// `update` once per control cycle after handing over fresh sensor data
/// through `ingest`.
pub trait PlaneDirector {
    /// Current lifecycle state.
    fn state(&self) -> DirectorState;

    fn arm(&mut self);

    fn activate(&mut self);

    /// `captured` tells the director that a downstream hold mode takes over,
    /// so actuation it engaged must be left alone.
    fn deactivate(&mut self, captured: bool);

    /// One control cycle.
    fn update(&mut self);

    /// Drain pending samples, last value wins.
    fn ingest(&mut self, feed: &mut dyn SensorFeed);

    fn set_on_arm(&mut self, hook: DirectorHook);

    fn set_on_activate(&mut self, hook: DirectorHook);

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }
}
