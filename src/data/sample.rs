// ---------------------------------------------------------------------------
// Air data / GNSS samples and the latest-value holder
// ---------------------------------------------------------------------------

/// A single scalar sample delivered by the sensor feed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AdcSample {
    /// GNSS ground speed, knots.
    GroundSpeed(f64),
    /// Indicated (barometric) altitude, feet.
    IndicatedAltitude(f64),
    /// Vertical speed, feet per minute.
    VerticalSpeed(f64),
}

impl AdcSample {
    pub fn value(&self) -> f64 {
        match *self {
            AdcSample::GroundSpeed(v)
            | AdcSample::IndicatedAltitude(v)
            | AdcSample::VerticalSpeed(v) => v,
        }
    }

    fn with_value(self, v: f64) -> Self {
        match self {
            AdcSample::GroundSpeed(_) => AdcSample::GroundSpeed(v),
            AdcSample::IndicatedAltitude(_) => AdcSample::IndicatedAltitude(v),
            AdcSample::VerticalSpeed(_) => AdcSample::VerticalSpeed(v),
        }
    }
}

/// Rounding applied to a sample before it is published.
///
/// `Precision::Decimals(0)` rounds to whole units, which is what every
/// feed consumed by the altitude capture director declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precision {
    #[default]
    Exact,
    Decimals(u8),
}

impl Precision {
    pub const WHOLE: Precision = Precision::Decimals(0);

    pub fn apply(self, v: f64) -> f64 {
        match self {
            Precision::Exact => v,
            Precision::Decimals(d) => {
                let scale = 10f64.powi(i32::from(d));
                (v * scale).round() / scale
            }
        }
    }

    pub fn round_sample(self, sample: AdcSample) -> AdcSample {
        sample.with_value(self.apply(sample.value()))
    }
}

/// Most recent value of each sensor channel. Last value wins; there is no
/// buffering and no staleness tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlightData {
    pub ground_speed: f64,       // kt
    pub indicated_altitude: f64, // ft
    pub vertical_speed: f64,     // ft/min
}

impl FlightData {
    pub fn apply(&mut self, sample: AdcSample) {
        match sample {
            AdcSample::GroundSpeed(v) => self.ground_speed = v,
            AdcSample::IndicatedAltitude(v) => self.indicated_altitude = v,
            AdcSample::VerticalSpeed(v) => self.vertical_speed = v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_precision_rounds_to_nearest() {
        assert_eq!(Precision::WHOLE.apply(4939.6), 4940.0);
        assert_eq!(Precision::WHOLE.apply(-600.4), -600.0);
        assert_eq!(Precision::Exact.apply(1.25), 1.25);
        assert!((Precision::Decimals(1).apply(1.26) - 1.3).abs() < 1e-12);
    }

    #[test]
    fn last_sample_wins() {
        let mut data = FlightData::default();
        data.apply(AdcSample::VerticalSpeed(-500.0));
        data.apply(AdcSample::IndicatedAltitude(4800.0));
        data.apply(AdcSample::VerticalSpeed(-650.0));
        assert_eq!(data.vertical_speed, -650.0);
        assert_eq!(data.indicated_altitude, 4800.0);
        assert_eq!(data.ground_speed, 0.0);
    }

    #[test]
    fn rounding_keeps_channel() {
        let s = Precision::WHOLE.round_sample(AdcSample::GroundSpeed(119.7));
        assert_eq!(s, AdcSample::GroundSpeed(120.0));
    }
}
