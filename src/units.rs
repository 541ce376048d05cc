// ---------------------------------------------------------------------------
// Unit conversions used by the autopilot and the simulation
// ---------------------------------------------------------------------------

/// Feet in one international nautical mile (1852 m).
pub const FEET_PER_NMI: f64 = 1852.0 / 0.3048;

/// Seconds per minute, for vertical speeds expressed in ft/min.
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Ground distance covered per minute (ft/min) at a given speed in knots.
pub fn knots_to_feet_per_minute(knots: f64) -> f64 {
    knots / SECONDS_PER_MINUTE * FEET_PER_NMI
}

/// Feet per second to feet per minute.
pub fn fps_to_fpm(fps: f64) -> f64 {
    fps * SECONDS_PER_MINUTE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nautical_mile_in_feet() {
        assert!((FEET_PER_NMI - 6076.115).abs() < 1e-3);
    }

    #[test]
    fn one_twenty_knots_per_minute() {
        // 120 kt = 2 NM/min
        let fpm = knots_to_feet_per_minute(120.0);
        assert!((fpm - 2.0 * FEET_PER_NMI).abs() < 1e-9);
    }

    #[test]
    fn zero_speed_is_zero_distance() {
        assert_eq!(knots_to_feet_per_minute(0.0), 0.0);
    }
}
