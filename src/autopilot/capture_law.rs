use super::config::AltCapConfig;
use crate::units::knots_to_feet_per_minute;

// ---------------------------------------------------------------------------
// Altitude capture control law
// ---------------------------------------------------------------------------

/// True when the aircraft is close enough to the selected altitude, given
/// its vertical speed, to start the capture.
pub fn within_deadband(selected: f64, indicated: f64, vertical_speed: f64, cfg: &AltCapConfig) -> bool {
    (selected - indicated).abs() <= (vertical_speed / cfg.deadband_divisor).abs()
}

/// Vertical speed used to latch the capture FPA.
///
/// Near-level rates are replaced by the nominal minimum, signed toward the
/// selected altitude.
pub fn capture_vertical_speed(vertical_speed: f64, indicated: f64, selected: f64, cfg: &AltCapConfig) -> f64 {
    if vertical_speed.abs() < cfg.min_capture_vs_fpm {
        if indicated - selected > 0.0 {
            -cfg.min_capture_vs_fpm
        } else {
            cfg.min_capture_vs_fpm
        }
    } else {
        vertical_speed
    }
}

/// Flight path angle (deg) for a climb/descent rate over a ground distance
/// rate, both per minute.
pub fn flight_path_angle(distance_per_minute: f64, vertical_speed: f64) -> f64 {
    (vertical_speed / distance_per_minute).atan().to_degrees()
}

/// FPA latched when capture activates.
pub fn capture_fpa(ground_speed: f64, vertical_speed: f64, indicated: f64, selected: f64, cfg: &AltCapConfig) -> f64 {
    let vs = capture_vertical_speed(vertical_speed, indicated, selected, cfg);
    flight_path_angle(knots_to_feet_per_minute(ground_speed), vs)
}

/// Fraction of the latched FPA still commanded at a given altitude error.
/// NaN propagates.
pub fn pitch_blend(deviation: f64, cfg: &AltCapConfig) -> f64 {
    (deviation.abs() / cfg.blend_distance_ft).clamp(0.0, 1.0)
}

/// Pitch target (deg, nose up positive) for the current altitude error.
///
/// The limit is taken as a magnitude. A NaN limit yields NaN.
pub fn pitch_target(initial_fpa: f64, deviation: f64, angle_of_attack: f64, cfg: &AltCapConfig) -> f64 {
    let limit = cfg.pitch_limit_deg.abs();
    if limit.is_nan() {
        return f64::NAN;
    }
    let desired = initial_fpa * pitch_blend(deviation, cfg);
    angle_of_attack + desired.clamp(-limit, limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> AltCapConfig {
        AltCapConfig::default()
    }

    #[test]
    fn deadband_scales_with_vertical_speed() {
        // 600 fpm -> 100 ft deadband
        assert!(within_deadband(5000.0, 4940.0, -600.0, &cfg()));
        assert!(within_deadband(5000.0, 4900.0, -600.0, &cfg()));
        assert!(!within_deadband(5000.0, 4800.0, -600.0, &cfg()));
        assert!(!within_deadband(5000.0, 4999.0, 0.0, &cfg()));
        assert!(within_deadband(5000.0, 5000.0, 0.0, &cfg()));
    }

    #[test]
    fn slow_climb_uses_nominal_rate_toward_target() {
        assert_eq!(capture_vertical_speed(50.0, 4900.0, 5000.0, &cfg()), 400.0);
        assert_eq!(capture_vertical_speed(50.0, 5100.0, 5000.0, &cfg()), -400.0);
        assert_eq!(capture_vertical_speed(-399.0, 4900.0, 5000.0, &cfg()), 400.0);
        assert_eq!(capture_vertical_speed(-400.0, 4900.0, 5000.0, &cfg()), -400.0);
        assert_eq!(capture_vertical_speed(1200.0, 4900.0, 5000.0, &cfg()), 1200.0);
    }

    #[test]
    fn on_target_exactly_counts_as_below() {
        assert_eq!(capture_vertical_speed(0.0, 5000.0, 5000.0, &cfg()), 400.0);
    }

    #[test]
    fn fpa_of_known_geometry() {
        // rise equal to run -> 45 deg
        assert!((flight_path_angle(1000.0, 1000.0) - 45.0).abs() < 1e-9);
        assert!((flight_path_angle(1000.0, -1000.0) + 45.0).abs() < 1e-9);
    }

    #[test]
    fn fpa_at_zero_ground_speed_is_vertical() {
        let fpa = capture_fpa(0.0, 800.0, 4000.0, 5000.0, &cfg());
        assert!((fpa - 90.0).abs() < 1e-9);
    }

    #[test]
    fn capture_fpa_typical_climb() {
        // 120 kt, 1000 fpm -> atan(1000 / 12152.23) ~ 4.70 deg
        let fpa = capture_fpa(120.0, 1000.0, 4000.0, 5000.0, &cfg());
        assert!((fpa - 4.704).abs() < 0.01, "got {fpa}");
    }

    #[test]
    fn blend_fades_inside_blend_distance() {
        assert_eq!(pitch_blend(0.0, &cfg()), 0.0);
        assert_eq!(pitch_blend(-50.0, &cfg()), 0.5);
        assert_eq!(pitch_blend(250.0, &cfg()), 1.0);
        assert!(pitch_blend(f64::NAN, &cfg()).is_nan());
    }

    #[test]
    fn on_target_pitch_is_angle_of_attack() {
        assert_eq!(pitch_target(20.0, 0.0, 2.5, &cfg()), 2.5);
    }

    #[test]
    fn fpa_contribution_is_limited() {
        assert_eq!(pitch_target(20.0, 500.0, 0.0, &cfg()), 6.0);
        assert_eq!(pitch_target(-20.0, 500.0, 1.0, &cfg()), -5.0);
    }

    #[test]
    fn unvalidated_limit_does_not_panic() {
        let negative = AltCapConfig { pitch_limit_deg: -6.0, ..cfg() };
        assert_eq!(pitch_target(20.0, 500.0, 0.0, &negative), 6.0);
        let nan = AltCapConfig { pitch_limit_deg: f64::NAN, ..cfg() };
        assert!(pitch_target(20.0, 500.0, 0.0, &nan).is_nan());
    }
}
