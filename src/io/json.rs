use std::io::{self, Write};

use serde::Serialize;

use crate::sim::{EventKind, Scenario, SimRun};

/// Summary statistics computed from a closed-loop capture run.
#[derive(Debug, Clone, Serialize)]
pub struct CaptureSummary {
    pub capture_time_s: Option<f64>,
    pub capture_altitude_ft: Option<f64>,
    pub hold_time_s: Option<f64>,
    pub final_altitude_ft: f64,
    pub final_error_ft: f64,
    pub overshoot_ft: f64,
    pub peak_vs_fpm: f64,
    pub max_pitch_ref_deg: f64,
    pub flight_time_s: f64,
}

impl CaptureSummary {
    /// Compute summary from a run. Errors are measured against the selected
    /// altitude.
    pub fn from_run(run: &SimRun, selected_altitude: f64) -> Self {
        let capture = run.capture_event();
        let hold = run.hold_event();

        let initial = run.trajectory.first().map_or(selected_altitude, |r| r.state.altitude());
        let climbing = initial < selected_altitude;
        let overshoot = run
            .trajectory
            .iter()
            .map(|r| {
                let past = r.state.altitude() - selected_altitude;
                if climbing { past } else { -past }
            })
            .fold(0.0_f64, f64::max);

        let peak_vs = run
            .trajectory
            .iter()
            .map(|r| r.vertical_speed.abs())
            .fold(0.0_f64, f64::max);

        let max_pitch_ref = run
            .trajectory
            .iter()
            .filter_map(|r| r.pitch_hold_ref)
            .map(f64::abs)
            .fold(0.0_f64, f64::max);

        let (final_altitude, flight_time) = run
            .trajectory
            .last()
            .map_or((initial, 0.0), |r| (r.state.altitude(), r.state.time));

        CaptureSummary {
            capture_time_s: capture.map(|e| e.time),
            capture_altitude_ft: capture.and_then(|e| match e.kind {
                EventKind::Captured { altitude } => Some(altitude),
                _ => None,
            }),
            hold_time_s: hold.map(|e| e.time),
            final_altitude_ft: final_altitude,
            final_error_ft: final_altitude - selected_altitude,
            overshoot_ft: overshoot,
            peak_vs_fpm: peak_vs,
            max_pitch_ref_deg: max_pitch_ref,
            flight_time_s: flight_time,
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    scenario: &'a Scenario,
    summary: &'a CaptureSummary,
}

/// Write scenario and summary as pretty JSON to a writer.
pub fn write_summary<W: Write>(
    writer: &mut W,
    scenario: &Scenario,
    summary: &CaptureSummary,
) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &Report { scenario, summary })?;
    writeln!(writer)
}

/// Write summary JSON to a file.
pub fn write_summary_file(path: &str, scenario: &Scenario, summary: &CaptureSummary) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, scenario, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{presets, simulate};

    #[test]
    fn summary_of_climb() {
        let scenario = presets::climb_to_5000();
        let run = simulate(&scenario).unwrap();
        let s = CaptureSummary::from_run(&run, scenario.selected_altitude_ft);
        assert_eq!(s.capture_altitude_ft, Some(5000.0));
        assert!(s.capture_time_s.unwrap() > 100.0);
        assert!(s.hold_time_s.unwrap() > s.capture_time_s.unwrap());
        assert!(s.final_error_ft.abs() < 10.0);
        assert!((s.peak_vs_fpm - 1000.0).abs() < 1.0);
        assert!(s.max_pitch_ref_deg > 6.0 && s.max_pitch_ref_deg < 8.0);
    }

    #[test]
    fn empty_run_summary() {
        let s = CaptureSummary::from_run(&SimRun::default(), 5000.0);
        assert_eq!(s.capture_time_s, None);
        assert_eq!(s.final_error_ft, 0.0);
        assert_eq!(s.flight_time_s, 0.0);
    }

    #[test]
    fn json_output_is_valid() {
        let scenario = presets::descent_to_3000();
        let run = simulate(&scenario).unwrap();
        let summary = CaptureSummary::from_run(&run, scenario.selected_altitude_ft);

        let mut buf = Vec::new();
        write_summary(&mut buf, &scenario, &summary).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["scenario"]["name"], "Descent to 3000");
        assert_eq!(value["summary"]["capture_altitude_ft"], 3000.0);
        assert!(value["summary"]["overshoot_ft"].as_f64().unwrap() < 10.0);
    }
}
