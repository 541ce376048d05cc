use std::io::{self, Write};

use crate::sim::FlightRecord;

/// Write trajectory data to CSV format.
///
/// Columns: time, distance_ft, altitude_ft, vs_fpm, pitch_deg,
///          pitch_ref_deg, director, alt_hold
///
/// `pitch_ref_deg` is empty until an autopilot mode has written one.
pub fn write_trajectory<W: Write>(writer: &mut W, trajectory: &[FlightRecord]) -> io::Result<()> {
    writeln!(
        writer,
        "time,distance_ft,altitude_ft,vs_fpm,pitch_deg,pitch_ref_deg,director,alt_hold"
    )?;

    for r in trajectory {
        let pitch_ref = r.pitch_hold_ref.map(|p| format!("{p:.3}")).unwrap_or_default();
        writeln!(
            writer,
            "{:.2},{:.1},{:.2},{:.1},{:.3},{},{},{}",
            r.state.time,
            r.state.pos.x,
            r.state.pos.y,
            r.vertical_speed,
            r.state.pitch,
            pitch_ref,
            r.director.label(),
            u8::from(r.altitude_hold),
        )?;
    }

    Ok(())
}

/// Write trajectory to a CSV file at the given path.
pub fn write_trajectory_file(path: &str, trajectory: &[FlightRecord]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_trajectory(&mut file, trajectory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autopilot::DirectorState;
    use crate::sim::FlightState;
    use nalgebra::Vector2;

    #[test]
    fn csv_output_has_header_and_rows() {
        let traj = vec![
            FlightRecord {
                state: FlightState { time: 0.0, pos: Vector2::new(0.0, 3000.0), pitch: 6.7 },
                vertical_speed: 1000.0,
                pitch_hold_ref: None,
                director: DirectorState::Armed,
                altitude_hold: false,
                captured_altitude: 0.0,
            },
            FlightRecord {
                state: FlightState { time: 0.1, pos: Vector2::new(20.3, 3001.7), pitch: 6.7 },
                vertical_speed: 1000.0,
                pitch_hold_ref: Some(-6.704),
                director: DirectorState::Active,
                altitude_hold: true,
                captured_altitude: 5000.0,
            },
        ];

        let mut buf = Vec::new();
        write_trajectory(&mut buf, &traj).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with("time,"));
        assert_eq!(lines.len(), 3); // header + 2 data rows
        assert_eq!(lines[1], "0.00,0.0,3000.00,1000.0,6.700,,ARM,0");
        assert!(lines[2].ends_with(",-6.704,ACT,1"));
    }
}
