use eframe::egui;
use egui_plot::{HLine, Line, Plot, PlotPoints};

use flight_director::autopilot::DirectorState;
use flight_director::sim::{self, presets, FlightRecord, Scenario};

fn main() -> eframe::Result {
    let name = std::env::args().nth(1).unwrap_or_else(|| "climb".to_string());
    let scenario = presets::by_name(&name).unwrap_or_else(|_| presets::climb_to_5000());
    let trajectory = match sim::simulate(&scenario) {
        Ok(run) => run.trajectory,
        Err(e) => {
            eprintln!("simulation failed: {e}");
            Vec::new()
        }
    };

    let app = CaptureViz { trajectory, scenario };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Altitude Capture", options, Box::new(|_| Ok(Box::new(app))))
}

struct CaptureViz {
    trajectory: Vec<FlightRecord>,
    scenario: Scenario,
}

fn mode_level(r: &FlightRecord) -> f64 {
    match r.director {
        DirectorState::Inactive if r.altitude_hold => 3.0,
        DirectorState::Inactive => 0.0,
        DirectorState::Armed => 1.0,
        DirectorState::Active => 2.0,
    }
}

impl eframe::App for CaptureViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let step = (self.trajectory.len() / 2000).max(1);
        let sampled: Vec<&FlightRecord> = self.trajectory.iter().step_by(step).collect();
        let selected = self.scenario.selected_altitude_ft;

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading(format!("Scenario: {}", self.scenario.name));
            let last = self.trajectory.last();
            ui.label(format!(
                "Selected: {:.0} ft  |  Final: {:.0} ft  |  GS: {:.0} kt  |  Flight: {:.0} s",
                selected,
                last.map_or(0.0, |r| r.state.altitude()),
                self.scenario.aircraft.ground_speed_kt,
                last.map_or(0.0, |r| r.state.time),
            ));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let half_w = available.x / 2.0 - 8.0;
            let half_h = available.y / 2.0 - 8.0;

            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label("Altitude (ft)");
                    let points: PlotPoints = sampled.iter().map(|r| [r.state.time, r.state.altitude()]).collect();
                    Plot::new("altitude")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Altitude", points));
                            plot_ui.hline(HLine::new("Selected", selected));
                        });
                });

                ui.vertical(|ui| {
                    ui.label("Vertical speed (fpm)");
                    let points: PlotPoints = sampled.iter().map(|r| [r.state.time, r.vertical_speed]).collect();
                    Plot::new("vs")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("VS", points));
                        });
                });
            });

            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label("Pitch (deg)");
                    let pitch: PlotPoints = sampled.iter().map(|r| [r.state.time, r.state.pitch]).collect();
                    let command: PlotPoints = sampled
                        .iter()
                        .filter_map(|r| r.pitch_hold_ref.map(|p| [r.state.time, -p]))
                        .collect();
                    Plot::new("pitch")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Pitch", pitch));
                            plot_ui.line(Line::new("Commanded", command));
                        });
                });

                ui.vertical(|ui| {
                    ui.label("Mode (0 off, 1 armed, 2 capture, 3 hold)");
                    let points: PlotPoints = sampled.iter().map(|r| [r.state.time, mode_level(r)]).collect();
                    Plot::new("mode")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Mode", points));
                        });
                });
            });
        });
    }
}
