use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use flight_director::autopilot::DirectorState;
use flight_director::io::{self, CaptureSummary};
use flight_director::sim::{self, presets, EventKind, Scenario};

/// Fly an altitude capture scenario in closed loop and print a report.
#[derive(Parser)]
#[command(name = "flight-director")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Scenario JSON file (overrides --preset)
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Built-in scenario: climb, descent, level-off
    #[arg(short, long, default_value = "climb")]
    preset: String,

    /// Write the trajectory as CSV
    #[arg(long)]
    csv: Option<String>,

    /// Write scenario and summary as JSON
    #[arg(long)]
    json: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let scenario = match &cli.scenario {
        Some(path) => Scenario::from_json_file(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => presets::by_name(&cli.preset)
            .with_context(|| format!("available presets: {}", presets::NAMES.join(", ")))?,
    };

    let run = sim::simulate(&scenario).context("running simulation")?;
    let summary = CaptureSummary::from_run(&run, scenario.selected_altitude_ft);

    if let Some(path) = &cli.csv {
        io::write_trajectory_file(path, &run.trajectory).with_context(|| format!("writing {path}"))?;
    }
    if let Some(path) = &cli.json {
        io::write_summary_file(path, &scenario, &summary).with_context(|| format!("writing {path}"))?;
    }

    print_report(&scenario, &run, &summary);
    Ok(())
}

fn print_report(scenario: &Scenario, run: &sim::SimRun, summary: &CaptureSummary) {
    let ac = &scenario.aircraft;

    println!();
    println!("====================================================================");
    println!("  ALTITUDE CAPTURE — {}", scenario.name);
    println!("====================================================================");
    println!();
    println!("  Setup");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Start alt:     {:>8.0} ft    Selected:     {:>8.0} ft",
        ac.initial_altitude_ft, scenario.selected_altitude_ft
    );
    println!(
        "  Vert speed:    {:>8.0} fpm   Ground speed: {:>8.0} kt",
        ac.initial_vs_fpm, ac.ground_speed_kt
    );
    println!(
        "  AoA:           {:>8.1} deg   Cycle:        {:>8.2} s",
        ac.aoa_deg, scenario.sim.dt
    );
    println!();

    println!("  Events");
    println!("  ──────────────────────────────────────────────────────────────────");
    for e in &run.events {
        let what = match &e.kind {
            EventKind::Armed => "ALTS ARMED".to_string(),
            EventKind::Captured { altitude } => format!("ALT CAPTURE {altitude:.0} ft"),
            EventKind::HoldEngaged => "ALT HOLD".to_string(),
            EventKind::Disengaged => "DISENGAGED".to_string(),
            EventKind::Custom(s) => s.clone(),
        };
        println!(
            "  t={:>6.1}s   alt={:>8.0}ft   vs={:>6.0}fpm   {}",
            e.time,
            e.record.state.altitude(),
            e.record.vertical_speed,
            what
        );
    }
    println!();

    println!("  Summary");
    println!("  ──────────────────────────────────────────────────────────────────");
    match summary.capture_time_s {
        Some(t) => println!("  Capture at:    {:>8.1} s", t),
        None => println!("  Capture at:         --  (never entered the deadband)"),
    }
    println!("  Final alt:     {:>8.1} ft  (error {:+.1} ft)", summary.final_altitude_ft, summary.final_error_ft);
    println!("  Overshoot:     {:>8.1} ft", summary.overshoot_ft);
    println!("  Peak |VS|:     {:>8.0} fpm", summary.peak_vs_fpm);
    println!("  Max |pitch|:   {:>8.2} deg", summary.max_pitch_ref_deg);
    println!();

    println!("  Trajectory");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>7}  {:>9}  {:>8}  {:>8}  {:>9}  {:>5}",
        "t (s)", "alt (ft)", "vs (fpm)", "pitch", "pitch ref", "mode"
    );
    println!("  {}", "─".repeat(58));

    let sample_interval = (run.trajectory.len() / 30).max(1);
    for (i, r) in run.trajectory.iter().enumerate() {
        if i % sample_interval != 0 && i != run.trajectory.len() - 1 {
            continue;
        }
        let pitch_ref = r.pitch_hold_ref.map_or_else(|| "--".to_string(), |p| format!("{p:.2}"));
        let mode = if r.director == DirectorState::Inactive && r.altitude_hold {
            "HOLD"
        } else {
            r.director.label()
        };
        println!(
            "  {:>7.1}  {:>9.1}  {:>8.0}  {:>8.2}  {:>9}  {:>5}",
            r.state.time,
            r.state.altitude(),
            r.vertical_speed,
            r.state.pitch,
            pitch_ref,
            mode
        );
    }

    println!();
    println!("  Simulation: {} records, dt={} s", run.trajectory.len(), scenario.sim.dt);
    println!("====================================================================");
    println!();
}
