use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use orbit_simulation::*;

/// Launch a rocket from Earth's surface into a circular orbit.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// TOML file overriding the default rocket configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Time step in seconds
    #[arg(long, default_value_t = TIME_STEP)]
    dt: f64,

    /// Give up after this many ticks
    #[arg(long, default_value_t = MAX_TICKS)]
    max_ticks: u64,

    /// Keep propagating for this many ticks once in orbit
    #[arg(long, default_value_t = 0)]
    orbit_ticks: u64,

    /// Print a status block every this many ticks
    #[arg(long, default_value_t = 1)]
    log_every: u64,

    /// Only print the summary
    #[arg(short, long)]
    quiet: bool,

    /// Write the final rocket state as JSON
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => RocketConfig::load(path),
        None => Ok(RocketConfig::default()),
    };
    let mission = config.and_then(|config| Mission::new("Earth Orbit".to_string(), config));
    let mut mission = match mission {
        Ok(mission) => mission,
        Err(e) => {
            eprintln!("Error setting up simulation: {}", e);
            return ExitCode::from(2);
        }
    };

    let settings = MissionSettings {
        dt: args.dt,
        max_ticks: args.max_ticks,
        orbit_ticks: args.orbit_ticks,
        log_every: args.log_every,
    };
    let mut trail = TrailRecorder::new();
    let mut console = ConsoleObserver {
        every: args.log_every,
    };
    let mut observer = Fanout::new().with(&mut trail);
    if !args.quiet {
        observer = observer.with(&mut console);
    }

    let result = mission.run(&settings, &mut observer);
    drop(observer);

    println!("{}", mission.telemetry().summary());
    println!(
        "Trail points: {}, path length: {:.1} km",
        trail.trail.len(),
        trail.trail_length() / 1000.0
    );

    if let Some(path) = &args.snapshot {
        let written = mission
            .rocket()
            .snapshot()
            .to_json()
            .and_then(|json| fs::write(path, json).map_err(SimulationError::from));
        if let Err(e) = written {
            eprintln!("Error writing snapshot: {}", e);
        }
    }

    match result {
        Ok(report) => {
            match report.outcome {
                Outcome::Orbit => println!(
                    "Rocket is in orbit at {:.1} km after {} ticks.",
                    mission.rocket().height() / 1000.0,
                    report.ticks
                ),
                Outcome::TickLimit => println!(
                    "Tick limit reached in {} after {} ticks.",
                    report.final_phase.name(),
                    report.ticks
                ),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("Error during simulation step: {}", e);
            ExitCode::FAILURE
        }
    }
}
