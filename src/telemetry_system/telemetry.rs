use std::collections::VecDeque;

use nalgebra::Vector3;

use crate::constants::MAX_LOG_BLOCKS;
use crate::control::rocket::{FlightPhase, Rocket};

fn format_vector3d(vec: &Vector3<f64>, precision: usize) -> String {
    format!(
        "x = {:.precision$} m, y = {:.precision$} m, z = {:.precision$} m",
        vec.x,
        vec.y,
        vec.z,
        precision = precision
    )
}

fn format_time(elapsed_time: f64) -> String {
    if elapsed_time >= 3600.0 {
        let hours = (elapsed_time / 3600.0).floor();
        let minutes = ((elapsed_time % 3600.0) / 60.0).floor();
        let seconds = elapsed_time % 60.0;
        format!("{:.0}h {:.0}m {:.2}s", hours, minutes, seconds)
    } else if elapsed_time >= 60.0 {
        let minutes = (elapsed_time / 60.0).floor();
        let seconds = elapsed_time % 60.0;
        format!("{:.0}m {:.2}s", minutes, seconds)
    } else {
        format!("{:.2}s", elapsed_time)
    }
}

/// Human-readable status block for one tick.
pub fn render_log(rocket: &Rocket, ticks: u64) -> String {
    let status = rocket.phase().name();
    format!(
        "ROCKET LAUNCH | STATUS: {}\n\
         ROCKET INFO:\n\
         MASS: {:.2} kg = {:.2} + {:.2}\n\
         POS: {} (HEIGHT: {:.3} km)\n\
         SPEED: {:.2} m/s = ({:.2}, {:.2}, {:.2})\n\
         ACCELERATION: {:.2} m/s²\n\
         STATUS: {}\n\
         TIME: {}",
        status,
        rocket.mass(),
        rocket.dry_mass(),
        rocket.fuel_mass,
        format_vector3d(&rocket.pos, 1),
        rocket.height() / 1000.0,
        rocket.speed.norm(),
        rocket.speed.x,
        rocket.speed.y,
        rocket.speed.z,
        rocket.acceleration,
        status,
        ticks
    )
}

/// Flight statistics plus the most recent log blocks.
///
/// A block is kept every `log_every` ticks and on every phase change, up to
/// `MAX_LOG_BLOCKS`; statistics are updated on every tick.
pub struct Telemetry {
    log: VecDeque<String>,
    log_every: u64,
    max_speed: f64,
    max_height: f64,
    min_fuel: f64,
    phase_ticks: Vec<(FlightPhase, u64)>,
    time_step: f64,
    ticks: u64,
}

impl Telemetry {
    pub fn new(time_step: f64, log_every: u64) -> Self {
        Telemetry {
            log: VecDeque::new(),
            log_every: log_every.max(1),
            max_speed: 0.0,
            max_height: f64::MIN,
            min_fuel: f64::MAX,
            phase_ticks: Vec::new(),
            time_step,
            ticks: 0,
        }
    }

    /// Records one tick. Returns the rendered block when it was kept.
    pub fn collect_data(&mut self, rocket: &Rocket, ticks: u64) -> Option<&str> {
        self.ticks = ticks;
        self.max_speed = self.max_speed.max(rocket.speed.norm());
        self.max_height = self.max_height.max(rocket.height());
        self.min_fuel = self.min_fuel.min(rocket.fuel_mass);

        let phase = rocket.phase();
        let phase_changed = self.phase_ticks.last().map(|(last, _)| *last) != Some(phase);
        if phase_changed {
            self.phase_ticks.push((phase, ticks));
        }

        if !phase_changed && ticks % self.log_every != 0 {
            return None;
        }
        if self.log.len() == MAX_LOG_BLOCKS {
            self.log.pop_front();
        }
        self.log.push_back(render_log(rocket, ticks));
        self.log.back().map(String::as_str)
    }

    /// Kept log blocks, oldest first.
    pub fn log(&self) -> &VecDeque<String> {
        &self.log
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn max_height(&self) -> f64 {
        self.max_height
    }

    pub fn min_fuel(&self) -> f64 {
        self.min_fuel
    }

    /// Phases in the order they were first seen, with the tick of entry.
    pub fn phase_ticks(&self) -> &[(FlightPhase, u64)] {
        &self.phase_ticks
    }

    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str("--- Flight Summary ---\n");
        out.push_str(&format!(
            "Flight Time: {} ({} ticks)\n",
            format_time(self.ticks as f64 * self.time_step),
            self.ticks
        ));
        out.push_str(&format!("Max Speed: {:.2} m/s\n", self.max_speed));
        out.push_str(&format!("Max Height: {:.2} km\n", self.max_height / 1000.0));
        out.push_str(&format!("Min Fuel: {:.2} kg\n", self.min_fuel));
        out.push_str("--- Phase Transitions ---\n");
        for (phase, tick) in &self.phase_ticks {
            out.push_str(&format!(
                "{} reached at: {}\n",
                phase.name(),
                format_time(*tick as f64 * self.time_step)
            ));
        }
        out
    }
}
