use crate::constants::{MAX_TICKS, TIME_STEP};
use crate::control::config::RocketConfig;
use crate::control::rocket::{FlightPhase, Rocket, StepOutcome};
use crate::errors::SimulationError;
use crate::telemetry_system::observer::FlightObserver;
use crate::telemetry_system::telemetry::Telemetry;

#[derive(Clone, Debug, PartialEq)]
pub struct MissionSettings {
    pub dt: f64,
    pub max_ticks: u64,
    /// Ticks to keep propagating after orbit insertion.
    pub orbit_ticks: u64,
    /// Keep and forward a log block every this many ticks. Phase changes
    /// are always logged.
    pub log_every: u64,
}

impl Default for MissionSettings {
    fn default() -> Self {
        MissionSettings {
            dt: TIME_STEP,
            max_ticks: MAX_TICKS,
            orbit_ticks: 0,
            log_every: 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    Orbit,
    TickLimit,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MissionReport {
    pub outcome: Outcome,
    pub ticks: u64,
    pub final_phase: FlightPhase,
    pub insertion_tick: Option<u64>,
}

/// Drives one rocket with a fixed time step.
pub struct Mission {
    pub name: String,
    rocket: Rocket,
    telemetry: Telemetry,
    ticks: u64,
    insertion_tick: Option<u64>,
}

impl Mission {
    pub fn new(name: String, config: RocketConfig) -> Result<Self, SimulationError> {
        Ok(Self::from_rocket(name, Rocket::new(config)?))
    }

    /// Resumes a flight from an existing rocket, e.g. one restored from a snapshot.
    /// A rocket that is already in orbit counts as inserted at tick 0.
    pub fn from_rocket(name: String, rocket: Rocket) -> Self {
        let mut telemetry = Telemetry::new(TIME_STEP, 1);
        telemetry.collect_data(&rocket, 0);
        let insertion_tick = (rocket.phase() == FlightPhase::Orbit).then_some(0);
        Mission {
            name,
            rocket,
            telemetry,
            ticks: 0,
            insertion_tick,
        }
    }

    pub fn rocket(&self) -> &Rocket {
        &self.rocket
    }

    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn step(
        &mut self,
        dt: f64,
        observer: &mut dyn FlightObserver,
    ) -> Result<StepOutcome, SimulationError> {
        let outcome = self.rocket.update(dt)?;
        self.ticks += 1;

        if let Some((_, FlightPhase::Orbit)) = outcome.transition {
            self.insertion_tick = Some(self.ticks);
        }

        observer.on_step(self.ticks, &outcome);
        if let Some(text) = self.telemetry.collect_data(&self.rocket, self.ticks) {
            observer.on_log(text);
        }
        Ok(outcome)
    }

    /// Runs until the rocket has held orbit for `orbit_ticks`, or the tick
    /// limit is reached. Fuel exhaustion surfaces as `SimulationError::NoFuel`
    /// on the first update after it happens.
    pub fn run(
        &mut self,
        settings: &MissionSettings,
        observer: &mut dyn FlightObserver,
    ) -> Result<MissionReport, SimulationError> {
        self.telemetry = Telemetry::new(settings.dt, settings.log_every);
        self.telemetry.collect_data(&self.rocket, self.ticks);

        while self.ticks < settings.max_ticks {
            self.step(settings.dt, observer)?;

            if let Some(insertion) = self.insertion_tick {
                if self.ticks - insertion >= settings.orbit_ticks {
                    return Ok(self.report(Outcome::Orbit));
                }
            }
        }

        Ok(self.report(Outcome::TickLimit))
    }

    fn report(&self, outcome: Outcome) -> MissionReport {
        MissionReport {
            outcome,
            ticks: self.ticks,
            final_phase: self.rocket.phase(),
            insertion_tick: self.insertion_tick,
        }
    }
}
