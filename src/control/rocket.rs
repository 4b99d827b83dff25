use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::control::config::RocketConfig;
use crate::errors::SimulationError;
use crate::trajectory_system::kinematics::{
    accelerate, advance, burn_rate, free_fall_acceleration, impulse_fuel_cost, predicted_apogee,
};
use crate::utils::geometry::{direction, rotate_about, signed_angle};

/// Plain phase tag, ordered along the flight profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FlightPhase {
    Takeoff,
    Inertia,
    RaisingSpeed,
    Orbit,
    NoFuel,
}

impl FlightPhase {
    pub fn name(&self) -> &'static str {
        match self {
            FlightPhase::Takeoff => "TAKEOFF",
            FlightPhase::Inertia => "INERTIA",
            FlightPhase::RaisingSpeed => "RAISING_SPEED",
            FlightPhase::Orbit => "ORBIT",
            FlightPhase::NoFuel => "NO_FUEL",
        }
    }
}

#[derive(PartialEq, Debug, Clone, Copy, Serialize, Deserialize)]
pub enum RocketState {
    Takeoff,
    Inertia,
    RaisingSpeed,
    Orbit { insertion_radius: f64 },
    NoFuel { during: FlightPhase },
}

impl RocketState {
    pub fn phase(&self) -> FlightPhase {
        match self {
            RocketState::Takeoff => FlightPhase::Takeoff,
            RocketState::Inertia => FlightPhase::Inertia,
            RocketState::RaisingSpeed => FlightPhase::RaisingSpeed,
            RocketState::Orbit { .. } => FlightPhase::Orbit,
            RocketState::NoFuel { .. } => FlightPhase::NoFuel,
        }
    }
}

/// Rotation the viewer should apply to the vehicle model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientationDelta {
    pub angle: f64,
    pub axis: Vector3<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StepOutcome {
    pub position: Vector3<f64>,
    pub orientation: Option<OrientationDelta>,
    pub transition: Option<(FlightPhase, FlightPhase)>,
}

/// Serializable copy of the mutable part of a rocket.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RocketSnapshot {
    pub pos: Vector3<f64>,
    pub speed: Vector3<f64>,
    pub acceleration: f64,
    pub fuel_mass: f64,
    pub orientation: Vector3<f64>,
    pub state: RocketState,
}

impl RocketSnapshot {
    pub fn to_json(&self) -> Result<String, SimulationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, SimulationError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// A single-stage rocket flying the launch profile.
///
/// The flight state is read through accessors; `update` is the only way to
/// change it from outside the crate.
///
/// ```compile_fail
/// use orbit_simulation::{Rocket, RocketConfig};
///
/// let mut rocket = Rocket::new(RocketConfig::default()).unwrap();
/// rocket.raise_speed().unwrap();
/// ```
///
/// ```compile_fail
/// use orbit_simulation::{Rocket, RocketConfig};
///
/// let mut rocket = Rocket::new(RocketConfig::default()).unwrap();
/// rocket.fuel_mass = 1.0e9;
/// ```
#[derive(Clone, Debug)]
pub struct Rocket {
    pub(crate) pos: Vector3<f64>,
    pub(crate) speed: Vector3<f64>,
    pub(crate) acceleration: f64,
    pub(crate) acceleration_hat: Vector3<f64>,
    pub(crate) fuel_mass: f64,
    pub(crate) orientation: Vector3<f64>,
    state: RocketState,
    config: RocketConfig,
}

impl Rocket {
    pub fn new(config: RocketConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let pos = config.launch_position();
        let drift = direction(&pos.cross(&Vector3::y())).ok_or_else(|| {
            SimulationError::InvalidInput("launch point lies on the rotation axis".to_string())
        })?;
        let speed = drift * config.earth.surface_rotation_speed();
        let acceleration_hat = config.launch_direction();

        Ok(Rocket {
            pos,
            speed,
            acceleration: 0.0,
            acceleration_hat,
            fuel_mass: config.initial_fuel_mass,
            orientation: acceleration_hat,
            state: RocketState::Takeoff,
            config,
        })
    }

    pub fn from_snapshot(
        snapshot: RocketSnapshot,
        config: RocketConfig,
    ) -> Result<Self, SimulationError> {
        let mut rocket = Rocket::new(config)?;
        rocket.pos = snapshot.pos;
        rocket.speed = snapshot.speed;
        rocket.acceleration = snapshot.acceleration;
        rocket.fuel_mass = snapshot.fuel_mass;
        rocket.orientation = snapshot.orientation;
        rocket.state = snapshot.state;
        rocket.check_inputs()?;
        Ok(rocket)
    }

    pub fn snapshot(&self) -> RocketSnapshot {
        RocketSnapshot {
            pos: self.pos,
            speed: self.speed,
            acceleration: self.acceleration,
            fuel_mass: self.fuel_mass,
            orientation: self.orientation,
            state: self.state,
        }
    }

    pub fn state(&self) -> RocketState {
        self.state
    }

    pub fn phase(&self) -> FlightPhase {
        self.state.phase()
    }

    pub fn pos(&self) -> Vector3<f64> {
        self.pos
    }

    pub fn speed(&self) -> Vector3<f64> {
        self.speed
    }

    /// Magnitude of the thrust acceleration applied on the last tick.
    pub fn acceleration(&self) -> f64 {
        self.acceleration
    }

    pub fn acceleration_hat(&self) -> Vector3<f64> {
        self.acceleration_hat
    }

    pub fn fuel_mass(&self) -> f64 {
        self.fuel_mass
    }

    pub fn orientation(&self) -> Vector3<f64> {
        self.orientation
    }

    pub fn config(&self) -> &RocketConfig {
        &self.config
    }

    pub fn mass(&self) -> f64 {
        self.config.dry_mass + self.fuel_mass
    }

    pub fn dry_mass(&self) -> f64 {
        self.config.dry_mass
    }

    pub fn height(&self) -> f64 {
        self.pos.norm() - self.config.earth.radius
    }

    pub fn gravity_force(&self) -> f64 {
        free_fall_acceleration(&self.config.earth, &self.pos) * self.mass()
    }

    /// Local direction of orbital motion.
    pub fn prograde(&self) -> Option<Vector3<f64>> {
        direction(&self.pos.cross(&self.config.orbit_axis()))
    }

    pub fn update(&mut self, dt: f64) -> Result<StepOutcome, SimulationError> {
        if let RocketState::NoFuel { during } = self.state {
            return Err(SimulationError::NoFuel(during));
        }
        if !dt.is_finite() || dt <= 0.0 {
            return Err(SimulationError::InvalidInput(format!(
                "time step must be positive and finite, got {}",
                dt
            )));
        }
        self.check_inputs()?;

        let before = self.phase();
        let orientation = match self.state {
            RocketState::Takeoff => {
                self.update_takeoff(dt);
                None
            }
            RocketState::Inertia => self.update_inertia(dt)?,
            RocketState::RaisingSpeed => {
                self.update_raising_speed(dt)?;
                None
            }
            RocketState::Orbit { .. } => self.update_orbit(dt),
            RocketState::NoFuel { during } => return Err(SimulationError::NoFuel(during)),
        };
        let after = self.phase();

        Ok(StepOutcome {
            position: self.pos,
            orientation,
            transition: (before != after).then_some((before, after)),
        })
    }

    fn check_inputs(&self) -> Result<(), SimulationError> {
        if direction(&self.pos).is_none() {
            return Err(SimulationError::InvalidInput(format!(
                "degenerate position {:?}",
                self.pos
            )));
        }
        if !self.speed.iter().all(|c| c.is_finite()) {
            return Err(SimulationError::InvalidInput(format!(
                "non-finite velocity {:?}",
                self.speed
            )));
        }
        if !self.mass().is_finite() || self.mass() <= 0.0 {
            return Err(SimulationError::InvalidInput(format!(
                "mass must be positive, got {}",
                self.mass()
            )));
        }
        Ok(())
    }

    /// Exhaustion takes precedence over any other transition in the same tick.
    fn burn(&mut self, amount: f64) {
        self.fuel_mass -= amount;
        if self.fuel_mass <= 0.0 {
            self.state = RocketState::NoFuel {
                during: self.phase(),
            };
        }
    }

    fn transition(&mut self, next: RocketState) {
        if !matches!(self.state, RocketState::NoFuel { .. }) {
            self.state = next;
        }
    }

    fn update_takeoff(&mut self, dt: f64) {
        let acceleration =
            self.config.earth.free_fall_acceleration * self.config.takeoff_thrust_factor;
        let free_fall = free_fall_acceleration(&self.config.earth, &self.pos);
        let need_acceleration = acceleration + free_fall;

        self.burn(burn_rate(need_acceleration, self.mass(), self.config.gas_speed) * dt);

        self.acceleration = acceleration;
        accelerate(&mut self.speed, &self.acceleration_hat, acceleration, dt);
        advance(&mut self.pos, &self.speed, dt);

        if predicted_apogee(&self.pos, &self.speed, free_fall) >= self.config.target_radius() {
            self.transition(RocketState::Inertia);
        }
    }

    fn update_inertia(&mut self, dt: f64) -> Result<Option<OrientationDelta>, SimulationError> {
        self.acceleration = 0.0;

        let need_vec = self.pos.cross(&self.config.orbit_axis());
        let turn_axis = -self.config.orbit_axis();
        let diff = signed_angle(&self.orientation, &need_vec, &turn_axis);

        let mut delta = None;
        if diff.abs() > self.config.alignment_tolerance {
            let step = diff.abs().min(self.config.max_turn_per_tick).copysign(diff);
            delta = Some(self.turn(step, turn_axis));
        } else {
            self.transition(RocketState::RaisingSpeed);
        }

        let free_fall = free_fall_acceleration(&self.config.earth, &self.pos);
        accelerate(&mut self.speed, &self.acceleration_hat, -free_fall, dt);

        if self.speed.dot(&self.acceleration_hat) <= 0.0 {
            self.raise_speed()?;
            return Ok(delta);
        }

        advance(&mut self.pos, &self.speed, dt);
        Ok(delta)
    }

    fn update_raising_speed(&mut self, dt: f64) -> Result<(), SimulationError> {
        let need_vec = self.require_prograde()?;
        let acceleration =
            self.config.raising_thrust_factor * self.config.earth.free_fall_acceleration;

        self.burn(burn_rate(acceleration, self.mass(), self.config.gas_speed) * dt);

        self.acceleration = acceleration;
        accelerate(&mut self.speed, &need_vec, acceleration, dt);

        let free_fall = free_fall_acceleration(&self.config.earth, &self.pos);
        accelerate(&mut self.speed, &self.acceleration_hat, -free_fall, dt);

        advance(&mut self.pos, &self.speed, dt);

        if self.phase() != FlightPhase::NoFuel && self.height() > self.config.target_altitude {
            self.raise_speed()?;
        }
        Ok(())
    }

    fn update_orbit(&mut self, dt: f64) -> Option<OrientationDelta> {
        self.acceleration = 0.0;
        let need_vec = self.pos.cross(&self.config.orbit_axis());

        advance(&mut self.pos, &self.speed, dt);

        let free_fall = free_fall_acceleration(&self.config.earth, &self.pos);
        if let Some(radial) = direction(&self.pos) {
            accelerate(&mut self.speed, &radial, -free_fall, dt);
        }

        let turn_axis = -self.config.orbit_axis();
        let diff = signed_angle(&self.orientation, &need_vec, &turn_axis);
        if diff == 0.0 {
            return None;
        }
        Some(self.turn(diff, turn_axis))
    }

    fn turn(&mut self, angle: f64, axis: Vector3<f64>) -> OrientationDelta {
        self.orientation = rotate_about(&self.orientation, &axis, angle);
        OrientationDelta { angle, axis }
    }

    fn require_prograde(&self) -> Result<Vector3<f64>, SimulationError> {
        self.prograde().ok_or_else(|| {
            SimulationError::InvalidInput(format!(
                "position {:?} is parallel to the orbit axis",
                self.pos
            ))
        })
    }

    /// Circularization burn: replaces the velocity with the circular-orbit
    /// velocity at the current radius and enters orbit.
    ///
    /// When the burn costs more than the remaining fuel, the tank is emptied,
    /// velocity is left alone and the rocket is out of fuel instead.
    fn raise_speed(&mut self) -> Result<(), SimulationError> {
        if let RocketState::NoFuel { during } = self.state {
            return Err(SimulationError::NoFuel(during));
        }
        let prograde = self.require_prograde()?;
        let radius = self.pos.norm();
        let new_speed = prograde * self.config.earth.circular_speed(radius);

        let delta_v = new_speed.norm() - self.speed.norm();
        let cost = impulse_fuel_cost(self.mass(), delta_v, self.config.gas_speed);

        if cost > self.fuel_mass {
            let during = self.phase();
            self.fuel_mass = 0.0;
            self.state = RocketState::NoFuel { during };
            return Ok(());
        }

        self.fuel_mass -= cost;
        self.speed = new_speed;
        self.transition(RocketState::Orbit {
            insertion_radius: radius,
        });
        Ok(())
    }
}
