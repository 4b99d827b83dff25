use std::fs;
use std::path::Path;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::{
    ALIGNMENT_TOLERANCE, DRY_MASS, GAS_SPEED, INITIAL_FUEL_MASS, LAUNCH_LATITUDE,
    LAUNCH_PAD_OFFSET, MAX_TURN_PER_TICK, RAISING_THRUST_FACTOR, TAKEOFF_THRUST_FACTOR,
    TARGET_ALTITUDE,
};
use crate::control::earth::Earth;
use crate::errors::SimulationError;

/// Everything a rocket needs to know about itself and the body it launches from.
///
/// Missing keys in a TOML file fall back to the defaults below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RocketConfig {
    pub earth: Earth,
    pub dry_mass: f64,
    pub initial_fuel_mass: f64,
    pub gas_speed: f64,
    /// Degrees. Sets the launch point, the thrust axis and the orbit plane.
    pub launch_latitude: f64,
    pub launch_pad_offset: f64,
    pub target_altitude: f64,
    pub takeoff_thrust_factor: f64,
    pub raising_thrust_factor: f64,
    pub alignment_tolerance: f64,
    pub max_turn_per_tick: f64,
}

impl Default for RocketConfig {
    fn default() -> Self {
        RocketConfig {
            earth: Earth::default(),
            dry_mass: DRY_MASS,
            initial_fuel_mass: INITIAL_FUEL_MASS,
            gas_speed: GAS_SPEED,
            launch_latitude: LAUNCH_LATITUDE,
            launch_pad_offset: LAUNCH_PAD_OFFSET,
            target_altitude: TARGET_ALTITUDE,
            takeoff_thrust_factor: TAKEOFF_THRUST_FACTOR,
            raising_thrust_factor: RAISING_THRUST_FACTOR,
            alignment_tolerance: ALIGNMENT_TOLERANCE,
            max_turn_per_tick: MAX_TURN_PER_TICK,
        }
    }
}

impl RocketConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, SimulationError> {
        let config: RocketConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SimulationError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        let positive = [
            ("earth.radius", self.earth.radius),
            ("earth.mass", self.earth.mass),
            ("earth.gravitational_constant", self.earth.gravitational_constant),
            ("earth.free_fall_acceleration", self.earth.free_fall_acceleration),
            ("dry_mass", self.dry_mass),
            ("gas_speed", self.gas_speed),
            ("target_altitude", self.target_altitude),
            ("takeoff_thrust_factor", self.takeoff_thrust_factor),
            ("raising_thrust_factor", self.raising_thrust_factor),
            ("alignment_tolerance", self.alignment_tolerance),
            ("max_turn_per_tick", self.max_turn_per_tick),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimulationError::InvalidInput(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )));
            }
        }

        if !self.initial_fuel_mass.is_finite() || self.initial_fuel_mass < 0.0 {
            return Err(SimulationError::InvalidInput(format!(
                "initial_fuel_mass must be non-negative, got {}",
                self.initial_fuel_mass
            )));
        }
        if !self.earth.angular_speed.is_finite() || !self.launch_pad_offset.is_finite() {
            return Err(SimulationError::InvalidInput(
                "angular_speed and launch_pad_offset must be finite".to_string(),
            ));
        }
        if !(0.0..90.0).contains(&self.launch_latitude) || self.launch_latitude == 0.0 {
            return Err(SimulationError::InvalidInput(format!(
                "launch_latitude must lie strictly between 0 and 90 degrees, got {}",
                self.launch_latitude
            )));
        }
        if self.launch_position().norm() <= 0.0 {
            return Err(SimulationError::InvalidInput(
                "launch_pad_offset places the launch point at Earth's centre".to_string(),
            ));
        }

        Ok(())
    }

    /// Unit thrust axis used during takeoff.
    pub fn launch_direction(&self) -> Vector3<f64> {
        let latitude = self.launch_latitude.to_radians();
        Vector3::new(latitude.cos(), latitude.sin(), 0.0)
    }

    /// Normal of the orbit plane; prograde is `pos × orbit_axis`.
    pub fn orbit_axis(&self) -> Vector3<f64> {
        let latitude = self.launch_latitude.to_radians();
        Vector3::new(-latitude.sin(), latitude.cos(), 0.0)
    }

    pub fn launch_position(&self) -> Vector3<f64> {
        self.launch_direction() * self.earth.radius
            - Vector3::new(self.launch_pad_offset, self.launch_pad_offset, 0.0)
    }

    pub fn target_radius(&self) -> f64 {
        self.earth.radius + self.target_altitude
    }

    pub fn initial_mass(&self) -> f64 {
        self.dry_mass + self.initial_fuel_mass
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_config_is_valid() {
        let config = RocketConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.initial_mass(), 7_000.0);
        assert_eq!(config.target_radius(), 6_571_000.0);
    }

    #[test]
    fn test_launch_axes_are_orthonormal() {
        let config = RocketConfig::default();
        let direction = config.launch_direction();
        let axis = config.orbit_axis();
        assert_relative_eq!(direction.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(axis.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(direction.dot(&axis), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_launch_position_below_surface_by_pad_offset() {
        let config = RocketConfig::default();
        let height = config.launch_position().norm() - config.earth.radius;
        assert!(height < 0.0 && height > -25_000.0, "height was {}", height);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = RocketConfig::from_toml_str(
            r#"
            initial_fuel_mass = 4500.0
            target_altitude = 250000.0

            [earth]
            free_fall_acceleration = 9.8
            "#,
        )
        .expect("partial config should parse");

        assert_eq!(config.initial_fuel_mass, 4_500.0);
        assert_eq!(config.target_altitude, 250_000.0);
        assert_eq!(config.earth.free_fall_acceleration, 9.8);
        assert_eq!(config.earth.radius, Earth::default().radius);
        assert_eq!(config.dry_mass, DRY_MASS);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let err = RocketConfig::from_toml_str("gas_speed = 0.0").unwrap_err();
        assert!(matches!(err, SimulationError::InvalidInput(_)));

        let err = RocketConfig::from_toml_str("launch_latitude = 95.0").unwrap_err();
        assert!(matches!(err, SimulationError::InvalidInput(_)));

        let err = RocketConfig::from_toml_str("initial_fuel_mass = -1.0").unwrap_err();
        assert!(matches!(err, SimulationError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = RocketConfig::from_toml_str("dry_mass = \"heavy\"").unwrap_err();
        assert!(matches!(err, SimulationError::ConfigParse(_)));
    }
}
