use serde::{Deserialize, Serialize};

use crate::constants::{
    EARTH_ANGULAR_SPEED, EARTH_MASS, EARTH_RADIUS, FREE_FALL_ACCELERATION, GRAVITATIONAL_CONSTANT,
};

/// Physical constants of the central body.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Earth {
    pub radius: f64,
    pub mass: f64,
    pub gravitational_constant: f64,
    pub angular_speed: f64,
    pub free_fall_acceleration: f64,
}

impl Default for Earth {
    fn default() -> Self {
        Earth {
            radius: EARTH_RADIUS,
            mass: EARTH_MASS,
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            angular_speed: EARTH_ANGULAR_SPEED,
            free_fall_acceleration: FREE_FALL_ACCELERATION,
        }
    }
}

impl Earth {
    pub fn mu(&self) -> f64 {
        self.gravitational_constant * self.mass
    }

    pub fn gravity_at_radius(&self, radius: f64) -> f64 {
        self.mu() / radius.powi(2)
    }

    pub fn circular_speed(&self, radius: f64) -> f64 {
        (self.mu() / radius).sqrt()
    }

    /// Eastward speed of a point on the surface due to Earth's rotation.
    pub fn surface_rotation_speed(&self) -> f64 {
        self.angular_speed * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_surface_gravity_matches_free_fall() {
        let earth = Earth::default();
        assert_abs_diff_eq!(earth.gravity_at_radius(earth.radius), 9.81, epsilon = 2e-2);
    }

    #[test]
    fn test_gravity_at_target_altitude() {
        let earth = Earth::default();
        let g = earth.gravity_at_radius(earth.radius + 200_000.0);
        assert_abs_diff_eq!(g, 9.23, epsilon = 1e-2);
    }

    #[test]
    fn test_circular_speed_low_orbit() {
        let earth = Earth::default();
        let v = earth.circular_speed(earth.radius + 200_000.0);
        assert_abs_diff_eq!(v, 7_790.0, epsilon = 20.0);
    }

    #[test]
    fn test_surface_rotation_speed() {
        let earth = Earth::default();
        assert_abs_diff_eq!(earth.surface_rotation_speed(), 464.6, epsilon = 0.5);
    }
}
