use nalgebra::Vector3;

use crate::control::earth::Earth;

/// Magnitude of gravitational acceleration at `pos`.
///
/// This is the gravitational force on the vehicle divided by its mass, so the
/// mass cancels out.
pub fn free_fall_acceleration(earth: &Earth, pos: &Vector3<f64>) -> f64 {
    earth.gravity_at_radius(pos.norm())
}

/// Explicit Euler velocity step.
pub fn accelerate(speed: &mut Vector3<f64>, direction: &Vector3<f64>, acceleration: f64, dt: f64) {
    *speed += direction * (acceleration * dt);
}

/// Explicit Euler position step.
pub fn advance(pos: &mut Vector3<f64>, speed: &Vector3<f64>, dt: f64) {
    *pos += speed * dt;
}

/// Highest radius reached if the vehicle stopped thrusting now and decelerated
/// at a constant `free_fall`.
pub fn predicted_apogee(pos: &Vector3<f64>, speed: &Vector3<f64>, free_fall: f64) -> f64 {
    pos.norm() + speed.norm_squared() / (2.0 * free_fall)
}

/// Propellant mass spent per second to hold `acceleration` on a vehicle of `mass`.
pub fn burn_rate(acceleration: f64, mass: f64, gas_speed: f64) -> f64 {
    acceleration * mass / gas_speed
}

/// Propellant mass for an instantaneous change of speed `delta_v`.
///
/// Negative `delta_v` yields a negative cost, bounded by the same relation.
pub fn impulse_fuel_cost(mass: f64, delta_v: f64, gas_speed: f64) -> f64 {
    mass * (1.0 - (-delta_v / gas_speed).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_free_fall_independent_of_direction() {
        let earth = Earth::default();
        let a = free_fall_acceleration(&earth, &Vector3::new(earth.radius, 0.0, 0.0));
        let b = free_fall_acceleration(&earth, &Vector3::new(0.0, 0.0, -earth.radius));
        assert_relative_eq!(a, b);
        assert!(a > 9.8 && a < 9.83);
    }

    #[test]
    fn test_euler_steps() {
        let mut speed = Vector3::new(1.0, 0.0, 0.0);
        accelerate(&mut speed, &Vector3::y(), 2.0, 0.5);
        assert_eq!(speed, Vector3::new(1.0, 1.0, 0.0));

        let mut pos = Vector3::zeros();
        advance(&mut pos, &speed, 2.0);
        assert_eq!(pos, Vector3::new(2.0, 2.0, 0.0));
    }

    #[test]
    fn test_predicted_apogee_at_rest() {
        let pos = Vector3::new(0.0, 7_000_000.0, 0.0);
        assert_relative_eq!(predicted_apogee(&pos, &Vector3::zeros(), 9.81), 7_000_000.0);

        let speed = Vector3::new(0.0, 981.0, 0.0);
        assert_relative_eq!(
            predicted_apogee(&pos, &speed, 9.81),
            7_000_000.0 + 49_050.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_impulse_fuel_cost() {
        assert_relative_eq!(impulse_fuel_cost(5_000.0, 0.0, 8_000.0), 0.0);

        let cost = impulse_fuel_cost(5_000.0, 1_000.0, 8_000.0);
        assert_relative_eq!(cost, 5_000.0 * (1.0 - (-0.125f64).exp()), epsilon = 1e-9);

        let credit = impulse_fuel_cost(5_000.0, -1_000.0, 8_000.0);
        assert!(credit < 0.0);
        assert!(credit.abs() > cost, "braking credit follows the exponential, not a mirror");
    }

    #[test]
    fn test_burn_rate() {
        assert_relative_eq!(burn_rate(8.0, 1_000.0, 8_000.0), 1.0);
    }
}
