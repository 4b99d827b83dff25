// Earth
pub const EARTH_RADIUS: f64 = 6_371_000.0; // meters
pub const EARTH_MASS: f64 = 5.97e24; // kg
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67430e-11; // N⋅m²/kg²
pub const EARTH_ANGULAR_SPEED: f64 = 7.292_115_9e-5; // rad/s
pub const FREE_FALL_ACCELERATION: f64 = 9.81; // m/s²

// Rocket Constants
pub const DRY_MASS: f64 = 1_000.0; // kg
pub const INITIAL_FUEL_MASS: f64 = 6_000.0; // kg
pub const GAS_SPEED: f64 = 8_000.0; // m/s (exhaust velocity)
pub const LAUNCH_LATITUDE: f64 = 51.0; // degrees
pub const LAUNCH_PAD_OFFSET: f64 = 16_060.0; // m, subtracted from x and y of the launch point

// Flight profile
pub const TARGET_ALTITUDE: f64 = 200_000.0; // m
pub const TAKEOFF_THRUST_FACTOR: f64 = 4.0; // multiples of free-fall acceleration
pub const RAISING_THRUST_FACTOR: f64 = 5.0; // multiples of free-fall acceleration
pub const ALIGNMENT_TOLERANCE: f64 = 0.1; // rad
pub const MAX_TURN_PER_TICK: f64 = std::f64::consts::PI / 12.0; // rad

// Simulation Parameters
pub const TIME_STEP: f64 = 1.0; // s
pub const MAX_TICKS: u64 = 2_000;
pub const MAX_LOG_BLOCKS: usize = 1_000; // oldest blocks are dropped past this
