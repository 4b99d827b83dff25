use thiserror::Error;

use crate::control::rocket::FlightPhase;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("No fuel: propellant exhausted during {0:?}")]
    NoFuel(FlightPhase),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

impl SimulationError {
    /// True for the physical failure that ends a flight, as opposed to bad input.
    pub fn is_fatal_flight_failure(&self) -> bool {
        matches!(self, SimulationError::NoFuel(_))
    }
}
