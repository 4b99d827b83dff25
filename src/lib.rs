pub mod constants;
pub mod control;
pub mod errors;
pub mod telemetry_system;
pub mod trajectory_system;
pub mod utils;

pub use constants::*;
pub use control::config::RocketConfig;
pub use control::earth::Earth;
pub use control::mission::{Mission, MissionReport, MissionSettings, Outcome};
pub use control::rocket::{
    FlightPhase, OrientationDelta, Rocket, RocketSnapshot, RocketState, StepOutcome,
};
pub use errors::SimulationError;

// Re-export commonly used items from telemetry_system
pub use telemetry_system::observer::{ConsoleObserver, Fanout, FlightObserver, TrailRecorder};
pub use telemetry_system::telemetry::{render_log, Telemetry};
