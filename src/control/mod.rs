pub mod config;
pub mod earth;
pub mod mission;
pub mod rocket;
