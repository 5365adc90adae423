//! Traffic Simulation Library
//!
//! Full-day air traffic over the active airports, flown tick by tick through
//! the coverage volume:
//! - Daily flight plan generation scaled by airport passenger volume
//! - Explicit flight phase state machine with a pure transition function
//! - Great-circle kinematics with continuous re-homing on the destination
//! - Per-aircraft exposure accounting against the coverage detail grid
//! - Ambient wind field (not consumed by the kinematics)

use thiserror::Error;

pub mod aircraft;
pub mod clock;
pub mod config;
pub mod engine;
pub mod kinematics;
pub mod phase;
pub mod plan;
pub mod report;
pub mod wind;

pub use aircraft::{Aircraft, Exposure, FlightPhase, Position};
pub use clock::{SimulationClock, SECONDS_IN_DAY};
pub use config::TrafficConfig;
pub use engine::SimulationEngine;
pub use phase::{next_phase, PhaseInputs};
pub use plan::{daily_flight_count, generate_daily_plan};
pub use report::{AircraftReport, FleetSummary};
pub use wind::{WindField, WindVector};

#[derive(Error, Debug, PartialEq)]
pub enum SimError {
    #[error("Invalid traffic configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SimError>;
