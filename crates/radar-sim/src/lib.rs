//! Radar Coverage Simulator
//!
//! Ties the workspace together for one run:
//! 1. Load the airport catalog and select the active countries
//! 2. Build the sensor network (airport-derived + user sensors)
//! 3. Compute coverage over the selected altitude bands
//! 4. Fly a simulated day of traffic through the coverage volume
//! 5. Report coverage statistics and per-flight exposure

pub mod config;
pub mod layer;
pub mod pipeline;

pub use config::{RunConfig, SensorPlacement};
pub use layer::coverage_layer;
pub use pipeline::{run, RunOutput, RunReport};
