//! Radar Coverage Library
//!
//! Sensor network modeling and coverage evaluation over the region grid:
//! - Static per-type sensor table (range, cone of silence)
//! - Airport catalog and airport-derived sensors
//! - Coverage engine producing the aggregate status grid and the
//!   per-cell, per-altitude detail grid
//! - Cell coverage reports and country labelling
//! - JSON interchange for user-placed sensors

use thiserror::Error;

pub mod airport;
pub mod country;
pub mod coverage;
pub mod interchange;
pub mod network;
pub mod report;
pub mod sensor;

pub use airport::{derive_airport_sensors, Airport, AirportCatalog};
pub use country::{country_grid, CountryGrid, MAX_LAND_DISTANCE_KM};
pub use coverage::{
    project_sensors, AltitudeSelection, CoverageEngine, CoverageGrid, CoverageResult,
    CoverageStatus, DetailGrid, StatusCounts,
};
pub use interchange::{export_user_sensors, import_user_sensors, load_user_sensors, save_user_sensors, SensorRecord};
pub use network::SensorNetwork;
pub use report::{AltitudeCoverage, CellReport};
pub use sensor::{Sensor, SensorCatalog, SensorSpec, SensorType};

#[derive(Error, Debug)]
pub enum CoverageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown sensor type: {0}")]
    UnknownSensorType(String),
    #[error("Invalid record {id}: {reason}")]
    InvalidRecord { id: String, reason: String },
    #[error("Altitude index {index} outside ladder of {bands} bands")]
    AltitudeIndexOutOfRange { index: usize, bands: usize },
    #[error("Sensor not found: {0}")]
    SensorNotFound(String),
}

pub type Result<T> = std::result::Result<T, CoverageError>;

/// Validate latitude is in valid range
pub(crate) fn is_valid_latitude(lat: f64) -> bool {
    lat.is_finite() && (-90.0..=90.0).contains(&lat)
}

/// Validate longitude is in valid range
pub(crate) fn is_valid_longitude(lon: f64) -> bool {
    lon.is_finite() && (-180.0..=180.0).contains(&lon)
}
