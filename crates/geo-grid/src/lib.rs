//! Geo Grid Library
//!
//! Planar kilometer grid over a bounded geographic region, used by both the
//! coverage engine and the traffic simulation:
//! - Equirectangular projection between lat/lon and planar km
//! - Fixed W×H cell grid derived from region bounds and cell size
//! - Altitude ladder (vertical bands of the coverage volume)
//! - Spherical geodesy helpers (haversine, bearing, destination point)

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod altitude;
pub mod geodesy;
pub mod grid;
pub mod projection;
pub mod region;

pub use altitude::{AltitudeLadder, FT_TO_KM};
pub use geodesy::{destination_point, haversine_km, initial_bearing_deg, EARTH_RADIUS_KM};
pub use grid::{CellBounds, Grid};
pub use projection::Projection;
pub use region::{MapBounds, RegionConfig};

#[derive(Error, Debug, PartialEq)]
pub enum GridError {
    #[error("Invalid region bounds: {0}")]
    InvalidBounds(String),
    #[error("Invalid cell size: {0} km")]
    InvalidCellSize(f64),
    #[error("Invalid altitude ladder: {0}")]
    InvalidLadder(String),
}

pub type Result<T> = std::result::Result<T, GridError>;

/// Geographic position in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Planar position in km, relative to the region's north-west corner
/// (x grows east, y grows south)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
}

impl PlanarPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_sq(&self, other: &PlanarPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(&self, other: &PlanarPoint) -> f64 {
        self.distance_sq(other).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planar_distance() {
        let a = PlanarPoint::new(0.0, 0.0);
        let b = PlanarPoint::new(3.0, 4.0);
        assert_eq!(a.distance_sq(&b), 25.0);
        assert_eq!(a.distance(&b), 5.0);
    }
}
