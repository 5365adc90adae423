//! Region configuration
//!
//! Bounding box, latitude scale and cell size for the coverage grid.

use crate::{GridError, Result};
use serde::{Deserialize, Serialize};

/// Kilometers per degree of latitude
pub const KM_PER_DEG_LAT: f64 = 111.32;

/// Default grid resolution in km
pub const DEFAULT_CELL_SIZE_KM: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl MapBounds {
    /// Europe, from the Canaries/Azores edge to the Caspian
    pub fn europe() -> Self {
        Self {
            min_lat: 35.0,
            max_lat: 70.0,
            min_lon: -25.0,
            max_lon: 45.0,
        }
    }

    pub fn mean_lat(&self) -> f64 {
        (self.min_lat + self.max_lat) / 2.0
    }

    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat) && (self.min_lon..=self.max_lon).contains(&lon)
    }

    pub fn validate(&self) -> Result<()> {
        let all_finite = [self.min_lat, self.max_lat, self.min_lon, self.max_lon]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(GridError::InvalidBounds("non-finite coordinate".to_string()));
        }
        if self.min_lat >= self.max_lat {
            return Err(GridError::InvalidBounds(format!(
                "min_lat {} >= max_lat {}",
                self.min_lat, self.max_lat
            )));
        }
        if self.min_lon >= self.max_lon {
            return Err(GridError::InvalidBounds(format!(
                "min_lon {} >= max_lon {}",
                self.min_lon, self.max_lon
            )));
        }
        if self.min_lat < -90.0 || self.max_lat > 90.0 {
            return Err(GridError::InvalidBounds(format!(
                "latitude span {}..{} outside ±90",
                self.min_lat, self.max_lat
            )));
        }
        Ok(())
    }
}

/// Region and grid resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    pub bounds: MapBounds,
    pub km_per_deg_lat: f64,
    pub cell_size_km: f64,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            bounds: MapBounds::europe(),
            km_per_deg_lat: KM_PER_DEG_LAT,
            cell_size_km: DEFAULT_CELL_SIZE_KM,
        }
    }
}

impl RegionConfig {
    pub fn validate(&self) -> Result<()> {
        self.bounds.validate()?;
        if !self.km_per_deg_lat.is_finite() || self.km_per_deg_lat <= 0.0 {
            return Err(GridError::InvalidBounds(format!(
                "km_per_deg_lat must be positive, got {}",
                self.km_per_deg_lat
            )));
        }
        if !self.cell_size_km.is_finite() || self.cell_size_km <= 0.0 {
            return Err(GridError::InvalidCellSize(self.cell_size_km));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_region_is_valid() {
        let config = RegionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bounds.mean_lat(), 52.5);
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let mut config = RegionConfig::default();
        config.bounds.min_lat = 80.0;
        assert!(matches!(config.validate(), Err(GridError::InvalidBounds(_))));
    }

    #[test]
    fn test_zero_cell_size_rejected() {
        let config = RegionConfig {
            cell_size_km: 0.0,
            ..RegionConfig::default()
        };
        assert_eq!(config.validate(), Err(GridError::InvalidCellSize(0.0)));
    }
}
