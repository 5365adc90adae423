//! Sensor model
//!
//! A sensor's physical parameters are fully determined by its type through
//! the [`SensorCatalog`] table; sensors themselves only carry identity,
//! position and the active flag.

use crate::{CoverageError, Result};
use geo_grid::GeoPoint;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SensorType {
    #[serde(rename = "ADS_B")]
    AdsB,
    #[serde(rename = "MODE_S")]
    ModeS,
    #[serde(rename = "PRIMARY")]
    Primary,
}

impl SensorType {
    pub const ALL: [SensorType; 3] = [SensorType::AdsB, SensorType::ModeS, SensorType::Primary];

    /// Interchange tag
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorType::AdsB => "ADS_B",
            SensorType::ModeS => "MODE_S",
            SensorType::Primary => "PRIMARY",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SensorType::AdsB => "ADS-B",
            SensorType::ModeS => "Mode S",
            SensorType::Primary => "Primary",
        }
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensorType {
    type Err = CoverageError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ADS_B" => Ok(SensorType::AdsB),
            "MODE_S" => Ok(SensorType::ModeS),
            "PRIMARY" => Ok(SensorType::Primary),
            other => Err(CoverageError::UnknownSensorType(other.to_string())),
        }
    }
}

/// Physical parameters of one sensor type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSpec {
    pub range_km: f64,
    pub has_cone_of_silence: bool,
    pub cone_of_silence_radius_km: f64,
}

impl SensorSpec {
    /// Cone radius if this type has one
    pub fn cone_radius_km(&self) -> Option<f64> {
        self.has_cone_of_silence.then_some(self.cone_of_silence_radius_km)
    }
}

/// Type-indexed parameter table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorCatalog {
    pub ads_b: SensorSpec,
    pub mode_s: SensorSpec,
    pub primary: SensorSpec,
}

impl Default for SensorCatalog {
    fn default() -> Self {
        Self {
            ads_b: SensorSpec {
                range_km: 150.0,
                has_cone_of_silence: false,
                cone_of_silence_radius_km: 0.0,
            },
            mode_s: SensorSpec {
                range_km: 200.0,
                has_cone_of_silence: true,
                cone_of_silence_radius_km: 1.0,
            },
            primary: SensorSpec {
                range_km: 100.0,
                has_cone_of_silence: false,
                cone_of_silence_radius_km: 0.0,
            },
        }
    }
}

impl SensorCatalog {
    pub fn spec(&self, sensor_type: SensorType) -> &SensorSpec {
        match sensor_type {
            SensorType::AdsB => &self.ads_b,
            SensorType::ModeS => &self.mode_s,
            SensorType::Primary => &self.primary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    pub id: String,
    pub name: String,
    pub sensor_type: SensorType,
    pub position: GeoPoint,
    pub is_active: bool,
}

impl Sensor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, sensor_type: SensorType, position: GeoPoint) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sensor_type,
            position,
            is_active: true,
        }
    }

    pub fn spec<'a>(&self, catalog: &'a SensorCatalog) -> &'a SensorSpec {
        catalog.spec(self.sensor_type)
    }
}
