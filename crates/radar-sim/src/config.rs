//! Run configuration
//!
//! Loaded from a JSON file (every field optional) and then overridden by
//! command-line flags.

use anyhow::{Context, Result};
use geo_grid::RegionConfig;
use radar_coverage::{SensorCatalog, SensorType};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use traffic_sim::TrafficConfig;

/// A user sensor to place before computing coverage, written `TYPE,LAT,LON`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorPlacement {
    pub sensor_type: SensorType,
    pub lat: f64,
    pub lon: f64,
}

impl FromStr for SensorPlacement {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [tag, lat, lon] = parts.as_slice() else {
            return Err(format!("expected TYPE,LAT,LON, got {:?}", s));
        };
        let sensor_type = tag.parse::<SensorType>().map_err(|e| e.to_string())?;
        let lat: f64 = lat.parse().map_err(|_| format!("invalid latitude {:?}", lat))?;
        let lon: f64 = lon.parse().map_err(|_| format!("invalid longitude {:?}", lon))?;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(format!("position ({}, {}) out of range", lat, lon));
        }
        Ok(Self { sensor_type, lat, lon })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub airports_path: PathBuf,
    /// Country codes forming the active-airport set
    pub countries: Vec<String>,
    pub user_sensors_path: Option<PathBuf>,
    pub place_sensors: Vec<SensorPlacement>,
    /// Sensor ids switched off before the coverage run
    pub disabled_sensors: Vec<String>,
    /// Inclusive altitude band range used for the aggregate status
    pub altitude_min_index: usize,
    pub altitude_max_index: usize,
    pub start_time_sec: f64,
    pub duration_sec: f64,
    pub step_sec: f64,
    pub seed: Option<u64>,
    /// Cell to describe in the report
    pub probe: Option<(f64, f64)>,
    pub region: RegionConfig,
    pub sensors: SensorCatalog,
    pub traffic: TrafficConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            airports_path: PathBuf::from("data/airports.json"),
            countries: vec!["BE".to_string()],
            user_sensors_path: None,
            place_sensors: Vec::new(),
            disabled_sensors: Vec::new(),
            altitude_min_index: 0,
            altitude_max_index: 39,
            start_time_sec: 0.0,
            duration_sec: 86_400.0,
            step_sec: 10.0,
            seed: None,
            probe: None,
            region: RegionConfig::default(),
            sensors: SensorCatalog::default(),
            traffic: TrafficConfig::default(),
        }
    }
}

impl RunConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("opening run config {:?}", path))?;
        let config: RunConfig =
            serde_json::from_reader(BufReader::new(file)).with_context(|| format!("parsing run config {:?}", path))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.region.validate()?;
        self.traffic.validate()?;
        if !self.step_sec.is_finite() || self.step_sec <= 0.0 {
            anyhow::bail!("simulation step must be positive, got {}", self.step_sec);
        }
        if !self.duration_sec.is_finite() || self.duration_sec < 0.0 {
            anyhow::bail!("simulation duration must be non-negative, got {}", self.duration_sec);
        }
        if self.altitude_min_index > self.altitude_max_index {
            anyhow::bail!(
                "altitude band range {}..={} is empty",
                self.altitude_min_index,
                self.altitude_max_index
            );
        }
        Ok(())
    }
}
