//! Airport catalog
//!
//! Static reference data loaded once and filtered by country to form the
//! active-airport set. Airports also seed the sensor network.

use crate::{is_valid_latitude, is_valid_longitude, Result, Sensor, SensorType};
use geo_grid::GeoPoint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{info, warn};

/// Annual passengers for a Mode S + Primary pair
pub const MODE_S_PASSENGER_THRESHOLD: u64 = 1_000_000;

/// Annual passengers for an ADS-B receiver
pub const ADS_B_PASSENGER_THRESHOLD: u64 = 200_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub icao: String,
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    /// Annual passengers
    pub passengers: u64,
    #[serde(default)]
    pub elevation_ft: f64,
    /// Runway headings in degrees
    #[serde(default)]
    pub runways: Vec<u16>,
}

impl Airport {
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AirportCatalog {
    airports: Vec<Airport>,
}

impl AirportCatalog {
    pub fn new(airports: Vec<Airport>) -> Self {
        Self { airports }
    }

    /// Load from a JSON array, skipping records with unusable coordinates
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let raw: Vec<Airport> = serde_json::from_reader(reader)?;
        let total = raw.len();

        let airports: Vec<Airport> = raw
            .into_iter()
            .filter(|a| {
                let valid = is_valid_latitude(a.lat)
                    && is_valid_longitude(a.lon)
                    && a.elevation_ft.is_finite()
                    && a.elevation_ft >= 0.0
                    && !a.icao.is_empty();
                if !valid {
                    warn!("Skipping airport {:?}: invalid position or elevation", a.icao);
                }
                valid
            })
            .collect();

        info!(
            "Loaded {} airports ({} skipped)",
            airports.len(),
            total - airports.len()
        );
        Ok(Self { airports })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading airport catalog from {:?}", path);
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn all(&self) -> &[Airport] {
        &self.airports
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    pub fn get(&self, icao: &str) -> Option<&Airport> {
        self.airports.iter().find(|a| a.icao == icao)
    }

    /// Sorted, de-duplicated country codes
    pub fn countries(&self) -> Vec<String> {
        self.airports
            .iter()
            .map(|a| a.country.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Active-airport set for the selected countries, catalog order preserved
    pub fn active<S: AsRef<str>>(&self, countries: &[S]) -> Vec<Airport> {
        self.airports
            .iter()
            .filter(|a| countries.iter().any(|c| c.as_ref() == a.country))
            .cloned()
            .collect()
    }
}

/// Sensors installed at airports, sized by traffic
///
/// ≥ 1M passengers: Mode S + Primary; ≥ 200k: ADS-B; otherwise none.
pub fn derive_airport_sensors(airports: &[Airport]) -> Vec<Sensor> {
    let mut sensors = Vec::new();

    for airport in airports {
        let position = airport.position();
        if airport.passengers >= MODE_S_PASSENGER_THRESHOLD {
            sensors.push(airport_sensor(airport, "S-1", SensorType::ModeS, position));
            sensors.push(airport_sensor(airport, "P-2", SensorType::Primary, position));
        } else if airport.passengers >= ADS_B_PASSENGER_THRESHOLD {
            sensors.push(airport_sensor(airport, "A-1", SensorType::AdsB, position));
        }
    }

    sensors
}

fn airport_sensor(airport: &Airport, suffix: &str, sensor_type: SensorType, position: GeoPoint) -> Sensor {
    Sensor::new(
        format!("{}-{}", airport.icao, suffix),
        format!("{} {}", airport.icao, sensor_type.label()),
        sensor_type,
        position,
    )
}
