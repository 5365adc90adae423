//! User Sensor Interchange
//!
//! JSON array of `{id, name, type, lat, lon, isActive}` records. Only the
//! type tag is persisted; range and cone of silence are looked up from the
//! type table on import.

use crate::{is_valid_latitude, is_valid_longitude, CoverageError, Result, Sensor, SensorType};
use geo_grid::GeoPoint;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub sensor_type: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl From<&Sensor> for SensorRecord {
    fn from(sensor: &Sensor) -> Self {
        Self {
            id: sensor.id.clone(),
            name: sensor.name.clone(),
            sensor_type: sensor.sensor_type.as_str().to_string(),
            lat: sensor.position.lat,
            lon: sensor.position.lon,
            is_active: sensor.is_active,
        }
    }
}

impl TryFrom<SensorRecord> for Sensor {
    type Error = CoverageError;

    fn try_from(record: SensorRecord) -> Result<Self> {
        if record.id.is_empty() {
            return Err(CoverageError::InvalidRecord {
                id: record.id,
                reason: "empty id".to_string(),
            });
        }
        if !is_valid_latitude(record.lat) || !is_valid_longitude(record.lon) {
            return Err(CoverageError::InvalidRecord {
                reason: format!("invalid position ({}, {})", record.lat, record.lon),
                id: record.id,
            });
        }
        let sensor_type: SensorType = record.sensor_type.parse()?;

        Ok(Sensor {
            id: record.id,
            name: record.name,
            sensor_type,
            position: GeoPoint::new(record.lat, record.lon),
            is_active: record.is_active,
        })
    }
}

pub fn export_user_sensors<W: Write>(writer: W, sensors: &[Sensor]) -> Result<()> {
    let records: Vec<SensorRecord> = sensors.iter().map(SensorRecord::from).collect();
    serde_json::to_writer_pretty(writer, &records)?;
    Ok(())
}

/// Parse an exported array; any invalid record rejects the whole import
pub fn import_user_sensors<R: Read>(reader: R) -> Result<Vec<Sensor>> {
    let records: Vec<SensorRecord> = serde_json::from_reader(reader)?;
    records.into_iter().map(Sensor::try_from).collect()
}

pub fn save_user_sensors(path: impl AsRef<Path>, sensors: &[Sensor]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    export_user_sensors(&mut writer, sensors)?;
    writer.flush()?;
    info!("Exported {} user sensors to {:?}", sensors.len(), path);
    Ok(())
}

pub fn load_user_sensors(path: impl AsRef<Path>) -> Result<Vec<Sensor>> {
    let path = path.as_ref();
    let sensors = import_user_sensors(BufReader::new(File::open(path)?))?;
    info!("Imported {} user sensors from {:?}", sensors.len(), path);
    Ok(sensors)
}
