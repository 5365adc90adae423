//! Sensor Network
//!
//! Combines the airport-derived sensors (rebuilt whenever the active-airport
//! set changes) with the persistent user-placed sensors and an optional
//! pending placement awaiting confirmation.

use crate::{derive_airport_sensors, Airport, CoverageError, Result, Sensor, SensorType};
use chrono::Utc;
use geo_grid::GeoPoint;
use tracing::{debug, info};

/// Id of a placement that has not been confirmed yet
pub const PENDING_SENSOR_ID: &str = "USER-TEST";

#[derive(Debug, Clone, Default)]
pub struct SensorNetwork {
    airport: Vec<Sensor>,
    user: Vec<Sensor>,
    pending: Option<Sensor>,
}

impl SensorNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_airport_sensors(&mut self, airports: &[Airport]) {
        self.airport = derive_airport_sensors(airports);
        info!(
            "Derived {} sensors from {} active airports",
            self.airport.len(),
            airports.len()
        );
    }

    pub fn airport_sensors(&self) -> &[Sensor] {
        &self.airport
    }

    pub fn user_sensors(&self) -> &[Sensor] {
        &self.user
    }

    /// Replace all user sensors (e.g. after an import)
    pub fn set_user_sensors(&mut self, sensors: Vec<Sensor>) {
        self.user = sensors;
    }

    pub fn pending(&self) -> Option<&Sensor> {
        self.pending.as_ref()
    }

    /// All sensors: airport, then user, then the pending placement
    pub fn all(&self) -> Vec<Sensor> {
        self.airport
            .iter()
            .chain(self.user.iter())
            .chain(self.pending.iter())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.airport.len() + self.user.len() + usize::from(self.pending.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn active_count(&self) -> usize {
        self.airport
            .iter()
            .chain(self.user.iter())
            .chain(self.pending.iter())
            .filter(|s| s.is_active)
            .count()
    }

    /// Flip the active flag of an airport or user sensor, returning the new state
    pub fn toggle(&mut self, id: &str) -> Result<bool> {
        let sensor = self
            .user
            .iter_mut()
            .chain(self.airport.iter_mut())
            .find(|s| s.id == id)
            .ok_or_else(|| CoverageError::SensorNotFound(id.to_string()))?;
        sensor.is_active = !sensor.is_active;
        debug!("Sensor {} active={}", sensor.id, sensor.is_active);
        Ok(sensor.is_active)
    }

    /// Stage a trial sensor; it takes part in coverage until confirmed or cancelled
    pub fn begin_placement(&mut self, position: GeoPoint, sensor_type: SensorType) {
        self.pending = Some(Sensor::new(PENDING_SENSOR_ID, "Test Sensor", sensor_type, position));
    }

    /// Promote the pending sensor to a permanent user sensor
    pub fn confirm_placement(&mut self) -> Option<&Sensor> {
        let mut sensor = self.pending.take()?;

        let mut stamp = Utc::now().timestamp_millis();
        while self.user.iter().any(|s| s.id == format!("USER-{}", stamp)) {
            stamp += 1;
        }
        sensor.id = format!("USER-{}", stamp);
        sensor.name = format!("User Sensor #{}", self.user.len() + 1);
        info!("Placed {} ({}) at {:?}", sensor.id, sensor.sensor_type, sensor.position);

        self.user.push(sensor);
        self.user.last()
    }

    pub fn cancel_placement(&mut self) {
        self.pending = None;
    }

    /// Place a permanent user sensor in one step, discarding any pending placement
    pub fn place_user_sensor(&mut self, lat: f64, lon: f64, sensor_type: SensorType) -> Option<&Sensor> {
        self.begin_placement(GeoPoint::new(lat, lon), sensor_type);
        self.confirm_placement()
    }
}
