//! Aircraft state

use geo_grid::GeoPoint;
use radar_coverage::{Airport, CoverageStatus};
use serde::{Deserialize, Serialize};

/// Flight phase; only forward transitions occur and `Landed` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlightPhase {
    Scheduled,
    Climbing,
    Cruising,
    Descending,
    Landed,
}

impl FlightPhase {
    pub const ALL: [FlightPhase; 5] = [
        FlightPhase::Scheduled,
        FlightPhase::Climbing,
        FlightPhase::Cruising,
        FlightPhase::Descending,
        FlightPhase::Landed,
    ];

    /// Airborne phases are the ones flown by the tick loop
    pub fn is_airborne(&self) -> bool {
        matches!(
            self,
            FlightPhase::Climbing | FlightPhase::Cruising | FlightPhase::Descending
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
    pub alt_ft: f64,
}

impl Position {
    pub fn geo(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}

/// Cumulative seconds spent under each coverage status
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Exposure {
    pub green_sec: f64,
    pub orange_sec: f64,
    pub red_sec: f64,
}

impl Exposure {
    /// Credit `dt` according to the sensor hit count; `None` (outside the
    /// coverage volume) counts as red
    pub fn credit(&mut self, hits: Option<usize>, dt: f64) {
        match hits.map(CoverageStatus::from_hits).unwrap_or(CoverageStatus::Red) {
            CoverageStatus::Green => self.green_sec += dt,
            CoverageStatus::Orange => self.orange_sec += dt,
            _ => self.red_sec += dt,
        }
    }

    pub fn total_sec(&self) -> f64 {
        self.green_sec + self.orange_sec + self.red_sec
    }

    pub fn add(&mut self, other: &Exposure) {
        self.green_sec += other.green_sec;
        self.orange_sec += other.orange_sec;
        self.red_sec += other.red_sec;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aircraft {
    pub id: String,
    pub flight_number: String,
    pub origin: Airport,
    pub destination: Airport,
    /// Seconds since midnight
    pub departure_time: f64,
    pub phase: FlightPhase,
    pub position: Position,
    pub speed_kmh: f64,
    pub heading_deg: f64,
    pub cruise_altitude_ft: f64,
    pub total_distance_km: f64,
    pub distance_covered_km: f64,
    pub exposure: Exposure,
    /// Simulation time at which the aircraft joined the active set
    pub activated_at: Option<f64>,
    pub landed_at: Option<f64>,
}

impl Aircraft {
    pub fn is_active(&self) -> bool {
        self.phase.is_airborne()
    }

    /// Activation to landing, allowing for one wrap of the daily clock
    pub fn flight_duration_sec(&self) -> Option<f64> {
        let (start, end) = (self.activated_at?, self.landed_at?);
        Some((end - start).rem_euclid(crate::SECONDS_IN_DAY))
    }
}
