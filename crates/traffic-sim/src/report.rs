//! Exposure reports for single aircraft and for the whole roster

use crate::{Aircraft, Exposure, FlightPhase};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftReport {
    pub id: String,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub phase: FlightPhase,
    pub green_pct: f64,
    pub orange_pct: f64,
    pub red_pct: f64,
    pub tracked_minutes: f64,
}

impl From<&Aircraft> for AircraftReport {
    fn from(ac: &Aircraft) -> Self {
        let total = ac.exposure.total_sec();
        let pct = |sec: f64| if total > 0.0 { sec / total * 100.0 } else { 0.0 };
        Self {
            id: ac.id.clone(),
            flight_number: ac.flight_number.clone(),
            origin: ac.origin.icao.clone(),
            destination: ac.destination.icao.clone(),
            phase: ac.phase,
            green_pct: pct(ac.exposure.green_sec),
            orange_pct: pct(ac.exposure.orange_sec),
            red_pct: pct(ac.exposure.red_sec),
            tracked_minutes: total / 60.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetSummary {
    pub total: usize,
    pub scheduled: usize,
    pub climbing: usize,
    pub cruising: usize,
    pub descending: usize,
    pub landed: usize,
    pub exposure: Exposure,
}

impl FleetSummary {
    pub fn from_aircraft<'a>(aircraft: impl IntoIterator<Item = &'a Aircraft>) -> Self {
        let mut summary = FleetSummary::default();
        for ac in aircraft {
            summary.total += 1;
            match ac.phase {
                FlightPhase::Scheduled => summary.scheduled += 1,
                FlightPhase::Climbing => summary.climbing += 1,
                FlightPhase::Cruising => summary.cruising += 1,
                FlightPhase::Descending => summary.descending += 1,
                FlightPhase::Landed => summary.landed += 1,
            }
            summary.exposure.add(&ac.exposure);
        }
        summary
    }

    pub fn airborne(&self) -> usize {
        self.climbing + self.cruising + self.descending
    }

    /// Share of all tracked time spent with at least one sensor, in percent
    pub fn covered_pct(&self) -> f64 {
        let total = self.exposure.total_sec();
        if total > 0.0 {
            (self.exposure.green_sec + self.exposure.orange_sec) / total * 100.0
        } else {
            0.0
        }
    }
}
