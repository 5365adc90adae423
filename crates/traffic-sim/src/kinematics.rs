//! Per-tick aircraft kinematics
//!
//! Groundspeed is the cruise speed in every phase. The horizontal track is
//! re-aimed at the destination every tick, so drift self-corrects.

use crate::{FlightPhase, TrafficConfig};
use geo_grid::{destination_point, initial_bearing_deg, GeoPoint};

/// Below this remaining distance the time-to-go descent rate is not used
const MIN_TIME_TO_GO_KM: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalStep {
    pub position: GeoPoint,
    pub heading_deg: f64,
    pub advance_km: f64,
}

/// Altitude after `dt` seconds, never below the destination elevation
pub fn vertical_step(
    phase: FlightPhase,
    altitude_ft: f64,
    cruise_altitude_ft: f64,
    destination_elevation_ft: f64,
    remaining_km: f64,
    dt: f64,
    config: &TrafficConfig,
) -> f64 {
    let altitude = match phase {
        FlightPhase::Climbing => altitude_ft + config.climb_rate_fpm / 60.0 * dt,
        FlightPhase::Cruising => cruise_altitude_ft,
        FlightPhase::Descending => {
            let to_lose = altitude_ft - destination_elevation_ft;
            let fixed = config.descent_rate_fpm / 60.0;
            let rate_fps = if remaining_km <= config.final_approach_km
                && remaining_km > MIN_TIME_TO_GO_KM
                && to_lose > 0.0
            {
                let time_to_go_sec = remaining_km / config.cruise_speed_kmh * 3600.0;
                to_lose / time_to_go_sec
            } else {
                fixed
            };
            altitude_ft - rate_fps * dt
        }
        FlightPhase::Scheduled | FlightPhase::Landed => altitude_ft,
    };
    altitude.max(destination_elevation_ft)
}

/// Advance along the great circle toward `destination`, never past it
pub fn horizontal_step(
    from: GeoPoint,
    destination: GeoPoint,
    remaining_km: f64,
    speed_kmh: f64,
    dt: f64,
) -> HorizontalStep {
    let heading_deg = initial_bearing_deg(from, destination);
    let advance_km = (speed_kmh / 3600.0 * dt).min(remaining_km);
    HorizontalStep {
        position: destination_point(from, heading_deg, advance_km),
        heading_deg,
        advance_km,
    }
}
