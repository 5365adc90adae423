//! Flight phase state machine
//!
//! ```text
//! SCHEDULED ──t ≥ departure──▶ CLIMBING ──alt ≥ cruise──▶ CRUISING
//!                                                            │
//!              LANDED ◀──remaining < threshold── DESCENDING ◀┘ remaining ≤ descent distance
//! ```
//!
//! At most one transition fires per evaluation.

use crate::FlightPhase;

/// Snapshot of everything a transition may depend on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseInputs {
    pub time_sec: f64,
    pub departure_time: f64,
    pub altitude_ft: f64,
    pub cruise_altitude_ft: f64,
    pub remaining_km: f64,
    pub descent_distance_km: f64,
    pub landing_threshold_km: f64,
}

pub fn next_phase(phase: FlightPhase, inputs: &PhaseInputs) -> FlightPhase {
    match phase {
        FlightPhase::Scheduled if inputs.time_sec >= inputs.departure_time => FlightPhase::Climbing,
        FlightPhase::Climbing if inputs.altitude_ft >= inputs.cruise_altitude_ft => FlightPhase::Cruising,
        FlightPhase::Cruising if inputs.remaining_km <= inputs.descent_distance_km => FlightPhase::Descending,
        FlightPhase::Descending if inputs.remaining_km < inputs.landing_threshold_km => FlightPhase::Landed,
        other => other,
    }
}
