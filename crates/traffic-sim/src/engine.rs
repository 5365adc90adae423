//! Simulation Engine
//!
//! Owns the full-day roster and the active subset. Each `update` call:
//!
//! 1. Activates scheduled flights whose departure time has been reached
//! 2. For every active aircraft, applies at most one phase transition,
//!    then moves it vertically and horizontally
//! 3. Credits `Δt` of exposure from the detail grid bucket the aircraft
//!    now occupies
//! 4. Regenerates the wind field when its interval has elapsed
//!
//! Landed aircraft leave the active set in the tick they land and are not
//! credited exposure for that tick, so the exposure sum equals the time
//! between activation and landing.

use crate::kinematics::{horizontal_step, vertical_step};
use crate::phase::{next_phase, PhaseInputs};
use crate::{
    generate_daily_plan, Aircraft, FlightPhase, Result, TrafficConfig, WindField, WindVector, SECONDS_IN_DAY,
};
use geo_grid::{haversine_km, AltitudeLadder, GeoPoint, Grid};
use radar_coverage::{Airport, DetailGrid};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

pub struct SimulationEngine {
    config: TrafficConfig,
    grid: Grid,
    ladder: AltitudeLadder,
    aircraft: Vec<Aircraft>,
    /// Roster indexes in activation order
    active: Vec<usize>,
    wind: WindField,
    rng: StdRng,
}

impl SimulationEngine {
    pub fn new(airports: &[Airport], grid: Grid, ladder: AltitudeLadder, config: TrafficConfig) -> Result<Self> {
        Self::with_rng(airports, grid, ladder, config, StdRng::from_os_rng())
    }

    /// Build with an explicit random source (seeded runs)
    pub fn with_rng(
        airports: &[Airport],
        grid: Grid,
        ladder: AltitudeLadder,
        config: TrafficConfig,
        mut rng: StdRng,
    ) -> Result<Self> {
        config.validate()?;
        let aircraft = generate_daily_plan(airports, &config, &mut rng);
        Self::from_roster(aircraft, grid, ladder, config, rng)
    }

    /// Build around an existing roster
    pub fn from_roster(
        aircraft: Vec<Aircraft>,
        grid: Grid,
        ladder: AltitudeLadder,
        config: TrafficConfig,
        mut rng: StdRng,
    ) -> Result<Self> {
        config.validate()?;
        let wind = WindField::generate(&mut rng);
        let active = aircraft
            .iter()
            .enumerate()
            .filter_map(|(idx, ac)| ac.is_active().then_some(idx))
            .collect();
        Ok(Self {
            config,
            grid,
            ladder,
            aircraft,
            active,
            wind,
            rng,
        })
    }

    /// Replace the roster after the active-airport set changed
    pub fn regenerate(&mut self, airports: &[Airport]) {
        self.aircraft = generate_daily_plan(airports, &self.config, &mut self.rng);
        self.active.clear();
    }

    pub fn config(&self) -> &TrafficConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Full roster, including scheduled and landed flights
    pub fn aircraft(&self) -> &[Aircraft] {
        &self.aircraft
    }

    pub fn active_aircraft(&self) -> impl Iterator<Item = &Aircraft> + '_ {
        self.active.iter().map(move |&idx| &self.aircraft[idx])
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn wind(&self) -> &WindField {
        &self.wind
    }

    pub fn wind_at(&self, lat: f64, lon: f64) -> WindVector {
        self.wind.at(lat, lon)
    }

    /// Closest active aircraft within `radius_km` (great-circle distance)
    pub fn nearest_active(&self, lat: f64, lon: f64, radius_km: f64) -> Option<&Aircraft> {
        let target = GeoPoint::new(lat, lon);
        self.active_aircraft()
            .map(|ac| (haversine_km(target, ac.position.geo()), ac))
            .filter(|(d, _)| *d <= radius_km)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, ac)| ac)
    }

    /// Advance the simulation by one tick
    pub fn update(&mut self, time_sec: f64, dt: f64, detail: &DetailGrid) {
        for (idx, ac) in self.aircraft.iter_mut().enumerate() {
            if ac.phase != FlightPhase::Scheduled {
                continue;
            }
            // Scheduled aircraft sit on the origin, so remaining = total
            let inputs = PhaseInputs {
                time_sec: departure_clock(time_sec, dt, ac.departure_time),
                departure_time: ac.departure_time,
                altitude_ft: ac.position.alt_ft,
                cruise_altitude_ft: ac.cruise_altitude_ft,
                remaining_km: ac.total_distance_km,
                descent_distance_km: 0.0,
                landing_threshold_km: self.config.landing_threshold_km,
            };
            if next_phase(ac.phase, &inputs) == FlightPhase::Climbing {
                ac.phase = FlightPhase::Climbing;
                ac.activated_at = Some(time_sec);
                self.active.push(idx);
                debug!("{} departed {} for {}", ac.flight_number, ac.origin.icao, ac.destination.icao);
            }
        }

        let (config, grid, ladder) = (&self.config, &self.grid, &self.ladder);
        let aircraft = &mut self.aircraft;
        let mut landed = 0;
        self.active.retain(|&idx| {
            let airborne = fly(&mut aircraft[idx], time_sec, dt, detail, grid, ladder, config);
            if !airborne {
                landed += 1;
            }
            airborne
        });
        if landed > 0 {
            debug!("{} aircraft landed, {} still airborne", landed, self.active.len());
        }

        if self.wind.refresh(time_sec, self.config.wind_interval_sec, &mut self.rng) {
            debug!("Wind field regenerated at t={}", time_sec);
        }
    }

    /// Run fixed steps from `start_sec` until `duration_sec` has elapsed
    pub fn run(&mut self, start_sec: f64, duration_sec: f64, dt: f64, detail: &DetailGrid) {
        let mut clock = crate::SimulationClock::new(start_sec, dt);
        while clock.elapsed_sec() < duration_sec {
            let (time, step) = clock.tick();
            self.update(time, step, detail);
        }
        info!(
            "Simulated {} s: {} airborne, {} landed",
            clock.elapsed_sec(),
            self.active.len(),
            self.aircraft.iter().filter(|a| a.phase == FlightPhase::Landed).count()
        );
    }
}

/// Time to test a departure against. A tick that wraps past midnight also
/// covers the end of the previous day, so departures in `(t − Δt + 86400, 86400)`
/// are seen as reached.
fn departure_clock(time_sec: f64, dt: f64, departure_time: f64) -> f64 {
    let tick_start = time_sec - dt;
    if tick_start < 0.0 && departure_time > tick_start + SECONDS_IN_DAY {
        time_sec + SECONDS_IN_DAY
    } else {
        time_sec
    }
}

/// One tick for one airborne aircraft; returns false once it has landed
fn fly(
    ac: &mut Aircraft,
    time_sec: f64,
    dt: f64,
    detail: &DetailGrid,
    grid: &Grid,
    ladder: &AltitudeLadder,
    config: &TrafficConfig,
) -> bool {
    let destination = ac.destination.position();
    let remaining_km = haversine_km(ac.position.geo(), destination);

    let inputs = PhaseInputs {
        time_sec,
        departure_time: ac.departure_time,
        altitude_ft: ac.position.alt_ft,
        cruise_altitude_ft: ac.cruise_altitude_ft,
        remaining_km,
        descent_distance_km: config.descent_distance_km(ac.cruise_altitude_ft, ac.destination.elevation_ft),
        landing_threshold_km: config.landing_threshold_km,
    };
    let next = next_phase(ac.phase, &inputs);
    if next != ac.phase {
        debug!("{} {:?} -> {:?} ({:.1} km to go)", ac.flight_number, ac.phase, next, remaining_km);
        ac.phase = next;
    }

    if ac.phase == FlightPhase::Landed {
        ac.position.lat = ac.destination.lat;
        ac.position.lon = ac.destination.lon;
        ac.position.alt_ft = ac.destination.elevation_ft;
        ac.landed_at = Some(time_sec);
        debug!(
            "{} landed at {}: green {:.0}s orange {:.0}s red {:.0}s",
            ac.flight_number, ac.destination.icao, ac.exposure.green_sec, ac.exposure.orange_sec, ac.exposure.red_sec
        );
        return false;
    }

    ac.position.alt_ft = vertical_step(
        ac.phase,
        ac.position.alt_ft,
        ac.cruise_altitude_ft,
        ac.destination.elevation_ft,
        remaining_km,
        dt,
        config,
    );

    let step = horizontal_step(ac.position.geo(), destination, remaining_km, config.cruise_speed_kmh, dt);
    ac.distance_covered_km += step.advance_km;
    ac.speed_kmh = config.cruise_speed_kmh;
    ac.heading_deg = step.heading_deg;
    ac.position.lat = step.position.lat;
    ac.position.lon = step.position.lon;

    let hits = grid
        .cell_at(ac.position.geo())
        .and_then(|(i, j)| ladder.band_containing(ac.position.alt_ft).map(|k| detail.hit_count(i, j, k)));
    ac.exposure.credit(hits, dt);

    true
}
