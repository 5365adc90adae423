//! One end-to-end run: sensors, coverage, traffic, report.

use crate::RunConfig;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use geo_grid::{AltitudeLadder, Grid};
use radar_coverage::{
    country_grid, load_user_sensors, AirportCatalog, AltitudeSelection, CellReport, CoverageEngine, CoverageGrid,
    Sensor, SensorNetwork, StatusCounts,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};
use traffic_sim::{AircraftReport, FleetSummary, SimulationEngine};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub countries: Vec<String>,
    pub active_airports: usize,
    pub sensors_total: usize,
    pub sensors_active: usize,
    /// Feet, inclusive
    pub altitude_range_ft: (f64, f64),
    pub coverage: StatusCounts,
    /// Status counts over the cells attributed to each country
    pub country_coverage: BTreeMap<String, StatusCounts>,
    pub probe: Option<CellReport>,
    pub simulated_sec: f64,
    pub fleet: FleetSummary,
    pub aircraft: Vec<AircraftReport>,
}

/// Everything a caller may want to write out after a run
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub report: RunReport,
    pub coverage: CoverageGrid,
    pub grid: Grid,
    pub user_sensors: Vec<Sensor>,
}

pub fn run(config: &RunConfig) -> Result<RunOutput> {
    config.validate()?;

    let catalog = AirportCatalog::load(&config.airports_path)
        .with_context(|| format!("loading airports from {:?}", config.airports_path))?;
    let airports = catalog.active(config.countries.as_slice());
    if airports.is_empty() {
        warn!("No active airports for countries {:?}", config.countries);
    }

    let network = build_network(config, &airports)?;
    let sensors = network.all();
    info!(
        "Sensor network: {} sensors ({} active, {} user)",
        network.len(),
        network.active_count(),
        network.user_sensors().len()
    );

    let grid = Grid::new(&config.region)?;
    let ladder = AltitudeLadder::default();
    let selection = AltitudeSelection::range(config.altitude_min_index, config.altitude_max_index, ladder.len())?;

    let engine = CoverageEngine::new(grid.clone(), ladder, config.sensors.clone());
    let result = engine.compute(&sensors, &selection);
    let coverage = result.grid.counts();

    let countries = country_grid(&grid, &airports);
    let mut country_coverage: BTreeMap<String, StatusCounts> = BTreeMap::new();
    for ((i, j), status) in result.grid.iter() {
        if let Some(code) = countries.get(i, j) {
            country_coverage.entry(code.to_string()).or_default().record(status);
        }
    }

    let probe = match config.probe {
        Some((lat, lon)) => match grid.cell_at(geo_grid::GeoPoint::new(lat, lon)) {
            Some((i, j)) => CellReport::build(&grid, &ladder, &result.detail, i, j, &sensors),
            None => {
                warn!("Probe ({}, {}) lies outside the grid", lat, lon);
                None
            }
        },
        None => None,
    };

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut sim = SimulationEngine::with_rng(&airports, grid.clone(), ladder, config.traffic.clone(), rng)?;
    sim.run(config.start_time_sec, config.duration_sec, config.step_sec, &result.detail);

    let fleet = FleetSummary::from_aircraft(sim.aircraft());
    let aircraft = sim.aircraft().iter().map(AircraftReport::from).collect();

    let report = RunReport {
        generated_at: Utc::now(),
        countries: config.countries.clone(),
        active_airports: airports.len(),
        sensors_total: network.len(),
        sensors_active: network.active_count(),
        altitude_range_ft: (
            ladder.level_ft(config.altitude_min_index),
            ladder.level_ft(config.altitude_max_index),
        ),
        coverage,
        country_coverage,
        probe,
        simulated_sec: config.duration_sec,
        fleet,
        aircraft,
    };

    Ok(RunOutput {
        report,
        coverage: result.grid,
        grid,
        user_sensors: network.user_sensors().to_vec(),
    })
}

fn build_network(config: &RunConfig, airports: &[radar_coverage::Airport]) -> Result<SensorNetwork> {
    let mut network = SensorNetwork::new();
    network.replace_airport_sensors(airports);

    if let Some(path) = &config.user_sensors_path {
        let user = load_user_sensors(path).with_context(|| format!("loading user sensors from {:?}", path))?;
        network.set_user_sensors(user);
    }

    for placement in &config.place_sensors {
        network.place_user_sensor(placement.lat, placement.lon, placement.sensor_type);
    }

    for id in &config.disabled_sensors {
        network.toggle(id).with_context(|| format!("disabling sensor {}", id))?;
    }

    Ok(network)
}
