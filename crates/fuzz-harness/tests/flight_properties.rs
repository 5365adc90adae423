//! Flight simulation properties: exposure accounting and phase ordering
//! over randomly generated daily plans.

use fuzz_harness::prelude::*;
use geo_grid::{AltitudeLadder, Grid};
use radar_coverage::{AltitudeSelection, CoverageEngine, DetailGrid, Sensor, SensorCatalog, SensorType};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use traffic_sim::{next_phase, FlightPhase, PhaseInputs, SimulationClock, SimulationEngine, TrafficConfig};

/// Long enough for every departure of the day plus the longest in-region flight
const RUN_SECONDS: f64 = 86_400.0 + 10.0 * 3600.0;

fn detail_for(grid: &Grid, sensors: &[Sensor]) -> DetailGrid {
    CoverageEngine::new(grid.clone(), AltitudeLadder::default(), SensorCatalog::default())
        .compute(sensors, &AltitudeSelection::all(40))
        .detail
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    // Fuzz: every planned flight lands, accounts for every second between activation
    // and landing, and advances one phase at a time without regressing
    #[test]
    fn fuzz_exposure_and_phase_order(
        airports in airport_set(2, 4),
        seed in seed(),
        dt in tick_seconds(),
    ) {
        let grid = Grid::new(&coarse_region(50.0)).unwrap();
        let sensors: Vec<Sensor> = airports
            .iter()
            .map(|a| Sensor::new(format!("{}-A-1", a.icao), a.icao.clone(), SensorType::AdsB, a.position()))
            .collect();
        let detail = detail_for(&grid, &sensors);

        let mut engine = SimulationEngine::with_rng(
            &airports,
            grid,
            AltitudeLadder::default(),
            TrafficConfig::default(),
            StdRng::seed_from_u64(seed),
        )
        .unwrap();

        let mut last: HashMap<String, FlightPhase> = engine
            .aircraft()
            .iter()
            .map(|a| (a.id.clone(), a.phase))
            .collect();
        let mut visited: HashMap<String, Vec<FlightPhase>> = last
            .iter()
            .map(|(id, phase)| (id.clone(), vec![*phase]))
            .collect();

        let mut clock = SimulationClock::new(0.0, dt);
        while clock.elapsed_sec() < RUN_SECONDS {
            let (time, step) = clock.tick();
            engine.update(time, step, &detail);

            for ac in engine.aircraft() {
                let before = last[&ac.id];
                prop_assert!(ac.phase >= before, "{} regressed {:?} -> {:?}", ac.id, before, ac.phase);
                if ac.phase != before {
                    visited.get_mut(&ac.id).unwrap().push(ac.phase);
                    last.insert(ac.id.clone(), ac.phase);
                }
            }
        }

        for ac in engine.aircraft() {
            prop_assert_eq!(ac.phase, FlightPhase::Landed, "{} departing at {} never landed", ac.id, ac.departure_time);
            prop_assert_eq!(&visited[&ac.id], &FlightPhase::ALL.to_vec());

            let duration = ac.flight_duration_sec().unwrap();
            prop_assert!(
                (ac.exposure.total_sec() - duration).abs() < 1e-6,
                "{}: exposure {} vs flight {}",
                ac.id,
                ac.exposure.total_sec(),
                duration
            );
            prop_assert_eq!(ac.position.alt_ft, ac.destination.elevation_ft);
        }
    }

    // Fuzz: the transition function moves at most one phase forward
    #[test]
    fn fuzz_next_phase_single_forward_step(
        phase_idx in 0usize..5,
        time_sec in 0.0f64..86_400.0,
        departure_time in 0.0f64..86_400.0,
        altitude_ft in altitude_ft(),
        cruise_altitude_ft in 30_000.0f64..38_000.0,
        remaining_km in 0.0f64..3000.0,
        descent_distance_km in 0.0f64..300.0,
    ) {
        let phase = FlightPhase::ALL[phase_idx];
        let inputs = PhaseInputs {
            time_sec,
            departure_time,
            altitude_ft,
            cruise_altitude_ft,
            remaining_km,
            descent_distance_km,
            landing_threshold_km: 1.0,
        };
        let next = next_phase(phase, &inputs);
        let next_idx = FlightPhase::ALL.iter().position(|p| *p == next).unwrap();
        prop_assert!(next_idx == phase_idx || next_idx == phase_idx + 1);
    }
}
