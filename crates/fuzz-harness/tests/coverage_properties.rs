//! Coverage engine properties: empty networks, the range and cone tests,
//! and the min-over-selection aggregate.

use fuzz_harness::prelude::*;
use geo_grid::{AltitudeLadder, GeoPoint, Grid, PlanarPoint, RegionConfig};
use radar_coverage::{AltitudeSelection, CoverageEngine, CoverageStatus, Sensor, SensorCatalog, SensorType};
use std::sync::OnceLock;

fn engine(region: &RegionConfig) -> CoverageEngine {
    CoverageEngine::new(
        Grid::new(region).unwrap(),
        AltitudeLadder::default(),
        SensorCatalog::default(),
    )
}

fn coarse_engine() -> &'static CoverageEngine {
    static ENGINE: OnceLock<CoverageEngine> = OnceLock::new();
    ENGINE.get_or_init(|| engine(&coarse_region(25.0)))
}

fn status_rank(status: CoverageStatus) -> u8 {
    match status {
        CoverageStatus::Empty | CoverageStatus::Red => 0,
        CoverageStatus::Orange => 1,
        CoverageStatus::Green => 2,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    // Fuzz: no active sensor means everything is red and nothing is recorded
    #[test]
    fn fuzz_no_active_sensors_all_red(
        mut sensors in sensor_set(8),
        indexes in altitude_indexes(40),
    ) {
        for s in &mut sensors {
            s.is_active = false;
        }
        let engine = coarse_engine();
        let selection = AltitudeSelection::new(&indexes, 40).unwrap();
        let result = engine.compute(&sensors, &selection);

        let counts = result.grid.counts();
        prop_assert_eq!(counts.red, engine.grid().cell_count());
        prop_assert!(result.detail.is_empty());
    }

    // Fuzz: ADS-B coverage on the planar origin is exactly the d² + a² ≤ 150² ball
    #[test]
    fn fuzz_adsb_range_ball(i in 0usize..8, j in 0usize..8, k in 0usize..40) {
        let engine = coarse_engine();
        let sensor = Sensor::new("ADSB-0", "Origin", SensorType::AdsB, GeoPoint::new(70.0, -25.0));
        let result = engine.compute(&[sensor], &AltitudeSelection::new(&[k], 40).unwrap());

        let c = engine.grid().cell_center(i, j);
        let a = engine.ladder().level_km(k);
        let covered = c.x * c.x + c.y * c.y + a * a <= 150.0 * 150.0;

        let ids: Vec<&str> = result.detail.sensors_at(i, j, k).collect();
        if covered {
            prop_assert_eq!(ids, vec!["ADSB-0"]);
            prop_assert_eq!(result.grid.get(i, j), Some(CoverageStatus::Orange));
        } else {
            prop_assert!(ids.is_empty());
            prop_assert_eq!(result.grid.get(i, j), Some(CoverageStatus::Red));
        }
    }

    // Fuzz: a Mode S sensor never covers the cell it sits within 1 km of
    #[test]
    fn fuzz_mode_s_cone_of_silence(
        i in 1usize..180,
        j in 1usize..150,
        dx in -0.7f64..0.7,
        dy in -0.7f64..0.7,
    ) {
        let engine = coarse_engine();
        let center = engine.grid().cell_center(i, j);
        let position = engine
            .grid()
            .projection()
            .to_geo(PlanarPoint::new(center.x + dx, center.y + dy));
        let sensor = Sensor::new("MS", "Mode S", SensorType::ModeS, position);
        let result = engine.compute(&[sensor], &AltitudeSelection::all(40));

        prop_assert!(result.detail.column(i, j).iter().all(|&h| h == 0));
        prop_assert_eq!(result.grid.get(i, j), Some(CoverageStatus::Red));
        // 25 km away is well inside range
        prop_assert!(result.detail.column(i + 1, j).iter().all(|&h| h == 1));
    }

    // Fuzz: aggregate equals f(min hits over the selection)
    #[test]
    fn fuzz_status_is_min_over_selection(
        sensors in active_sensor_cluster(6),
        indexes in altitude_indexes(40),
        cells in proptest::collection::vec((0usize..7, 0usize..9), 1..8),
    ) {
        let engine = coarse_engine();
        let selection = AltitudeSelection::new(&indexes, 40).unwrap();
        let result = engine.compute(&sensors, &selection);

        // Benelux sits around i 74..87, j 73..91 at 25 km
        for (di, dj) in cells {
            let (i, j) = (74 + di * 2, 73 + dj * 2);
            let min_hits = indexes
                .iter()
                .map(|&k| result.detail.hit_count(i, j, k))
                .min()
                .unwrap_or(0);
            prop_assert_eq!(result.grid.get(i, j), Some(CoverageStatus::from_hits(min_hits)));
        }
    }

    // Fuzz: adding bands at least as covered as the current minimum never
    // lowers the status, and adding any band never raises it
    #[test]
    fn fuzz_selection_monotonic(
        sensors in active_sensor_cluster(6),
        indexes in altitude_indexes(40),
        extra in altitude_indexes(40),
        i in 74usize..87,
        j in 73usize..91,
    ) {
        let engine = coarse_engine();
        let base = engine.compute(&sensors, &AltitudeSelection::new(&indexes, 40).unwrap());
        let column = base.detail.column(i, j);
        let base_status = base.grid.get(i, j).unwrap();

        let mut widened = indexes.clone();
        widened.extend(extra.iter().copied());
        let any = engine.compute(&sensors, &AltitudeSelection::new(&widened, 40).unwrap());
        if !indexes.is_empty() {
            prop_assert!(status_rank(any.grid.get(i, j).unwrap()) <= status_rank(base_status));
        }

        if let Some(min_hits) = indexes.iter().map(|&k| column[k]).min() {
            let mut better = indexes.clone();
            better.extend(extra.iter().copied().filter(|&k| column[k] >= min_hits));
            let more = engine.compute(&sensors, &AltitudeSelection::new(&better, 40).unwrap());
            prop_assert_eq!(more.grid.get(i, j), Some(base_status));
        }
    }

    // Fuzz: every point of the region lands in a cell whose bounds contain it
    #[test]
    fn fuzz_cell_lookup_contains_point(p in geo_point()) {
        let grid = coarse_engine().grid();
        let (i, j) = grid.cell_at(p).unwrap();
        let bounds = grid.cell_bounds_geo(i, j);
        prop_assert!(p.lat <= bounds.north + 1e-9 && p.lat >= bounds.south - 1e-9);
        prop_assert!(p.lon >= bounds.west - 1e-9 && p.lon <= bounds.east + 1e-9);
    }
}
