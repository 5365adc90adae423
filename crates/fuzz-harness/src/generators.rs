//! Domain generators for property-based testing
//!
//! Positions are drawn inside the default European region so every value
//! projects onto the grid.

use geo_grid::{GeoPoint, MapBounds, RegionConfig};
use proptest::collection::{btree_set, vec};
use proptest::prelude::*;
use radar_coverage::{Airport, Sensor, SensorType};

// ============================================================================
// Position Generators
// ============================================================================

/// Latitude inside the default region (35-70 deg)
pub fn latitude_in_region() -> impl Strategy<Value = f64> {
    let b = MapBounds::europe();
    b.min_lat..b.max_lat
}

/// Longitude inside the default region (-25-45 deg)
pub fn longitude_in_region() -> impl Strategy<Value = f64> {
    let b = MapBounds::europe();
    b.min_lon..b.max_lon
}

pub fn geo_point() -> impl Strategy<Value = GeoPoint> {
    (latitude_in_region(), longitude_in_region()).prop_map(|(lat, lon)| GeoPoint::new(lat, lon))
}

/// Positions around the Benelux, where flights stay short
pub fn geo_point_benelux() -> impl Strategy<Value = GeoPoint> {
    (49.5f64..53.5, 2.5f64..7.0).prop_map(|(lat, lon)| GeoPoint::new(lat, lon))
}

/// Default region at a coarser cell size, to keep full-grid scans cheap
pub fn coarse_region(cell_size_km: f64) -> RegionConfig {
    RegionConfig {
        cell_size_km,
        ..RegionConfig::default()
    }
}

// ============================================================================
// Sensor Generators
// ============================================================================

pub fn sensor_type() -> impl Strategy<Value = SensorType> {
    prop_oneof![
        Just(SensorType::AdsB),
        Just(SensorType::ModeS),
        Just(SensorType::Primary),
    ]
}

/// User sensor id
pub fn sensor_id() -> impl Strategy<Value = String> {
    "USER-[0-9]{10,13}".prop_map(|s| s.to_string())
}

/// Free-form display name, including characters JSON must escape
pub fn sensor_name() -> impl Strategy<Value = String> {
    "[ -~]{0,24}".prop_map(|s| s.to_string())
}

pub fn sensor() -> impl Strategy<Value = Sensor> {
    (sensor_id(), sensor_name(), sensor_type(), geo_point(), any::<bool>()).prop_map(
        |(id, name, sensor_type, position, is_active)| Sensor {
            id,
            name,
            sensor_type,
            position,
            is_active,
        },
    )
}

/// Sensor list with ids made unique by position in the list
pub fn sensor_set(max: usize) -> impl Strategy<Value = Vec<Sensor>> {
    vec(sensor(), 0..=max).prop_map(|sensors| {
        sensors
            .into_iter()
            .enumerate()
            .map(|(n, mut s)| {
                s.id = format!("{}-{}", s.id, n);
                s
            })
            .collect()
    })
}

/// Active sensors placed within the Benelux box
pub fn active_sensor_cluster(max: usize) -> impl Strategy<Value = Vec<Sensor>> {
    vec((sensor_type(), geo_point_benelux()), 1..=max).prop_map(|placed| {
        placed
            .into_iter()
            .enumerate()
            .map(|(n, (t, p))| Sensor::new(format!("S-{}", n), format!("Sensor {}", n), t, p))
            .collect()
    })
}

// ============================================================================
// Altitude Generators
// ============================================================================

/// Subset of altitude band indexes, possibly empty
pub fn altitude_indexes(bands: usize) -> impl Strategy<Value = Vec<usize>> {
    btree_set(0..bands, 0..=bands).prop_map(|set| set.into_iter().collect())
}

/// Aircraft altitude in feet, spanning above the top band
pub fn altitude_ft() -> impl Strategy<Value = f64> {
    0.0f64..45_000.0
}

// ============================================================================
// Airport Generators
// ============================================================================

/// Annual passengers, biased toward small airports so rosters stay small
pub fn passengers() -> impl Strategy<Value = u64> {
    prop_oneof![
        3 => 0u64..1_000_000,
        1 => 1_000_000u64..5_000_000,
    ]
}

pub fn airport_at(position: impl Strategy<Value = GeoPoint>) -> impl Strategy<Value = Airport> {
    ("[A-Z]{2}", position, passengers(), 0.0f64..3000.0).prop_map(|(country, p, passengers, elevation_ft)| {
        Airport {
            icao: String::new(),
            name: String::new(),
            country,
            lat: p.lat,
            lon: p.lon,
            passengers,
            elevation_ft,
            runways: vec![90, 270],
        }
    })
}

/// Active-airport set with unique ICAO codes
pub fn airport_set(min: usize, max: usize) -> impl Strategy<Value = Vec<Airport>> {
    vec(airport_at(geo_point()), min..=max).prop_map(|airports| {
        airports
            .into_iter()
            .enumerate()
            .map(|(n, mut a)| {
                a.icao = format!("X{:03}", n);
                a.name = format!("Airport {}", n);
                a
            })
            .collect()
    })
}

// ============================================================================
// Simulation Generators
// ============================================================================

/// Tick length in seconds
pub fn tick_seconds() -> impl Strategy<Value = f64> {
    prop_oneof![Just(5.0), Just(10.0), Just(30.0), Just(60.0)]
}

pub fn seed() -> impl Strategy<Value = u64> {
    any::<u64>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    proptest! {
        #[test]
        fn test_geo_point_in_region(p in geo_point()) {
            prop_assert!(MapBounds::europe().contains(p.lat, p.lon));
        }

        #[test]
        fn test_sensor_ids_unique(sensors in sensor_set(12)) {
            let ids: HashSet<&str> = sensors.iter().map(|s| s.id.as_str()).collect();
            prop_assert_eq!(ids.len(), sensors.len());
        }

        #[test]
        fn test_altitude_indexes_bounds(indexes in altitude_indexes(40)) {
            prop_assert!(indexes.iter().all(|&k| k < 40));
            prop_assert!(indexes.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn test_airport_set_unique(airports in airport_set(2, 6)) {
            let codes: HashSet<&str> = airports.iter().map(|a| a.icao.as_str()).collect();
            prop_assert_eq!(codes.len(), airports.len());
        }
    }
}
