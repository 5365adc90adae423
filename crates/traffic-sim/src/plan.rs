//! Daily Flight Plan
//!
//! Every active airport originates a number of flights proportional to its
//! annual passengers:
//!
//! ```text
//! daily = ceil(passengers / 365 / capacity / divisor)
//! day   = round(daily × day_ratio)      departs in [day_start, day_end)
//! night = daily − day                   departs in the complementary window
//! ```
//!
//! Destinations are drawn uniformly from the other active airports.

use crate::{Aircraft, Exposure, FlightPhase, Position, TrafficConfig, SECONDS_IN_DAY};
use geo_grid::haversine_km;
use radar_coverage::Airport;
use rand::Rng;
use tracing::{debug, info, warn};

pub fn daily_flight_count(passengers: u64, config: &TrafficConfig) -> u32 {
    let per_day = passengers as f64 / 365.0;
    (per_day / config.aircraft_capacity as f64 / config.downscale_divisor as f64).ceil() as u32
}

/// Build the full-day roster. Fewer than two airports or an invalid config
/// yields no flights.
pub fn generate_daily_plan<R: Rng + ?Sized>(
    airports: &[Airport],
    config: &TrafficConfig,
    rng: &mut R,
) -> Vec<Aircraft> {
    if let Err(e) = config.validate() {
        warn!("No flight plan: {}", e);
        return Vec::new();
    }
    if airports.len() < 2 {
        info!("Flight plan needs at least two airports, got {}", airports.len());
        return Vec::new();
    }

    let (day_start, day_end) = config.day_window_sec();
    let night_duration = SECONDS_IN_DAY - (day_end - day_start);
    let mut serial = config.first_flight_serial;
    let mut flights = Vec::new();

    for origin in airports {
        let daily = daily_flight_count(origin.passengers, config);
        let day_flights = (daily as f64 * config.day_ratio).round() as u32;

        let destinations: Vec<&Airport> = airports.iter().filter(|d| d.icao != origin.icao).collect();
        if destinations.is_empty() {
            continue;
        }
        debug!("{}: {} flights ({} day)", origin.icao, daily, day_flights);

        for n in 0..daily {
            let destination = destinations[rng.random_range(0..destinations.len())];

            let departure_time = if n < day_flights {
                day_start + rng.random::<f64>() * (day_end - day_start)
            } else {
                (day_end + rng.random::<f64>() * night_duration) % SECONDS_IN_DAY
            };
            let cruise_altitude_ft = config.cruise_levels_ft[rng.random_range(0..config.cruise_levels_ft.len())];

            let id = format!("{}{}{}", origin.icao, destination.icao, serial);
            serial += 1;

            flights.push(Aircraft {
                id,
                flight_number: format!("FL{}", serial),
                origin: origin.clone(),
                destination: destination.clone(),
                departure_time,
                phase: FlightPhase::Scheduled,
                position: Position {
                    lat: origin.lat,
                    lon: origin.lon,
                    alt_ft: origin.elevation_ft,
                },
                speed_kmh: 0.0,
                heading_deg: 0.0,
                cruise_altitude_ft,
                total_distance_km: haversine_km(origin.position(), destination.position()),
                distance_covered_km: 0.0,
                exposure: Exposure::default(),
                activated_at: None,
                landed_at: None,
            });
        }
    }

    info!("Generated {} flights from {} airports", flights.len(), airports.len());
    flights
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn airport(icao: &str, lat: f64, lon: f64, passengers: u64) -> Airport {
        Airport {
            icao: icao.to_string(),
            name: icao.to_string(),
            country: "BE".to_string(),
            lat,
            lon,
            passengers,
            elevation_ft: 100.0,
            runways: vec![90, 270],
        }
    }

    #[test]
    fn test_daily_flight_count() {
        let config = TrafficConfig::default();
        // 24.48M / 365 / 250 / 10 = 26.8 -> 27
        assert_eq!(daily_flight_count(24_483_868, &config), 27);
        assert_eq!(daily_flight_count(1, &config), 1);
        assert_eq!(daily_flight_count(0, &config), 0);
    }

    #[test]
    fn test_plan_shape() {
        let config = TrafficConfig::default();
        let airports = vec![
            airport("EBBR", 50.9014, 4.48444, 24_483_868),
            airport("EBCI", 50.4592, 4.45382, 8_150_000),
            airport("EBLG", 50.6374, 5.44322, 500_000),
        ];
        let mut rng = StdRng::seed_from_u64(42);
        let plan = generate_daily_plan(&airports, &config, &mut rng);

        // 27 + 9 + 1
        assert_eq!(plan.len(), 37);
        assert_eq!(plan[0].id, format!("EBBR{}100", plan[0].destination.icao));
        assert_eq!(plan[0].flight_number, "FL101");
        assert_eq!(plan[36].flight_number, "FL137");

        let (day_start, day_end) = config.day_window_sec();
        let ebbr: Vec<&Aircraft> = plan.iter().filter(|a| a.origin.icao == "EBBR").collect();
        // round(27 * 0.6) = 16 day flights first
        for (n, flight) in ebbr.iter().enumerate() {
            let in_day = flight.departure_time >= day_start && flight.departure_time < day_end;
            assert_eq!(in_day, n < 16, "flight {} departs at {}", n, flight.departure_time);
        }

        for flight in &plan {
            assert_ne!(flight.origin.icao, flight.destination.icao);
            assert_eq!(flight.phase, FlightPhase::Scheduled);
            assert!((0.0..SECONDS_IN_DAY).contains(&flight.departure_time));
            assert!(config.cruise_levels_ft.contains(&flight.cruise_altitude_ft));
            assert_eq!(flight.position.alt_ft, 100.0);
            assert_eq!(flight.speed_kmh, 0.0);
            assert!(flight.total_distance_km > 0.0);
        }
    }

    #[test]
    fn test_plan_needs_two_airports() {
        let config = TrafficConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_daily_plan(&[], &config, &mut rng).is_empty());
        let single = vec![airport("EBBR", 50.9, 4.48, 24_000_000)];
        assert!(generate_daily_plan(&single, &config, &mut rng).is_empty());
    }

    #[test]
    fn test_plan_rejects_invalid_config() {
        let airports = vec![
            airport("EBBR", 50.9014, 4.48444, 24_483_868),
            airport("EBCI", 50.4592, 4.45382, 8_150_000),
        ];
        let mut rng = StdRng::seed_from_u64(5);

        let no_levels = TrafficConfig {
            cruise_levels_ft: Vec::new(),
            ..TrafficConfig::default()
        };
        assert!(generate_daily_plan(&airports, &no_levels, &mut rng).is_empty());

        let no_capacity = TrafficConfig {
            aircraft_capacity: 0,
            ..TrafficConfig::default()
        };
        assert!(generate_daily_plan(&airports, &no_capacity, &mut rng).is_empty());
    }

    #[test]
    fn test_plan_is_seed_deterministic() {
        let config = TrafficConfig::default();
        let airports = vec![
            airport("EBBR", 50.9014, 4.48444, 5_000_000),
            airport("EBCI", 50.4592, 4.45382, 5_000_000),
        ];
        let a = generate_daily_plan(&airports, &config, &mut StdRng::seed_from_u64(9));
        let b = generate_daily_plan(&airports, &config, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }
}
