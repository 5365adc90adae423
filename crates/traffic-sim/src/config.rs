//! Traffic and flight-performance parameters

use crate::{Result, SimError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrafficConfig {
    /// Seats per flight
    pub aircraft_capacity: u32,
    /// Divides real traffic down to a simulated volume
    pub downscale_divisor: u32,
    pub day_start_hour: f64,
    pub day_end_hour: f64,
    /// Share of each airport's flights departing inside the day window
    pub day_ratio: f64,
    pub cruise_levels_ft: Vec<f64>,
    pub climb_rate_fpm: f64,
    pub descent_rate_fpm: f64,
    /// Groundspeed in every phase
    pub cruise_speed_kmh: f64,
    pub landing_threshold_km: f64,
    /// Inside this distance the descent switches to the time-to-go rate
    pub final_approach_km: f64,
    pub wind_interval_sec: f64,
    pub first_flight_serial: u32,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            aircraft_capacity: 250,
            downscale_divisor: 10,
            day_start_hour: 8.0,
            day_end_hour: 20.0,
            day_ratio: 0.6,
            cruise_levels_ft: (30..=38).map(|fl| fl as f64 * 1000.0).collect(),
            climb_rate_fpm: 2500.0,
            descent_rate_fpm: 2000.0,
            cruise_speed_kmh: 850.0,
            landing_threshold_km: 1.0,
            final_approach_km: 25.0,
            wind_interval_sec: 600.0,
            first_flight_serial: 100,
        }
    }
}

impl TrafficConfig {
    pub fn validate(&self) -> Result<()> {
        if self.aircraft_capacity == 0 || self.downscale_divisor == 0 {
            return Err(SimError::InvalidConfig(
                "aircraft capacity and downscale divisor must be non-zero".to_string(),
            ));
        }
        let hours = 0.0..=24.0;
        if !hours.contains(&self.day_start_hour)
            || !hours.contains(&self.day_end_hour)
            || self.day_start_hour >= self.day_end_hour
        {
            return Err(SimError::InvalidConfig(format!(
                "day window {}h..{}h",
                self.day_start_hour, self.day_end_hour
            )));
        }
        if !(0.0..=1.0).contains(&self.day_ratio) {
            return Err(SimError::InvalidConfig(format!("day ratio {}", self.day_ratio)));
        }
        if self.cruise_levels_ft.is_empty() {
            return Err(SimError::InvalidConfig("no cruise levels".to_string()));
        }
        for (name, value) in [
            ("climb rate", self.climb_rate_fpm),
            ("descent rate", self.descent_rate_fpm),
            ("cruise speed", self.cruise_speed_kmh),
            ("landing threshold", self.landing_threshold_km),
            ("wind interval", self.wind_interval_sec),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimError::InvalidConfig(format!("{} must be positive, got {}", name, value)));
            }
        }
        if !self.final_approach_km.is_finite() || self.final_approach_km < 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "final approach distance {}",
                self.final_approach_km
            )));
        }
        Ok(())
    }

    pub fn day_window_sec(&self) -> (f64, f64) {
        (self.day_start_hour * 3600.0, self.day_end_hour * 3600.0)
    }

    /// Distance needed to descend from `cruise_ft` to `elevation_ft` at the fixed rate
    pub fn descent_distance_km(&self, cruise_ft: f64, elevation_ft: f64) -> f64 {
        (cruise_ft - elevation_ft) / self.descent_rate_fpm * (self.cruise_speed_kmh / 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrafficConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cruise_levels_ft.len(), 9);
        assert_eq!(config.cruise_levels_ft[0], 30000.0);
        assert_eq!(config.cruise_levels_ft[8], 38000.0);
        assert_eq!(config.day_window_sec(), (28800.0, 72000.0));
    }

    #[test]
    fn test_descent_distance() {
        let config = TrafficConfig::default();
        // 30000 ft at 2000 fpm = 15 min at 850 km/h
        let d = config.descent_distance_km(30000.0, 0.0);
        assert!((d - 212.5).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_configs() {
        let bad_window = TrafficConfig {
            day_start_hour: 20.0,
            day_end_hour: 8.0,
            ..TrafficConfig::default()
        };
        assert!(bad_window.validate().is_err());

        let no_levels = TrafficConfig {
            cruise_levels_ft: Vec::new(),
            ..TrafficConfig::default()
        };
        assert!(no_levels.validate().is_err());

        let zero_capacity = TrafficConfig {
            aircraft_capacity: 0,
            ..TrafficConfig::default()
        };
        assert!(zero_capacity.validate().is_err());

        let stalled = TrafficConfig {
            cruise_speed_kmh: 0.0,
            ..TrafficConfig::default()
        };
        assert!(matches!(stalled.validate(), Err(SimError::InvalidConfig(_))));
    }
}
