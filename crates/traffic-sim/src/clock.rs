//! Simulation clock
//!
//! Supplies `(time, Δt)` pairs to the engine. Time is seconds since
//! midnight and wraps at the end of the day.

use serde::{Deserialize, Serialize};

pub const SECONDS_IN_DAY: f64 = 86_400.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationClock {
    time_sec: f64,
    step_sec: f64,
    /// Total simulated seconds, not wrapped
    elapsed_sec: f64,
}

impl SimulationClock {
    pub fn new(start_sec: f64, step_sec: f64) -> Self {
        Self {
            time_sec: start_sec.rem_euclid(SECONDS_IN_DAY),
            step_sec,
            elapsed_sec: 0.0,
        }
    }

    pub fn time_sec(&self) -> f64 {
        self.time_sec
    }

    pub fn step_sec(&self) -> f64 {
        self.step_sec
    }

    pub fn elapsed_sec(&self) -> f64 {
        self.elapsed_sec
    }

    /// Advance one step; returns the new time and the step length
    pub fn tick(&mut self) -> (f64, f64) {
        self.time_sec = (self.time_sec + self.step_sec) % SECONDS_IN_DAY;
        self.elapsed_sec += self.step_sec;
        (self.time_sec, self.step_sec)
    }

    /// "HH:MM:SS"
    pub fn format_time(&self) -> String {
        let total = self.time_sec as u64;
        format!("{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_wraps_at_midnight() {
        let mut clock = SimulationClock::new(86_340.0, 30.0);
        assert_eq!(clock.tick(), (86_370.0, 30.0));
        assert_eq!(clock.tick(), (0.0, 30.0));
        assert_eq!(clock.elapsed_sec(), 60.0);
        assert_eq!(clock.format_time(), "00:00:00");
    }

    #[test]
    fn test_format_time() {
        let clock = SimulationClock::new(8.0 * 3600.0 + 5.0 * 60.0 + 7.0, 1.0);
        assert_eq!(clock.format_time(), "08:05:07");
        assert_eq!(SimulationClock::new(-60.0, 1.0).time_sec(), 86_340.0);
    }
}
