//! Altitude ladder
//!
//! Vertical axis of the coverage volume: `bands` levels spaced `step_ft`
//! apart, the first at `base_ft` (default 40 bands, 1000 ft to 40000 ft).

use crate::{GridError, Result};
use serde::{Deserialize, Serialize};

pub const FT_TO_KM: f64 = 0.0003048;

/// Number of bands in the default ladder
pub const DEFAULT_BANDS: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AltitudeLadder {
    base_ft: f64,
    step_ft: f64,
    bands: usize,
}

impl Default for AltitudeLadder {
    fn default() -> Self {
        Self {
            base_ft: 1000.0,
            step_ft: 1000.0,
            bands: DEFAULT_BANDS,
        }
    }
}

impl AltitudeLadder {
    pub fn new(base_ft: f64, step_ft: f64, bands: usize) -> Result<Self> {
        if bands == 0 {
            return Err(GridError::InvalidLadder("no bands".to_string()));
        }
        if !base_ft.is_finite() || !step_ft.is_finite() || step_ft <= 0.0 {
            return Err(GridError::InvalidLadder(format!(
                "base {} ft / step {} ft",
                base_ft, step_ft
            )));
        }
        Ok(Self {
            base_ft,
            step_ft,
            bands,
        })
    }

    pub fn len(&self) -> usize {
        self.bands
    }

    pub fn is_empty(&self) -> bool {
        self.bands == 0
    }

    pub fn level_ft(&self, index: usize) -> f64 {
        self.base_ft + self.step_ft * index as f64
    }

    pub fn level_km(&self, index: usize) -> f64 {
        self.level_ft(index) * FT_TO_KM
    }

    pub fn levels_km(&self) -> Vec<f64> {
        (0..self.bands).map(|k| self.level_km(k)).collect()
    }

    pub fn top_ft(&self) -> f64 {
        self.level_ft(self.bands - 1)
    }

    /// First band whose level lies above `altitude_ft`; `None` at or above the top band
    pub fn band_containing(&self, altitude_ft: f64) -> Option<usize> {
        (0..self.bands).find(|&k| altitude_ft < self.level_ft(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_levels() {
        let ladder = AltitudeLadder::default();
        assert_eq!(ladder.len(), 40);
        assert_eq!(ladder.level_ft(0), 1000.0);
        assert_eq!(ladder.top_ft(), 40000.0);
        assert!((ladder.level_km(0) - 0.3048).abs() < 1e-12);
        assert!((ladder.levels_km()[39] - 12.192).abs() < 1e-9);
    }

    #[test]
    fn test_band_containing() {
        let ladder = AltitudeLadder::default();
        assert_eq!(ladder.band_containing(0.0), Some(0));
        assert_eq!(ladder.band_containing(999.0), Some(0));
        assert_eq!(ladder.band_containing(1000.0), Some(1));
        assert_eq!(ladder.band_containing(35500.0), Some(35));
        assert_eq!(ladder.band_containing(39999.0), Some(39));
        assert_eq!(ladder.band_containing(40000.0), None);
        assert_eq!(ladder.band_containing(f64::NAN), None);
    }

    #[test]
    fn test_invalid_ladder() {
        assert!(AltitudeLadder::new(1000.0, 1000.0, 0).is_err());
        assert!(AltitudeLadder::new(1000.0, -5.0, 10).is_err());
    }
}
