//! Ambient wind field
//!
//! A coarse 10×10 field of random vectors, regenerated periodically. It is
//! exposed for display only; aircraft kinematics do not read it.

use rand::Rng;
use serde::{Deserialize, Serialize};

pub const WIND_FIELD_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindVector {
    /// Direction the wind blows from
    pub direction_deg: f64,
    pub speed_kph: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindField {
    vectors: Vec<WindVector>,
    last_update_sec: f64,
}

impl WindField {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let vectors = (0..WIND_FIELD_SIZE * WIND_FIELD_SIZE)
            .map(|_| WindVector {
                direction_deg: rng.random::<f64>() * 360.0,
                speed_kph: 10.0 + rng.random::<f64>() * 30.0,
            })
            .collect();
        Self {
            vectors,
            last_update_sec: 0.0,
        }
    }

    pub fn last_update_sec(&self) -> f64 {
        self.last_update_sec
    }

    /// Regenerate once more than `interval_sec` has passed since the last
    /// regeneration; returns whether it did
    pub fn refresh<R: Rng + ?Sized>(&mut self, time_sec: f64, interval_sec: f64, rng: &mut R) -> bool {
        if time_sec - self.last_update_sec <= interval_sec {
            return false;
        }
        *self = Self::generate(rng);
        self.last_update_sec = time_sec;
        true
    }

    pub fn vector(&self, row: usize, col: usize) -> Option<WindVector> {
        if row < WIND_FIELD_SIZE && col < WIND_FIELD_SIZE {
            Some(self.vectors[row * WIND_FIELD_SIZE + col])
        } else {
            None
        }
    }

    /// Wind at a position; the field is treated as one global vector
    pub fn at(&self, _lat: f64, _lon: f64) -> WindVector {
        self.vectors[0]
    }
}
