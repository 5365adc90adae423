//! Country grid: each cell labelled with the country of its nearest airport.

use crate::Airport;
use geo_grid::{Grid, PlanarPoint};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Cells farther than this from every airport stay unlabelled
pub const MAX_LAND_DISTANCE_KM: f64 = 200.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryGrid {
    width: usize,
    height: usize,
    countries: Vec<String>,
    labels: Vec<Option<u16>>,
}

impl CountryGrid {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Distinct country codes in first-seen order
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn get(&self, i: usize, j: usize) -> Option<&str> {
        if i >= self.width || j >= self.height {
            return None;
        }
        self.labels[i * self.height + j].map(|c| self.countries[c as usize].as_str())
    }

    pub fn labelled_cells(&self) -> usize {
        self.labels.iter().filter(|l| l.is_some()).count()
    }
}

pub fn country_grid(grid: &Grid, airports: &[Airport]) -> CountryGrid {
    let projection = grid.projection();

    let mut countries: Vec<String> = Vec::new();
    let located: Vec<(PlanarPoint, u16)> = airports
        .iter()
        .map(|a| {
            let code = match countries.iter().position(|c| *c == a.country) {
                Some(idx) => idx,
                None => {
                    countries.push(a.country.clone());
                    countries.len() - 1
                }
            };
            (projection.to_planar(a.position()), code as u16)
        })
        .collect();

    let max_sq = MAX_LAND_DISTANCE_KM * MAX_LAND_DISTANCE_KM;
    let labels: Vec<Option<u16>> = grid
        .cells()
        .map(|(i, j)| {
            let center = grid.cell_center(i, j);
            let mut best: Option<(f64, u16)> = None;
            for (p, code) in &located {
                let d_sq = center.distance_sq(p);
                if best.map_or(true, |(b, _)| d_sq < b) {
                    best = Some((d_sq, *code));
                }
            }
            best.filter(|(d_sq, _)| *d_sq <= max_sq).map(|(_, code)| code)
        })
        .collect();

    let grid = CountryGrid {
        width: grid.width(),
        height: grid.height(),
        countries,
        labels,
    };
    debug!(
        "Country grid: {} of {} cells labelled",
        grid.labelled_cells(),
        grid.width * grid.height
    );
    grid
}
