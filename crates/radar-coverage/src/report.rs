//! Per-cell coverage report: the altitude ladder of one cell split into
//! fully covered (≥ 2 sensors), partially covered (1) and uncovered bands.

use crate::{DetailGrid, Sensor};
use geo_grid::{AltitudeLadder, GeoPoint, Grid};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AltitudeCoverage {
    pub altitude_ft: f64,
    /// Covering sensor names, in detail-grid order
    pub sensors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellReport {
    pub cell: (usize, usize),
    pub center: GeoPoint,
    pub full: Vec<AltitudeCoverage>,
    pub partial: Vec<AltitudeCoverage>,
    /// Altitudes in feet with no coverage
    pub none: Vec<f64>,
}

impl CellReport {
    /// Build the report for cell (i, j); `None` outside the grid.
    ///
    /// Sensor names come from `sensors`, falling back to the id for sensors
    /// that are no longer known.
    pub fn build(
        grid: &Grid,
        ladder: &AltitudeLadder,
        detail: &DetailGrid,
        i: usize,
        j: usize,
        sensors: &[Sensor],
    ) -> Option<Self> {
        if i >= grid.width() || j >= grid.height() {
            return None;
        }

        let names: HashMap<&str, &str> = sensors.iter().map(|s| (s.id.as_str(), s.name.as_str())).collect();

        let mut report = CellReport {
            cell: (i, j),
            center: grid.cell_center_geo(i, j),
            full: Vec::new(),
            partial: Vec::new(),
            none: Vec::new(),
        };

        for k in 0..ladder.len() {
            let altitude_ft = ladder.level_ft(k);
            let covering: Vec<String> = detail
                .sensors_at(i, j, k)
                .map(|id| names.get(id).copied().unwrap_or(id).to_string())
                .collect();

            match covering.len() {
                0 => report.none.push(altitude_ft),
                1 => report.partial.push(AltitudeCoverage {
                    altitude_ft,
                    sensors: covering,
                }),
                _ => report.full.push(AltitudeCoverage {
                    altitude_ft,
                    sensors: covering,
                }),
            }
        }

        Some(report)
    }
}
