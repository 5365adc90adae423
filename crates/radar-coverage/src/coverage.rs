//! Coverage Engine
//!
//! Evaluates every grid cell × altitude band against every active sensor.
//!
//! # Range model
//!
//! ```text
//! covered(cell, band, sensor) ⇔ d² + a² ≤ R²  ∧  (no cone ∨ d > r_cone)
//! ```
//!
//! where `d` is the planar distance from the cell centre to the sensor, `a`
//! the band altitude in km and `R` the type range. Altitude enters as a
//! second independent planar axis; no earth curvature, no line of sight.
//!
//! # Aggregate status
//!
//! | min hits over selected bands | status |
//! |------------------------------|--------|
//! | ≥ 2                          | GREEN  |
//! | 1                            | ORANGE |
//! | 0                            | RED    |
//!
//! An empty band selection has no minimum and is treated as 0 (RED).
//! Cost is O(W·H·A·S); sensor projection happens once per call.

use crate::{CoverageError, Result, Sensor, SensorCatalog};
use geo_grid::{AltitudeLadder, Grid, PlanarPoint, Projection};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoverageStatus {
    /// Initialization sentinel, never a final aggregate
    Empty,
    Red,
    Orange,
    Green,
}

impl CoverageStatus {
    pub fn from_hits(hits: usize) -> Self {
        match hits {
            0 => CoverageStatus::Red,
            1 => CoverageStatus::Orange,
            _ => CoverageStatus::Green,
        }
    }
}

/// Cells per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub green: usize,
    pub orange: usize,
    pub red: usize,
    pub empty: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: CoverageStatus) {
        match status {
            CoverageStatus::Green => self.green += 1,
            CoverageStatus::Orange => self.orange += 1,
            CoverageStatus::Red => self.red += 1,
            CoverageStatus::Empty => self.empty += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.green + self.orange + self.red + self.empty
    }
}

/// W×H aggregate status matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageGrid {
    width: usize,
    height: usize,
    cells: Vec<CoverageStatus>,
}

impl CoverageGrid {
    pub fn filled(width: usize, height: usize, status: CoverageStatus) -> Self {
        Self {
            width,
            height,
            cells: vec![status; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, i: usize, j: usize) -> Option<CoverageStatus> {
        if i < self.width && j < self.height {
            Some(self.cells[i * self.height + j])
        } else {
            None
        }
    }

    /// Overwrite one cell; out-of-range indexes are ignored
    pub fn set(&mut self, i: usize, j: usize, status: CoverageStatus) {
        if i < self.width && j < self.height {
            self.cells[i * self.height + j] = status;
        }
    }

    /// Iterate `((i, j), status)` column-major
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), CoverageStatus)> + '_ {
        let height = self.height;
        self.cells
            .iter()
            .enumerate()
            .map(move |(n, s)| ((n / height, n % height), *s))
    }

    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for &status in &self.cells {
            counts.record(status);
        }
        counts
    }
}

/// W×H×A buckets of covering sensor ids.
///
/// Stored compressed: bucket `b` owns `entries[offsets[b]..offsets[b + 1]]`,
/// each entry an index into `sensor_ids`. Buckets are laid out
/// `((i·H) + j)·A + k`, entries in sensor iteration order. An empty
/// `offsets` means every bucket is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailGrid {
    width: usize,
    height: usize,
    bands: usize,
    sensor_ids: Vec<String>,
    offsets: Vec<usize>,
    entries: Vec<usize>,
}

impl DetailGrid {
    pub fn empty(width: usize, height: usize, bands: usize) -> Self {
        Self {
            width,
            height,
            bands,
            sensor_ids: Vec::new(),
            offsets: Vec::new(),
            entries: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bands(&self) -> usize {
        self.bands
    }

    /// True when no bucket holds any sensor
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn bucket(&self, i: usize, j: usize, k: usize) -> Option<usize> {
        if self.offsets.is_empty() || i >= self.width || j >= self.height || k >= self.bands {
            return None;
        }
        Some((i * self.height + j) * self.bands + k)
    }

    fn slice(&self, i: usize, j: usize, k: usize) -> &[usize] {
        match self.bucket(i, j, k) {
            Some(b) => &self.entries[self.offsets[b]..self.offsets[b + 1]],
            None => &[],
        }
    }

    /// Number of sensors covering (i, j, k); 0 outside the grid
    pub fn hit_count(&self, i: usize, j: usize, k: usize) -> usize {
        self.slice(i, j, k).len()
    }

    pub fn sensors_at(&self, i: usize, j: usize, k: usize) -> impl Iterator<Item = &str> + '_ {
        self.slice(i, j, k)
            .iter()
            .map(move |&idx| self.sensor_ids[idx].as_str())
    }

    /// Hit counts for every band of one cell
    pub fn column(&self, i: usize, j: usize) -> Vec<usize> {
        (0..self.bands).map(|k| self.hit_count(i, j, k)).collect()
    }
}

/// Caller-selected altitude bands used for the aggregate status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AltitudeSelection {
    mask: Vec<bool>,
}

impl AltitudeSelection {
    pub fn new(indexes: &[usize], bands: usize) -> Result<Self> {
        let mut mask = vec![false; bands];
        for &index in indexes {
            if index >= bands {
                return Err(CoverageError::AltitudeIndexOutOfRange { index, bands });
            }
            mask[index] = true;
        }
        Ok(Self { mask })
    }

    /// Inclusive index range `lo..=hi`
    pub fn range(lo: usize, hi: usize, bands: usize) -> Result<Self> {
        let indexes: Vec<usize> = (lo..=hi).collect();
        Self::new(&indexes, bands)
    }

    pub fn all(bands: usize) -> Self {
        Self {
            mask: vec![true; bands],
        }
    }

    pub fn none(bands: usize) -> Self {
        Self {
            mask: vec![false; bands],
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.mask.get(index).copied().unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        !self.mask.iter().any(|&m| m)
    }

    pub fn indexes(&self) -> Vec<usize> {
        self.mask
            .iter()
            .enumerate()
            .filter_map(|(k, &m)| m.then_some(k))
            .collect()
    }
}

/// Output of one coverage computation
#[derive(Debug, Clone)]
pub struct CoverageResult {
    pub grid: CoverageGrid,
    pub detail: DetailGrid,
}

/// Planar positions of sensors keyed by id, computed without touching the sensors
pub fn project_sensors<'a>(
    projection: &Projection,
    sensors: impl IntoIterator<Item = &'a Sensor>,
) -> HashMap<String, PlanarPoint> {
    sensors
        .into_iter()
        .map(|s| (s.id.clone(), projection.to_planar(s.position)))
        .collect()
}

/// One active sensor resolved against the type table
struct Placement {
    planar: PlanarPoint,
    range_sq: f64,
    cone_radius_km: Option<f64>,
}

pub struct CoverageEngine {
    grid: Grid,
    ladder: AltitudeLadder,
    catalog: SensorCatalog,
}

impl CoverageEngine {
    pub fn new(grid: Grid, ladder: AltitudeLadder, catalog: SensorCatalog) -> Self {
        Self {
            grid,
            ladder,
            catalog,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn ladder(&self) -> &AltitudeLadder {
        &self.ladder
    }

    pub fn catalog(&self) -> &SensorCatalog {
        &self.catalog
    }

    pub fn compute(&self, sensors: &[Sensor], selection: &AltitudeSelection) -> CoverageResult {
        let (width, height, bands) = (self.grid.width(), self.grid.height(), self.ladder.len());
        let active: Vec<&Sensor> = sensors.iter().filter(|s| s.is_active).collect();

        if active.is_empty() {
            info!("No active sensors, {}x{} grid is uncovered", width, height);
            return CoverageResult {
                grid: CoverageGrid::filled(width, height, CoverageStatus::Red),
                detail: DetailGrid::empty(width, height, bands),
            };
        }

        let planar = project_sensors(self.grid.projection(), active.iter().copied());
        let placements: Vec<Placement> = active
            .iter()
            .filter_map(|s| {
                let spec = s.spec(&self.catalog);
                planar.get(&s.id).map(|p| Placement {
                    planar: *p,
                    range_sq: spec.range_km * spec.range_km,
                    cone_radius_km: spec.cone_radius_km(),
                })
            })
            .collect();
        let altitude_sq: Vec<f64> = self.ladder.levels_km().iter().map(|a| a * a).collect();

        let mut statuses = Vec::with_capacity(width * height);
        let mut offsets = Vec::with_capacity(width * height * bands + 1);
        let mut entries: Vec<usize> = Vec::new();
        offsets.push(0);

        // Sensors in reach of the current cell: (index, horizontal distance²)
        let mut reach: Vec<(usize, f64)> = Vec::with_capacity(placements.len());

        for (i, j) in self.grid.cells() {
            let center = self.grid.cell_center(i, j);

            reach.clear();
            for (idx, p) in placements.iter().enumerate() {
                let horizontal_sq = center.distance_sq(&p.planar);
                if horizontal_sq > p.range_sq {
                    continue;
                }
                if let Some(cone) = p.cone_radius_km {
                    if horizontal_sq.sqrt() <= cone {
                        continue;
                    }
                }
                reach.push((idx, horizontal_sq));
            }

            let mut min_hits: Option<usize> = None;
            for (k, alt_sq) in altitude_sq.iter().enumerate() {
                let start = entries.len();
                entries.extend(
                    reach
                        .iter()
                        .filter(|(idx, horizontal_sq)| {
                            horizontal_sq + alt_sq <= placements[*idx].range_sq
                        })
                        .map(|(idx, _)| *idx),
                );
                offsets.push(entries.len());

                if selection.contains(k) {
                    let hits = entries.len() - start;
                    min_hits = Some(min_hits.map_or(hits, |m| m.min(hits)));
                }
            }

            statuses.push(CoverageStatus::from_hits(min_hits.unwrap_or(0)));
        }

        let grid = CoverageGrid {
            width,
            height,
            cells: statuses,
        };
        let counts = grid.counts();
        info!(
            "Coverage computed: {}x{}x{} with {} active sensors",
            width,
            height,
            bands,
            active.len()
        );
        debug!(
            "  green={} orange={} red={} detail entries={}",
            counts.green,
            counts.orange,
            counts.red,
            entries.len()
        );

        CoverageResult {
            grid,
            detail: DetailGrid {
                width,
                height,
                bands,
                sensor_ids: active.iter().map(|s| s.id.clone()).collect(),
                offsets,
                entries,
            },
        }
    }
}
