//! Coverage grid geometry
//!
//! W = ceil(width_km / cell), H = ceil(height_km / cell). Cell (i, j) spans
//! x ∈ [i·cell, (i+1)·cell), y ∈ [j·cell, (j+1)·cell).

use crate::{GeoPoint, PlanarPoint, Projection, RegionConfig, Result};
use serde::{Deserialize, Serialize};

/// Geographic extent of one cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellBounds {
    pub north: f64,
    pub south: f64,
    pub west: f64,
    pub east: f64,
}

impl CellBounds {
    /// Closed ring (lon, lat) in counter-clockwise order
    pub fn ring(&self) -> [[f64; 2]; 5] {
        [
            [self.west, self.south],
            [self.east, self.south],
            [self.east, self.north],
            [self.west, self.north],
            [self.west, self.south],
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    projection: Projection,
    cell_size_km: f64,
    width: usize,
    height: usize,
}

impl Grid {
    pub fn new(config: &RegionConfig) -> Result<Self> {
        config.validate()?;
        let projection = Projection::new(config.bounds, config.km_per_deg_lat);
        let width = (projection.width_km() / config.cell_size_km).ceil() as usize;
        let height = (projection.height_km() / config.cell_size_km).ceil() as usize;

        Ok(Self {
            projection,
            cell_size_km: config.cell_size_km,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    pub fn cell_size_km(&self) -> f64 {
        self.cell_size_km
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn cell_center(&self, i: usize, j: usize) -> PlanarPoint {
        PlanarPoint {
            x: (i as f64 + 0.5) * self.cell_size_km,
            y: (j as f64 + 0.5) * self.cell_size_km,
        }
    }

    pub fn cell_center_geo(&self, i: usize, j: usize) -> GeoPoint {
        self.projection.to_geo(self.cell_center(i, j))
    }

    pub fn cell_bounds_geo(&self, i: usize, j: usize) -> CellBounds {
        let c = self.cell_size_km;
        let nw = self
            .projection
            .to_geo(PlanarPoint::new(i as f64 * c, j as f64 * c));
        let se = self
            .projection
            .to_geo(PlanarPoint::new((i + 1) as f64 * c, (j + 1) as f64 * c));
        CellBounds {
            north: nw.lat,
            south: se.lat,
            west: nw.lon,
            east: se.lon,
        }
    }

    /// Cell containing a planar point, `None` outside the grid
    pub fn cell_of(&self, p: PlanarPoint) -> Option<(usize, usize)> {
        let gx = (p.x / self.cell_size_km).floor();
        let gy = (p.y / self.cell_size_km).floor();
        // NaN fails both comparisons
        if !(gx >= 0.0 && gy >= 0.0) {
            return None;
        }
        let (i, j) = (gx as usize, gy as usize);
        (i < self.width && j < self.height).then_some((i, j))
    }

    pub fn cell_at(&self, geo: GeoPoint) -> Option<(usize, usize)> {
        self.cell_of(self.projection.to_planar(geo))
    }

    /// All cells, column-major (i outer, j inner)
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.width).flat_map(move |i| (0..self.height).map(move |j| (i, j)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_europe_grid_dimensions() {
        let grid = Grid::new(&RegionConfig::default()).unwrap();
        // 4743.71 km × 3896.2 km at 10 km
        assert_eq!(grid.width(), 475);
        assert_eq!(grid.height(), 390);
        assert_eq!(grid.cell_count(), 475 * 390);
    }

    #[test]
    fn test_cell_of_bounds() {
        let grid = Grid::new(&RegionConfig::default()).unwrap();
        assert_eq!(grid.cell_of(PlanarPoint::new(0.0, 0.0)), Some((0, 0)));
        assert_eq!(grid.cell_of(PlanarPoint::new(19.99, 10.0)), Some((1, 1)));
        assert_eq!(grid.cell_of(PlanarPoint::new(-0.1, 5.0)), None);
        assert_eq!(grid.cell_of(PlanarPoint::new(4750.0, 5.0)), None);
        assert_eq!(grid.cell_of(PlanarPoint::new(5.0, 3900.0)), None);
        assert_eq!(grid.cell_of(PlanarPoint::new(f64::NAN, 5.0)), None);
    }

    #[test]
    fn test_cell_at_brussels() {
        let grid = Grid::new(&RegionConfig::default()).unwrap();
        let (i, j) = grid.cell_at(GeoPoint::new(50.9014, 4.48444)).unwrap();
        // x = 29.48444 · 67.767 ≈ 1998.1 km, y = 19.0986 · 111.32 ≈ 2126.1 km
        assert_eq!((i, j), (199, 212));
        assert!(grid.cell_at(GeoPoint::new(30.0, 4.0)).is_none());
    }

    #[test]
    fn test_cell_bounds_contain_center() {
        let grid = Grid::new(&RegionConfig::default()).unwrap();
        let b = grid.cell_bounds_geo(10, 20);
        let c = grid.cell_center_geo(10, 20);
        assert!(b.south < c.lat && c.lat < b.north);
        assert!(b.west < c.lon && c.lon < b.east);
        assert_eq!(b.ring()[0], b.ring()[4]);
    }

    #[test]
    fn test_cells_iterates_every_cell() {
        let config = RegionConfig {
            cell_size_km: 1000.0,
            ..RegionConfig::default()
        };
        let grid = Grid::new(&config).unwrap();
        assert_eq!((grid.width(), grid.height()), (5, 4));
        assert_eq!(grid.cells().count(), 20);
    }
}
