//! Equirectangular projection
//!
//! Longitude is scaled by the cosine of the region's mean latitude. Only
//! locally valid inside the configured bounds; no distortion correction.

use crate::{GeoPoint, MapBounds, PlanarPoint};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    bounds: MapBounds,
    km_per_deg_lat: f64,
    km_per_deg_lon: f64,
}

impl Projection {
    pub fn new(bounds: MapBounds, km_per_deg_lat: f64) -> Self {
        let km_per_deg_lon = km_per_deg_lat * bounds.mean_lat().to_radians().cos();
        Self {
            bounds,
            km_per_deg_lat,
            km_per_deg_lon,
        }
    }

    /// y = (maxLat − lat)·kmPerDegLat, x = (lon − minLon)·kmPerDegLon
    pub fn to_planar(&self, geo: GeoPoint) -> PlanarPoint {
        PlanarPoint {
            x: (geo.lon - self.bounds.min_lon) * self.km_per_deg_lon,
            y: (self.bounds.max_lat - geo.lat) * self.km_per_deg_lat,
        }
    }

    pub fn to_geo(&self, p: PlanarPoint) -> GeoPoint {
        GeoPoint {
            lat: self.bounds.max_lat - p.y / self.km_per_deg_lat,
            lon: p.x / self.km_per_deg_lon + self.bounds.min_lon,
        }
    }

    pub fn width_km(&self) -> f64 {
        (self.bounds.max_lon - self.bounds.min_lon) * self.km_per_deg_lon
    }

    pub fn height_km(&self) -> f64 {
        (self.bounds.max_lat - self.bounds.min_lat) * self.km_per_deg_lat
    }

    pub fn bounds(&self) -> &MapBounds {
        &self.bounds
    }

    pub fn km_per_deg_lat(&self) -> f64 {
        self.km_per_deg_lat
    }

    pub fn km_per_deg_lon(&self) -> f64 {
        self.km_per_deg_lon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::KM_PER_DEG_LAT;

    fn europe() -> Projection {
        Projection::new(MapBounds::europe(), KM_PER_DEG_LAT)
    }

    #[test]
    fn test_north_west_corner_is_origin() {
        let p = europe().to_planar(GeoPoint::new(70.0, -25.0));
        assert!(p.x.abs() < 1e-9);
        assert!(p.y.abs() < 1e-9);
    }

    #[test]
    fn test_longitude_scale() {
        let proj = europe();
        // cos(52.5°) ≈ 0.608761
        assert!((proj.km_per_deg_lon() - 67.767322).abs() < 1e-5);
        assert!((proj.height_km() - 3896.2).abs() < 1e-9);
    }

    #[test]
    fn test_inverse_recovers_brussels() {
        let proj = europe();
        let brussels = GeoPoint::new(50.9014, 4.48444);
        let back = proj.to_geo(proj.to_planar(brussels));
        assert!((back.lat - brussels.lat).abs() < 1e-9);
        assert!((back.lon - brussels.lon).abs() < 1e-9);
    }

    #[test]
    fn test_south_is_positive_y() {
        let proj = europe();
        let north = proj.to_planar(GeoPoint::new(60.0, 0.0));
        let south = proj.to_planar(GeoPoint::new(50.0, 0.0));
        assert!(south.y > north.y);
        assert!((south.y - north.y - 1113.2).abs() < 1e-6);
    }
}
