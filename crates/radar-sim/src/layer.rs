//! GeoJSON coverage layer: one polygon per covered (non-RED) cell.

use geo_grid::Grid;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use radar_coverage::{CoverageGrid, CoverageStatus};

pub fn coverage_layer(grid: &Grid, coverage: &CoverageGrid) -> FeatureCollection {
    let features = coverage
        .iter()
        .filter(|(_, status)| matches!(status, CoverageStatus::Green | CoverageStatus::Orange))
        .map(|((i, j), status)| {
            let ring: Vec<Vec<f64>> = grid
                .cell_bounds_geo(i, j)
                .ring()
                .iter()
                .map(|c| c.to_vec())
                .collect();

            let mut properties = JsonObject::new();
            properties.insert("status".to_string(), serde_json::to_value(status).unwrap_or_default());
            properties.insert("i".to_string(), i.into());
            properties.insert("j".to_string(), j.into());

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_grid::RegionConfig;

    #[test]
    fn test_only_covered_cells_exported() {
        let grid = Grid::new(&RegionConfig {
            cell_size_km: 1000.0,
            ..RegionConfig::default()
        })
        .unwrap();
        let mut coverage = CoverageGrid::filled(grid.width(), grid.height(), CoverageStatus::Red);
        coverage.set(1, 2, CoverageStatus::Green);
        coverage.set(3, 0, CoverageStatus::Orange);

        let layer = coverage_layer(&grid, &coverage);
        assert_eq!(layer.features.len(), 2);

        let first = &layer.features[0];
        let props = first.properties.as_ref().unwrap();
        assert_eq!(props["status"], "GREEN");
        assert_eq!(props["i"], 1);
        match &first.geometry.as_ref().unwrap().value {
            Value::Polygon(rings) => {
                assert_eq!(rings[0].len(), 5);
                assert_eq!(rings[0][0], rings[0][4]);
            }
            other => panic!("unexpected geometry {:?}", other),
        }
    }
}
