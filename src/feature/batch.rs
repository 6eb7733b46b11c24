use tracing::debug;

use crate::{error::Result, geom::Coordinate};

use super::{extract_points, Feature, GapPolicy, PlotMode, PointConfigs, Row};

/// Result of converting a set of rows into features.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    /// Features in row order.
    pub features: Vec<Feature>,
    /// Rows that produced a feature.
    pub plotted: usize,
    /// Rows with too few valid points.
    pub skipped: usize,
}

/// Build a feature of the given mode, or `None` if there are too few points.
pub fn build_feature(points: Vec<Coordinate>, row: &Row, row_id: u32, mode: PlotMode) -> Option<Feature> {
    match mode {
        PlotMode::Area => Feature::area(row_id, row.clone(), points),
        PlotMode::Path => Feature::path(row_id, row.clone(), points),
    }
}

/// Convert every row into a feature.
///
/// The whole batch is rejected up front if any point is missing a column.
/// Rows with too few valid points are counted as skipped; they never abort the
/// batch. Row ids are 1-based row indices.
pub fn run_batch(rows: &[Row], configs: &PointConfigs, mode: PlotMode, policy: GapPolicy) -> Result<Batch> {
    configs.validate()?;

    let mut batch = Batch { features: Vec::with_capacity(rows.len()), ..Default::default() };

    for (row_id, row) in (1..).zip(rows) {
        let points = extract_points(row, configs, policy);
        let count = points.len();

        match build_feature(points, row, row_id, mode) {
            Some(feature) => {
                batch.features.push(feature);
                batch.plotted += 1;
            }
            None => {
                debug!(row = row_id, points = count, needed = mode.min_points(), "skipping row with insufficient points");
                batch.skipped += 1;
            }
        }
    }

    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlotError;
    use serde_json::{json, Value};

    fn rows(values: Value) -> Vec<Row> {
        let Value::Array(items) = values else { panic!("rows must be an array") };
        items.into_iter()
            .map(|item| match item {
                Value::Object(map) => map,
                _ => panic!("row must be an object"),
            })
            .collect()
    }

    fn three_points() -> PointConfigs {
        PointConfigs::from_columns([("lat1", "lng1"), ("lat2", "lng2"), ("lat3", "lng3")]).unwrap()
    }

    #[test]
    fn builds_areas_and_counts_skips() {
        let rows = rows(json!([
            {"name": "a", "lat1": 10.0, "lng1": 10.0, "lat2": 10.0, "lng2": 10.01, "lat3": 10.01, "lng3": 10.01},
            {"name": "b", "lat1": 10.0, "lng1": 10.0, "lat2": 10.0, "lng2": 10.01},
            {"name": "c", "lat1": "20.0", "lng1": "20.0", "lat2": "20.0", "lng2": "20.02", "lat3": "20.02", "lng3": "20.0"},
        ]));

        let batch = run_batch(&rows, &three_points(), PlotMode::Area, GapPolicy::Collapse).unwrap();
        assert_eq!(batch.plotted, 2);
        assert_eq!(batch.skipped, 1);
        assert_eq!(batch.features.iter().map(Feature::id).collect::<Vec<_>>(), vec![1, 3]);
        assert!(batch.features.iter().all(Feature::is_area));
        assert_eq!(batch.features[1].attributes()["name"], json!("c"));
    }

    #[test]
    fn builds_paths_from_two_points() {
        let rows = rows(json!([
            {"lat1": 1.0, "lng1": 1.0, "lat2": 1.0, "lng2": 2.0},
        ]));

        let batch = run_batch(&rows, &three_points(), PlotMode::Path, GapPolicy::Collapse).unwrap();
        assert_eq!(batch.plotted, 1);
        let feature = &batch.features[0];
        assert!(feature.is_path());
        assert_eq!(feature.segment_distances().unwrap().len(), 1);
    }

    #[test]
    fn single_point_row_is_skipped_in_both_modes() {
        let rows = rows(json!([{"lat1": 1, "lng1": 0, "lat2": 1, "lng2": 5}]));
        let configs = PointConfigs::from_columns([("lat1", "lng1"), ("lat2", "lng2")]).unwrap();

        for mode in [PlotMode::Area, PlotMode::Path] {
            let batch = run_batch(&rows, &configs, mode, GapPolicy::Collapse).unwrap();
            assert_eq!((batch.plotted, batch.skipped), (0, 1));
            assert!(batch.features.is_empty());
        }
    }

    #[test]
    fn incomplete_configuration_rejects_batch() {
        let mut configs = PointConfigs::new();
        configs.set_lat_column(0, "lat1").unwrap();
        configs.set_lng_column(0, "lng1").unwrap();
        configs.set_lat_column(1, "lat2").unwrap();

        let rows = rows(json!([{"lat1": 1, "lng1": 1, "lat2": 2, "lng2": 2}]));
        assert!(matches!(
            run_batch(&rows, &configs, PlotMode::Path, GapPolicy::Collapse),
            Err(PlotError::Validation(_))
        ));
    }

    #[test]
    fn strict_policy_skips_rows_with_gaps() {
        let rows = rows(json!([
            {"lat2": 1.0, "lng2": 1.0, "lat3": 1.0, "lng3": 2.0},
        ]));

        let collapse = run_batch(&rows, &three_points(), PlotMode::Path, GapPolicy::Collapse).unwrap();
        let strict = run_batch(&rows, &three_points(), PlotMode::Path, GapPolicy::Strict).unwrap();
        assert_eq!(collapse.plotted, 1);
        assert_eq!(strict.skipped, 1);
    }
}
