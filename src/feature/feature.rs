use std::{fmt, str::FromStr};

use geo::{Coord, Geometry, LineString, Polygon};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{error::PlotError, geom::{haversine_distance, spherical_area, Coordinate}};

/// One spreadsheet row: column name -> raw cell value, in column order.
pub type Row = Map<String, Value>;

/// Which kind of feature a batch produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlotMode {
    /// Closed rings with surface area (needs at least 3 points per row).
    #[default]
    #[serde(rename = "area")]
    Area,
    /// Open polylines with segment distances (needs at least 2 points per row).
    #[serde(rename = "distance", alias = "path")]
    Path,
}

impl PlotMode {
    /// Minimum number of valid points a row needs to produce a feature.
    #[inline]
    pub fn min_points(&self) -> usize {
        match self {
            Self::Area => 3,
            Self::Path => 2,
        }
    }

    /// Name used in exported properties and attribute tables.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Area => "area",
            Self::Path => "distance",
        }
    }
}

impl fmt::Display for PlotMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for PlotMode {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "area" => Ok(Self::Area),
            "distance" | "path" => Ok(Self::Path),
            _ => Err(PlotError::Validation(format!("unknown plot mode '{s}', expected 'area' or 'distance'"))),
        }
    }
}

/// Measures carried by each feature variant.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureKind {
    Area {
        area_sq_meters: f64,
    },
    Path {
        segment_distances: Vec<f64>,
        total_distance_meters: f64,
    },
}

/// A plotted row: its geometry, its measures, and the row's original attributes.
///
/// Fields are private so the measures can only come from the constructors,
/// which keeps them consistent with `points`.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    id: u32, // 1-based row index
    attributes: Row,
    points: Vec<Coordinate>,
    kind: FeatureKind,
}

impl Feature {
    /// Build an area feature. Returns `None` for fewer than 3 points.
    pub fn area(id: u32, attributes: Row, points: Vec<Coordinate>) -> Option<Self> {
        if points.len() < PlotMode::Area.min_points() { return None }

        let area_sq_meters = spherical_area(&points);
        Some(Self { id, attributes, points, kind: FeatureKind::Area { area_sq_meters } })
    }

    /// Build a path feature. Returns `None` for fewer than 2 points.
    /// Segments run between consecutive points; there is no closing segment.
    pub fn path(id: u32, attributes: Row, points: Vec<Coordinate>) -> Option<Self> {
        if points.len() < PlotMode::Path.min_points() { return None }

        let segment_distances = points.windows(2)
            .map(|pair| haversine_distance(pair[0], pair[1]))
            .collect::<Vec<_>>();
        let total_distance_meters = segment_distances.iter().sum();

        Some(Self { id, attributes, points, kind: FeatureKind::Path { segment_distances, total_distance_meters } })
    }

    #[inline] pub fn id(&self) -> u32 { self.id }

    #[inline] pub fn attributes(&self) -> &Row { &self.attributes }

    #[inline] pub fn points(&self) -> &[Coordinate] { &self.points }

    #[inline] pub fn kind(&self) -> &FeatureKind { &self.kind }

    #[inline]
    pub fn mode(&self) -> PlotMode {
        match self.kind {
            FeatureKind::Area { .. } => PlotMode::Area,
            FeatureKind::Path { .. } => PlotMode::Path,
        }
    }

    #[inline] pub fn is_area(&self) -> bool { self.mode() == PlotMode::Area }

    #[inline] pub fn is_path(&self) -> bool { self.mode() == PlotMode::Path }

    /// Area in square meters, for area features.
    #[inline]
    pub fn area_sq_meters(&self) -> Option<f64> {
        match self.kind {
            FeatureKind::Area { area_sq_meters } => Some(area_sq_meters),
            FeatureKind::Path { .. } => None,
        }
    }

    /// Area in hectares, derived from the area in square meters.
    #[inline] pub fn hectares(&self) -> Option<f64> { self.area_sq_meters().map(|a| a / 10_000.0) }

    /// Area in square kilometers, derived from the area in square meters.
    #[inline] pub fn sq_km(&self) -> Option<f64> { self.area_sq_meters().map(|a| a / 1_000_000.0) }

    /// Per-segment distances in meters, for path features.
    #[inline]
    pub fn segment_distances(&self) -> Option<&[f64]> {
        match &self.kind {
            FeatureKind::Path { segment_distances, .. } => Some(segment_distances),
            FeatureKind::Area { .. } => None,
        }
    }

    /// Total path length in meters, for path features.
    #[inline]
    pub fn total_distance_meters(&self) -> Option<f64> {
        match self.kind {
            FeatureKind::Path { total_distance_meters, .. } => Some(total_distance_meters),
            FeatureKind::Area { .. } => None,
        }
    }

    /// Display name, e.g. "Area 3" or "Distance 7".
    pub fn label(&self) -> String {
        match self.kind {
            FeatureKind::Area { .. } => format!("Area {}", self.id),
            FeatureKind::Path { .. } => format!("Distance {}", self.id),
        }
    }

    /// Non-empty attributes in column order, rendered as display strings.
    pub fn display_attributes(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.attributes.iter()
            .filter_map(|(key, value)| display_value(value).map(|text| (key.as_str(), text)))
    }

    /// Convert to a geo geometry in (longitude, latitude) order.
    pub fn to_geometry(&self) -> Geometry<f64> {
        let coords = self.points.iter().copied().map(Coord::from).collect::<Vec<_>>();
        match self.kind {
            FeatureKind::Area { .. } => Geometry::Polygon(Polygon::new(LineString::from(coords), vec![])),
            FeatureKind::Path { .. } => Geometry::LineString(LineString::from(coords)),
        }
    }
}

/// Render a raw cell as text. Null and empty strings have no display value.
pub(crate) fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn coords(points: &[(f64, f64)]) -> Vec<Coordinate> {
        points.iter().copied().map(Coordinate::from).collect()
    }

    fn attrs() -> Row {
        let Value::Object(map) = json!({"name": "plot", "owner": "", "size": 4, "note": null}) else { unreachable!() };
        map
    }

    #[test]
    fn area_needs_three_points() {
        assert!(Feature::area(1, Row::new(), coords(&[(1.0, 1.0), (1.0, 2.0)])).is_none());
        assert!(Feature::area(1, Row::new(), coords(&[(1.0, 1.0), (1.0, 2.0), (2.0, 2.0)])).is_some());
    }

    #[test]
    fn path_needs_two_points() {
        assert!(Feature::path(1, Row::new(), coords(&[(1.0, 1.0)])).is_none());
        assert!(Feature::path(1, Row::new(), coords(&[(1.0, 1.0), (1.0, 2.0)])).is_some());
    }

    #[test]
    fn area_units_are_consistent() {
        let feature = Feature::area(1, Row::new(), coords(&[(10.0, 10.0), (10.0, 10.01), (10.01, 10.01), (10.01, 10.0)])).unwrap();
        let m2 = feature.area_sq_meters().unwrap();
        assert!((feature.hectares().unwrap() * 10_000.0 - m2).abs() < 1e-6 * m2);
        assert!((feature.sq_km().unwrap() * 1_000_000.0 - m2).abs() < 1e-6 * m2);
        assert!(feature.total_distance_meters().is_none());
    }

    #[test]
    fn path_total_is_sum_of_segments() {
        let feature = Feature::path(2, Row::new(), coords(&[(0.0, 1.0), (0.5, 1.5), (1.0, 1.0), (1.5, 2.5)])).unwrap();
        let segments = feature.segment_distances().unwrap();
        assert_eq!(segments.len(), feature.points().len() - 1);
        assert_eq!(segments.iter().sum::<f64>(), feature.total_distance_meters().unwrap());
        assert!(feature.area_sq_meters().is_none());
    }

    #[test]
    fn display_attributes_skip_empty_values() {
        let feature = Feature::path(3, attrs(), coords(&[(1.0, 1.0), (2.0, 2.0)])).unwrap();
        let shown = feature.display_attributes().collect::<Vec<_>>();
        assert_eq!(shown, vec![("name", "plot".to_string()), ("size", "4".to_string())]);
    }

    #[test]
    fn labels_follow_kind() {
        let area = Feature::area(4, Row::new(), coords(&[(1.0, 1.0), (1.0, 2.0), (2.0, 2.0)])).unwrap();
        let path = Feature::path(5, Row::new(), coords(&[(1.0, 1.0), (1.0, 2.0)])).unwrap();
        assert_eq!(area.label(), "Area 4");
        assert_eq!(path.label(), "Distance 5");
    }

    #[test]
    fn plot_mode_parses_both_names() {
        assert_eq!("area".parse::<PlotMode>().unwrap(), PlotMode::Area);
        assert_eq!("Distance".parse::<PlotMode>().unwrap(), PlotMode::Path);
        assert_eq!("path".parse::<PlotMode>().unwrap(), PlotMode::Path);
        assert!(matches!("ring".parse::<PlotMode>(), Err(PlotError::Validation(_))));
    }
}
