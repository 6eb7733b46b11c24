use serde_json::{json, Map, Value};

use crate::{error::Result, feature::{Feature, FeatureKind}, geom::Coordinate};

use super::{ensure_not_empty, round_to};

/// Export features as a GeoJSON FeatureCollection.
///
/// Properties hold `id`, `type`, the rounded measures for the feature's kind,
/// the point count, and then every original row attribute (attributes win on
/// key clashes). Coordinates are `[longitude, latitude]`.
pub fn to_geojson(features: &[Feature]) -> Result<Value> {
    ensure_not_empty(features)?;

    let features = features.iter()
        .map(|feature| json!({
            "type": "Feature",
            "properties": properties(feature),
            "geometry": geometry(feature),
        }))
        .collect::<Vec<_>>();

    Ok(json!({
        "type": "FeatureCollection",
        "features": features,
    }))
}

fn properties(feature: &Feature) -> Map<String, Value> {
    let mut properties = Map::new();
    properties.insert("id".to_string(), json!(feature.id()));
    properties.insert("type".to_string(), json!(feature.mode().as_str()));

    match feature.kind() {
        FeatureKind::Area { area_sq_meters } => {
            properties.insert("area_m2".to_string(), json!(round_to(*area_sq_meters, 2)));
            properties.insert("area_ha".to_string(), json!(round_to(area_sq_meters / 10_000.0, 4)));
            properties.insert("area_sqkm".to_string(), json!(round_to(area_sq_meters / 1_000_000.0, 6)));
        }
        FeatureKind::Path { total_distance_meters, .. } => {
            properties.insert("total_dist_m".to_string(), json!(round_to(*total_distance_meters, 2)));
            properties.insert("total_dist_km".to_string(), json!(round_to(total_distance_meters / 1000.0, 3)));
        }
    }
    properties.insert("points".to_string(), json!(feature.points().len()));

    for (key, value) in feature.attributes() {
        properties.insert(key.clone(), value.clone());
    }

    properties
}

fn geometry(feature: &Feature) -> Value {
    let mut coords = positions(feature.points());
    match feature.kind() {
        FeatureKind::Area { .. } => {
            // linear rings end where they start
            if let Some(&first) = coords.first() { coords.push(first) }
            json!({
                "type": "Polygon",
                "coordinates": [coords],
            })
        }
        FeatureKind::Path { .. } => json!({
            "type": "LineString",
            "coordinates": coords,
        }),
    }
}

#[inline]
fn positions(points: &[Coordinate]) -> Vec<[f64; 2]> {
    points.iter().map(|p| [p.lng, p.lat]).collect()
}
