use crate::feature::{Feature, FeatureKind};

/// Popup text for a drawn feature: measures, segment breakdown for paths,
/// then the non-empty row attributes.
pub fn popup_text(feature: &Feature) -> String {
    let n = feature.points().len();

    let mut lines = match feature.kind() {
        FeatureKind::Area { area_sq_meters } => vec![
            format!("Area {}", feature.id()),
            format!("Points: {n}"),
            format!("Area: {area_sq_meters:.2} m²"),
            format!("Hectares: {:.4} ha", area_sq_meters / 10_000.0),
            format!("Sq Km: {:.6} sq km", area_sq_meters / 1_000_000.0),
        ],
        FeatureKind::Path { segment_distances, total_distance_meters } => {
            let mut lines = vec![
                format!("Distance Analysis {}", feature.id()),
                format!("Points: {n}"),
                format!("Total Distance: {:.3} km", total_distance_meters / 1000.0),
                "\nSegment Distances:".to_string(),
            ];
            lines.extend(segment_distances.iter().enumerate().map(|(i, d)| format!("Segment {}: {d:.2} m", i + 1)));
            lines
        }
    };

    lines.push("\nAttributes:".to_string());
    lines.extend(feature.display_attributes().map(|(key, value)| format!("{key}: {value}")));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// One-line listing entry, e.g. `Area 3: 4 points, 1234.56 m², 0.1235 ha, 0.001235 sq km`.
pub fn summary_line(feature: &Feature) -> String {
    let n = feature.points().len();
    match feature.kind() {
        FeatureKind::Area { area_sq_meters } => format!(
            "Area {}: {n} points, {area_sq_meters:.2} m², {:.4} ha, {:.6} sq km",
            feature.id(),
            area_sq_meters / 10_000.0,
            area_sq_meters / 1_000_000.0,
        ),
        FeatureKind::Path { total_distance_meters, .. } => format!(
            "Distance {}: {n} points, {:.3} km total",
            feature.id(),
            total_distance_meters / 1000.0,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{feature::Row, geom::Coordinate};
    use serde_json::{json, Value};

    fn attrs(value: Value) -> Row {
        let Value::Object(map) = value else { panic!("attributes must be an object") };
        map
    }

    #[test]
    fn path_popup_lists_segments_and_attributes() {
        let points = [(0.0001, 0.0001), (0.0001, 1.0), (0.0001, 2.0)].map(Coordinate::from).to_vec();
        let feature = Feature::path(3, attrs(json!({"road": "A1", "empty": ""})), points).unwrap();
        let text = popup_text(&feature);

        assert!(text.starts_with("Distance Analysis 3\nPoints: 3\n"), "{text}");
        assert!(text.contains("Segment 1: "));
        assert!(text.contains("Segment 2: "));
        assert!(!text.contains("Segment 3: "));
        assert!(text.ends_with("Attributes:\nroad: A1\n"), "{text}");
    }

    #[test]
    fn area_popup_lines() {
        let points = [(10.0, 20.0), (10.0, 20.5), (10.5, 20.5)].map(Coordinate::from).to_vec();
        let text = popup_text(&Feature::area(2, Row::new(), points).unwrap());
        let lines = text.lines().collect::<Vec<_>>();

        assert_eq!(lines[..2], ["Area 2", "Points: 3"]);
        assert!(lines[2].starts_with("Area: ") && lines[2].ends_with(" m²"));
        assert_eq!(lines[5..], ["", "Attributes:"]);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn area_summary_line() {
        let points = [(10.0, 20.0), (10.0, 20.5), (10.5, 20.5)].map(Coordinate::from).to_vec();
        let feature = Feature::area(8, Row::new(), points).unwrap();
        let line = summary_line(&feature);
        assert!(line.starts_with("Area 8: 3 points, "), "{line}");
        assert!(line.ends_with(" sq km"));
        assert!(popup_text(&feature).contains("Hectares: "));
    }
}
