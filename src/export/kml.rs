//! KML (map markup) export.

use std::fmt::Write;

use tracing::info;

use crate::{error::{PlotError, Result}, feature::{Feature, FeatureKind}, geom::Coordinate};

use super::{ensure_not_empty, zip_files};

/// Name of the `<Document>` element.
pub const KML_DOCUMENT_NAME: &str = "Sheetplot Results";

/// Render features as a KML document.
///
/// Areas become polygons whose ring is explicitly closed by repeating the first
/// vertex; paths become line strings. Coordinates are written `lng,lat,0`.
pub fn to_kml(features: &[Feature]) -> Result<String> {
    ensure_not_empty(features)?;

    let mut out = String::new();
    write_kml(&mut out, features).map_err(|e| PlotError::Io(std::io::Error::other(e)))?;

    info!(features = features.len(), bytes = out.len(), "exported KML");
    Ok(out)
}

/// Render features as KMZ: a zip archive holding `doc.kml`.
pub fn to_kmz(features: &[Feature]) -> Result<Vec<u8>> {
    let kml = to_kml(features)?;
    zip_files(&[("doc.kml", kml.as_bytes())])
}

fn write_kml(out: &mut impl Write, features: &[Feature]) -> std::fmt::Result {
    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(out, r#"<kml xmlns="http://www.opengis.net/kml/2.2">"#)?;
    writeln!(out, "<Document>")?;
    writeln!(out, "<name>{}</name>", escape(KML_DOCUMENT_NAME))?;

    for feature in features {
        writeln!(out, "<Placemark>")?;
        writeln!(out, "<name>{}</name>", escape(&feature.label()))?;
        writeln!(out, "<description>{}</description>", escape(&description(feature)))?;

        match feature.kind() {
            FeatureKind::Area { .. } => {
                let mut ring = feature.points().to_vec();
                if let Some(&first) = ring.first() { ring.push(first) }

                writeln!(out, "<Polygon>")?;
                writeln!(out, "<outerBoundaryIs>")?;
                writeln!(out, "<LinearRing>")?;
                writeln!(out, "<coordinates>{}</coordinates>", coordinates(&ring))?;
                writeln!(out, "</LinearRing>")?;
                writeln!(out, "</outerBoundaryIs>")?;
                writeln!(out, "</Polygon>")?;
            }
            FeatureKind::Path { .. } => {
                writeln!(out, "<LineString>")?;
                writeln!(out, "<coordinates>{}</coordinates>", coordinates(feature.points()))?;
                writeln!(out, "</LineString>")?;
            }
        }

        writeln!(out, "</Placemark>")?;
    }

    writeln!(out, "</Document>")?;
    write!(out, "</kml>")
}

/// Placemark description: the computed measures, then every non-empty attribute.
fn description(feature: &Feature) -> String {
    let mut text = match feature.kind() {
        FeatureKind::Area { area_sq_meters } => format!(
            "Area: {:.2} m², Hectares: {:.4} ha, Sq Km: {:.6} sq km",
            area_sq_meters,
            area_sq_meters / 10_000.0,
            area_sq_meters / 1_000_000.0,
        ),
        FeatureKind::Path { total_distance_meters, .. } => {
            format!("Total Distance: {:.3} km", total_distance_meters / 1000.0)
        }
    };

    for (key, value) in feature.display_attributes() {
        text.push_str(&format!("<br>{key}: {value}"));
    }

    text
}

/// Space-separated `lng,lat,0` tuples.
fn coordinates(points: &[Coordinate]) -> String {
    points.iter()
        .map(|p| format!("{},{},0", p.lng, p.lat))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape XML special characters in text content.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
