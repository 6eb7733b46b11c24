use tracing::info;

use crate::{error::Result, feature::Feature};

use super::{to_attribute_csv, to_geojson, zip_files};

/// GeoJSON document inside the bundle.
pub const GEOJSON_FILE: &str = "sheetplot_results.geojson";

/// Attribute table inside the bundle.
pub const ATTRIBUTES_FILE: &str = "attributes.csv";

/// Export the structured bundle: a zip archive holding the GeoJSON document
/// and the flat attribute table.
pub fn to_bundle(features: &[Feature], columns: &[String]) -> Result<Vec<u8>> {
    let geojson = serde_json::to_string_pretty(&to_geojson(features)?)?;
    let csv = to_attribute_csv(features, columns)?;

    let bytes = zip_files(&[
        (GEOJSON_FILE, geojson.as_bytes()),
        (ATTRIBUTES_FILE, csv.as_bytes()),
    ])?;

    info!(features = features.len(), bytes = bytes.len(), "exported structured bundle");
    Ok(bytes)
}
