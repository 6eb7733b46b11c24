//! Export engine: map markup (KML/KMZ) and the structured bundle (GeoJSON + attribute CSV).
//!
//! Every export rejects an empty feature collection with [`PlotError::EmptyExport`].

mod archive;
mod bundle;
mod csv;
mod geojson;
mod kml;

pub use archive::zip_files;
pub use bundle::{to_bundle, ATTRIBUTES_FILE, GEOJSON_FILE};
pub use csv::to_attribute_csv;
pub use geojson::to_geojson;
pub use kml::{to_kml, to_kmz, KML_DOCUMENT_NAME};

use crate::{error::{PlotError, Result}, feature::Feature};

/// Reject empty exports.
#[inline]
fn ensure_not_empty(features: &[Feature]) -> Result<()> {
    if features.is_empty() { Err(PlotError::EmptyExport) } else { Ok(()) }
}

/// Round to a fixed number of decimal places.
#[inline]
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
