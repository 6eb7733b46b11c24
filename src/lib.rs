#![doc = "Sheetplot public API"]
mod config;
mod error;
mod export;
mod feature;
mod geom;
mod history;
mod io;
mod render;
mod session;

#[doc(inline)]
pub use error::{PlotError, Result};

#[doc(inline)]
pub use geom::{bounds, haversine_distance, spherical_area, Coordinate, EARTH_RADIUS_METERS};

#[doc(inline)]
pub use feature::{
    build_feature, extract_points, parse_coordinate, run_batch,
    Batch, Feature, FeatureKind, GapPolicy, PlotMode, PointConfig, PointConfigs, Row, MIN_POINTS,
};

#[doc(inline)]
pub use history::{History, MAX_UNDO_DEPTH};

#[doc(inline)]
pub use export::{
    to_attribute_csv, to_bundle, to_geojson, to_kml, to_kmz, zip_files,
    ATTRIBUTES_FILE, GEOJSON_FILE, KML_DOCUMENT_NAME,
};

#[doc(inline)]
pub use io::{deliver, read_rows_csv, read_rows_csv_bytes, read_rows_json, read_rows_json_bytes, DiskSink, ExportSink, MemSink, Table};

#[doc(inline)]
pub use render::{popup_text, summary_line, LayerTable, MapSurface, SvgSurface};

#[doc(inline)]
pub use config::{PlotConfig, PointColumns};

#[doc(inline)]
pub use session::{BatchSummary, Session};
