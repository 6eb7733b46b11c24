//! Feature builder: point configuration, coordinate extraction, and batch construction
//! of area and path features from spreadsheet rows.

mod batch;
mod feature;
mod points;

pub use batch::{build_feature, run_batch, Batch};
pub use feature::{Feature, FeatureKind, PlotMode, Row};
pub(crate) use feature::display_value;
pub use points::{extract_points, parse_coordinate, GapPolicy, PointConfig, PointConfigs, MIN_POINTS};
