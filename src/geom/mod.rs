//! Geometry engine: geodesic measures on a spherical earth and bounding boxes.

mod bbox;
mod coord;
mod spherical;

pub use bbox::{bounds, fill_degenerate, union_rect};
pub use coord::Coordinate;
pub use spherical::{haversine_distance, spherical_area, EARTH_RADIUS_METERS};
