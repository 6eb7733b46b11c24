//! Rendering adapter: the map-surface seam, the handle side-table, popup text,
//! and an SVG preview surface.

mod layers;
mod popup;
mod svg;

pub use layers::{LayerTable, MapSurface};
pub use popup::{popup_text, summary_line};
pub use svg::SvgSurface;
