use geo::{Coord, Geometry, Rect};
use tracing::debug;

use crate::{feature::Feature, geom::{bounds, fill_degenerate}};

use super::popup_text;

/// Fraction of the feature extent added on every side when fitting the viewport.
const FIT_PADDING: f64 = 0.1;

/// A surface that can display feature geometries, such as an interactive map.
/// The surface decides what a handle is; the core only hands it back for removal.
pub trait MapSurface {
    type Handle;

    /// Display a geometry (lng/lat axis order) with its popup text.
    fn draw(&mut self, geometry: &Geometry<f64>, popup: &str) -> Self::Handle;

    /// Retract a previously drawn geometry.
    fn remove(&mut self, handle: Self::Handle);

    /// Show the given extent (lng/lat axis order).
    fn fit_bounds(&mut self, bounds: Rect<f64>);
}

/// Rendering handles kept outside the features, index-aligned with the
/// feature collection they were drawn from.
pub struct LayerTable<S: MapSurface> {
    handles: Vec<S::Handle>,
}

impl<S: MapSurface> Default for LayerTable<S> {
    fn default() -> Self { Self { handles: Vec::new() } }
}

impl<S: MapSurface> LayerTable<S> {
    pub fn new() -> Self { Self::default() }

    #[inline] pub fn len(&self) -> usize { self.handles.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.handles.is_empty() }

    /// Draw the features appended since the last sync.
    /// Falls back to a full redraw if the collection shrank.
    pub fn sync_appended(&mut self, surface: &mut S, features: &[Feature]) {
        if features.len() < self.handles.len() {
            return self.replace_all(surface, features);
        }

        let start = self.handles.len();
        for feature in &features[start..] {
            self.handles.push(surface.draw(&feature.to_geometry(), &popup_text(feature)));
        }
        debug!(drawn = features.len() - start, total = features.len(), "synced appended layers");
    }

    /// Retract every drawn geometry, then draw the whole collection again.
    pub fn replace_all(&mut self, surface: &mut S, features: &[Feature]) {
        self.clear(surface);
        self.sync_appended(surface, features);
    }

    /// Retract every drawn geometry.
    pub fn clear(&mut self, surface: &mut S) {
        for handle in self.handles.drain(..) {
            surface.remove(handle);
        }
    }

    /// Ask the surface to show every feature, with some padding.
    /// A flat extent (one meridian, one parallel) is widened first.
    /// Does nothing for an empty collection.
    pub fn fit_bounds(&self, surface: &mut S, features: &[Feature]) {
        if let Some(rect) = bounds(features.iter().flat_map(|f| f.points())) {
            surface.fit_bounds(pad(fill_degenerate(rect), FIT_PADDING));
        }
    }
}

/// Grow a rectangle by `ratio` of its width/height on each side.
fn pad(rect: Rect<f64>, ratio: f64) -> Rect<f64> {
    let dx = rect.width() * ratio;
    let dy = rect.height() * ratio;
    Rect::new(
        Coord { x: rect.min().x - dx, y: rect.min().y - dy },
        Coord { x: rect.max().x + dx, y: rect.max().y + dy },
    )
}
