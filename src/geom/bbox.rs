use geo::{Coord, Rect};

use super::Coordinate;

/// Span, in degrees, given to a rectangle that collapses to a single point.
pub const MIN_SPAN_DEGREES: f64 = 1e-4;

/// Bounding rectangle over a set of coordinates, in (longitude, latitude) axis order.
/// Returns `None` when there are no coordinates.
pub fn bounds<'a>(coords: impl IntoIterator<Item = &'a Coordinate>) -> Option<Rect<f64>> {
    coords.into_iter()
        .map(|&c| Rect::new(Coord::from(c), Coord::from(c)))
        .reduce(union_rect)
}

/// Smallest rectangle covering both inputs.
pub fn union_rect(a: Rect<f64>, b: Rect<f64>) -> Rect<f64> {
    Rect::new(
        Coord {
            x: a.min().x.min(b.min().x),
            y: a.min().y.min(b.min().y),
        },
        Coord {
            x: a.max().x.max(b.max().x),
            y: a.max().y.max(b.max().y),
        }
    )
}

/// Give a flat rectangle some extent around its center.
///
/// A side with zero span takes the other side's span; if both are zero,
/// both become [`MIN_SPAN_DEGREES`]. Rectangles with area are unchanged.
pub fn fill_degenerate(rect: Rect<f64>) -> Rect<f64> {
    let (width, height) = (rect.width(), rect.height());
    let fallback = width.max(height).max(MIN_SPAN_DEGREES);
    let width = if width > 0.0 { width } else { fallback };
    let height = if height > 0.0 { height } else { fallback };

    let center = rect.center();
    Rect::new(
        Coord { x: center.x - width / 2.0, y: center.y - height / 2.0 },
        Coord { x: center.x + width / 2.0, y: center.y + height / 2.0 },
    )
}
