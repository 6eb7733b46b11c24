use geo::Coord;
use serde::{Deserialize, Serialize};

/// A geographic coordinate in degrees, stored latitude first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    #[inline] pub fn new(lat: f64, lng: f64) -> Self { Self { lat, lng } }

    /// Latitude in radians.
    #[inline] pub(crate) fn phi(&self) -> f64 { self.lat.to_radians() }

    /// Longitude in radians.
    #[inline] pub(crate) fn lambda(&self) -> f64 { self.lng.to_radians() }
}

/// Geo coordinates use (x, y) = (longitude, latitude).
impl From<Coordinate> for Coord<f64> {
    fn from(c: Coordinate) -> Self { Coord { x: c.lng, y: c.lat } }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self { Self { lat, lng } }
}
