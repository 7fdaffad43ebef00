//! Geographic coordinates and great-circle distance.

use std::fmt;

/// Earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6367.4447;

/// A latitude/longitude pair in degrees.
///
/// No datum correction is applied; feed coordinates are used as-is.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

impl Coord {
    /// Create a coordinate from latitude and longitude in degrees.
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance to `other`, in kilometres.
    pub fn distance_to(&self, other: &Coord) -> f64 {
        haversine(self, other)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Anything with a position on the map.
pub trait Located {
    fn coord(&self) -> Coord;
}

impl Located for Coord {
    fn coord(&self) -> Coord {
        *self
    }
}

/// Haversine distance between two points, in kilometres.
///
/// # Examples
///
/// ```
/// use city_agenda::domain::{Coord, haversine};
///
/// let plaza = Coord::new(41.3870, 2.1700);
/// assert_eq!(haversine(&plaza, &plaza), 0.0);
/// ```
pub fn haversine(a: &Coord, b: &Coord) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = lat2 - lat1;
    let dlon = b.lon.to_radians() - a.lon.to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);

    2.0 * h.sqrt().asin() * EARTH_RADIUS_KM
}
