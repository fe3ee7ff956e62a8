use crate::geom;
use geo_types::Point;

/// Trait for types that can provide WGS84 x/y coordinates.
///
/// `x` is longitude and `y` is latitude, so a tuple is read as `(lon, lat)`.
/// Implemented for `(f64, f64)`, `geo_types::Point<f64>` and [`geom::Point`],
/// which lets encode and transform operations accept any of them.
pub trait Coordinate {
    /// Returns the x-coordinate (longitude).
    fn x(&self) -> f64;
    /// Returns the y-coordinate (latitude).
    fn y(&self) -> f64;

    fn latitude(&self) -> f64 {
        self.y()
    }

    fn longitude(&self) -> f64 {
        self.x()
    }
}

impl Coordinate for (f64, f64) {
    fn x(&self) -> f64 {
        self.0
    }
    fn y(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn x(&self) -> f64 {
        Point::x(*self)
    }
    fn y(&self) -> f64 {
        Point::y(*self)
    }
}

impl Coordinate for geom::Point {
    fn x(&self) -> f64 {
        self.lon
    }
    fn y(&self) -> f64 {
        self.lat
    }
}

/// Clips a latitude into -90..=90.
pub fn normalize_latitude(lat: f64) -> f64 {
    lat.clamp(-90.0, 90.0)
}

/// Wraps a longitude into -180..180. 180 itself becomes -180.
pub fn normalize_longitude(lon: f64) -> f64 {
    if (-180.0..180.0).contains(&lon) {
        lon
    } else {
        // rem_euclid can round up to exactly 360 for inputs just below -180
        let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
        if wrapped >= 180.0 { wrapped - 360.0 } else { wrapped }
    }
}
