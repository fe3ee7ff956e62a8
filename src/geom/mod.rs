mod parse;

pub use parse::{parse_geojson, parse_geometry, parse_wkt};

use geo_types::{Coord, Polygon, Rect};
use serde::{Deserialize, Serialize};
use std::io::{Cursor, Write};

/// A latitude/longitude pair in decimal degrees.
///
/// Note the argument order of [`Point::new`] is `(lat, lon)`, the reverse of
/// `geo_types::Point::new(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
}

impl Point {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Returns a `(lat, lon)` tuple.
    pub fn lat_lon(&self) -> (f64, f64) {
        (self.lat, self.lon)
    }

    /// Returns a `(lon, lat)` tuple, the `(x, y)` order used by [`crate::Coordinate`].
    pub fn lon_lat(&self) -> (f64, f64) {
        (self.lon, self.lat)
    }
}

impl From<Point> for geo_types::Point<f64> {
    fn from(p: Point) -> Self {
        geo_types::Point::new(p.lon, p.lat)
    }
}

impl From<geo_types::Point<f64>> for Point {
    fn from(p: geo_types::Point<f64>) -> Self {
        Point::new(p.y(), p.x())
    }
}

/// The rectangle of the Earth's surface covered by a code.
///
/// Areas are only produced by the decoder; `code_length` is the number of
/// significant digits that were decoded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Area {
    sw: Point,
    ne: Point,
    code_length: usize,
}

impl Area {
    pub(crate) fn new(sw: Point, ne: Point, code_length: usize) -> Self {
        Self {
            sw,
            ne,
            code_length,
        }
    }

    /// Southwest (low) corner.
    pub fn sw(&self) -> Point {
        self.sw
    }

    /// Northeast (high) corner.
    pub fn ne(&self) -> Point {
        self.ne
    }

    pub fn code_length(&self) -> usize {
        self.code_length
    }

    /// Midpoint of the area, capped at the north pole and the antimeridian.
    pub fn center(&self) -> Point {
        let lat = ((self.sw.lat + self.ne.lat) / 2.0).min(90.0);
        let lon = ((self.sw.lon + self.ne.lon) / 2.0).min(180.0);
        Point::new(round_coordinate(lat), round_coordinate(lon))
    }

    /// Returns `((sw_lat, sw_lon), (ne_lat, ne_lon))`.
    pub fn lat_lon(&self) -> ((f64, f64), (f64, f64)) {
        (self.sw.lat_lon(), self.ne.lat_lon())
    }

    /// Whether the point lies within the area, edges included.
    pub fn contains(&self, point: &Point) -> bool {
        point.lat >= self.sw.lat
            && point.lat <= self.ne.lat
            && point.lon >= self.sw.lon
            && point.lon <= self.ne.lon
    }

    /// The area as a `geo_types::Rect` in lon/lat (x/y) order.
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            Coord {
                x: self.sw.lon,
                y: self.sw.lat,
            },
            Coord {
                x: self.ne.lon,
                y: self.ne.lat,
            },
        )
    }

    pub fn to_polygon(&self) -> Polygon<f64> {
        self.to_rect().to_polygon()
    }
}

/// Rounds to 14 decimal places to strip floating point noise from decoded
/// coordinates.
///
/// Formats into a stack buffer so the rounding is decimal-exact without
/// allocating.
pub(crate) fn round_coordinate(value: f64) -> f64 {
    let mut buf = [0u8; 64];
    let mut cursor = Cursor::new(&mut buf[..]);
    if write!(cursor, "{:.14}", value).is_err() {
        return value;
    }
    let len = cursor.position() as usize;
    std::str::from_utf8(&buf[..len])
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_area() -> Area {
        Area::new(Point::new(47.3655, 8.524875), Point::new(47.365625, 8.525), 10)
    }

    #[test]
    fn test_center() {
        let center = sample_area().center();
        assert_eq!(center, Point::new(47.3655625, 8.5249375));
    }

    #[test]
    fn test_center_is_capped() {
        let area = Area::new(Point::new(89.0, 179.0), Point::new(92.0, 182.0), 4);
        assert_eq!(area.center(), Point::new(90.0, 180.0));
    }

    #[test]
    fn test_contains() {
        let area = sample_area();
        assert!(area.contains(&Point::new(47.36559, 8.524997)));
        assert!(area.contains(&area.sw()));
        assert!(!area.contains(&Point::new(47.4, 8.524997)));
    }

    #[test]
    fn test_to_polygon_is_closed_lon_lat_ring() {
        let polygon = sample_area().to_polygon();
        let exterior = polygon.exterior();
        assert_eq!(exterior.coords().count(), 5);
        assert_eq!(exterior.0[0], exterior.0[4]);
        assert!(exterior.coords().all(|c| c.x > 8.0 && c.x < 9.0));
        assert!(exterior.coords().all(|c| c.y > 47.0 && c.y < 48.0));
    }

    #[test]
    fn test_round_coordinate() {
        assert_eq!(round_coordinate(0.1 + 0.2), 0.3);
        assert_eq!(round_coordinate(47.36562499999999), 47.36562499999999);
        assert_eq!(round_coordinate(-179.9999375), -179.9999375);
        assert_eq!(round_coordinate(1.000000000000004), 1.0);
    }

    #[test]
    fn test_point_geo_types_conversion() {
        let p = Point::new(51.5, -0.1);
        let gp: geo_types::Point<f64> = p.into();
        assert_eq!(gp.x(), -0.1);
        assert_eq!(gp.y(), 51.5);
        assert_eq!(Point::from(gp), p);
    }

    #[test]
    fn test_area_serializes() -> Result<(), serde_json::Error> {
        let json = serde_json::to_value(sample_area())?;
        assert_eq!(json["code_length"], 10);
        assert_eq!(json["sw"]["lat"], 47.3655);
        assert_eq!(json["ne"]["lon"], 8.525);
        Ok(())
    }
}
