use crate::coord::Coordinate;
use crate::error::PlusCodeError;
use crate::geom::{Area, Point};
use crate::index::{CodeFormat, DEFAULT_CODE_LENGTH, Decoder, Encoder, Transformer, Validator};
use crate::io::arrow::PlusCodesToArrow;
use crate::io::parquet::PlusCodesToGeoParquet;
use arrow_array::RecordBatch;
use geo::Centroid;
use geo_types::{Geometry, Polygon};
use geojson::{Feature, JsonObject, JsonValue};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A validated full plus code together with the area it decodes to.
///
/// # Example
///
/// ```
/// use pluscodes_rs::PlusCode;
///
/// # fn main() -> Result<(), pluscodes_rs::PlusCodeError> {
/// // From (lon, lat)
/// let code = PlusCode::from_wgs84(&(8.524997, 47.365590), 10)?;
/// assert_eq!(code.code, "8FVC9G8F+6X");
///
/// // From text
/// let parsed: PlusCode = "8fvc9g8f+6x".parse()?;
/// assert_eq!(parsed, code);
///
/// let polygon = code.to_polygon();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCode")]
pub struct PlusCode {
    /// Uppercased code text
    pub code: String,
    /// Bounds covered by the code
    pub area: Area,
}

impl PlusCode {
    pub(crate) fn from_valid(code: String) -> Self {
        let area = Decoder::default().decode(&code);
        Self { code, area }
    }

    /// Create a PlusCode from WGS84 (lon/lat) coordinates
    ///
    /// # Example
    /// ```
    /// use pluscodes_rs::PlusCode;
    /// use geo_types::Point;
    ///
    /// # fn main() -> Result<(), pluscodes_rs::PlusCodeError> {
    /// let from_tuple = PlusCode::from_wgs84(&(-0.1246, 51.5007), 11)?;
    /// let from_point = PlusCode::from_wgs84(&Point::new(-0.1246, 51.5007), 11)?;
    /// assert_eq!(from_tuple, from_point);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_wgs84(coord: &impl Coordinate, code_length: usize) -> Result<Self, PlusCodeError> {
        let code = Encoder::default().encode(coord.latitude(), coord.longitude(), code_length)?;
        Ok(Self::from_valid(code))
    }

    /// Create a PlusCode from a latitude/longitude [`Point`].
    pub fn from_point(point: &Point, code_length: usize) -> Result<Self, PlusCodeError> {
        Self::from_wgs84(point, code_length)
    }

    /// Parses and validates a full code.
    ///
    /// Short codes are rejected; recover them with [`ShortCode::recover`].
    pub fn from_code(code: &str) -> Result<Self, PlusCodeError> {
        let code = code.to_ascii_uppercase();
        match Validator::default().classify(&code) {
            CodeFormat::Full => Ok(Self::from_valid(code)),
            CodeFormat::Short => Err(PlusCodeError::NotFullCode(code)),
            CodeFormat::Invalid => Err(PlusCodeError::MalformedCode(code)),
        }
    }

    /// Encodes many (lon, lat) coordinates in parallel.
    pub fn from_wgs84_batch<C>(coords: &[C], code_length: usize) -> Result<Vec<Self>, PlusCodeError>
    where
        C: Coordinate + Sync,
    {
        coords
            .par_iter()
            .map(|c| Self::from_wgs84(c, code_length))
            .collect()
    }

    /// Create PlusCodes from an arbitrary WGS84 `geo_types::Geometry`.
    ///
    /// Points (and each member of a multipoint) give one code each. Lines and
    /// polygons are represented by the code of their centroid; empty
    /// geometries produce nothing.
    pub fn from_geometry(geom: Geometry<f64>, code_length: usize) -> Result<Vec<Self>, PlusCodeError> {
        match geom {
            Geometry::Point(pt) => Ok(vec![Self::from_wgs84(&pt, code_length)?]),
            Geometry::MultiPoint(mp) => mp
                .0
                .iter()
                .map(|pt| Self::from_wgs84(pt, code_length))
                .collect(),
            Geometry::LineString(line) => centroid_code(line.centroid(), code_length),
            Geometry::MultiLineString(mls) => centroid_code(mls.centroid(), code_length),
            Geometry::Polygon(poly) => centroid_code(poly.centroid(), code_length),
            Geometry::MultiPolygon(mp) => {
                let mut codes = Vec::new();
                for poly in &mp.0 {
                    codes.extend(centroid_code(poly.centroid(), code_length)?);
                }
                Ok(codes)
            }
            Geometry::Rect(rect) => centroid_code(Some(rect.centroid()), code_length),
            Geometry::GeometryCollection(gc) => {
                let mut codes = Vec::new();
                for g in gc.0 {
                    codes.extend(Self::from_geometry(g, code_length)?);
                }
                Ok(codes)
            }
            _ => Err(PlusCodeError::GeometryParseError(
                "Unsupported geometry type".to_string(),
            )),
        }
    }

    pub fn center(&self) -> Point {
        self.area.center()
    }

    /// Number of significant digits, excluding separator and padding.
    pub fn code_length(&self) -> usize {
        self.area.code_length()
    }

    pub fn is_padded(&self) -> bool {
        self.code.contains(crate::index::PADDING_CHAR)
    }

    pub fn contains(&self, coord: &impl Coordinate) -> bool {
        self.area
            .contains(&Point::new(coord.latitude(), coord.longitude()))
    }

    /// Shortens this code relative to `reference`. See [`Transformer::shorten`].
    pub fn shorten(&self, reference: &impl Coordinate) -> Result<String, PlusCodeError> {
        Transformer::default().shorten(&self.code, reference)
    }

    /// The area as a lon/lat rectangle polygon.
    pub fn to_polygon(&self) -> Polygon<f64> {
        self.area.to_polygon()
    }

    /// A GeoJSON feature with the area polygon as geometry and the code,
    /// code length and center as properties.
    pub fn to_geojson_feature(&self) -> Feature {
        let center = self.center();
        let mut properties = JsonObject::new();
        properties.insert("code".to_string(), JsonValue::from(self.code.clone()));
        properties.insert(
            "code_length".to_string(),
            JsonValue::from(self.code_length()),
        );
        properties.insert("center_lat".to_string(), JsonValue::from(center.lat));
        properties.insert("center_lon".to_string(), JsonValue::from(center.lon));

        Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::from(&self.to_polygon())),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }

    /// Converts this code to an Arrow RecordBatch with all attributes.
    pub fn to_record_batch(&self) -> Result<RecordBatch, PlusCodeError> {
        std::slice::from_ref(self).to_record_batch()
    }

    /// Writes this code to a GeoParquet file.
    pub fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), PlusCodeError> {
        std::slice::from_ref(self).to_geoparquet(path)
    }
}

fn centroid_code(
    centroid: Option<geo_types::Point<f64>>,
    code_length: usize,
) -> Result<Vec<PlusCode>, PlusCodeError> {
    match centroid {
        Some(pt) => Ok(vec![PlusCode::from_wgs84(&pt, code_length)?]),
        None => Ok(vec![]),
    }
}

impl FromStr for PlusCode {
    type Err = PlusCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

impl fmt::Display for PlusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

/// A validated short code: a full code with leading digits removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCode")]
pub struct ShortCode {
    code: String,
}

impl ShortCode {
    /// Parses and validates a short code.
    pub fn parse(code: &str) -> Result<Self, PlusCodeError> {
        let code = code.to_ascii_uppercase();
        match Validator::default().classify(&code) {
            CodeFormat::Short => Ok(Self { code }),
            _ => Err(PlusCodeError::MalformedCode(code)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.code
    }

    /// Recovers the full code nearest to `reference`.
    ///
    /// # Example
    /// ```
    /// use pluscodes_rs::ShortCode;
    ///
    /// # fn main() -> Result<(), pluscodes_rs::PlusCodeError> {
    /// let short = ShortCode::parse("9G8F+6X")?;
    /// let full = short.recover(&(8.6, 47.4))?;
    /// assert_eq!(full.code, "8FVC9G8F+6X");
    /// # Ok(())
    /// # }
    /// ```
    pub fn recover(&self, reference: &impl Coordinate) -> Result<PlusCode, PlusCodeError> {
        let full = Transformer::default().lengthen(&self.code, reference)?;
        Ok(PlusCode::from_valid(full))
    }
}

impl FromStr for ShortCode {
    type Err = PlusCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

/// Serialized form of both code types. Deserialization goes through the
/// validating constructors; a serialized `area` is ignored and re-derived.
#[derive(Deserialize)]
struct RawCode {
    code: String,
}

impl TryFrom<RawCode> for PlusCode {
    type Error = PlusCodeError;

    fn try_from(raw: RawCode) -> Result<Self, Self::Error> {
        Self::from_code(&raw.code)
    }
}

impl TryFrom<RawCode> for ShortCode {
    type Error = PlusCodeError;

    fn try_from(raw: RawCode) -> Result<Self, Self::Error> {
        Self::parse(&raw.code)
    }
}

/// The default length (10 digit) code for a point.
impl TryFrom<Point> for PlusCode {
    type Error = PlusCodeError;

    fn try_from(point: Point) -> Result<Self, Self::Error> {
        Self::from_point(&point, DEFAULT_CODE_LENGTH)
    }
}
