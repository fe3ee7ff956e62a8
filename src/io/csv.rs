use crate::code::PlusCode;
use crate::error::PlusCodeError;
use crate::geom::{Point, parse_geometry};
use log::{debug, info};
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

enum SourceIndices {
    Geometry(usize),
    Coordinates { lon_idx: usize, lat_idx: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    /// Well-Known Text format (e.g., "POLYGON((...))")
    Wkt,
    /// GeoJSON format
    GeoJson,
}

#[derive(Debug, Clone)]
pub enum CoordinateSource {
    /// A single column containing WKT or GeoJSON geometry
    GeometryColumn(String),
    /// Separate longitude and latitude columns
    CoordinateColumns {
        lon_column: String,
        lat_column: String,
    },
}

#[derive(Debug, Clone)]
pub struct CsvPlusCodeConfig {
    pub source: CoordinateSource,
    pub exclude_columns: Vec<String>,
    pub code_length: usize,
    pub include_area_geometry: Option<GeometryFormat>,
    pub short_code_reference: Option<Point>,
}

impl CsvPlusCodeConfig {
    /// Create config for a CSV with a WGS84 geometry column (WKT or GeoJSON).
    ///
    /// # Example
    /// ```
    /// use pluscodes_rs::CsvPlusCodeConfig;
    ///
    /// let config = CsvPlusCodeConfig::new("geometry", 10);
    /// ```
    pub fn new(geometry_column: impl Into<String>, code_length: usize) -> Self {
        Self {
            source: CoordinateSource::GeometryColumn(geometry_column.into()),
            exclude_columns: Vec::new(),
            code_length,
            include_area_geometry: None,
            short_code_reference: None,
        }
    }

    /// Create config for a CSV with separate longitude/latitude columns.
    ///
    /// # Example
    /// ```
    /// use pluscodes_rs::CsvPlusCodeConfig;
    ///
    /// let config = CsvPlusCodeConfig::from_coords("Longitude", "Latitude", 11);
    /// ```
    pub fn from_coords(
        lon_column: impl Into<String>,
        lat_column: impl Into<String>,
        code_length: usize,
    ) -> Self {
        Self {
            source: CoordinateSource::CoordinateColumns {
                lon_column: lon_column.into(),
                lat_column: lat_column.into(),
            },
            exclude_columns: Vec::new(),
            code_length,
            include_area_geometry: None,
            short_code_reference: None,
        }
    }

    pub fn exclude(mut self, columns: Vec<String>) -> Self {
        self.exclude_columns = columns;
        self
    }

    // Include the code area polygon in output.
    pub fn with_area_geometry(mut self, format: GeometryFormat) -> Self {
        self.include_area_geometry = Some(format);
        self
    }

    /// Adds a `short_code` column with each code shortened relative to
    /// `reference`.
    pub fn with_short_codes(mut self, reference: Point) -> Self {
        self.short_code_reference = Some(reference);
        self
    }
}

pub trait CsvToPlusCode {
    fn to_plus_code_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvPlusCodeConfig,
    ) -> Result<(), PlusCodeError>;
}

impl<P: AsRef<Path>> CsvToPlusCode for P {
    fn to_plus_code_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvPlusCodeConfig,
    ) -> Result<(), PlusCodeError> {
        csv_to_plus_code_csv(self, output_path, config)
    }
}

fn polygon_to_wkt(polygon: &geo_types::Polygon<f64>) -> String {
    use wkt::ToWkt;
    polygon.wkt_string()
}

fn polygon_to_geojson(polygon: &geo_types::Polygon<f64>) -> String {
    let geom = geojson::Geometry::from(polygon);
    geom.to_string()
}

/// Short form of `code` relative to `reference`. Padded codes and codes too
/// short to trim are written as they are.
fn short_code(code: &PlusCode, reference: &Point) -> Result<String, PlusCodeError> {
    match code.shorten(reference) {
        Ok(short) => Ok(short),
        Err(PlusCodeError::PaddedCodeNotShortenable(_))
        | Err(PlusCodeError::CodeTooShortToShorten(_)) => Ok(code.code.clone()),
        Err(e) => Err(e),
    }
}

fn column_index(headers: &csv::StringRecord, name: &str, role: &str) -> Result<usize, PlusCodeError> {
    if name.is_empty() {
        return Err(PlusCodeError::CsvError(format!(
            "{} column name cannot be empty",
            role
        )));
    }
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| PlusCodeError::CsvError(format!("{} column '{}' not found", role, name)))
}

fn parse_coordinate(record: &csv::StringRecord, idx: usize, role: &str) -> Result<f64, PlusCodeError> {
    let value = record
        .get(idx)
        .ok_or_else(|| {
            PlusCodeError::CsvError(format!("Missing {} column at index {}", role, idx))
        })?
        .trim();
    value
        .parse()
        .map_err(|_| PlusCodeError::CsvError(format!("Invalid {}: '{}'", role, value)))
}

/// Converts a CSV file with geometry or coordinate columns to a CSV file with
/// plus codes.
///
/// Streams output to minimize memory usage for large files. A geometry that
/// yields several codes (a multipoint, for example) produces one output row
/// per code.
///
/// # Example with geometry column (WKT or GeoJSON)
///
/// ```no_run
/// use pluscodes_rs::{csv_to_plus_code_csv, CsvPlusCodeConfig, GeometryFormat};
///
/// let config = CsvPlusCodeConfig::new("Geo Shape", 10)
///     .exclude(vec!["Geo Point".into()])
///     .with_area_geometry(GeometryFormat::Wkt);
///
/// csv_to_plus_code_csv("input.csv", "output.csv", &config).unwrap();
/// ```
///
/// # Example with coordinate columns
///
/// ```no_run
/// use pluscodes_rs::{csv_to_plus_code_csv, CsvPlusCodeConfig, Point};
///
/// let config = CsvPlusCodeConfig::from_coords("Longitude", "Latitude", 10)
///     .with_short_codes(Point::new(51.45, -2.58));
///
/// csv_to_plus_code_csv("bus_stops.csv", "output.csv", &config).unwrap();
/// ```
pub fn csv_to_plus_code_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &CsvPlusCodeConfig,
) -> Result<(), PlusCodeError> {
    crate::index::Encoder::default().validate_code_length(config.code_length)?;

    let csv_path = csv_path.as_ref();
    let file = File::open(csv_path).map_err(|e| PlusCodeError::CsvError(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| PlusCodeError::CsvError(e.to_string()))?
        .clone();

    // Source columns never appear in the output
    let (source_indices, mut exclude_indices) = match &config.source {
        CoordinateSource::GeometryColumn(col) => {
            let idx = column_index(&headers, col, "Geometry")?;
            (SourceIndices::Geometry(idx), HashSet::from([idx]))
        }
        CoordinateSource::CoordinateColumns {
            lon_column,
            lat_column,
        } => {
            let lon_idx = column_index(&headers, lon_column, "Longitude")?;
            let lat_idx = column_index(&headers, lat_column, "Latitude")?;
            (
                SourceIndices::Coordinates { lon_idx, lat_idx },
                HashSet::from([lon_idx, lat_idx]),
            )
        }
    };

    for col_name in &config.exclude_columns {
        if let Some(idx) = headers.iter().position(|h| h == col_name) {
            exclude_indices.insert(idx);
        }
    }

    let out_file =
        File::create(output_path).map_err(|e| PlusCodeError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(out_file);

    let mut header_row: Vec<&str> = vec!["plus_code"];
    if config.short_code_reference.is_some() {
        header_row.push("short_code");
    }
    if config.include_area_geometry.is_some() {
        header_row.push("area_geometry");
    }
    for (i, h) in headers.iter().enumerate() {
        if !exclude_indices.contains(&i) {
            header_row.push(h);
        }
    }
    writer
        .write_record(&header_row)
        .map_err(|e| PlusCodeError::CsvError(e.to_string()))?;

    let mut rows_in = 0usize;
    let mut rows_out = 0usize;
    for result in reader.records() {
        let record = result.map_err(|e| PlusCodeError::CsvError(e.to_string()))?;
        rows_in += 1;

        let codes = match &source_indices {
            SourceIndices::Geometry(idx) => {
                let geom_str = record.get(*idx).ok_or_else(|| {
                    PlusCodeError::CsvError(format!("Missing geometry column at index {}", idx))
                })?;
                let geom = parse_geometry(geom_str)?;
                PlusCode::from_geometry(geom, config.code_length)?
            }
            SourceIndices::Coordinates { lon_idx, lat_idx } => {
                let lon = parse_coordinate(&record, *lon_idx, "longitude")?;
                let lat = parse_coordinate(&record, *lat_idx, "latitude")?;
                vec![PlusCode::from_wgs84(&(lon, lat), config.code_length)?]
            }
        };

        for code in codes {
            let mut row: Vec<String> = vec![code.code.clone()];

            if let Some(reference) = &config.short_code_reference {
                row.push(short_code(&code, reference)?);
            }

            if let Some(format) = config.include_area_geometry {
                let polygon = code.to_polygon();
                let geom_str = match format {
                    GeometryFormat::Wkt => polygon_to_wkt(&polygon),
                    GeometryFormat::GeoJson => polygon_to_geojson(&polygon),
                };
                row.push(geom_str);
            }

            for (i, field) in record.iter().enumerate() {
                if !exclude_indices.contains(&i) {
                    row.push(field.to_string());
                }
            }
            writer
                .write_record(&row)
                .map_err(|e| PlusCodeError::CsvError(e.to_string()))?;
            rows_out += 1;
        }
    }

    writer
        .flush()
        .map_err(|e| PlusCodeError::CsvError(e.to_string()))?;

    info!(
        "encoded {} rows from {} into {} coded rows",
        rows_in,
        csv_path.display(),
        rows_out
    );
    debug!("output columns: {:?}", header_row);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn io_err(e: std::io::Error) -> PlusCodeError {
        PlusCodeError::IoError(e.to_string())
    }

    fn read_rows(path: &Path) -> Result<Vec<Vec<String>>, PlusCodeError> {
        let mut reader =
            csv::Reader::from_path(path).map_err(|e| PlusCodeError::CsvError(e.to_string()))?;
        let mut rows = vec![
            reader
                .headers()
                .map_err(|e| PlusCodeError::CsvError(e.to_string()))?
                .iter()
                .map(String::from)
                .collect(),
        ];
        for record in reader.records() {
            let record = record.map_err(|e| PlusCodeError::CsvError(e.to_string()))?;
            rows.push(record.iter().map(String::from).collect());
        }
        Ok(rows)
    }

    #[test]
    fn test_geojson_geometry_column() -> Result<(), PlusCodeError> {
        let dir = tempdir().map_err(io_err)?;
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        let mut file = File::create(&csv_path).map_err(io_err)?;
        writeln!(file, "ASSET_ID,TYPE,geometry").map_err(io_err)?;
        writeln!(
            file,
            "CDT123,Pipe,\"{{\"\"type\"\":\"\"Point\"\",\"\"coordinates\"\":[8.524997,47.36559]}}\""
        )
        .map_err(io_err)?;

        let config = CsvPlusCodeConfig::new("geometry", 10);
        csv_to_plus_code_csv(&csv_path, &output_path, &config)?;

        let rows = read_rows(&output_path)?;
        assert_eq!(rows[0], ["plus_code", "ASSET_ID", "TYPE"]);
        assert_eq!(rows[1], ["8FVC9G8F+6X", "CDT123", "Pipe"]);
        Ok(())
    }

    #[test]
    fn test_wkt_multipoint_gives_one_row_per_code() -> Result<(), PlusCodeError> {
        let dir = tempdir().map_err(io_err)?;
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        let mut file = File::create(&csv_path).map_err(io_err)?;
        writeln!(file, "id,geometry").map_err(io_err)?;
        writeln!(file, "a,\"MULTIPOINT((8.524997 47.36559),(-0.1246 51.5007))\"").map_err(io_err)?;

        let config = CsvPlusCodeConfig::new("geometry", 10);
        csv_to_plus_code_csv(&csv_path, &output_path, &config)?;

        let rows = read_rows(&output_path)?;
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1][0], "8FVC9G8F+6X");
        assert_eq!(rows[2][1], "a");
        Ok(())
    }

    #[test]
    fn test_coordinate_columns_with_extras() -> Result<(), PlusCodeError> {
        let dir = tempdir().map_err(io_err)?;
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        let mut file = File::create(&csv_path).map_err(io_err)?;
        writeln!(file, "ID,Longitude,Latitude,Description,Notes").map_err(io_err)?;
        writeln!(file, "1, 8.524997 ,47.36559,Zurich,x").map_err(io_err)?;

        let config = CsvPlusCodeConfig::from_coords("Longitude", "Latitude", 10)
            .exclude(vec!["Notes".into(), "Missing".into()])
            .with_short_codes(Point::new(47.4, 8.6))
            .with_area_geometry(GeometryFormat::Wkt);
        csv_path.to_plus_code_csv(&output_path, &config)?;

        let rows = read_rows(&output_path)?;
        assert_eq!(
            rows[0],
            ["plus_code", "short_code", "area_geometry", "ID", "Description"]
        );
        assert_eq!(rows[1][0], "8FVC9G8F+6X");
        assert_eq!(rows[1][1], "9G8F+6X");
        assert!(rows[1][2].starts_with("POLYGON"));
        assert_eq!(&rows[1][3..], ["1", "Zurich"]);
        Ok(())
    }

    #[test]
    fn test_geojson_area_and_padded_short_codes() -> Result<(), PlusCodeError> {
        let dir = tempdir().map_err(io_err)?;
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        let mut file = File::create(&csv_path).map_err(io_err)?;
        writeln!(file, "lon,lat").map_err(io_err)?;
        writeln!(file, "8.524997,47.36559").map_err(io_err)?;

        let config = CsvPlusCodeConfig::from_coords("lon", "lat", 6)
            .with_short_codes(Point::new(47.4, 8.6))
            .with_area_geometry(GeometryFormat::GeoJson);
        csv_to_plus_code_csv(&csv_path, &output_path, &config)?;

        let rows = read_rows(&output_path)?;
        assert_eq!(rows[1][0], "8FVC9G00+");
        assert_eq!(rows[1][1], "8FVC9G00+");
        assert!(rows[1][2].contains("\"Polygon\""));
        Ok(())
    }

    #[test]
    fn test_missing_column() -> Result<(), PlusCodeError> {
        let dir = tempdir().map_err(io_err)?;
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        let mut file = File::create(&csv_path).map_err(io_err)?;
        writeln!(file, "x,y").map_err(io_err)?;
        writeln!(file, "1,2").map_err(io_err)?;

        let config = CsvPlusCodeConfig::from_coords("lon", "y", 10);
        assert!(matches!(
            csv_to_plus_code_csv(&csv_path, &output_path, &config),
            Err(PlusCodeError::CsvError(_))
        ));

        let config = CsvPlusCodeConfig::new("", 10);
        assert!(matches!(
            csv_to_plus_code_csv(&csv_path, &output_path, &config),
            Err(PlusCodeError::CsvError(_))
        ));
        Ok(())
    }

    #[test]
    fn test_bad_coordinate_and_length() -> Result<(), PlusCodeError> {
        let dir = tempdir().map_err(io_err)?;
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        let mut file = File::create(&csv_path).map_err(io_err)?;
        writeln!(file, "lon,lat").map_err(io_err)?;
        writeln!(file, "east,47.3").map_err(io_err)?;

        let config = CsvPlusCodeConfig::from_coords("lon", "lat", 10);
        assert!(matches!(
            csv_to_plus_code_csv(&csv_path, &output_path, &config),
            Err(PlusCodeError::CsvError(_))
        ));

        let config = CsvPlusCodeConfig::from_coords("lon", "lat", 7);
        assert_eq!(
            csv_to_plus_code_csv(&csv_path, &output_path, &config),
            Err(PlusCodeError::InvalidCodeLength(7))
        );
        Ok(())
    }
}
