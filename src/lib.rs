//! # pluscodes-rs
//!
//! Encode, decode, validate and shorten plus codes (Open Location Codes).
//!
//! ### 1. Free functions
//!
//! ```
//! use pluscodes_rs::{decode, encode, is_full, shorten, lengthen, Point};
//!
//! # fn main() -> Result<(), pluscodes_rs::PlusCodeError> {
//! let code = encode(47.365590, 8.524997)?;
//! assert_eq!(code, "8FVC9G8F+6X");
//! assert!(is_full(&code));
//!
//! let area = decode(&code);
//! assert!(area.contains(&Point::new(47.365590, 8.524997)));
//!
//! let reference = Point::new(47.4, 8.6);
//! let short = shorten(&code, &reference)?;
//! assert_eq!(short, "9G8F+6X");
//! assert_eq!(lengthen(&short, &reference)?, code);
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `PlusCode` - Validated Codes
//!
//! ```
//! use pluscodes_rs::PlusCode;
//!
//! # fn main() -> Result<(), pluscodes_rs::PlusCodeError> {
//! // (lon, lat)
//! let code = PlusCode::from_wgs84(&(-0.1246, 51.5007), 11)?;
//! println!("{}", code);
//! let polygon = code.to_polygon();
//! let feature = code.to_geojson_feature();
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `CsvToPlusCode` - CSV File Conversion
//!
//! ```no_run
//! use pluscodes_rs::{CsvToPlusCode, CsvPlusCodeConfig, GeometryFormat, Point};
//!
//! let config = CsvPlusCodeConfig::from_coords("Longitude", "Latitude", 10)
//!     .with_area_geometry(GeometryFormat::Wkt)
//!     .with_short_codes(Point::new(51.45, -2.58));
//!
//! "input.csv".to_plus_code_csv("output.csv", &config).unwrap();
//! ```
//!

pub mod code;
pub mod coord;
pub mod error;
pub mod geom;
pub mod index;
pub mod io;

pub use code::{PlusCode, ShortCode};
pub use coord::{Coordinate, normalize_latitude, normalize_longitude};
pub use error::PlusCodeError;
pub use geom::{Area, Point, parse_geojson, parse_geometry, parse_wkt};
pub use index::{
    ALPHABET, CodeConfig, CodeFormat, DEFAULT_CODE_LENGTH, Decoder, Encoder, GRID_CODE_LENGTH,
    GRID_COLUMNS, GRID_ROWS, MAX_CODE_LENGTH, MAX_LAT, MAX_LON, MIN_TRIMMABLE_CODE_LEN,
    PADDING_CHAR, PAIR_CODE_LENGTH, SEPARATOR, SEPARATOR_POSITION, STANDARD, Transformer,
    Validator, classify, decode, encode, encode_with_length, is_full, is_short, is_valid,
    lengthen, shorten,
};
pub use io::{
    CoordinateSource, CsvPlusCodeConfig, CsvToPlusCode, GeometryFormat, PlusCodesToArrow,
    PlusCodesToGeoParquet, csv_to_plus_code_csv, write_geoparquet,
};

pub use geo_types;
pub use geoarrow_array;
pub use geoarrow_schema;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end() -> Result<(), PlusCodeError> {
        let reference = Point::new(20.375, 2.775);
        let code = PlusCode::from_point(&Point::new(20.3701125, 2.782234375), 11)?;
        assert_eq!(code.code, "7FG49QCJ+2VX");

        let short: ShortCode = code.shorten(&reference)?.parse()?;
        assert_eq!(short.as_str(), "CJ+2VX");

        // Recovery always yields a 10 digit code
        let recovered = short.recover(&reference)?;
        assert_eq!(recovered.code, "7FG49QCJ+2V");
        assert!(code.area.sw().lat >= recovered.area.sw().lat);
        assert!(code.area.ne().lat <= recovered.area.ne().lat);
        Ok(())
    }

    #[test]
    fn test_classify_agrees_with_predicates() {
        for code in ["8FVC9G8F+6X", "9G8F+6X", "+22", "WF8Q0000+", "", "8fvc0000+"] {
            let format = classify(code);
            assert_eq!(format == CodeFormat::Full, is_full(code), "{}", code);
            assert_eq!(format == CodeFormat::Short, is_short(code), "{}", code);
            if format != CodeFormat::Invalid {
                assert!(is_valid(code));
            }
        }
    }
}
