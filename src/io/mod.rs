pub mod arrow;
pub mod csv;
pub mod parquet;

pub use self::arrow::PlusCodesToArrow;
pub use self::csv::{
    CoordinateSource, CsvPlusCodeConfig, CsvToPlusCode, GeometryFormat, csv_to_plus_code_csv,
};
pub use self::parquet::{PlusCodesToGeoParquet, write_geoparquet};
