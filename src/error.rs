/// Error type for pluscodes-rs operations.
#[derive(Debug, PartialEq)]
pub enum PlusCodeError {
    /// The requested code length is outside 2-15, or odd below the pair length.
    InvalidCodeLength(usize),
    /// A latitude or longitude was NaN or infinite.
    NonFiniteCoordinate,
    /// The string could not be parsed as the requested kind of code.
    MalformedCode(String),
    /// The operation requires a valid full code.
    NotFullCode(String),
    /// The operation requires a valid short (or full) code.
    NotShortCode(String),
    /// Padded codes cannot be shortened.
    PaddedCodeNotShortenable(String),
    /// The code has fewer significant digits than can be trimmed.
    CodeTooShortToShorten(usize),
    /// File I/O or serialization error.
    IoError(String),
    /// CSV parsing or reading error.
    CsvError(String),
    /// Failed to parse geometry from string (GeoJSON or WKT).
    GeometryParseError(String),
}

impl std::fmt::Display for PlusCodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlusCodeError::InvalidCodeLength(len) => write!(f, "Invalid code length: {}", len),
            PlusCodeError::NonFiniteCoordinate => write!(f, "Coordinates must be finite"),
            PlusCodeError::MalformedCode(code) => write!(f, "Malformed code: {}", code),
            PlusCodeError::NotFullCode(code) => {
                write!(f, "Passed code is not a valid full code: {}", code)
            }
            PlusCodeError::NotShortCode(code) => {
                write!(f, "Passed code is not a valid short code: {}", code)
            }
            PlusCodeError::PaddedCodeNotShortenable(code) => {
                write!(f, "Cannot shorten padded codes: {}", code)
            }
            PlusCodeError::CodeTooShortToShorten(len) => write!(
                f,
                "Code has {} significant digits, at least {} are needed to shorten",
                len,
                crate::index::MIN_TRIMMABLE_CODE_LEN
            ),
            PlusCodeError::IoError(msg) => write!(f, "IO error: {}", msg),
            PlusCodeError::CsvError(msg) => write!(f, "CSV error: {}", msg),
            PlusCodeError::GeometryParseError(msg) => write!(f, "Geometry parse error: {}", msg),
        }
    }
}

impl std::error::Error for PlusCodeError {}
