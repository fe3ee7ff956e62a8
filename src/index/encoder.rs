use crate::coord::{normalize_latitude, normalize_longitude};
use crate::error::PlusCodeError;
use crate::index::constants::{
    CodeConfig, DEFAULT_CODE_LENGTH, MAX_CODE_LENGTH, PAIR_CODE_LENGTH, STANDARD,
};

/// Significant digits plus the separator.
const MAX_ENCODED_LEN: usize = MAX_CODE_LENGTH + 1;

/// Converts coordinates to plus codes.
#[derive(Debug, Clone, Copy)]
pub struct Encoder<'a> {
    config: &'a CodeConfig,
}

impl Default for Encoder<'static> {
    fn default() -> Self {
        Self::new(&STANDARD)
    }
}

impl<'a> Encoder<'a> {
    pub fn new(config: &'a CodeConfig) -> Self {
        Self { config }
    }

    /// Checks that `code_length` is between 2 and 15, and even when it does not
    /// reach the grid stage.
    pub fn validate_code_length(&self, code_length: usize) -> Result<(), PlusCodeError> {
        if code_length < 2
            || code_length > self.config.max_code_length
            || (code_length < self.config.pair_code_length && code_length % 2 == 1)
        {
            return Err(PlusCodeError::InvalidCodeLength(code_length));
        }
        Ok(())
    }

    /// Encodes a location into a code of `code_length` significant digits.
    ///
    /// Latitude is clipped to -90..=90 and longitude wrapped into -180..180.
    /// A latitude of exactly 90 is moved down by one cell height so the code
    /// still decodes to an area containing the pole's edge.
    ///
    /// The coordinates are scaled to integers at the finest precision first, so
    /// every digit is produced with integer arithmetic. Digits are written from
    /// the least significant end into a fixed buffer.
    ///
    /// # Example
    /// ```
    /// use pluscodes_rs::Encoder;
    ///
    /// # fn main() -> Result<(), pluscodes_rs::PlusCodeError> {
    /// let encoder = Encoder::default();
    /// assert_eq!(encoder.encode(47.365590, 8.524997, 10)?, "8FVC9G8F+6X");
    /// assert_eq!(encoder.encode(47.365590, 8.524997, 11)?, "8FVC9G8F+6XQ");
    /// assert_eq!(encoder.encode(47.365590, 8.524997, 4)?, "8FVC0000+");
    /// # Ok(())
    /// # }
    /// ```
    pub fn encode(
        &self,
        latitude: f64,
        longitude: f64,
        code_length: usize,
    ) -> Result<String, PlusCodeError> {
        self.validate_code_length(code_length)?;
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(PlusCodeError::NonFiniteCoordinate);
        }
        let config = self.config;

        let mut latitude = normalize_latitude(latitude);
        let longitude = normalize_longitude(longitude);
        if latitude == config.max_lat as f64 {
            latitude -= config.lat_resolution(code_length);
        }

        let mut lat_val = scale_to_integer(
            latitude + config.max_lat as f64,
            config.final_lat_precision,
        );
        let mut lon_val = scale_to_integer(
            longitude + config.max_lon as f64,
            config.final_lon_precision,
        );

        let mut digits = [0u8; MAX_CODE_LENGTH];
        let pair_len = config.pair_code_length;

        if code_length > pair_len {
            for slot in digits[pair_len..config.max_code_length].iter_mut().rev() {
                let lat_digit = lat_val % config.grid_rows;
                let lon_digit = lon_val % config.grid_columns;
                *slot = config.alphabet[(lat_digit * config.grid_columns + lon_digit) as usize];
                lat_val /= config.grid_rows;
                lon_val /= config.grid_columns;
            }
        } else {
            lat_val /= config.grid_rows.pow(config.grid_code_length as u32);
            lon_val /= config.grid_columns.pow(config.grid_code_length as u32);
        }

        let base = config.encoding_base;
        for pair in digits[..pair_len].chunks_exact_mut(2).rev() {
            pair[1] = config.alphabet[(lon_val % base) as usize];
            pair[0] = config.alphabet[(lat_val % base) as usize];
            lat_val /= base;
            lon_val /= base;
        }

        Ok(self.assemble(&digits, code_length))
    }

    /// Inserts the separator and trims or pads the digits to `code_length`.
    fn assemble(&self, digits: &[u8; MAX_CODE_LENGTH], code_length: usize) -> String {
        let sep_pos = self.config.separator_position;
        let mut out = [0u8; MAX_ENCODED_LEN];
        let len = if code_length >= sep_pos {
            out[..sep_pos].copy_from_slice(&digits[..sep_pos]);
            out[sep_pos] = self.config.separator;
            out[sep_pos + 1..=code_length].copy_from_slice(&digits[sep_pos..code_length]);
            code_length + 1
        } else {
            out[..code_length].copy_from_slice(&digits[..code_length]);
            out[code_length..sep_pos].fill(self.config.padding);
            out[sep_pos] = self.config.separator;
            sep_pos + 1
        };
        out[..len].iter().map(|&b| b as char).collect()
    }
}

/// Scales a shifted, non-negative coordinate to an integer multiple of the
/// finest precision, rounding to six decimals first so that values a hair
/// below an integer are not truncated down a whole step.
fn scale_to_integer(shifted: f64, precision: i64) -> i64 {
    let scaled = shifted * precision as f64;
    ((scaled * 1e6).round() / 1e6).floor() as i64
}

/// Encodes a location at the default 10 digit length.
///
/// See [`Encoder::encode`].
pub fn encode(latitude: f64, longitude: f64) -> Result<String, PlusCodeError> {
    Encoder::default().encode(latitude, longitude, DEFAULT_CODE_LENGTH)
}

/// Encodes a location with an explicit number of significant digits.
pub fn encode_with_length(
    latitude: f64,
    longitude: f64,
    code_length: usize,
) -> Result<String, PlusCodeError> {
    Encoder::default().encode(latitude, longitude, code_length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_codes() -> Result<(), PlusCodeError> {
        let cases = [
            (47.365590, 8.524997, 10, "8FVC9G8F+6X"),
            (47.365590, 8.524997, 11, "8FVC9G8F+6XQ"),
            (47.365590, 8.524997, 8, "8FVC9G8F+"),
            (47.365590, 8.524997, 2, "8F000000+"),
            (20.375, 2.775, 6, "7FG49Q00+"),
            (20.3700625, 2.7821875, 10, "7FG49QCJ+2V"),
            (20.3701125, 2.782234375, 11, "7FG49QCJ+2VX"),
            (20.3701135, 2.78223535156, 13, "7FG49QCJ+2VXGJ"),
            (-41.2730625, 174.7859375, 10, "4VCPPQGP+Q9"),
            (0.5, 179.5, 4, "6VGX0000+"),
            (1.0, 1.0, 11, "6FH32222+222"),
            (51.5007, -0.1246, 15, "9C3XGV2G+75J5252"),
            (-33.8568, 151.2153, 12, "4RRH46V8+74M4"),
        ];
        for (lat, lon, len, expected) in cases {
            assert_eq!(encode_with_length(lat, lon, len)?, expected, "{} {} {}", lat, lon, len);
        }
        Ok(())
    }

    #[test]
    fn test_default_length() -> Result<(), PlusCodeError> {
        assert_eq!(encode(0.0, 0.0)?, "6FG22222+22");
        Ok(())
    }

    #[test]
    fn test_north_pole_is_nudged_down() -> Result<(), PlusCodeError> {
        assert_eq!(encode_with_length(90.0, 1.0, 4)?, "CFX30000+");
        assert_eq!(encode(90.0, 0.0)?, "CFX2X2X2+X2");
        Ok(())
    }

    #[test]
    fn test_antimeridian_folds_west() -> Result<(), PlusCodeError> {
        assert_eq!(encode_with_length(1.0, 180.0, 4)?, "62H20000+");
        assert_eq!(encode(90.0, 180.0)?, encode(90.0, -180.0)?);
        assert_eq!(encode(-90.0, -180.0)?, "22222222+22");
        Ok(())
    }

    #[test]
    fn test_out_of_range_coordinates_are_normalized() -> Result<(), PlusCodeError> {
        assert_eq!(encode_with_length(92.0, 1.0, 4)?, "CFX30000+");
        assert_eq!(encode_with_length(1.0, 181.0, 4)?, "62H30000+");
        assert_eq!(encode(47.365590, 8.524997 + 720.0)?, "8FVC9G8F+6X");
        Ok(())
    }

    #[test]
    fn test_invalid_code_lengths() {
        for len in [0, 1, 3, 5, 7, 9, 16, 20] {
            assert_eq!(
                encode_with_length(47.0, 8.0, len),
                Err(PlusCodeError::InvalidCodeLength(len))
            );
        }
        for len in [2, 4, 6, 8, 10, 11, 12, 13, 14, 15] {
            assert!(encode_with_length(47.0, 8.0, len).is_ok(), "{}", len);
        }
    }

    #[test]
    fn test_non_finite_coordinates() {
        assert_eq!(encode(f64::NAN, 0.0), Err(PlusCodeError::NonFiniteCoordinate));
        assert_eq!(
            encode(0.0, f64::INFINITY),
            Err(PlusCodeError::NonFiniteCoordinate)
        );
    }

    #[test]
    fn test_longer_codes_extend_shorter_ones() -> Result<(), PlusCodeError> {
        let full = encode_with_length(-12.937753, 14.646919, 15)?;
        let ten = encode(-12.937753, 14.646919)?;
        assert!(full.starts_with(&ten));
        Ok(())
    }
}
