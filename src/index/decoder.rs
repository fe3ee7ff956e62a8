use crate::geom::{Area, Point, round_coordinate};
use crate::index::constants::{CodeConfig, MAX_CODE_LENGTH, STANDARD};

/// Converts full plus codes back to the area they cover.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'a> {
    config: &'a CodeConfig,
}

impl Default for Decoder<'static> {
    fn default() -> Self {
        Self::new(&STANDARD)
    }
}

impl<'a> Decoder<'a> {
    pub fn new(config: &'a CodeConfig) -> Self {
        Self { config }
    }

    /// Decodes a full code into its southwest/northeast bounds.
    ///
    /// The code is NOT validated. Callers must check it with
    /// [`crate::Validator::is_full`] (or hold a [`crate::PlusCode`]) first; any
    /// other input decodes to a meaningless area rather than an error. Separator
    /// and padding characters are skipped, case is ignored and digits past the
    /// fifteenth are dropped.
    ///
    /// # Example
    /// ```
    /// use pluscodes_rs::Decoder;
    ///
    /// let area = Decoder::default().decode("7FG49QCJ+2VX");
    /// assert_eq!(area.code_length(), 11);
    /// assert_eq!(area.sw().lat, 20.3701);
    /// assert_eq!(area.ne().lon, 2.78225);
    /// ```
    pub fn decode(&self, code: &str) -> Area {
        let config = self.config;
        let (digits, len) = self.significant_digits(code);
        let digits = &digits[..len];

        let mut normal_lat = -config.max_lat * config.pair_precision;
        let mut normal_lon = -config.max_lon * config.pair_precision;
        let mut grid_lat = 0i64;
        let mut grid_lon = 0i64;

        let pair_digits = len.min(config.pair_code_length);
        let mut pv = config.pair_first_place_value;
        let mut i = 0;
        while i < pair_digits {
            normal_lat += digits[i] * pv;
            normal_lon += digits.get(i + 1).copied().unwrap_or(0) * pv;
            if i + 2 < pair_digits {
                pv /= config.encoding_base;
            }
            i += 2;
        }

        let final_lat_precision = config.final_lat_precision as f64;
        let final_lon_precision = config.final_lon_precision as f64;
        let mut lat_precision = pv as f64 / config.pair_precision as f64;
        let mut lon_precision = lat_precision;

        if len > config.pair_code_length {
            let mut row_pv = config.grid_lat_first_place_value;
            let mut col_pv = config.grid_lon_first_place_value;
            for (i, &digit) in digits.iter().enumerate().skip(config.pair_code_length) {
                let row = digit / config.grid_columns;
                let col = digit % config.grid_columns;
                grid_lat += row * row_pv;
                grid_lon += col * col_pv;
                if i + 1 < len {
                    row_pv /= config.grid_rows;
                    col_pv /= config.grid_columns;
                }
            }
            lat_precision = row_pv as f64 / final_lat_precision;
            lon_precision = col_pv as f64 / final_lon_precision;
        }

        let lat = normal_lat as f64 / config.pair_precision as f64
            + grid_lat as f64 / final_lat_precision;
        let lon = normal_lon as f64 / config.pair_precision as f64
            + grid_lon as f64 / final_lon_precision;

        Area::new(
            Point::new(round_coordinate(lat), round_coordinate(lon)),
            Point::new(
                round_coordinate(lat + lat_precision),
                round_coordinate(lon + lon_precision),
            ),
            len,
        )
    }

    /// Alphabet values of the code's significant digits, up to the maximum
    /// length. Unknown characters count as zero.
    fn significant_digits(&self, code: &str) -> ([i64; MAX_CODE_LENGTH], usize) {
        let mut digits = [0i64; MAX_CODE_LENGTH];
        let mut len = 0;
        let significant = code
            .bytes()
            .filter(|&b| b != self.config.separator && b != self.config.padding)
            .take(self.config.max_code_length);
        for b in significant {
            digits[len] = self
                .config
                .char_index(b.to_ascii_uppercase())
                .unwrap_or(0) as i64;
            len += 1;
        }
        (digits, len)
    }
}

/// Decodes a full code with the standard configuration.
///
/// See [`Decoder::decode`]; the same no-validation contract applies.
pub fn decode(code: &str) -> Area {
    Decoder::default().decode(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-10,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    fn assert_bounds(code: &str, sw: (f64, f64), ne: (f64, f64), code_length: usize) {
        let area = decode(code);
        assert_close(area.sw().lat, sw.0);
        assert_close(area.sw().lon, sw.1);
        assert_close(area.ne().lat, ne.0);
        assert_close(area.ne().lon, ne.1);
        assert_eq!(area.code_length(), code_length, "{}", code);
    }

    #[test]
    fn test_reference_bounds() {
        assert_bounds("8FVC9G8F+6X", (47.3655, 8.524875), (47.365625, 8.525), 10);
        assert_bounds("8FVC9G8F+6XQ", (47.365575, 8.52496875), (47.3656, 8.525), 11);
        assert_bounds("7FG49Q00+", (20.35, 2.75), (20.4, 2.8), 6);
        assert_bounds(
            "7FG49QCJ+2VXGJ",
            (20.370113, 2.782234375),
            (20.370114, 2.782236328125),
            13,
        );
        assert_bounds("4VCPPQGP+Q9", (-41.273125, 174.785875), (-41.273, 174.786), 10);
        assert_bounds("6VGX0000+", (0.0, 179.0), (1.0, 180.0), 4);
        assert_bounds("8F000000+", (30.0, 0.0), (50.0, 20.0), 2);
        assert_bounds("22222222+22", (-90.0, -180.0), (-89.999875, -179.999875), 10);
        assert_bounds(
            "9C3XGV2G+75J5252",
            (51.5007, -0.12460009765625),
            (51.50070004, -0.12459997558594),
            15,
        );
    }

    #[test]
    fn test_decode_ignores_case() {
        assert_eq!(decode("8fvc9g8f+6x"), decode("8FVC9G8F+6X"));
    }

    #[test]
    fn test_digits_past_fifteen_are_dropped() {
        let area = decode("8FVC9G8F+6XQRJWCXX");
        assert_eq!(area.code_length(), 15);
        assert_eq!(area, decode("8FVC9G8F+6XQRJWC"));
    }

    #[test]
    fn test_center() {
        let center = decode("6FG22222+22").center();
        assert_eq!(center, Point::new(0.0000625, 0.0000625));
    }

    #[test]
    fn test_malformed_input_does_not_panic() {
        for code in ["", "+", "AAAA", "8FVC9G8F+6XQRJWCAAAAAA", "8FV"] {
            let _ = decode(code);
        }
    }
}
