use crate::coord::Coordinate;
use crate::error::PlusCodeError;
use crate::index::constants::{CodeConfig, DEFAULT_CODE_LENGTH, STANDARD};
use crate::index::decoder::Decoder;
use crate::index::encoder::Encoder;
use crate::index::validator::{CodeFormat, Validator};
use log::{debug, trace};

/// Fraction of a pair resolution the reference may lie from the code center
/// for that pair to be trimmed.
const SHORTEN_SAFETY_FACTOR: f64 = 0.3;

/// Shortens full codes relative to a reference location, and recovers full
/// codes from short ones.
#[derive(Debug, Clone, Copy)]
pub struct Transformer<'a> {
    config: &'a CodeConfig,
    validator: Validator<'a>,
    encoder: Encoder<'a>,
    decoder: Decoder<'a>,
}

impl Default for Transformer<'static> {
    fn default() -> Self {
        Self::new(&STANDARD)
    }
}

impl<'a> Transformer<'a> {
    pub fn new(config: &'a CodeConfig) -> Self {
        Self {
            config,
            validator: Validator::new(config),
            encoder: Encoder::new(config),
            decoder: Decoder::new(config),
        }
    }

    /// Recovers the full code nearest to `reference` that matches a short code.
    ///
    /// Full codes are returned uppercased and otherwise unchanged. For short
    /// codes the missing leading digits are borrowed from the reference's own
    /// code, then the candidate cell is moved one step north, south, east or
    /// west if the reference lies more than half a cell away from it. The
    /// result is always a default length (10 digit) code.
    ///
    /// # Example
    /// ```
    /// use pluscodes_rs::Transformer;
    ///
    /// # fn main() -> Result<(), pluscodes_rs::PlusCodeError> {
    /// let transformer = Transformer::default();
    /// // (lon, lat) reference
    /// assert_eq!(transformer.lengthen("9G8F+6X", &(8.6, 47.4))?, "8FVC9G8F+6X");
    /// # Ok(())
    /// # }
    /// ```
    pub fn lengthen(
        &self,
        code: &str,
        reference: &impl Coordinate,
    ) -> Result<String, PlusCodeError> {
        let code = code.to_ascii_uppercase();
        match self.validator.classify(&code) {
            CodeFormat::Full => return Ok(code),
            CodeFormat::Short => {}
            CodeFormat::Invalid => return Err(PlusCodeError::NotShortCode(code)),
        }

        let sep = code
            .find(self.config.separator())
            .ok_or_else(|| PlusCodeError::NotShortCode(code.clone()))?;
        let padding_length = self.config.separator_position - sep;

        let resolution = self.config.pair_resolutions[padding_length / 2 - 1];
        let half_resolution = resolution / 2.0;

        let ref_lat = reference.latitude();
        let ref_lon = reference.longitude();
        let ref_code = self.encoder.encode(ref_lat, ref_lon, DEFAULT_CODE_LENGTH)?;

        let mut candidate = String::with_capacity(padding_length + code.len());
        candidate.push_str(&ref_code[..padding_length]);
        candidate.push_str(&code);

        let center = self.decoder.decode(&candidate).center();
        let max_lat = self.config.max_lat as f64;
        let (mut lat, mut lon) = (center.lat, center.lon);

        if ref_lat + half_resolution < lat && lat - resolution >= -max_lat {
            trace!("{} is north of the reference, moving one cell south", candidate);
            lat -= resolution;
        } else if ref_lat - half_resolution > lat && lat + resolution <= max_lat {
            trace!("{} is south of the reference, moving one cell north", candidate);
            lat += resolution;
        }

        if ref_lon + half_resolution < lon {
            trace!("{} is east of the reference, moving one cell west", candidate);
            lon -= resolution;
        } else if ref_lon - half_resolution > lon {
            trace!("{} is west of the reference, moving one cell east", candidate);
            lon += resolution;
        }

        let full = self.encoder.encode(lat, lon, DEFAULT_CODE_LENGTH)?;
        debug!("lengthened {} to {}", code, full);
        Ok(full)
    }

    /// Removes leading digits from a full code that can be recovered from
    /// `reference`.
    ///
    /// Four, six or eight characters are removed depending on how close the
    /// reference is to the code's center; the coarsest pair is never removed on
    /// its own. If the reference is too far away the code is returned
    /// unchanged (uppercased).
    ///
    /// # Errors
    ///
    /// - [`PlusCodeError::NotFullCode`] - `code` is not a valid full code
    /// - [`PlusCodeError::CodeTooShortToShorten`] - fewer than 6 significant digits
    /// - [`PlusCodeError::PaddedCodeNotShortenable`] - `code` contains padding
    ///
    /// # Example
    /// ```
    /// use pluscodes_rs::{Point, Transformer};
    ///
    /// # fn main() -> Result<(), pluscodes_rs::PlusCodeError> {
    /// let transformer = Transformer::default();
    /// let short = transformer.shorten("9C3W9QCJ+2V", &Point::new(51.3708675, -1.217765625))?;
    /// assert_eq!(short, "CJ+2V");
    /// # Ok(())
    /// # }
    /// ```
    pub fn shorten(
        &self,
        code: &str,
        reference: &impl Coordinate,
    ) -> Result<String, PlusCodeError> {
        let code = code.to_ascii_uppercase();
        if !self.validator.is_full(&code) {
            return Err(PlusCodeError::NotFullCode(code));
        }

        let significant = code
            .bytes()
            .filter(|&b| b != self.config.separator && b != self.config.padding)
            .count();
        if significant < self.config.min_trimmable_code_len {
            return Err(PlusCodeError::CodeTooShortToShorten(significant));
        }
        if code.as_bytes().contains(&self.config.padding) {
            return Err(PlusCodeError::PaddedCodeNotShortenable(code));
        }

        let center = self.decoder.decode(&code).center();
        let range = (center.lat - reference.latitude())
            .abs()
            .max((center.lon - reference.longitude()).abs());

        let resolutions = &self.config.pair_resolutions;
        for i in (1..resolutions.len() - 1).rev() {
            if range < resolutions[i] * SHORTEN_SAFETY_FACTOR {
                let trimmed = code[(i + 1) * 2..].to_string();
                debug!("shortened {} to {}", code, trimmed);
                return Ok(trimmed);
            }
        }

        debug!(
            "reference is {:.6} degrees from {}, too far to shorten",
            range, code
        );
        Ok(code)
    }
}

/// See [`Transformer::shorten`].
pub fn shorten(code: &str, reference: &impl Coordinate) -> Result<String, PlusCodeError> {
    Transformer::default().shorten(code, reference)
}

/// See [`Transformer::lengthen`].
pub fn lengthen(code: &str, reference: &impl Coordinate) -> Result<String, PlusCodeError> {
    Transformer::default().lengthen(code, reference)
}
