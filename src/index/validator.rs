use crate::index::constants::{CodeConfig, STANDARD};

/// Structural class of a code string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeFormat {
    Invalid,
    /// Valid, but missing leading digits; needs a reference location.
    Short,
    /// Valid and independently decodable.
    Full,
}

/// Classifies code strings without decoding them.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    config: &'a CodeConfig,
}

impl Default for Validator<'static> {
    fn default() -> Self {
        Self::new(&STANDARD)
    }
}

impl<'a> Validator<'a> {
    pub fn new(config: &'a CodeConfig) -> Self {
        Self { config }
    }

    /// Checks the structural rules every code must satisfy.
    ///
    /// All characters must come from the alphabet, with exactly one separator at
    /// an even position no later than the eighth digit. Padding may only appear
    /// as a single even-length run directly before a trailing separator, and
    /// only in codes whose separator sits at the full-code position. A single
    /// character after the separator is never legal.
    ///
    /// Geographically impossible codes (e.g. ones decoding past the poles) are
    /// still well-formed; [`Validator::classify`] rejects them.
    pub fn is_valid(&self, code: &str) -> bool {
        let code = code.as_bytes();
        let sep_byte = self.config.separator;
        let pad_byte = self.config.padding;

        if code.len() == 1 || count(code, sep_byte) > 1 {
            return false;
        }

        let sep = match find_byte(code, sep_byte) {
            Some(idx) => idx,
            None => return false,
        };
        if sep > self.config.separator_position || sep % 2 == 1 {
            return false;
        }

        if let Some(pad) = find_byte(code, pad_byte) {
            // Short codes cannot be padded.
            if sep < self.config.separator_position {
                return false;
            }
            if pad == 0 {
                return false;
            }
            let rpad = code.iter().rposition(|&b| b == pad_byte).map_or(pad, |i| i + 1);
            let run = &code[pad..rpad];
            if run.len() % 2 == 1 || run.iter().any(|&b| b != pad_byte) {
                return false;
            }
            if code.last() != Some(&sep_byte) {
                return false;
            }
        }

        if code.len() - sep - 1 == 1 {
            return false;
        }

        code.iter().all(|&b| {
            let b = b.to_ascii_uppercase();
            b == sep_byte || b == pad_byte || self.config.char_index(b).is_some()
        })
    }

    /// Classifies a code as invalid, short or full.
    ///
    /// A well-formed code is short when its separator comes before the
    /// full-code position. Otherwise it is full only if its first latitude and
    /// longitude digits stay inside the global range; anything else, including
    /// a well-formed code starting with the separator, is invalid.
    pub fn classify(&self, code: &str) -> CodeFormat {
        if !self.is_valid(code) {
            return CodeFormat::Invalid;
        }
        let bytes = code.as_bytes();
        let sep = find_byte(bytes, self.config.separator).unwrap_or(0);
        if sep > 0 && sep < self.config.separator_position {
            return CodeFormat::Short;
        }

        let first = |i: usize| {
            bytes
                .get(i)
                .and_then(|b| self.config.char_index(b.to_ascii_uppercase()))
                .map(|idx| idx as i64 * self.config.encoding_base)
        };
        match (first(0), first(1)) {
            (Some(first_lat), Some(first_lon))
                if first_lat < self.config.max_lat * 2 && first_lon < self.config.max_lon * 2 =>
            {
                CodeFormat::Full
            }
            _ => CodeFormat::Invalid,
        }
    }

    pub fn is_short(&self, code: &str) -> bool {
        self.classify(code) == CodeFormat::Short
    }

    pub fn is_full(&self, code: &str) -> bool {
        self.classify(code) == CodeFormat::Full
    }
}

fn count(code: &[u8], byte: u8) -> usize {
    code.iter().filter(|&&b| b == byte).count()
}

/// Position of a caseless byte such as the separator or padding.
fn find_byte(code: &[u8], byte: u8) -> Option<usize> {
    code.iter().position(|&b| b == byte)
}

/// See [`Validator::is_valid`].
pub fn is_valid(code: &str) -> bool {
    Validator::default().is_valid(code)
}

/// See [`Validator::is_short`].
pub fn is_short(code: &str) -> bool {
    Validator::default().is_short(code)
}

/// See [`Validator::is_full`].
pub fn is_full(code: &str) -> bool {
    Validator::default().is_full(code)
}

/// See [`Validator::classify`].
pub fn classify(code: &str) -> CodeFormat {
    Validator::default().classify(code)
}
