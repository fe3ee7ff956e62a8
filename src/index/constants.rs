/// Separator placed between the fourth and fifth digit pairs.
pub const SEPARATOR: char = '+';

/// Number of digits before the separator in a full code.
pub const SEPARATOR_POSITION: usize = 8;

/// Placeholder for unused digits before the separator.
pub const PADDING_CHAR: char = '0';

/// The 20 code symbols, chosen so that codes don't spell words.
pub const ALPHABET: [u8; 20] = *b"23456789CFGHJMPQRVWX";

/// Maximum latitude in degrees
pub const MAX_LAT: i64 = 90;

/// Maximum longitude in degrees
pub const MAX_LON: i64 = 180;

/// Maximum number of significant digits processed in a code
pub const MAX_CODE_LENGTH: usize = 15;

/// Digits encoded as latitude/longitude pairs. A code of this length covers
/// roughly 14x14 meters at the equator.
pub const PAIR_CODE_LENGTH: usize = 10;

/// Digits encoded with the 4x5 grid refinement.
pub const GRID_CODE_LENGTH: usize = MAX_CODE_LENGTH - PAIR_CODE_LENGTH;

pub const GRID_COLUMNS: i64 = 4;

pub const GRID_ROWS: i64 = 5;

/// Codes with fewer significant digits than this are never shortened.
pub const MIN_TRIMMABLE_CODE_LEN: usize = 6;

/// Length produced by `encode` when no length is requested, and by `lengthen`.
pub const DEFAULT_CODE_LENGTH: usize = PAIR_CODE_LENGTH;

const PAIR_COUNT: usize = PAIR_CODE_LENGTH / 2;

/// Alphabet, layout and place-value constants shared by every codec service.
///
/// Built once at compile time (see [`STANDARD`]) and handed to the encoder,
/// decoder, validator and transformer by reference. All place values are exact
/// integer powers of the encoding base and grid dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeConfig {
    pub(crate) alphabet: [u8; 20],
    /// Alphabet position of each ASCII byte, or -1.
    pub(crate) char_lookup: [i8; 128],
    pub(crate) separator: u8,
    pub(crate) padding: u8,
    pub(crate) separator_position: usize,
    pub(crate) max_lat: i64,
    pub(crate) max_lon: i64,
    pub(crate) max_code_length: usize,
    pub(crate) pair_code_length: usize,
    pub(crate) grid_code_length: usize,
    pub(crate) grid_columns: i64,
    pub(crate) grid_rows: i64,
    pub(crate) min_trimmable_code_len: usize,
    pub(crate) encoding_base: i64,
    /// Place value of the first pair when the last pair has place value 1.
    pub(crate) pair_first_place_value: i64,
    /// Inverse of the degree size of the finest pair digit.
    pub(crate) pair_precision: i64,
    pub(crate) pair_resolutions: [f64; PAIR_COUNT],
    pub(crate) grid_lat_first_place_value: i64,
    pub(crate) grid_lon_first_place_value: i64,
    /// Multiply latitude by this to make it a multiple of the finest precision.
    pub(crate) final_lat_precision: i64,
    /// Multiply longitude by this to make it a multiple of the finest precision.
    pub(crate) final_lon_precision: i64,
}

/// The standard plus code configuration.
pub static STANDARD: CodeConfig = CodeConfig::standard();

impl CodeConfig {
    pub const fn standard() -> Self {
        let encoding_base = ALPHABET.len() as i64;

        let mut char_lookup = [-1i8; 128];
        let mut i = 0;
        while i < ALPHABET.len() {
            char_lookup[ALPHABET[i] as usize] = i as i8;
            i += 1;
        }

        let pair_precision = encoding_base.pow(3);

        let mut pair_resolutions = [0.0; PAIR_COUNT];
        let mut i = 0;
        while i < PAIR_COUNT {
            pair_resolutions[i] = encoding_base as f64 / encoding_base.pow(i as u32) as f64;
            i += 1;
        }

        Self {
            alphabet: ALPHABET,
            char_lookup,
            separator: SEPARATOR as u8,
            padding: PADDING_CHAR as u8,
            separator_position: SEPARATOR_POSITION,
            max_lat: MAX_LAT,
            max_lon: MAX_LON,
            max_code_length: MAX_CODE_LENGTH,
            pair_code_length: PAIR_CODE_LENGTH,
            grid_code_length: GRID_CODE_LENGTH,
            grid_columns: GRID_COLUMNS,
            grid_rows: GRID_ROWS,
            min_trimmable_code_len: MIN_TRIMMABLE_CODE_LEN,
            encoding_base,
            pair_first_place_value: encoding_base.pow((PAIR_CODE_LENGTH / 2 - 1) as u32),
            pair_precision,
            pair_resolutions,
            grid_lat_first_place_value: GRID_ROWS.pow((GRID_CODE_LENGTH - 1) as u32),
            grid_lon_first_place_value: GRID_COLUMNS.pow((GRID_CODE_LENGTH - 1) as u32),
            final_lat_precision: pair_precision * GRID_ROWS.pow(GRID_CODE_LENGTH as u32),
            final_lon_precision: pair_precision * GRID_COLUMNS.pow(GRID_CODE_LENGTH as u32),
        }
    }

    /// Position of `byte` in the alphabet. Lowercase symbols are not matched.
    pub fn char_index(&self, byte: u8) -> Option<usize> {
        match self.char_lookup.get(byte as usize) {
            Some(&idx) if idx >= 0 => Some(idx as usize),
            _ => None,
        }
    }

    pub fn alphabet(&self) -> &[u8] {
        &self.alphabet
    }

    pub fn separator(&self) -> char {
        self.separator as char
    }

    pub fn padding(&self) -> char {
        self.padding as char
    }

    /// Degree size of each pair digit, coarsest first.
    pub fn pair_resolutions(&self) -> &[f64] {
        &self.pair_resolutions
    }

    /// Height in degrees of a cell of `code_length` significant digits.
    pub fn lat_resolution(&self, code_length: usize) -> f64 {
        if code_length <= self.pair_code_length {
            self.pair_resolutions[code_length.max(2) / 2 - 1]
        } else {
            let grid_digits = (code_length - self.pair_code_length) as u32;
            self.pair_resolutions[self.pair_resolutions.len() - 1]
                / self.grid_rows.pow(grid_digits) as f64
        }
    }
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self::standard()
    }
}
