pub mod constants;
mod decoder;
mod encoder;
mod transformer;
mod validator;

pub use constants::{
    ALPHABET, CodeConfig, DEFAULT_CODE_LENGTH, GRID_CODE_LENGTH, GRID_COLUMNS, GRID_ROWS,
    MAX_CODE_LENGTH, MAX_LAT, MAX_LON, MIN_TRIMMABLE_CODE_LEN, PADDING_CHAR, PAIR_CODE_LENGTH,
    SEPARATOR, SEPARATOR_POSITION, STANDARD,
};
pub use decoder::{Decoder, decode};
pub use encoder::{Encoder, encode, encode_with_length};
pub use transformer::{Transformer, lengthen, shorten};
pub use validator::{CodeFormat, Validator, classify, is_full, is_short, is_valid};
