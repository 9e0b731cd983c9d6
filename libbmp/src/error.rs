use crate::serde::error::FormatError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
/// Possible `libbmp` errors
pub enum Error {
    /// Error returned if the BMP buffer fails to parse
    #[error("parse error")]
    Format(#[from] FormatError),
    /// Error returned if a parsed file or the caller's parameters
    /// fall outside what the converter supports
    #[error("validation error")]
    Validation(#[from] ValidationError),
}

#[derive(Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
/// Errors for inputs that parse but cannot be converted
pub enum ValidationError {
    /// Width or height is zero or negative
    #[error("image size has to be a positive number, got {width}x{height}")]
    NonPositiveDimension {
        /// requested width
        width: i64,
        /// requested height
        height: i64,
    },
    /// Width or height does not fit in 32 bits
    #[error("image size {width}x{height} is too large")]
    DimensionTooLarge {
        /// requested width
        width: i64,
        /// requested height
        height: i64,
    },
    /// Only uncompressed (`BI_RGB`) bitmaps are supported
    #[error("only uncompressed bitmaps are supported, found compression {0}")]
    UnsupportedCompression(u32),
    /// Only 8 bit palette bitmaps are supported
    #[error("only 8 bit color palette mode is supported, found {0} bits per pixel")]
    UnsupportedBitDepth(u16),
    /// Kept pixel count does not match `width * height` (strict mode only)
    #[error("expected {expected} pixels from declared size, depadded region holds {actual}")]
    SizeMismatch {
        /// `width * height`
        expected: u64,
        /// bytes left after depadding
        actual: u64,
    },
    /// The array name cannot be used as a C identifier
    #[error("{0:?} is not a valid C identifier")]
    InvalidIdentifier(String),
}
