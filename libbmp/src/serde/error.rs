use thiserror::Error;

/// Errors for byte buffers that are not a structurally valid BMP file
#[derive(Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum FormatError {
    /// The first two bytes are not the ASCII magic `BM`
    #[error("invalid magic number {0:?}, expected \"BM\"")]
    BadMagic([u8; 2]),
    /// The buffer cannot hold the file header and the DIB header
    #[error("buffer too short for BMP headers: need {needed} bytes, got {actual}")]
    TooShort {
        /// bytes required for both headers
        needed: usize,
        /// bytes available
        actual: usize,
    },
    /// The declared pixel region reaches past the end of the buffer
    #[error("pixel data truncated: region {offset}+{length} exceeds buffer of {actual} bytes")]
    TruncatedData {
        /// pixel data offset from the file header
        offset: u32,
        /// declared (or derived) pixel region length
        length: u64,
        /// bytes available
        actual: usize,
    },
}
