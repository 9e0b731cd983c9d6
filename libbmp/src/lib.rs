//! # libbmp
//!
//!
//! This library reads uncompressed, 8-bit palette BMP files and turns their pixel indices into
//! C array initializers, ready to be compiled into firmware or game code that draws with a fixed
//! 256 color palette (VGA mode 13h and friends).
//!
//! It only understands version 3 BMP files: a 14 byte file header followed by a 40 byte
//! `BITMAPINFOHEADER`. The palette itself is never read; pixel bytes are emitted as stored.
//!
//! ### Usage
//!
//! The whole conversion is a pure function over the bytes of a file:
//!
//! ```rust
//! use libbmp::{
//!     convert, image::raw::header::{DibHeader, FileHeader},
//!     ArraySerializer, BmpFile,
//! };
//!
//! fn main() -> Result<(), libbmp::Error> {
//!     // a 3x2 image, each row padded to 4 bytes
//!     let bmp = BmpFile::new(
//!         FileHeader::builder().file_size(62).pixel_offset(54).build(),
//!         DibHeader::builder().width(3).height(2).bit_count(8).build(),
//!         vec![1, 2, 3, 0, 4, 5, 6, 0],
//!     );
//!     let bytes = bmp.to_bytes();
//!
//!     let serializer = ArraySerializer::builder()
//!         .name("sprite")
//!         .width(3)
//!         .height(2)
//!         .build();
//!     let literal = convert(&bytes, &serializer)?;
//!     assert_eq!(literal, "uint8_t sprite [6] = {0x1, 0x2, 0x3, 0x4, 0x5, 0x6};");
//!     Ok(())
//! }
//! ```
//!
//! #### Row padding
//!
//! BMP rows are stored padded to a multiple of 4 bytes. [`PaddingRule::Standard`] strips exactly
//! that padding. [`PaddingRule::Legacy`] instead drops `width % 4` bytes per row, reproducing the
//! output of the old `BmpToArray` tool; the two only agree for even widths.
//!
//! #### Row order
//!
//! Rows are emitted in storage order. For the usual bottom-up files (positive height) the first
//! row of the array is the bottom row of the picture.
//!

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    missing_docs
)]

mod array;
mod error;
/// Module containing types for BMP files
pub mod image;
mod serde;

pub use array::{serialize, validate_dimensions, ArraySerializer};
pub use error::{Error, ValidationError};
pub use image::depad::{depad, depad_iter, PaddingRule};
pub use image::BmpFile;
pub use serde::error::FormatError;

use tracing::{info, instrument};

const MAGIC: [u8; 2] = *b"BM";
const FILE_HEADER_SIZE: usize = 14;
const DIB_HEADER_SIZE: usize = 40;

/// Parses `bytes` as a BMP file, checks that it is uncompressed and 8 bits per pixel, and
/// renders its pixel indices with `serializer`
///
/// Nothing is produced unless every check passes.
///
/// # Errors
///
/// - [`Error::Format`] if `bytes` is not a structurally valid BMP file
/// - [`Error::Validation`] if the file isn't supported or `serializer` rejects its parameters
#[instrument(skip(bytes, serializer), fields(name = serializer.name()))]
pub fn convert(bytes: &[u8], serializer: &ArraySerializer) -> Result<String, Error> {
    let bmp = BmpFile::parse(bytes)?;
    bmp.ensure_supported()?;
    let literal = serializer.serialize(bmp.pixel_indices())?;
    info!(
        "converted {} pixel bytes into {} ({}x{})",
        bmp.pixel_indices().len(),
        serializer.name(),
        serializer.width(),
        serializer.height()
    );
    Ok(literal)
}
