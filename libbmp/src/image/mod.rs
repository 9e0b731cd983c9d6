#![allow(clippy::module_name_repetitions)]

pub(crate) mod depad;
pub(crate) mod header;

/// Module containing raw header types
///
/// Types in this module are considered "unchecked", the responsibility
/// of upholding validity is on the user
pub mod raw {
    /// Contains types related to BMP file headers
    pub mod header {
        pub use crate::image::header::{Compression, DibHeader, FileHeader};
    }
}

use crate::{
    error::ValidationError,
    serde::{error::FormatError, parse_dib_header, parse_file_header},
    DIB_HEADER_SIZE, FILE_HEADER_SIZE, MAGIC,
};
use header::{Compression, DibHeader, FileHeader};
use tracing::{debug, instrument, trace, warn};

/// Bits per pixel of the only layout the converter accepts
pub const SUPPORTED_BIT_COUNT: u16 = 8;

/// A typed representation of an uncompressed BMP file: both headers and the
/// still padded pixel-index region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BmpFile {
    file_header: FileHeader,
    dib_header: DibHeader,
    pixels: Vec<u8>,
}

impl BmpFile {
    /// Creates a new [`BmpFile`] from its parts
    ///
    /// No consistency between the headers and `pixels` is checked.
    #[must_use]
    pub const fn new(file_header: FileHeader, dib_header: DibHeader, pixels: Vec<u8>) -> Self {
        Self {
            file_header,
            dib_header,
            pixels,
        }
    }

    /// Tries to parse a [`Self`] from the bytes of a BMP file
    ///
    /// # Errors
    ///
    /// This function will error if:
    /// - `bytes` is shorter than both headers
    /// - the file doesn't start with `BM`
    /// - the pixel region declared by the headers doesn't fit in `bytes`
    #[instrument(skip(bytes), fields(len = bytes.len()), level = "debug")]
    pub fn parse(bytes: &[u8]) -> Result<Self, FormatError> {
        let needed = FILE_HEADER_SIZE + DIB_HEADER_SIZE;
        if bytes.len() < needed {
            return Err(FormatError::TooShort {
                needed,
                actual: bytes.len(),
            });
        }
        let too_short = |_| FormatError::TooShort {
            needed,
            actual: bytes.len(),
        };

        let (rest, file_header) = parse_file_header(bytes).map_err(too_short)?;
        if file_header.magic != MAGIC {
            return Err(FormatError::BadMagic(file_header.magic));
        }
        trace!("{file_header}");

        let (_, dib_header) = parse_dib_header(rest).map_err(too_short)?;
        trace!("{dib_header}");
        if dib_header.header_size as usize != DIB_HEADER_SIZE {
            warn!(
                "DIB header declares {} bytes, only the first {DIB_HEADER_SIZE} are read",
                dib_header.header_size
            );
        }

        let offset = file_header.pixel_offset;
        let truncated = |length: u64| FormatError::TruncatedData {
            offset,
            length,
            actual: bytes.len(),
        };
        let start = offset as usize;
        let length = match dib_header.image_size {
            0 => bytes
                .len()
                .checked_sub(start)
                .ok_or_else(|| truncated(0))?,
            size => size as usize,
        };
        let pixels = start
            .checked_add(length)
            .and_then(|end| bytes.get(start..end))
            .ok_or_else(|| truncated(length as u64))?;
        debug!("pixel region: {} bytes at offset {offset}", pixels.len());

        Ok(Self {
            file_header,
            dib_header,
            pixels: pixels.to_vec(),
        })
    }

    /// Checks that the file is something the array converter can handle:
    /// uncompressed and 8 bits per pixel
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnsupportedCompression`] or
    /// [`ValidationError::UnsupportedBitDepth`]
    pub fn ensure_supported(&self) -> Result<(), ValidationError> {
        if self.dib_header.compression() != Some(Compression::Rgb) {
            return Err(ValidationError::UnsupportedCompression(
                self.dib_header.compression,
            ));
        }
        if self.dib_header.bit_count != SUPPORTED_BIT_COUNT {
            return Err(ValidationError::UnsupportedBitDepth(
                self.dib_header.bit_count,
            ));
        }
        Ok(())
    }

    /// Writes the file back out: both headers, zeros up to the pixel offset, then the pixel region
    ///
    /// If the pixel offset points inside the headers, the region follows them directly.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let headers = FILE_HEADER_SIZE + DIB_HEADER_SIZE;
        let start = (self.file_header.pixel_offset as usize).max(headers);
        let mut out = Vec::with_capacity(start + self.pixels.len());
        out.extend_from_slice(&self.file_header.to_le_bytes());
        out.extend_from_slice(&self.dib_header.to_le_bytes());
        out.resize(start, 0);
        out.extend_from_slice(&self.pixels);
        out
    }

    /// Returns a reference to the [`FileHeader`]
    #[must_use]
    pub const fn file_header(&self) -> &FileHeader {
        &self.file_header
    }

    /// Returns a reference to the [`DibHeader`]
    #[must_use]
    pub const fn dib_header(&self) -> &DibHeader {
        &self.dib_header
    }

    /// Returns the pixel-index region, padding included
    #[must_use]
    pub fn pixel_indices(&self) -> &[u8] {
        &self.pixels
    }

    /// Returns the image width declared by the DIB header
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.dib_header.width
    }

    /// Returns the absolute image height declared by the DIB header
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.dib_header.height.unsigned_abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(dib: DibHeader, pixels: &[u8]) -> BmpFile {
        let offset = (FILE_HEADER_SIZE + DIB_HEADER_SIZE) as u32;
        let header = FileHeader::builder()
            .file_size(offset + pixels.len() as u32)
            .pixel_offset(offset)
            .build();
        BmpFile::new(header, dib, pixels.to_vec())
    }

    #[test]
    fn parse_too_short() {
        let mut bytes = b"BM".to_vec();
        bytes.resize(53, 0);
        assert_eq!(
            BmpFile::parse(&bytes),
            Err(FormatError::TooShort {
                needed: 54,
                actual: 53
            })
        );
    }

    #[test]
    fn parse_bad_magic() {
        let dib = DibHeader::builder().width(4).height(1).bit_count(8).build();
        let mut bytes = file(dib, &[1, 2, 3, 4]).to_bytes();
        bytes[..2].copy_from_slice(b"XX");
        assert_eq!(
            BmpFile::parse(&bytes),
            Err(FormatError::BadMagic(*b"XX"))
        );
    }

    #[test]
    fn image_size_zero_takes_rest_of_file() {
        let dib = DibHeader::builder().width(4).height(2).bit_count(8).build();
        let bmp = BmpFile::parse(&file(dib, &[1, 2, 3, 4, 5, 6, 7, 8]).to_bytes()).unwrap();
        assert_eq!(bmp.pixel_indices(), &[1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn declared_image_size_limits_region() {
        let dib = DibHeader::builder()
            .width(4)
            .height(1)
            .bit_count(8)
            .image_size(4)
            .build();
        let bmp = BmpFile::parse(&file(dib, &[1, 2, 3, 4, 0xFF, 0xFF]).to_bytes()).unwrap();
        assert_eq!(bmp.pixel_indices(), &[1, 2, 3, 4]);
    }

    #[test]
    fn declared_image_size_past_end_is_truncated() {
        let dib = DibHeader::builder()
            .width(4)
            .height(2)
            .bit_count(8)
            .image_size(8)
            .build();
        let bytes = file(dib, &[1, 2, 3, 4]).to_bytes();
        assert_eq!(
            BmpFile::parse(&bytes),
            Err(FormatError::TruncatedData {
                offset: 54,
                length: 8,
                actual: 58
            })
        );
    }

    #[test]
    fn pixel_offset_past_end_is_truncated() {
        let dib = DibHeader::builder().width(4).height(1).bit_count(8).build();
        let mut bytes = file(dib, &[1, 2, 3, 4]).to_bytes();
        bytes[10..14].copy_from_slice(&1000u32.to_le_bytes());
        assert!(matches!(
            BmpFile::parse(&bytes),
            Err(FormatError::TruncatedData { offset: 1000, .. })
        ));
    }

    #[test]
    fn ensure_supported_rejects_compression_then_depth() {
        let rle = DibHeader::builder()
            .width(4)
            .height(1)
            .bit_count(4)
            .compression(2)
            .build();
        assert_eq!(
            file(rle, &[]).ensure_supported(),
            Err(ValidationError::UnsupportedCompression(2))
        );

        let rgb24 = DibHeader::builder().width(4).height(1).bit_count(24).build();
        assert_eq!(
            file(rgb24, &[]).ensure_supported(),
            Err(ValidationError::UnsupportedBitDepth(24))
        );

        let ok = DibHeader::builder().width(4).height(1).bit_count(8).build();
        assert_eq!(file(ok, &[]).ensure_supported(), Ok(()));
    }

    #[test]
    fn top_down_height_is_absolute() {
        let dib = DibHeader::builder().width(4).height(-3).bit_count(8).build();
        let bmp = file(dib, &[]);
        assert_eq!(bmp.height(), 3);
        assert!(bmp.dib_header().is_top_down());
    }
}
