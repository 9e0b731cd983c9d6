use std::fmt::Display;

use bon::Builder;
use strum::{Display as StrumDisplay, FromRepr};

use crate::{DIB_HEADER_SIZE, FILE_HEADER_SIZE, MAGIC};

/// Raw BMP file header (`BITMAPFILEHEADER`)
///
/// ## Note
///
/// The parser only guarantees that [`FileHeader::magic`] is `BM`. The other fields are taken as
/// found in the file; [`FileHeader::file_size`] in particular is never checked against the
/// buffer length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
#[non_exhaustive]
pub struct FileHeader {
    /// bfType: always `BM` for parsed files
    #[builder(default = MAGIC)]
    pub magic: [u8; 2],

    /// bfSize: total size of the file in bytes
    pub file_size: u32,

    /// bfReserved: unused
    #[builder(default)]
    pub reserved: u32,

    /// bfOffBits: offset from the start of the file to the pixel data
    pub pixel_offset: u32,
}

/// Raw `BITMAPINFOHEADER` (the 40 byte DIB header of version 3 BMP files)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
#[non_exhaustive]
pub struct DibHeader {
    /// biSize: size of this header in bytes
    #[builder(default = DIB_HEADER_SIZE as u32)]
    pub header_size: u32,

    /// biWidth: image width in pixels
    pub width: i32,

    /// biHeight: image height in pixels
    ///
    /// If positive the bitmap is stored bottom-up, otherwise top-down.
    pub height: i32,

    /// biPlanes: unused, always 1
    #[builder(default = 1)]
    pub planes: u16,

    /// biBitCount: color depth, one of 1, 4, 8, 16, 24 or 32
    pub bit_count: u16,

    /// biCompression: raw compression code, see [`DibHeader::compression`]
    #[builder(default)]
    pub compression: u32,

    /// biSizeImage: size of the pixel data in bytes, may be 0 for uncompressed files
    #[builder(default)]
    pub image_size: u32,

    /// biXPelsPerMeter: default 0
    #[builder(default)]
    pub x_pixels_per_meter: i32,

    /// biYPelsPerMeter: default 0
    #[builder(default)]
    pub y_pixels_per_meter: i32,

    /// biClrUsed: color table entries
    #[builder(default)]
    pub colors_used: u32,

    /// biClrImportant: colors used in the image
    #[builder(default)]
    pub colors_important: u32,
}

/// Compression methods a `BITMAPINFOHEADER` can declare
#[derive(Debug, Eq, PartialEq, Copy, Clone, StrumDisplay, FromRepr)]
#[repr(u32)]
pub enum Compression {
    /// Uncompressed (`BI_RGB`)
    #[strum(serialize = "BI_RGB")]
    Rgb = 0,
    /// Run-length encoded, 8 bits per pixel (`BI_RLE8`)
    #[strum(serialize = "BI_RLE8")]
    Rle8 = 1,
    /// Run-length encoded, 4 bits per pixel (`BI_RLE4`)
    #[strum(serialize = "BI_RLE4")]
    Rle4 = 2,
    /// Uncompressed with color masks (`BI_BITFIELDS`)
    #[strum(serialize = "BI_BITFIELDS")]
    Bitfields = 3,
}

impl FileHeader {
    /// Serializes the header into its on-disk little-endian layout
    #[must_use]
    pub fn to_le_bytes(&self) -> [u8; FILE_HEADER_SIZE] {
        let mut out = [0; FILE_HEADER_SIZE];
        out[0..2].copy_from_slice(&self.magic);
        out[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        out[6..10].copy_from_slice(&self.reserved.to_le_bytes());
        out[10..14].copy_from_slice(&self.pixel_offset.to_le_bytes());
        out
    }
}

impl DibHeader {
    /// Returns the declared compression, or [`None`] for codes this crate doesn't know
    #[must_use]
    pub fn compression(&self) -> Option<Compression> {
        Compression::from_repr(self.compression)
    }

    /// Returns `true` when rows are stored top to bottom (negative height)
    #[must_use]
    pub const fn is_top_down(&self) -> bool {
        self.height < 0
    }

    /// Serializes the header into its on-disk little-endian layout
    #[must_use]
    pub fn to_le_bytes(&self) -> [u8; DIB_HEADER_SIZE] {
        let mut out = [0; DIB_HEADER_SIZE];
        out[0..4].copy_from_slice(&self.header_size.to_le_bytes());
        out[4..8].copy_from_slice(&self.width.to_le_bytes());
        out[8..12].copy_from_slice(&self.height.to_le_bytes());
        out[12..14].copy_from_slice(&self.planes.to_le_bytes());
        out[14..16].copy_from_slice(&self.bit_count.to_le_bytes());
        out[16..20].copy_from_slice(&self.compression.to_le_bytes());
        out[20..24].copy_from_slice(&self.image_size.to_le_bytes());
        out[24..28].copy_from_slice(&self.x_pixels_per_meter.to_le_bytes());
        out[28..32].copy_from_slice(&self.y_pixels_per_meter.to_le_bytes());
        out[32..36].copy_from_slice(&self.colors_used.to_le_bytes());
        out[36..40].copy_from_slice(&self.colors_important.to_le_bytes());
        out
    }
}

impl Display for FileHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "--- Header ---")?;
        writeln!(f, "bfType: {}", String::from_utf8_lossy(&self.magic))?;
        writeln!(f, "bfSize: {}", self.file_size)?;
        writeln!(f, "bfReserved: {}", self.reserved)?;
        write!(f, "bfOffBits: {}", self.pixel_offset)
    }
}

impl Display for DibHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "--- Information Header ---")?;
        writeln!(f, "biSize: {}", self.header_size)?;
        writeln!(f, "biWidth: {}", self.width)?;
        writeln!(f, "biHeight: {}", self.height)?;
        writeln!(f, "biPlanes: {}", self.planes)?;
        writeln!(f, "biBitCount: {}", self.bit_count)?;
        match self.compression() {
            Some(c) => writeln!(f, "biCompression: {} ({c})", self.compression)?,
            None => writeln!(f, "biCompression: {} (unknown)", self.compression)?,
        }
        writeln!(f, "biSizeImage: {}", self.image_size)?;
        writeln!(f, "biXPelsPerMeter: {}", self.x_pixels_per_meter)?;
        writeln!(f, "biYPelsPerMeter: {}", self.y_pixels_per_meter)?;
        writeln!(f, "biClrUsed: {}", self.colors_used)?;
        write!(f, "biClrImportant: {}", self.colors_important)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_compression_codes_are_none() {
        let dib = DibHeader::builder()
            .width(4)
            .height(4)
            .bit_count(8)
            .compression(7)
            .build();
        assert_eq!(dib.compression(), None);

        let dib = DibHeader::builder()
            .width(4)
            .height(4)
            .bit_count(8)
            .compression(1)
            .build();
        assert_eq!(dib.compression(), Some(Compression::Rle8));
        assert_eq!(Compression::Rle8.to_string(), "BI_RLE8");
    }

    #[test]
    fn builder_defaults_describe_a_v3_header() {
        let dib = DibHeader::builder().width(3).height(2).bit_count(8).build();
        assert_eq!(dib.header_size, 40);
        assert_eq!(dib.planes, 1);
        assert_eq!(dib.compression(), Some(Compression::Rgb));
        assert!(!dib.is_top_down());

        let header = FileHeader::builder().file_size(62).pixel_offset(54).build();
        assert_eq!(&header.to_le_bytes()[..2], b"BM");
    }

    #[test]
    fn display_lists_every_field() {
        let dib = DibHeader::builder().width(3).height(2).bit_count(8).build();
        let dump = dib.to_string();
        assert!(dump.starts_with("--- Information Header ---"));
        assert!(dump.contains("biWidth: 3"));
        assert!(dump.contains("biCompression: 0 (BI_RGB)"));
        assert_eq!(dump.lines().count(), 12);
    }
}
