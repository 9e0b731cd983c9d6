use libbmp::{
    image::raw::header::{DibHeader, FileHeader},
    BmpFile,
};

/// Size of the 256 entry BGRA palette real 8 bit files carry between the headers and the pixels
pub const PALETTE_LEN: u32 = 256 * 4;
pub const PIXEL_OFFSET: u32 = 14 + 40 + PALETTE_LEN;

/// Builds an 8 bit, uncompressed BMP file from `rows` (in storage order), padding every row to
/// 4 bytes with `fill`
pub fn indexed_bmp(width: u32, rows: &[&[u8]], fill: u8) -> Vec<u8> {
    let padding = ((4 - width % 4) % 4) as usize;
    let mut region = Vec::new();
    for row in rows {
        assert_eq!(row.len(), width as usize);
        region.extend_from_slice(row);
        region.extend(std::iter::repeat(fill).take(padding));
    }
    let image_size = u32::try_from(region.len()).unwrap();
    let bmp = BmpFile::new(
        FileHeader::builder()
            .file_size(PIXEL_OFFSET + image_size)
            .pixel_offset(PIXEL_OFFSET)
            .build(),
        DibHeader::builder()
            .width(i32::try_from(width).unwrap())
            .height(i32::try_from(rows.len()).unwrap())
            .bit_count(8)
            .image_size(image_size)
            .x_pixels_per_meter(2835)
            .y_pixels_per_meter(2835)
            .colors_used(256)
            .build(),
        region,
    );
    bmp.to_bytes()
}
