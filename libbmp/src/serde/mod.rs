pub mod error;

use nom::{
    bytes::complete::take,
    combinator::map_res,
    number::complete::{le_i32, le_u16, le_u32},
    IResult,
};

use crate::image::header::{DibHeader, FileHeader};

/// Reads the 14 byte file header. The magic is returned as found; checking it
/// is left to the caller so that it can report the bytes it saw.
pub fn parse_file_header(input: &[u8]) -> IResult<&[u8], FileHeader> {
    let (input, magic) = map_res(take(2usize), <[u8; 2]>::try_from)(input)?;
    let (input, file_size) = le_u32(input)?;
    let (input, reserved) = le_u32(input)?;
    let (input, pixel_offset) = le_u32(input)?;
    Ok((
        input,
        FileHeader {
            magic,
            file_size,
            reserved,
            pixel_offset,
        },
    ))
}

/// Reads the 40 byte `BITMAPINFOHEADER`
pub fn parse_dib_header(input: &[u8]) -> IResult<&[u8], DibHeader> {
    let (input, header_size) = le_u32(input)?;
    let (input, width) = le_i32(input)?;
    let (input, height) = le_i32(input)?;
    let (input, planes) = le_u16(input)?;
    let (input, bit_count) = le_u16(input)?;
    let (input, compression) = le_u32(input)?;
    let (input, image_size) = le_u32(input)?;
    let (input, x_pixels_per_meter) = le_i32(input)?;
    let (input, y_pixels_per_meter) = le_i32(input)?;
    let (input, colors_used) = le_u32(input)?;
    let (input, colors_important) = le_u32(input)?;
    Ok((
        input,
        DibHeader {
            header_size,
            width,
            height,
            planes,
            bit_count,
            compression,
            image_size,
            x_pixels_per_meter,
            y_pixels_per_meter,
            colors_used,
            colors_important,
        },
    ))
}
