use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use libbmp::{validate_dimensions, ArraySerializer, BmpFile, PaddingRule};
use tracing::{debug, info, instrument};

/// Settings for a single conversion, filled in from the command line
#[derive(Debug, Clone)]
pub struct Options {
    /// Name of the emitted array
    pub array_name: String,
    /// Logical width, taken from the DIB header when missing
    pub width: Option<i64>,
    /// Logical height, taken from the DIB header when missing
    pub height: Option<i64>,
    /// Row padding rule
    pub padding: PaddingRule,
    /// Reject files whose depadded size differs from `width * height`
    pub strict: bool,
}

/// Reads `bmp_file`, converts it into a C array and writes the literal to `output_name`.
/// The literal is returned so the caller can echo it.
#[instrument(skip(options), fields(name = %options.array_name))]
pub fn bmp_to_array(bmp_file: &Path, output_name: &Path, options: &Options) -> Result<String> {
    let data = fs::read(bmp_file).with_context(|| format!("Read {}", bmp_file.display()))?;
    debug!("Read {} bytes from {}", data.len(), bmp_file.display());

    let bmp = BmpFile::parse(&data)?;
    info!("\n{}", bmp.file_header());
    info!("\n{}", bmp.dib_header());
    bmp.ensure_supported()?;

    let width = options.width.unwrap_or_else(|| i64::from(bmp.width()));
    let height = options.height.unwrap_or_else(|| i64::from(bmp.height()));
    let (width, height) = validate_dimensions(width, height)?;
    debug!("Array dimensions: {:?}", (&width, &height));

    let serializer = ArraySerializer::builder()
        .name(options.array_name.as_str())
        .width(width)
        .height(height)
        .padding(options.padding)
        .strict(options.strict)
        .build();
    let literal = serializer.serialize(bmp.pixel_indices())?;

    let output = File::options()
        .create(true)
        .write(true)
        .truncate(true)
        .open(output_name)
        .with_context(|| format!("Open {}", output_name.display()))?;
    let mut output = BufWriter::new(output);
    output.write_all(literal.as_bytes())?;
    output.flush()?;
    info!("Successfully wrote {} to {}", options.array_name, output_name.display());
    Ok(literal)
}
