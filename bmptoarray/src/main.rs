use bmptoarray::{bmp_to_array, Options};
use libbmp::PaddingRule;
use std::path::PathBuf;
use tracing::{info, Level};

use anyhow::{bail, Result};
use clap::Parser;

#[cfg(not(debug_assertions))]
const DEFAULT_DEBUG_LEVEL: u8 = 1;
#[cfg(debug_assertions)]
const DEFAULT_DEBUG_LEVEL: u8 = 99;

/// Converts an uncompressed 8 bit palette BMP image into a C array of palette indices
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Turn debugging information on
    #[arg(short, long, default_value_t = DEFAULT_DEBUG_LEVEL, action = clap::ArgAction::Count)]
    verbosity: u8,

    /// The source bmp file
    bmp_file: PathBuf,

    /// Name of the generated array
    array_name: String,

    /// Image width, defaults to the width in the bmp header
    #[arg(long, allow_negative_numbers = true)]
    width: Option<i64>,

    /// Image height, defaults to the height in the bmp header
    #[arg(long, allow_negative_numbers = true)]
    height: Option<i64>,

    /// Row padding rule: "standard" (4 byte aligned rows) or "legacy" (width % 4 bytes per row)
    #[arg(long, default_value_t = PaddingRule::Standard)]
    padding: PaddingRule,

    /// Fail if the pixel data doesn't hold exactly width * height pixels
    #[arg(long)]
    strict: bool,

    /// Don't echo the array to stdout
    #[arg(short, long)]
    quiet: bool,

    /// The output file name
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbosity {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();

    let output = match cli.output {
        Some(o) => o,
        None => {
            let mut output = PathBuf::new();
            let Some(dir) = cli.bmp_file.parent() else {
                bail!("Invalid bmp file");
            };
            let Some(Some(filename)) = cli.bmp_file.file_stem().map(|os| os.to_str()) else {
                bail!("Invalid bmp file");
            };
            let suffix = "h";
            output.push(dir);
            output.push(format!("{}.{}", filename, suffix));
            info!("output name: {}", output.display());
            output
        }
    };

    let options = Options {
        array_name: cli.array_name,
        width: cli.width,
        height: cli.height,
        padding: cli.padding,
        strict: cli.strict,
    };
    let literal = bmp_to_array(&cli.bmp_file, &output, &options)?;
    if !cli.quiet {
        println!("{literal}");
    }
    Ok(())
}
