use std::{fmt::Display, str::FromStr};

use tracing::{debug, instrument};

/// How many trailing bytes each stored row carries beyond its `width` pixels
#[derive(Default, Debug, Eq, PartialEq, Copy, Clone)]
pub enum PaddingRule {
    /// Rows are padded to the next multiple of 4 bytes: `(4 - width % 4) % 4`
    #[default]
    Standard,
    /// `width % 4` trailing bytes per row, as written by the old `BmpToArray` tool
    ///
    /// This only agrees with [`PaddingRule::Standard`] for widths divisible by 2; it is kept so
    /// output can be reproduced byte for byte.
    Legacy,
}

impl PaddingRule {
    /// Number of bytes to drop after every `width` kept bytes
    #[must_use]
    pub const fn padding_bytes(self, width: u32) -> usize {
        let rem = (width % 4) as usize;
        match self {
            Self::Standard => (4 - rem) % 4,
            Self::Legacy => rem,
        }
    }
}

impl Display for PaddingRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Legacy => write!(f, "legacy"),
        }
    }
}

impl FromStr for PaddingRule {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "legacy" => Ok(Self::Legacy),
            _ => Err("padding rule must be one of \"standard\" or \"legacy\""),
        }
    }
}

/// Returns an iterator over the kept bytes of `region`, dropping the padding at the end of
/// every row
///
/// Rows are walked in storage order. A trailing row shorter than `width` yields what it has.
pub fn depad_iter(
    region: &[u8],
    width: u32,
    rule: PaddingRule,
) -> impl Iterator<Item = u8> + '_ {
    let padding = rule.padding_bytes(width);
    let width = width as usize;
    // a zero width keeps nothing; the stride still has to be non-zero for `chunks`
    region
        .chunks((width + padding).max(1))
        .flat_map(move |row| &row[..width.min(row.len())])
        .copied()
}

/// Strips row padding from `region`, see [`depad_iter`]
#[instrument(skip(region), level = "debug")]
pub fn depad(region: &[u8], width: u32, rule: PaddingRule) -> Vec<u8> {
    let kept: Vec<u8> = depad_iter(region, width, rule).collect();
    debug!(
        "kept {} of {} bytes ({} padding bytes per row)",
        kept.len(),
        region.len(),
        rule.padding_bytes(width)
    );
    kept
}
