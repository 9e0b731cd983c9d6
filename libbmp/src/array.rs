use std::sync::LazyLock;

use bon::Builder;
use itertools::Itertools;
use regex::Regex;
use tracing::{debug, instrument};

use crate::{
    error::ValidationError,
    image::depad::{depad, PaddingRule},
};

static IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier regex"));

/// Renders a depadded pixel-index region as a C array initializer:
///
/// ```text
/// uint8_t NAME [WIDTH*HEIGHT] = {0x1, 0x2, ..., 0xff};
/// ```
///
/// ```rust
/// use libbmp::ArraySerializer;
///
/// let serializer = ArraySerializer::builder()
///     .name("img")
///     .width(3)
///     .height(2)
///     .build();
/// let literal = serializer.serialize(&[1, 2, 3, 9, 4, 5, 6, 9]).unwrap();
/// assert_eq!(literal, "uint8_t img [6] = {0x1, 0x2, 0x3, 0x4, 0x5, 0x6};");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct ArraySerializer {
    /// Name of the emitted array, must be a C identifier
    #[builder(into)]
    name: String,
    /// Logical image width in pixels
    width: u32,
    /// Logical image height in pixels
    height: u32,
    /// Row padding layout of the region
    #[builder(default)]
    padding: PaddingRule,
    /// Fail when the depadded region doesn't hold exactly `width * height` bytes
    #[builder(default)]
    strict: bool,
}

impl ArraySerializer {
    /// Returns the array name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the logical width
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Returns the logical height
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns the padding rule
    #[must_use]
    pub const fn padding(&self) -> PaddingRule {
        self.padding
    }

    /// Element count written between the brackets of the declaration
    #[must_use]
    pub const fn declared_len(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Checks the parameters without looking at any pixel data
    ///
    /// # Errors
    ///
    /// Errors if width or height is zero, or if the name isn't a C identifier
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.width == 0 || self.height == 0 {
            return Err(ValidationError::NonPositiveDimension {
                width: i64::from(self.width),
                height: i64::from(self.height),
            });
        }
        if !IDENTIFIER_REGEX.is_match(&self.name) {
            return Err(ValidationError::InvalidIdentifier(self.name.clone()));
        }
        Ok(())
    }

    /// Strips row padding from `region` and renders the kept bytes as an array literal
    ///
    /// Unless strict mode was set on the builder, the number of kept bytes is not compared with
    /// the declared size: a short region gives a short initializer list, a long one a long list.
    ///
    /// # Errors
    ///
    /// See [`ArraySerializer::validate`]. In strict mode, also errors with
    /// [`ValidationError::SizeMismatch`].
    #[instrument(skip(region), fields(len = region.len()), level = "debug")]
    pub fn serialize(&self, region: &[u8]) -> Result<String, ValidationError> {
        self.validate()?;
        let kept = depad(region, self.width, self.padding);
        let expected = self.declared_len();
        let actual = kept.len() as u64;
        if actual != expected {
            if self.strict {
                return Err(ValidationError::SizeMismatch { expected, actual });
            }
            debug!("declared {expected} pixels but region holds {actual}, emitting as is");
        }
        Ok(format!(
            "uint8_t {} [{expected}] = {{{}}};",
            self.name,
            kept.iter().map(|b| format!("{b:#x}")).join(", ")
        ))
    }
}

/// Strips row padding from `region` with the [`PaddingRule::Standard`] rule and renders it as
/// `uint8_t array_name [width*height] = {...};`
///
/// # Errors
///
/// Errors if width or height is zero, or `array_name` isn't a C identifier
pub fn serialize(
    region: &[u8],
    width: u32,
    height: u32,
    array_name: &str,
) -> Result<String, ValidationError> {
    ArraySerializer::builder()
        .name(array_name)
        .width(width)
        .height(height)
        .build()
        .serialize(region)
}

/// Converts caller supplied dimensions into the unsigned sizes the serializer expects
///
/// # Errors
///
/// Errors if either value is zero or negative, or doesn't fit in a `u32`
pub fn validate_dimensions(width: i64, height: i64) -> Result<(u32, u32), ValidationError> {
    if width <= 0 || height <= 0 {
        return Err(ValidationError::NonPositiveDimension { width, height });
    }
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(ValidationError::DimensionTooLarge { width, height }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_by_two_needs_no_padding() {
        assert_eq!(
            serialize(&[1, 2, 3, 4, 5, 6, 7, 8], 4, 2, "img").unwrap(),
            "uint8_t img [8] = {0x1, 0x2, 0x3, 0x4, 0x5, 0x6, 0x7, 0x8};"
        );
    }

    #[test]
    fn three_by_two_drops_one_byte_per_row() {
        assert_eq!(
            serialize(&[1, 2, 3, 9, 4, 5, 6, 9], 3, 2, "img").unwrap(),
            "uint8_t img [6] = {0x1, 0x2, 0x3, 0x4, 0x5, 0x6};"
        );
    }

    #[test]
    fn hex_literals_are_not_zero_padded() {
        assert_eq!(
            serialize(&[10, 0, 255, 16], 4, 1, "px").unwrap(),
            "uint8_t px [4] = {0xa, 0x0, 0xff, 0x10};"
        );
    }

    #[test]
    fn legacy_padding_matches_old_tool() {
        // width 3 under the old rule: 3 padding bytes per row
        let serializer = ArraySerializer::builder()
            .name("img")
            .width(3)
            .height(2)
            .padding(PaddingRule::Legacy)
            .build();
        assert_eq!(
            serializer
                .serialize(&[1, 2, 3, 9, 9, 9, 4, 5, 6, 9, 9, 9])
                .unwrap(),
            "uint8_t img [6] = {0x1, 0x2, 0x3, 0x4, 0x5, 0x6};"
        );
    }

    #[test]
    fn size_mismatch_is_permissive_by_default() {
        assert_eq!(
            serialize(&[1, 2, 3, 4], 4, 2, "img").unwrap(),
            "uint8_t img [8] = {0x1, 0x2, 0x3, 0x4};"
        );
        assert_eq!(
            serialize(&[], 4, 2, "img").unwrap(),
            "uint8_t img [8] = {};"
        );
    }

    #[test]
    fn strict_rejects_size_mismatch() {
        let serializer = ArraySerializer::builder()
            .name("img")
            .width(4)
            .height(2)
            .strict(true)
            .build();
        assert_eq!(
            serializer.serialize(&[1, 2, 3, 4]),
            Err(ValidationError::SizeMismatch {
                expected: 8,
                actual: 4
            })
        );
        assert!(serializer.serialize(&[0; 8]).is_ok());
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert_eq!(
            serialize(&[1], 0, 1, "img"),
            Err(ValidationError::NonPositiveDimension {
                width: 0,
                height: 1
            })
        );
    }

    #[test]
    fn rejects_names_that_are_not_identifiers() {
        for name in ["", "1img", "my-img", "img[2]", "a b"] {
            assert_eq!(
                serialize(&[1], 1, 1, name),
                Err(ValidationError::InvalidIdentifier(name.to_owned())),
                "{name:?}"
            );
        }
        assert!(serialize(&[1], 1, 1, "_logo_2").is_ok());
    }

    #[test]
    fn dimension_validation() {
        assert_eq!(validate_dimensions(320, 200), Ok((320, 200)));
        assert_eq!(
            validate_dimensions(-1, 200),
            Err(ValidationError::NonPositiveDimension {
                width: -1,
                height: 200
            })
        );
        assert_eq!(
            validate_dimensions(1 << 40, 1),
            Err(ValidationError::DimensionTooLarge {
                width: 1 << 40,
                height: 1
            })
        );
    }
}
