// src/glyph.rs

//! Defines `GlyphBitmap`, the validated hex-encoded bitmap of one font glyph,
//! and `GlyphWidth`, the two cell sizes a bitmap can describe.
//!
//! Every glyph is 16 pixels tall. A narrow glyph is 8 pixels wide and encoded
//! in 32 hex digits (2 per row); a wide glyph is 16 pixels wide and encoded in
//! 64 hex digits (4 per row).


use crate::rasterizer::RasterError;

/// Height of every glyph in pixels.
pub const GLYPH_HEIGHT: usize = 16;

/// Hex digit count of an 8×16 bitmap.
pub const NARROW_BITMAP_LEN: usize = 32;
/// Hex digit count of a 16×16 bitmap.
pub const WIDE_BITMAP_LEN: usize = 64;

/// The two glyph widths a bitmap string can encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlyphWidth {
    /// 8×16, 32 hex digits.
    Narrow,
    /// 16×16, 64 hex digits.
    Wide,
}

impl GlyphWidth {
    /// Determines the glyph width from the length of its bitmap string.
    pub fn from_bitmap_len(len: usize) -> Option<Self> {
        match len {
            NARROW_BITMAP_LEN => Some(GlyphWidth::Narrow),
            WIDE_BITMAP_LEN => Some(GlyphWidth::Wide),
            _ => None,
        }
    }

    /// Width of the glyph in pixels (also the number of bits per row).
    pub const fn pixels(self) -> usize {
        match self {
            GlyphWidth::Narrow => 8,
            GlyphWidth::Wide => 16,
        }
    }

    /// Number of hex digits encoding one row.
    pub const fn hex_digits_per_row(self) -> usize {
        self.pixels() / 4
    }
}

/// A glyph bitmap known to be 32 or 64 ASCII hex digits.
///
/// Instances are only built through `GlyphBitmap::parse`, so a stored bitmap
/// can always be rasterized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GlyphBitmap(Box<str>);

impl GlyphBitmap {
    /// Validates a bitmap string.
    pub fn parse(hex: &str) -> Result<Self, RasterError> {
        let width = GlyphWidth::from_bitmap_len(hex.len())
            .ok_or(RasterError::InvalidLength(hex.len()))?;
        if let Some(position) = hex.bytes().position(|b| !b.is_ascii_hexdigit()) {
            return Err(RasterError::InvalidDigit { position });
        }
        debug_assert_eq!(hex.len(), width.hex_digits_per_row() * GLYPH_HEIGHT);
        Ok(GlyphBitmap(hex.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn width(&self) -> GlyphWidth {
        // Length was checked in `parse`.
        if self.0.len() == WIDE_BITMAP_LEN {
            GlyphWidth::Wide
        } else {
            GlyphWidth::Narrow
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn test_width_from_length() {
        assert_eq!(GlyphWidth::from_bitmap_len(32), Some(GlyphWidth::Narrow));
        assert_eq!(GlyphWidth::from_bitmap_len(64), Some(GlyphWidth::Wide));
        assert_eq!(GlyphWidth::from_bitmap_len(0), None);
        assert_eq!(GlyphWidth::from_bitmap_len(48), None);
        assert_eq!(GlyphWidth::Wide.hex_digits_per_row(), 4);
    }

    #[test_log::test]
    fn test_parse_accepts_both_sizes() {
        let narrow = GlyphBitmap::parse(&"0".repeat(32)).expect("narrow");
        let wide = GlyphBitmap::parse(&"a".repeat(64)).expect("wide");
        assert_eq!(narrow.width(), GlyphWidth::Narrow);
        assert_eq!(wide.width(), GlyphWidth::Wide);
        assert_eq!(wide.as_str(), "a".repeat(64));
    }

    #[test_log::test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            GlyphBitmap::parse("00FF"),
            Err(RasterError::InvalidLength(4))
        );
        let mut bad = "0".repeat(31);
        bad.push('g');
        assert_eq!(
            GlyphBitmap::parse(&bad),
            Err(RasterError::InvalidDigit { position: 31 })
        );
    }
}
