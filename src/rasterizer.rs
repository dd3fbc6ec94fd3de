// src/rasterizer.rs

//! Glyph rasterizer.
//!
//! Turns one hex bitmap string into the list of foreground pixel positions it
//! describes. The rasterizer is pure: it neither owns nor touches a surface,
//! it only reports which pixels are set.
//!
//! ```text
//!  bitmap "0000000018242442427E424242420000"
//!     row r: hex digits [r*2 .. r*2+2]  →  u16  →  bits 7..0  →  pixels
//! ```
//!
//! Column placement: bit `j` of a row lands at `origin.x + (width - j)`, so
//! the most significant bit is drawn one pixel right of the origin and the
//! least significant bit at `origin.x + width`. This matches the reference
//! output of the hex font renderer this crate reproduces; shifting it left by
//! one would move every glyph by a pixel.

use log::trace;
use thiserror::Error;

use crate::glyph::{GlyphWidth, GLYPH_HEIGHT};

/// A pixel position on the destination surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

/// Reasons a bitmap string cannot be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RasterError {
    #[error("invalid glyph bitmap length {0} (expected 32 or 64 hex digits)")]
    InvalidLength(usize),
    #[error("invalid hex digit in glyph bitmap at position {position}")]
    InvalidDigit { position: usize },
}

/// Decodes the 16 row values of a bitmap.
///
/// Returns the glyph width together with one `u16` per row, most significant
/// bit leftmost.
pub fn decode_rows(bitmap: &str) -> Result<(GlyphWidth, [u16; GLYPH_HEIGHT]), RasterError> {
    let width = GlyphWidth::from_bitmap_len(bitmap.len())
        .ok_or(RasterError::InvalidLength(bitmap.len()))?;
    let digits = width.hex_digits_per_row();
    let bytes = bitmap.as_bytes();

    let mut rows = [0u16; GLYPH_HEIGHT];
    for (r, row) in rows.iter_mut().enumerate() {
        let start = r * digits;
        let mut value = 0u16;
        for (k, &b) in bytes[start..start + digits].iter().enumerate() {
            let nibble = (b as char)
                .to_digit(16)
                .ok_or(RasterError::InvalidDigit { position: start + k })?;
            value = (value << 4) | nibble as u16;
        }
        *row = value;
    }
    Ok((width, rows))
}

/// Rasterizes `bitmap` with its top-left corner at `origin`.
///
/// Pixels are returned row by row, left to right. A bitmap that is not 32 or
/// 64 hex digits long is refused and nothing is produced.
///
/// Any origin is accepted. Pixels whose coordinates would fall outside the
/// `i32` range are left out.
pub fn rasterize(bitmap: &str, origin: Point) -> Result<Vec<Point>, RasterError> {
    let (width, rows) = decode_rows(bitmap)?;
    let w = width.pixels() as i32;

    let mut pixels = Vec::new();
    for (r, &value) in rows.iter().enumerate() {
        let Some(y) = origin.y.checked_add(r as i32) else {
            break;
        };
        for j in (0..w).rev() {
            if (value >> j) & 1 == 0 {
                continue;
            }
            if let Some(x) = origin.x.checked_add(w - j) {
                pixels.push(Point::new(x, y));
            }
        }
    }
    trace!(
        "rasterized {:?} glyph at ({}, {}): {} pixels",
        width,
        origin.x,
        origin.y,
        pixels.len()
    );
    Ok(pixels)
}
