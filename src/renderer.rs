// src/renderer.rs

//! This module defines the `TextRenderer`.
//!
//! The renderer drives the UTF-8 decoder over a byte string, resolves each
//! decoded codepoint to a glyph bitmap, rasterizes it and paints the result
//! into a `PixelSink`. It never fails: undecodable bytes and codepoints
//! without a glyph are drawn as `?`, and a glyph that cannot be rasterized is
//! skipped with a warning.
//!
//! The cursor moves a fixed 8 pixels per decoded symbol in `render_text`,
//! even for 16-pixel-wide glyphs, which therefore overlap their right
//! neighbour. `echo_codepoint` advances by the glyph's own width instead.

use log::{info, trace, warn};

use crate::color::Rgba;
use crate::font::GlyphTable;
use crate::glyph::{GlyphBitmap, GlyphWidth};
use crate::rasterizer::{rasterize, Point};
use crate::surface::PixelSink;
use crate::utf8::{Utf8Decoder, REPLACEMENT_CODEPOINT};

/// Horizontal advance per decoded symbol in `render_text`.
pub const FIXED_ADVANCE_PX: i32 = 8;
/// Vertical distance between lines in `render_lines`.
pub const DEFAULT_LINE_HEIGHT_PX: i32 = 16;

/// Counters describing one render call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Decoded symbols, each of which advanced the cursor.
    pub symbols: usize,
    /// Symbols the decoder flagged as invalid.
    pub invalid: usize,
    /// Valid codepoints that had no glyph and were drawn as `?`.
    pub missing: usize,
    /// Symbols drawn as nothing because the font has no `?` glyph.
    pub refused: usize,
    /// Pixels handed to the sink.
    pub pixels: usize,
    /// Cursor x position after the last symbol.
    pub end_x: i32,
}

impl RenderStats {
    fn merge(&mut self, other: RenderStats) {
        self.symbols += other.symbols;
        self.invalid += other.invalid;
        self.missing += other.missing;
        self.refused += other.refused;
        self.pixels += other.pixels;
        self.end_x = other.end_x;
    }
}

/// Draws text from a borrowed `GlyphTable`.
#[derive(Debug, Clone, Copy)]
pub struct TextRenderer<'t> {
    table: &'t GlyphTable,
    advance: i32,
}

impl<'t> TextRenderer<'t> {
    pub fn new(table: &'t GlyphTable) -> Self {
        TextRenderer {
            table,
            advance: FIXED_ADVANCE_PX,
        }
    }

    /// Overrides the per-symbol advance used by `render_text`.
    pub fn with_advance(mut self, advance: i32) -> Self {
        self.advance = advance;
        self
    }

    /// Draws `text` with its top-left corner at `(origin_x, origin_y)`.
    ///
    /// Every decoded symbol is drawn and moves the cursor right by the
    /// renderer's advance (8 pixels unless overridden), whatever the width of
    /// its glyph. Symbols the decoder rejects, and codepoints the table has no
    /// glyph for, are drawn with the `?` glyph. A truncated sequence at the end
    /// of `text` is drawn as `?` and ends the render.
    ///
    /// Pixels are handed to `sink` unclipped; the cursor saturates at the ends
    /// of the `i32` range instead of wrapping.
    ///
    /// # Arguments
    /// * `text`: UTF-8 bytes to draw. Need not be valid UTF-8.
    /// * `origin_x`, `origin_y`: Top-left corner of the first glyph.
    /// * `color`: Foreground color for every set pixel.
    /// * `sink`: Surface receiving the pixels.
    ///
    /// # Returns
    /// * `RenderStats`: Counters for the call, including the final cursor x.
    pub fn render_text<S: PixelSink + ?Sized>(
        &self,
        text: &[u8],
        origin_x: i32,
        origin_y: i32,
        color: Rgba,
        sink: &mut S,
    ) -> RenderStats {
        let mut stats = RenderStats {
            end_x: origin_x,
            ..RenderStats::default()
        };
        let mut cursor_x = origin_x;

        for symbol in Utf8Decoder::new(text) {
            let codepoint = match symbol.error {
                Some(err) => {
                    warn!("text is not valid UTF-8: {}", err);
                    stats.invalid += 1;
                    REPLACEMENT_CODEPOINT
                }
                None => symbol.codepoint,
            };

            let bitmap = self.table.lookup(codepoint).or_else(|| {
                if symbol.is_valid() {
                    trace!("no glyph for U+{:04X}, drawing replacement", codepoint);
                    stats.missing += 1;
                }
                self.table.lookup(REPLACEMENT_CODEPOINT)
            });

            match bitmap {
                Some(bitmap) => {
                    stats.pixels +=
                        self.draw_bitmap(bitmap, Point::new(cursor_x, origin_y), color, sink);
                }
                None => {
                    warn!("no replacement glyph in font; U+{:04X} not drawn", codepoint);
                    stats.refused += 1;
                }
            }

            stats.symbols += 1;
            cursor_x = cursor_x.saturating_add(self.advance);
        }

        stats.end_x = cursor_x;
        stats
    }

    /// Draws several lines, each `line_height` pixels below the previous one.
    ///
    /// Each line is drawn with `render_text` starting again at `origin_x`.
    /// There is no wrapping: a line longer than the surface runs off its
    /// right edge.
    ///
    /// # Arguments
    /// * `lines`: Lines of UTF-8 bytes, top to bottom.
    /// * `origin_x`, `origin_y`: Top-left corner of the first line.
    /// * `line_height`: Vertical step between lines (16 for hex fonts).
    /// * `color`: Foreground color.
    /// * `sink`: Surface receiving the pixels.
    ///
    /// # Returns
    /// * `RenderStats`: Counters summed over all lines; `end_x` is the
    ///   cursor after the last line.
    pub fn render_lines<I, T, S>(
        &self,
        lines: I,
        origin_x: i32,
        origin_y: i32,
        line_height: i32,
        color: Rgba,
        sink: &mut S,
    ) -> RenderStats
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
        S: PixelSink + ?Sized,
    {
        let mut total = RenderStats::default();
        for (row, line) in lines.into_iter().enumerate() {
            let step = i32::try_from(row)
                .unwrap_or(i32::MAX)
                .saturating_mul(line_height);
            let y = origin_y.saturating_add(step);
            total.merge(self.render_text(line.as_ref(), origin_x, y, color, sink));
        }
        total
    }

    /// Draws one codepoint, e.g. a key the user typed, and returns how far the
    /// cursor should move.
    ///
    /// Unlike `render_text`, the advance is the glyph's own width, so wide
    /// glyphs do not overlap the next key. Codepoints without a glyph are
    /// drawn as `?`. Each echo is logged at info level.
    ///
    /// # Arguments
    /// * `codepoint`: The character to show.
    /// * `x`, `y`: Top-left corner of the glyph.
    /// * `color`: Foreground color.
    /// * `sink`: Surface receiving the pixels.
    ///
    /// # Returns
    /// * `i32`: 8 for a narrow glyph, 16 for a wide one. 8 if nothing could
    ///   be drawn.
    pub fn echo_codepoint<S: PixelSink + ?Sized>(
        &self,
        codepoint: u32,
        x: i32,
        y: i32,
        color: Rgba,
        sink: &mut S,
    ) -> i32 {
        let (shown, bitmap) = match self.table.lookup(codepoint) {
            Some(bitmap) => (codepoint, Some(bitmap)),
            None => (
                REPLACEMENT_CODEPOINT,
                self.table.lookup(REPLACEMENT_CODEPOINT),
            ),
        };
        let Some(bitmap) = bitmap else {
            warn!("no glyph for U+{:04X} and no replacement glyph", codepoint);
            return FIXED_ADVANCE_PX;
        };

        self.draw_bitmap(bitmap, Point::new(x, y), color, sink);
        info!(
            "key: {} (0x{:04X})",
            char::from_u32(codepoint).unwrap_or(char::REPLACEMENT_CHARACTER),
            codepoint
        );
        trace!("echoed U+{:04X} as U+{:04X}", codepoint, shown);
        bitmap.width().pixels() as i32
    }

    fn draw_bitmap<S: PixelSink + ?Sized>(
        &self,
        bitmap: &GlyphBitmap,
        origin: Point,
        color: Rgba,
        sink: &mut S,
    ) -> usize {
        // `GlyphBitmap::parse` already validated length and digits, so this
        // only fails if that validation and `rasterize` ever disagree.
        let pixels = rasterize(bitmap.as_str(), origin).unwrap_or_else(|err| {
            warn!("glyph not drawn: {}", err);
            Vec::new()
        });
        for p in &pixels {
            sink.set_pixel(p.x, p.y, color);
        }
        pixels.len()
    }
}

/// Draws `text` at `(origin_x, origin_y)` using `table`.
///
/// Convenience wrapper around `TextRenderer::render_text` with the default
/// 8-pixel advance. The table is only read, so one table can serve any
/// number of concurrent renders.
///
/// # Arguments
/// * `text`: UTF-8 bytes to draw.
/// * `origin_x`, `origin_y`: Top-left corner of the first glyph.
/// * `color`: Foreground color.
/// * `table`: Glyphs to draw with.
/// * `sink`: Surface receiving the pixels.
///
/// # Returns
/// * `RenderStats`: Counters for the call.
pub fn render_text<S: PixelSink + ?Sized>(
    text: &[u8],
    origin_x: i32,
    origin_y: i32,
    color: Rgba,
    table: &GlyphTable,
    sink: &mut S,
) -> RenderStats {
    TextRenderer::new(table).render_text(text, origin_x, origin_y, color, sink)
}

/// Keeps the cursor for a row of echoed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEcho {
    pub x: i32,
    pub y: i32,
}

impl KeyEcho {
    pub fn new(x: i32, y: i32) -> Self {
        KeyEcho { x, y }
    }

    /// Draws `codepoint` at the cursor and advances it by the glyph's width.
    pub fn echo<S: PixelSink + ?Sized>(
        &mut self,
        renderer: &TextRenderer<'_>,
        codepoint: u32,
        color: Rgba,
        sink: &mut S,
    ) -> GlyphWidth {
        let advance = renderer.echo_codepoint(codepoint, self.x, self.y, color, sink);
        self.x = self.x.saturating_add(advance);
        if advance == GlyphWidth::Wide.pixels() as i32 {
            GlyphWidth::Wide
        } else {
            GlyphWidth::Narrow
        }
    }
}
