// src/lib.rs

//! Renders UTF-8 text with hex bitmap fonts.
//!
//! ```text
//! bytes ─▶ utf8::Utf8Decoder ─▶ codepoints ─▶ font::GlyphTable ─▶ bitmap
//!       ─▶ rasterizer::rasterize ─▶ pixel offsets ─▶ surface::PixelSink
//! ```
//!
//! `renderer::render_text` ties the pieces together.

pub mod color;
pub mod config;
pub mod font;
pub mod glyph;
pub mod rasterizer;
pub mod renderer;
pub mod surface;
pub mod utf8;

pub use color::{Color, NamedColor, Rgba};
pub use font::{FontError, FontLineError, GlyphTable, LoadReport};
pub use glyph::{GlyphBitmap, GlyphWidth};
pub use rasterizer::{rasterize, Point, RasterError};
pub use renderer::{render_text, KeyEcho, RenderStats, TextRenderer};
pub use surface::{Framebuffer, PixelSink, SurfaceError};
pub use utf8::{DecodeError, DecodedSymbol, Utf8Decoder, REPLACEMENT_CODEPOINT};
