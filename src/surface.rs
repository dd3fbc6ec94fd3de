// src/surface.rs

//! Pixel destinations.
//!
//! `PixelSink` is the only thing the renderer needs from a surface. The
//! `Framebuffer` implementation is a plain RGBA buffer (row-major, 4 bytes
//! per pixel) used by the binary and by tests.

use std::io::{self, Write};

use thiserror::Error;

use crate::color::Rgba;

const BYTES_PER_PIXEL: usize = 4;

/// A surface that can have individual pixels set.
///
/// Coordinates may lie outside the surface; implementations decide whether
/// to clip or reject them.
pub trait PixelSink {
    fn set_pixel(&mut self, x: i32, y: i32, color: Rgba);
}

impl<S: PixelSink + ?Sized> PixelSink for &mut S {
    fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        (**self).set_pixel(x, y, color)
    }
}

/// Errors creating a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("surface of {width}x{height} pixels does not fit in memory")]
    TooLarge { width: usize, height: usize },
}

/// An owned RGBA pixel buffer that clips out-of-bounds writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Framebuffer {
    /// Allocates a transparent `width` x `height` buffer.
    ///
    /// Fails with `SurfaceError::TooLarge` when the byte size of the buffer
    /// overflows `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, SurfaceError> {
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
            .ok_or(SurfaceError::TooLarge { width, height })?;
        Ok(Framebuffer {
            width,
            height,
            pixels: vec![0u8; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Fills the whole buffer with `color`.
    pub fn clear(&mut self, color: Rgba) {
        let color_bytes = color.to_bytes();
        for pixel in self.pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel.copy_from_slice(&color_bytes);
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) * BYTES_PER_PIXEL)
    }

    /// Color at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba> {
        let idx = self.index(x, y)?;
        let mut bytes = [0u8; BYTES_PER_PIXEL];
        bytes.copy_from_slice(&self.pixels[idx..idx + BYTES_PER_PIXEL]);
        Some(Rgba::from_bytes(bytes))
    }

    /// Writes the buffer as a binary PPM (P6) image. Alpha is dropped.
    pub fn write_ppm<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "P6\n{} {}\n255\n", self.width, self.height)?;
        let mut row = Vec::with_capacity(self.width * 3);
        for line in self.pixels.chunks_exact(self.width.max(1) * BYTES_PER_PIXEL) {
            row.clear();
            for px in line.chunks_exact(BYTES_PER_PIXEL) {
                row.extend_from_slice(&px[..3]);
            }
            out.write_all(&row)?;
        }
        out.flush()
    }

    /// Text preview of a region: `█` where the pixel differs from
    /// `background`, a space elsewhere. Rows are separated by `\n`.
    pub fn to_text(&self, background: Rgba, rows: std::ops::Range<usize>) -> String {
        let rows = rows.start.min(self.height)..rows.end.min(self.height);
        let mut text = String::new();
        for y in rows {
            let line: String = (0..self.width)
                .map(|x| match self.pixel(x as i32, y as i32) {
                    Some(c) if c != background => '█',
                    _ => ' ',
                })
                .collect();
            text.push_str(line.trim_end());
            text.push('\n');
        }
        text
    }
}

impl PixelSink for Framebuffer {
    fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&color.to_bytes());
        }
    }
}
