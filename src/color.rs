// src/color.rs

//! Color types: `Color`, the configurable description of a color, and
//! `Rgba`, the concrete value handed to a `PixelSink`.

use serde::{Deserialize, Serialize};

/// Standard ANSI named colors (indices 0-15).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NamedColor {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
    BrightBlack = 8,
    BrightRed = 9,
    BrightGreen = 10,
    BrightYellow = 11,
    BrightBlue = 12,
    BrightMagenta = 13,
    BrightCyan = 14,
    BrightWhite = 15,
}

impl NamedColor {
    const ALL: [NamedColor; 16] = [
        NamedColor::Black,
        NamedColor::Red,
        NamedColor::Green,
        NamedColor::Yellow,
        NamedColor::Blue,
        NamedColor::Magenta,
        NamedColor::Cyan,
        NamedColor::White,
        NamedColor::BrightBlack,
        NamedColor::BrightRed,
        NamedColor::BrightGreen,
        NamedColor::BrightYellow,
        NamedColor::BrightBlue,
        NamedColor::BrightMagenta,
        NamedColor::BrightCyan,
        NamedColor::BrightWhite,
    ];

    /// Converts an index (0-15) to a `NamedColor`.
    pub fn from_index(idx: u8) -> Option<Self> {
        Self::ALL.get(idx as usize).copied()
    }

    pub fn to_rgba(self) -> Rgba {
        match self {
            NamedColor::Black => Rgba::opaque(0, 0, 0),
            NamedColor::Red => Rgba::opaque(205, 0, 0),
            NamedColor::Green => Rgba::opaque(0, 205, 0),
            NamedColor::Yellow => Rgba::opaque(205, 205, 0),
            NamedColor::Blue => Rgba::opaque(0, 0, 238),
            NamedColor::Magenta => Rgba::opaque(205, 0, 205),
            NamedColor::Cyan => Rgba::opaque(0, 205, 205),
            NamedColor::White => Rgba::opaque(229, 229, 229),
            NamedColor::BrightBlack => Rgba::opaque(127, 127, 127),
            NamedColor::BrightRed => Rgba::opaque(255, 0, 0),
            NamedColor::BrightGreen => Rgba::opaque(0, 255, 0),
            NamedColor::BrightYellow => Rgba::opaque(255, 255, 0),
            NamedColor::BrightBlue => Rgba::opaque(92, 92, 255),
            NamedColor::BrightMagenta => Rgba::opaque(255, 0, 255),
            NamedColor::BrightCyan => Rgba::opaque(0, 255, 255),
            NamedColor::BrightWhite => Rgba::opaque(255, 255, 255),
        }
    }
}

/// A color as written in configuration: a named ANSI color, an index into the
/// xterm 256-color palette, or an RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Named(NamedColor),
    Indexed(u8),
    Rgb(u8, u8, u8),
}

// Constants for 256-color palette indexing
const ANSI_NAMED_COLOR_COUNT: u8 = 16;
const COLOR_CUBE_OFFSET: u8 = 16;
const COLOR_CUBE_SIZE: u8 = 6; // 6x6x6 cube
const GRAYSCALE_OFFSET: u8 = 232;

/// RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn to_bytes(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }
}

impl From<Color> for Rgba {
    fn from(color: Color) -> Self {
        match color {
            Color::Named(named) => named.to_rgba(),
            Color::Rgb(r, g, b) => Rgba::opaque(r, g, b),
            Color::Indexed(idx) if idx < ANSI_NAMED_COLOR_COUNT => NamedColor::from_index(idx)
                .map(NamedColor::to_rgba)
                .unwrap_or_default(),
            Color::Indexed(idx) if idx < GRAYSCALE_OFFSET => {
                let cube_idx = idx - COLOR_CUBE_OFFSET;
                let level = |c: u8| if c == 0 { 0 } else { c * 40 + 55 };
                Rgba::opaque(
                    level(cube_idx / (COLOR_CUBE_SIZE * COLOR_CUBE_SIZE)),
                    level((cube_idx / COLOR_CUBE_SIZE) % COLOR_CUBE_SIZE),
                    level(cube_idx % COLOR_CUBE_SIZE),
                )
            }
            Color::Indexed(idx) => {
                let gray = (idx - GRAYSCALE_OFFSET) * 10 + 8;
                Rgba::opaque(gray, gray, gray)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn test_named_colors() {
        let rgba: Rgba = Color::Named(NamedColor::BrightYellow).into();
        assert_eq!(rgba, Rgba::opaque(255, 255, 0));
        assert_eq!(NamedColor::from_index(16), None);
    }

    #[test_log::test]
    fn test_indexed_colors() {
        assert_eq!(Rgba::from(Color::Indexed(9)), Rgba::opaque(255, 0, 0));
        // Cube corner (5,5,5) is white.
        assert_eq!(Rgba::from(Color::Indexed(231)), Rgba::opaque(255, 255, 255));
        assert_eq!(Rgba::from(Color::Indexed(16)), Rgba::opaque(0, 0, 0));
        assert_eq!(Rgba::from(Color::Indexed(232)), Rgba::opaque(8, 8, 8));
        assert_eq!(Rgba::from(Color::Indexed(255)), Rgba::opaque(238, 238, 238));
    }

    #[test_log::test]
    fn test_color_json_shape() {
        let color: Color = serde_json::from_str(r#"{"Rgb":[1,2,3]}"#).expect("valid json");
        assert_eq!(color, Color::Rgb(1, 2, 3));
        let named: Color = serde_json::from_str(r#"{"Named":"Cyan"}"#).expect("valid json");
        assert_eq!(named, Color::Named(NamedColor::Cyan));
    }
}
