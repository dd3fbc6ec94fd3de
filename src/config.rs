// src/config.rs

//! Configuration for the `hexglyph` demo binary.
//!
//! The structs below are deserialized from a JSON file whose path is taken
//! from the `HEXGLYPH_CONFIG` environment variable. Every section carries
//! `#[serde(default)]`, so a file only needs to mention the settings it
//! changes. Without the variable the defaults are used: a 640x480 surface,
//! bright yellow text and `unifont.hex` in the working directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

use crate::color::{Color, NamedColor};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "HEXGLYPH_CONFIG";

/// Represents the complete configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub font: FontConfig,
    pub surface: SurfaceConfig,
    pub text: TextConfig,
    pub echo: EchoConfig,
    pub output: OutputConfig,
}

/// Where the glyphs come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Path to a `.hex` font file.
    pub path: PathBuf,
}

impl Default for FontConfig {
    fn default() -> Self {
        FontConfig {
            path: PathBuf::from("unifont.hex"),
        }
    }
}

/// The drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub width: usize,
    pub height: usize,
    pub background: Color,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        SurfaceConfig {
            width: 640,
            height: 480,
            background: Color::Named(NamedColor::Black),
        }
    }
}

/// Placement and color of rendered text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    pub foreground: Color,
    pub origin_x: i32,
    pub origin_y: i32,
    /// Distance between consecutive lines in pixels.
    pub line_height: i32,
    /// Horizontal cursor advance per decoded character.
    pub advance: i32,
}

impl Default for TextConfig {
    fn default() -> Self {
        TextConfig {
            foreground: Color::Rgb(0xff, 0xff, 0x00),
            origin_x: 0,
            origin_y: 10,
            line_height: 16,
            advance: 8,
        }
    }
}

/// Echoing of characters read from standard input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EchoConfig {
    pub enabled: bool,
    pub start_x: i32,
    pub row_y: i32,
}

impl Default for EchoConfig {
    fn default() -> Self {
        EchoConfig {
            enabled: false,
            start_x: 5,
            row_y: 200,
        }
    }
}

/// What to do with the finished surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// If set, the surface is written here as a binary PPM image.
    pub ppm_path: Option<PathBuf>,
    /// Print a text preview of the rendered rows to stdout.
    pub text_preview: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            ppm_path: None,
            text_preview: true,
        }
    }
}

impl Config {
    /// Reads a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Loads the file named by `HEXGLYPH_CONFIG`, or the defaults if unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                info!("Loading configuration from {:?}", path);
                Self::load(path)
            }
            None => {
                info!("{} not set, using default configuration.", CONFIG_ENV_VAR);
                Ok(Self::default())
            }
        }
    }
}
