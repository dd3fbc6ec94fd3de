// src/font/mod.rs

//! Loads hex bitmap fonts into a `GlyphTable`.
//!
//! A font file has one glyph per line, `CODE:BITMAP`, where `CODE` is the
//! codepoint in hex and `BITMAP` is 32 or 64 hex digits (see `crate::glyph`).
//! Loading is tolerant: a bad line is reported and skipped, the rest of the
//! file still loads. Only failing to open or read the source is fatal.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use thiserror::Error;

use crate::glyph::{GlyphBitmap, WIDE_BITMAP_LEN};
use crate::rasterizer::RasterError;

/// Codepoints at or beyond this bound are not stored.
pub const GLYPH_TABLE_BOUND: u32 = 0xFFFF;

/// Longest codepoint field accepted (Unifont uses 4, some planes use 6).
const MAX_CODE_DIGITS: usize = 8;

/// Fatal errors: the font source itself could not be read.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("could not open font file {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not read font data at line {line}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

/// Problems with a single font line. The line is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FontLineError {
    #[error("missing ':' separator")]
    MissingSeparator,
    #[error("codepoint field {0:?} is not a hex number")]
    InvalidCodepoint(String),
    #[error("codepoint field is {0} digits long")]
    CodepointTooLong(usize),
    #[error("bitmap field is {0} characters long")]
    BitmapTooLong(usize),
    #[error(transparent)]
    Bitmap(#[from] RasterError),
}

/// A rejected line and its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    pub line: usize,
    pub error: FontLineError,
}

/// What happened while building a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Lines stored in the table (including ones that replaced earlier entries).
    pub stored: usize,
    /// Well-formed lines whose codepoint is beyond `GLYPH_TABLE_BOUND`.
    pub out_of_range: usize,
    /// Malformed lines, in file order.
    pub rejected: Vec<RejectedLine>,
}

enum ParsedLine {
    Blank,
    Glyph(u32, Option<GlyphBitmap>),
}

/// Immutable map from codepoint to glyph bitmap.
///
/// Built once from font data and then only read, so one table can be shared
/// by reference between any number of renders.
#[derive(Debug, Clone)]
pub struct GlyphTable {
    glyphs: Vec<Option<GlyphBitmap>>,
}

impl Default for GlyphTable {
    fn default() -> Self {
        GlyphTable {
            glyphs: vec![None; GLYPH_TABLE_BOUND as usize],
        }
    }
}

impl GlyphTable {
    /// Builds a table from font lines.
    ///
    /// Each line has the form `CODE:BITMAP`, where `CODE` is 1 to 8 hex
    /// digits and `BITMAP` is 32 (narrow) or 64 (wide) hex digits. Blank lines
    /// and trailing `\r` are ignored. A line with an empty bitmap clears the
    /// entry for its codepoint.
    ///
    /// Loading never fails as a whole. Malformed lines are logged and listed
    /// in the report, and codepoints at or above `GLYPH_TABLE_BOUND` are
    /// counted and dropped. Later lines for the same codepoint replace earlier
    /// ones.
    ///
    /// # Arguments
    /// * `lines`: Font lines in file order. Line numbers in the report are
    ///   1-based positions in this sequence.
    ///
    /// # Returns
    /// * `(GlyphTable, LoadReport)`: The table and what happened to each
    ///   line that was not stored.
    pub fn load<I, S>(lines: I) -> (Self, LoadReport)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = GlyphTable::default();
        let mut report = LoadReport::default();
        for (index, line) in lines.into_iter().enumerate() {
            table.load_line(index + 1, line.as_ref(), &mut report);
        }
        debug!(
            "glyph table built: {} stored, {} out of range, {} rejected",
            report.stored,
            report.out_of_range,
            report.rejected.len()
        );
        (table, report)
    }

    /// Builds a table from any line-oriented reader.
    ///
    /// Lines are handled as in `load`. A read error stops loading and is
    /// returned with the number of the line that could not be read.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<(Self, LoadReport), FontError> {
        let mut table = GlyphTable::default();
        let mut report = LoadReport::default();
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| FontError::Read {
                line: index + 1,
                source,
            })?;
            table.load_line(index + 1, &line, &mut report);
        }
        Ok((table, report))
    }

    /// Opens and loads a `.hex` font file.
    ///
    /// # Returns
    /// * `Ok((GlyphTable, LoadReport))` once every line has been read.
    /// * `Err(FontError::Open)` if the file cannot be opened, or
    ///   `Err(FontError::Read)` if reading fails part way through.
    pub fn open(path: impl AsRef<Path>) -> Result<(Self, LoadReport), FontError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| FontError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let (table, report) = Self::from_reader(BufReader::new(file))?;
        info!(
            "loaded {} glyphs from {} ({} lines rejected)",
            table.len(),
            path.display(),
            report.rejected.len()
        );
        Ok((table, report))
    }

    /// Returns the bitmap for `codepoint`, if one was loaded.
    pub fn lookup(&self, codepoint: u32) -> Option<&GlyphBitmap> {
        self.glyphs.get(codepoint as usize)?.as_ref()
    }

    /// Number of codepoints that have a glyph.
    pub fn len(&self) -> usize {
        self.glyphs.iter().filter(|g| g.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.iter().all(Option::is_none)
    }

    fn load_line(&mut self, line_no: usize, line: &str, report: &mut LoadReport) {
        match parse_line(line) {
            Ok(ParsedLine::Blank) => {}
            Ok(ParsedLine::Glyph(codepoint, _)) if codepoint >= GLYPH_TABLE_BOUND => {
                report.out_of_range += 1;
            }
            Ok(ParsedLine::Glyph(codepoint, bitmap)) => {
                if bitmap.is_none() {
                    debug!("font line {}: U+{:04X} has an empty bitmap", line_no, codepoint);
                }
                self.glyphs[codepoint as usize] = bitmap;
                report.stored += 1;
            }
            Err(error) => {
                warn!("font line {} skipped: {}", line_no, error);
                report.rejected.push(RejectedLine {
                    line: line_no,
                    error,
                });
            }
        }
    }
}

fn parse_line(line: &str) -> Result<ParsedLine, FontLineError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(ParsedLine::Blank);
    }
    let (code, bitmap) = line
        .split_once(':')
        .ok_or(FontLineError::MissingSeparator)?;

    if code.is_empty() || !code.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(FontLineError::InvalidCodepoint(code.to_string()));
    }
    if code.len() > MAX_CODE_DIGITS {
        return Err(FontLineError::CodepointTooLong(code.len()));
    }
    let codepoint = u32::from_str_radix(code, 16)
        .map_err(|_| FontLineError::InvalidCodepoint(code.to_string()))?;

    if bitmap.len() > WIDE_BITMAP_LEN {
        return Err(FontLineError::BitmapTooLong(bitmap.len()));
    }
    if bitmap.is_empty() {
        return Ok(ParsedLine::Glyph(codepoint, None));
    }
    let bitmap = GlyphBitmap::parse(bitmap)?;
    Ok(ParsedLine::Glyph(codepoint, Some(bitmap)))
}
