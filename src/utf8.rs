// src/utf8.rs

//! Streaming UTF-8 decoder.
//!
//! Converts a byte buffer into a sequence of `DecodedSymbol`s, one per
//! decoding step. Malformed input never stops decoding: every error yields the
//! replacement codepoint `?` (U+003F) and the decoder resynchronises on the
//! next byte that could start a new sequence.
//!
//! The legacy 5- and 6-byte forms (lead bytes `F8..=FD`) are accepted, so a
//! decoded codepoint may exceed U+10FFFF. Such codepoints simply have no glyph.

use thiserror::Error;

/// Codepoint substituted for anything that cannot be decoded.
pub const REPLACEMENT_CODEPOINT: u32 = 0x003F;

// --- Bit patterns for lead-byte classification ---
const CONTINUATION_TAG: u8 = 0b10;
const CONTINUATION_PAYLOAD_MASK: u8 = 0x3F;
const CONTINUATION_PAYLOAD_BITS: u32 = 6;

/// Why a decoding step produced the replacement codepoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("overlong UTF-8 sequence at byte 0x{offset:02X}")]
    Overlong { offset: usize },
    #[error("lone continuation byte 0x{byte:02X} at byte 0x{offset:02X}")]
    LoneContinuation { offset: usize, byte: u8 },
    #[error("byte 0x{byte:02X} at 0x{offset:02X} is not a valid lead byte")]
    InvalidLeadByte { offset: usize, byte: u8 },
    #[error("byte 0x{byte:02X} at 0x{offset:02X} is not a valid continuation byte")]
    BadContinuation { offset: usize, byte: u8 },
    #[error("end of input reached at 0x{offset:02X}: expected {expected} continuation byte(s), found {found}")]
    Truncated {
        offset: usize,
        expected: usize,
        found: usize,
    },
}

/// The result of a single decoding step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedSymbol {
    /// The decoded codepoint, or `REPLACEMENT_CODEPOINT` on error.
    pub codepoint: u32,
    /// Number of input bytes this step consumed. Always at least 1.
    pub len: usize,
    /// Set when the step failed to decode a well-formed sequence.
    pub error: Option<DecodeError>,
}

impl DecodedSymbol {
    fn valid(codepoint: u32, len: usize) -> Self {
        DecodedSymbol {
            codepoint,
            len,
            error: None,
        }
    }

    fn invalid(len: usize, error: DecodeError) -> Self {
        DecodedSymbol {
            codepoint: REPLACEMENT_CODEPOINT,
            len,
            error: Some(error),
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// Classification of a byte found where a sequence is expected to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadByte {
    /// `0xxxxxxx`: a complete single-byte codepoint.
    Ascii(u8),
    /// A multi-byte lead. `payload` holds the codepoint bits carried by the
    /// lead byte itself.
    Sequence { continuation: usize, payload: u32 },
    /// `10xxxxxx`: a continuation byte with nothing to continue.
    Continuation,
    /// `FE` / `FF`: never valid in any UTF-8 form.
    Invalid,
}

/// Classifies a lead byte by the number of leading one bits.
pub fn classify(byte: u8) -> LeadByte {
    match byte.leading_ones() {
        0 => LeadByte::Ascii(byte),
        1 => LeadByte::Continuation,
        ones @ 2..=6 => {
            let payload_bits = 7 - ones;
            LeadByte::Sequence {
                continuation: ones as usize - 1,
                payload: u32::from(byte & ((1u8 << payload_bits) - 1)),
            }
        }
        _ => LeadByte::Invalid,
    }
}

/// Returns true when `lead` (and, for 3- to 6-byte forms, the byte that
/// follows it) can only begin an overlong encoding.
///
/// `C0`/`C1` are overlong regardless of what follows. For longer forms the
/// lead byte carries no payload bits, so the sequence is overlong when the
/// first continuation byte also leaves the high payload bits clear.
pub fn is_overlong(lead: u8, next: Option<u8>) -> bool {
    if lead >> 1 == 0x60 {
        return true;
    }
    let Some(next) = next else {
        return false;
    };
    match lead {
        0xE0 => next >> 5 == 0b100,
        0xF0 => next >> 4 == 0b1000,
        0xF8 => next >> 3 == 0b1_0000,
        0xFC => next >> 2 == 0b10_0000,
        _ => false,
    }
}

#[inline]
fn is_continuation(byte: u8) -> bool {
    byte >> 6 == CONTINUATION_TAG
}

/// Decodes the single symbol starting at `offset`.
///
/// Returns `None` when `offset` is at or past the end of `bytes`.
pub fn decode_at(bytes: &[u8], offset: usize) -> Option<DecodedSymbol> {
    let lead = *bytes.get(offset)?;
    Some(decode_sequence(bytes, offset, lead))
}

fn decode_sequence(bytes: &[u8], offset: usize, lead: u8) -> DecodedSymbol {
    let (continuation, payload) = match classify(lead) {
        LeadByte::Ascii(b) => return DecodedSymbol::valid(u32::from(b), 1),
        LeadByte::Continuation => {
            return DecodedSymbol::invalid(1, DecodeError::LoneContinuation { offset, byte: lead })
        }
        LeadByte::Invalid => {
            return DecodedSymbol::invalid(1, DecodeError::InvalidLeadByte { offset, byte: lead })
        }
        LeadByte::Sequence {
            continuation,
            payload,
        } => (continuation, payload),
    };

    if is_overlong(lead, bytes.get(offset + 1).copied()) {
        return DecodedSymbol::invalid(1, DecodeError::Overlong { offset });
    }

    let mut codepoint = payload;
    for k in 1..=continuation {
        let Some(&byte) = bytes.get(offset + k) else {
            return DecodedSymbol::invalid(
                k,
                DecodeError::Truncated {
                    offset,
                    expected: continuation,
                    found: k - 1,
                },
            );
        };
        if !is_continuation(byte) {
            // The offending byte is left for the next step.
            return DecodedSymbol::invalid(
                k,
                DecodeError::BadContinuation {
                    offset: offset + k,
                    byte,
                },
            );
        }
        codepoint = (codepoint << CONTINUATION_PAYLOAD_BITS)
            | u32::from(byte & CONTINUATION_PAYLOAD_MASK);
    }

    DecodedSymbol::valid(codepoint, 1 + continuation)
}

/// Lazy decoder over a borrowed byte buffer.
///
/// Iteration stops at the end of the buffer, or immediately after a symbol
/// that was cut short by the end of the buffer.
#[derive(Debug, Clone)]
pub struct Utf8Decoder<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Utf8Decoder<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::starting_at(bytes, 0)
    }

    pub fn starting_at(bytes: &'a [u8], offset: usize) -> Self {
        Utf8Decoder {
            bytes,
            offset: offset.min(bytes.len()),
        }
    }

    /// Offset of the next byte to be decoded.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl Iterator for Utf8Decoder<'_> {
    type Item = DecodedSymbol;

    fn next(&mut self) -> Option<DecodedSymbol> {
        let symbol = decode_at(self.bytes, self.offset)?;
        self.offset = match symbol.error {
            Some(DecodeError::Truncated { .. }) => self.bytes.len(),
            _ => self.offset + symbol.len,
        };
        Some(symbol)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bytes.len() - self.offset;
        (remaining.min(1), Some(remaining))
    }
}

#[cfg(test)]
mod tests;
