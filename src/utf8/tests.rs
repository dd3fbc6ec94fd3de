// src/utf8/tests.rs

use super::*;

fn decode_all(bytes: &[u8]) -> Vec<DecodedSymbol> {
    Utf8Decoder::new(bytes).collect()
}

fn codepoints(bytes: &[u8]) -> Vec<u32> {
    decode_all(bytes).iter().map(|s| s.codepoint).collect()
}

// --- Lead byte classification ---

#[test_log::test]
fn test_classify_by_leading_ones() {
    assert_eq!(classify(b'A'), LeadByte::Ascii(b'A'));
    assert_eq!(classify(0x80), LeadByte::Continuation);
    assert_eq!(classify(0xBF), LeadByte::Continuation);
    assert_eq!(
        classify(0xC3),
        LeadByte::Sequence {
            continuation: 1,
            payload: 0x03
        }
    );
    assert_eq!(
        classify(0xE2),
        LeadByte::Sequence {
            continuation: 2,
            payload: 0x02
        }
    );
    assert_eq!(
        classify(0xF4),
        LeadByte::Sequence {
            continuation: 3,
            payload: 0x04
        }
    );
    assert_eq!(
        classify(0xFB),
        LeadByte::Sequence {
            continuation: 4,
            payload: 0x03
        }
    );
    assert_eq!(
        classify(0xFD),
        LeadByte::Sequence {
            continuation: 5,
            payload: 0x01
        }
    );
    assert_eq!(classify(0xFE), LeadByte::Invalid);
    assert_eq!(classify(0xFF), LeadByte::Invalid);
}

#[test_log::test]
fn test_overlong_patterns() {
    assert!(is_overlong(0xC0, Some(0x80)));
    assert!(is_overlong(0xC1, None));
    assert!(!is_overlong(0xC2, Some(0x80)));
    assert!(is_overlong(0xE0, Some(0x9F)));
    assert!(!is_overlong(0xE0, Some(0xA0)));
    assert!(is_overlong(0xF0, Some(0x8F)));
    assert!(!is_overlong(0xF0, Some(0x90)));
    assert!(is_overlong(0xF8, Some(0x87)));
    assert!(!is_overlong(0xF8, Some(0x88)));
    assert!(is_overlong(0xFC, Some(0x83)));
    assert!(!is_overlong(0xFC, Some(0x84)));
    // Without a follower only C0/C1 can be judged.
    assert!(!is_overlong(0xE0, None));
}

// --- Well-formed input ---

#[test_log::test]
fn test_empty_input_yields_nothing() {
    assert!(decode_all(b"").is_empty());
}

#[test_log::test]
fn test_ascii_round_trip() {
    for cp in 0u8..=0x7F {
        let symbols = decode_all(&[cp]);
        assert_eq!(symbols, vec![DecodedSymbol::valid(u32::from(cp), 1)]);
    }
}

#[test_log::test]
fn test_multi_byte_sequences() {
    // "é" (2 bytes), "═" (3 bytes), "😀" (4 bytes)
    let text = "é═😀";
    let symbols = decode_all(text.as_bytes());
    assert_eq!(
        symbols,
        vec![
            DecodedSymbol::valid(0x00E9, 2),
            DecodedSymbol::valid(0x2550, 3),
            DecodedSymbol::valid(0x1F600, 4),
        ]
    );
}

#[test_log::test]
fn test_matches_std_for_valid_utf8() {
    let text = " ╔══╦══╗  ┌──┬──┐ ░▒▓█ Ünïcödé";
    let expected: Vec<u32> = text.chars().map(|c| c as u32).collect();
    assert_eq!(codepoints(text.as_bytes()), expected);
}

#[test_log::test]
fn test_legacy_five_and_six_byte_forms() {
    // U+200000 in the 5-byte form and U+4000000 in the 6-byte form.
    let five = [0xF8, 0x88, 0x80, 0x80, 0x80];
    let six = [0xFC, 0x84, 0x80, 0x80, 0x80, 0x80];
    assert_eq!(decode_all(&five), vec![DecodedSymbol::valid(0x20_0000, 5)]);
    assert_eq!(decode_all(&six), vec![DecodedSymbol::valid(0x400_0000, 6)]);
}

// --- Malformed input ---

#[test_log::test]
fn test_overlong_nul_is_rejected_one_byte_at_a_time() {
    let symbols = decode_all(b"\xC0\x80");
    assert_eq!(symbols.len(), 2);
    assert_eq!(
        symbols[0],
        DecodedSymbol::invalid(1, DecodeError::Overlong { offset: 0 })
    );
    // The continuation byte is then reported on its own.
    assert_eq!(
        symbols[1],
        DecodedSymbol::invalid(
            1,
            DecodeError::LoneContinuation {
                offset: 1,
                byte: 0x80
            }
        )
    );
}

#[test_log::test]
fn test_overlong_three_byte_form() {
    // Overlong encoding of '/' (U+002F).
    let symbols = decode_all(b"\xE0\x80\xAF");
    assert_eq!(symbols.len(), 3);
    assert!(symbols.iter().all(|s| !s.is_valid()));
    assert!(symbols.iter().all(|s| s.codepoint == REPLACEMENT_CODEPOINT));
    assert_eq!(symbols[0].error, Some(DecodeError::Overlong { offset: 0 }));
}

#[test_log::test]
fn test_stray_continuation_bytes() {
    let symbols = decode_all(b"\x80\x80\x80");
    assert_eq!(symbols.len(), 3);
    for (i, symbol) in symbols.iter().enumerate() {
        assert_eq!(
            *symbol,
            DecodedSymbol::invalid(
                1,
                DecodeError::LoneContinuation {
                    offset: i,
                    byte: 0x80
                }
            )
        );
    }
}

#[test_log::test]
fn test_invalid_lead_bytes() {
    let symbols = decode_all(b"\xFEa\xFF");
    assert_eq!(codepoints(b"\xFEa\xFF"), vec![0x3F, 0x61, 0x3F]);
    assert_eq!(
        symbols[2].error,
        Some(DecodeError::InvalidLeadByte {
            offset: 2,
            byte: 0xFF
        })
    );
}

#[test_log::test]
fn test_bad_continuation_resynchronises_on_offending_byte() {
    // A 3-byte lead, one good continuation, then 'A'.
    let symbols = decode_all(b"\xE2\x94A");
    assert_eq!(
        symbols,
        vec![
            DecodedSymbol::invalid(
                2,
                DecodeError::BadContinuation {
                    offset: 2,
                    byte: b'A'
                }
            ),
            DecodedSymbol::valid(u32::from(b'A'), 1),
        ]
    );
}

#[test_log::test]
fn test_bad_continuation_followed_by_new_sequence() {
    // "\xC3" interrupted by a complete "é".
    assert_eq!(codepoints(b"\xC3\xC3\xA9"), vec![0x3F, 0xE9]);
}

#[test_log::test]
fn test_truncated_sequence_ends_decoding() {
    let symbols = decode_all(b"\xE0");
    assert_eq!(
        symbols,
        vec![DecodedSymbol::invalid(
            1,
            DecodeError::Truncated {
                offset: 0,
                expected: 2,
                found: 0
            }
        )]
    );
}

#[test_log::test]
fn test_truncated_after_partial_continuation() {
    let mut decoder = Utf8Decoder::new(b"ab\xF0\x9F\x98");
    assert_eq!(decoder.next().map(|s| s.codepoint), Some(u32::from(b'a')));
    assert_eq!(decoder.next().map(|s| s.codepoint), Some(u32::from(b'b')));
    let truncated = decoder.next().expect("truncated symbol");
    assert_eq!(truncated.len, 3);
    assert_eq!(
        truncated.error,
        Some(DecodeError::Truncated {
            offset: 2,
            expected: 3,
            found: 2
        })
    );
    assert_eq!(decoder.next(), None);
    assert_eq!(decoder.offset(), 5);
}

#[test_log::test]
fn test_decoding_is_total_on_every_byte_pair() {
    for a in 0u8..=0xFF {
        for b in 0u8..=0xFF {
            let input = [a, b, b'x'];
            let symbols = decode_all(&input);
            let consumed: usize = symbols.iter().map(|s| s.len).sum();
            assert!(!symbols.is_empty());
            assert!(consumed <= input.len(), "{:02X} {:02X}", a, b);
            assert!(symbols.iter().all(|s| s.len >= 1));
        }
    }
}

#[test_log::test]
fn test_starting_offset() {
    let bytes = "x═y".as_bytes();
    let from_middle: Vec<u32> = Utf8Decoder::starting_at(bytes, 1)
        .map(|s| s.codepoint)
        .collect();
    assert_eq!(from_middle, vec![0x2550, u32::from(b'y')]);
    assert_eq!(Utf8Decoder::starting_at(bytes, 99).next(), None);
}

#[test_log::test]
fn test_decoding_is_deterministic() {
    let bytes = b"\xC0\x80\xE2\x95\x94\x80abc\xF0";
    assert_eq!(decode_all(bytes), decode_all(bytes));
}

#[test_log::test]
fn test_decode_at_past_end_is_none() {
    let bytes = "é".as_bytes();
    assert_eq!(decode_at(bytes, 0), Some(DecodedSymbol::valid(0xE9, 2)));
    assert_eq!(decode_at(bytes, 2), None);
    assert_eq!(decode_at(bytes, usize::MAX), None);
    assert_eq!(decode_at(b"", 0), None);
}
