//! CP437 → UTF-8 transcoding.
//!
//! Code page 437 is the character set of the original IBM PC. Every byte is
//! a glyph: the lower half is ASCII (control codes included, so ANSI escape
//! sequences pass through untouched) and the upper half holds accented
//! letters, Greek, maths symbols, shading blocks and box-drawing pieces.
//!
//! Each byte maps independently through a fixed 256-entry table, so the
//! output never depends on neighbouring bytes. Upper-half glyphs expand to
//! 2–3 UTF-8 bytes.

use crate::error::AnsicatError;

/// Unicode code points for bytes `0x80..=0xFF`.
const UPPER_HALF: [u32; 128] = [
    // 0x80
    0x00C7, 0x00FC, 0x00E9, 0x00E2, 0x00E4, 0x00E0, 0x00E5, 0x00E7, //
    0x00EA, 0x00EB, 0x00E8, 0x00EF, 0x00EE, 0x00EC, 0x00C4, 0x00C5, //
    // 0x90
    0x00C9, 0x00E6, 0x00C6, 0x00F4, 0x00F6, 0x00F2, 0x00FB, 0x00F9, //
    0x00FF, 0x00D6, 0x00DC, 0x00A2, 0x00A3, 0x00A5, 0x20A7, 0x0192, //
    // 0xA0
    0x00E1, 0x00ED, 0x00F3, 0x00FA, 0x00F1, 0x00D1, 0x00AA, 0x00BA, //
    0x00BF, 0x2310, 0x00AC, 0x00BD, 0x00BC, 0x00A1, 0x00AB, 0x00BB, //
    // 0xB0
    0x2591, 0x2592, 0x2593, 0x2502, 0x2524, 0x2561, 0x2562, 0x2556, //
    0x2555, 0x2563, 0x2551, 0x2557, 0x255D, 0x255C, 0x255B, 0x2510, //
    // 0xC0
    0x2514, 0x2534, 0x252C, 0x251C, 0x2500, 0x253C, 0x255E, 0x255F, //
    0x255A, 0x2554, 0x2569, 0x2566, 0x2560, 0x2550, 0x256C, 0x2567, //
    // 0xD0
    0x2568, 0x2564, 0x2565, 0x2559, 0x2558, 0x2552, 0x2553, 0x256B, //
    0x256A, 0x2518, 0x250C, 0x2588, 0x2584, 0x258C, 0x2590, 0x2580, //
    // 0xE0
    0x03B1, 0x00DF, 0x0393, 0x03C0, 0x03A3, 0x03C3, 0x00B5, 0x03C4, //
    0x03A6, 0x0398, 0x03A9, 0x03B4, 0x221E, 0x03C6, 0x03B5, 0x2229, //
    // 0xF0
    0x2261, 0x00B1, 0x2265, 0x2264, 0x2320, 0x2321, 0x00F7, 0x2248, //
    0x00B0, 0x2219, 0x00B7, 0x221A, 0x207F, 0x00B2, 0x25A0, 0x00A0, //
];

/// Full byte → code point table.
pub const CP437: [u32; 256] = build_table();

const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 128 {
        table[i] = i as u32;
        table[i + 128] = UPPER_HALF[i];
        i += 1;
    }
    table
}

/// Decode a single CP437 byte.
pub fn decode_byte(byte: u8) -> Result<char, AnsicatError> {
    let code_point = CP437[byte as usize];
    char::from_u32(code_point).ok_or(AnsicatError::TranscodingFailed { byte, code_point })
}

/// Transcode a CP437 payload to UTF-8 bytes.
pub fn transcode(payload: &[u8]) -> Result<Vec<u8>, AnsicatError> {
    let mut out = String::with_capacity(payload.len());
    for &byte in payload {
        out.push(decode_byte(byte)?);
    }
    Ok(out.into_bytes())
}
