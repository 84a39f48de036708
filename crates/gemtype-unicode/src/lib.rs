// this_file: crates/gemtype-unicode/src/lib.rs

//! Codepoint decoding straight from document bytes
//!
//! Documents arrive from the network as raw bytes and are only decoded
//! while they are laid out, one codepoint at a time. Any malformed
//! sequence is a hard failure that carries its byte offset.

use gemtype_core::error::{GemtypeError, Result};

/// Decode the codepoint starting at `offset`, returning it with its byte width
///
/// Accepts exactly the well-formed sequences of Unicode Table 3-7: no
/// overlong forms, no surrogates, nothing above U+10FFFF, no truncation.
pub fn decode(bytes: &[u8], offset: usize) -> Result<(char, usize)> {
    let invalid = || GemtypeError::InvalidEncoding { offset };
    let lead = *bytes.get(offset).ok_or_else(invalid)?;

    // (width, allowed range of the first continuation byte)
    let (width, first_cont) = match lead {
        0x00..=0x7F => return Ok((char::from(lead), 1)),
        0xC2..=0xDF => (2, 0x80..=0xBF),
        0xE0 => (3, 0xA0..=0xBF),
        0xE1..=0xEC | 0xEE..=0xEF => (3, 0x80..=0xBF),
        0xED => (3, 0x80..=0x9F),
        0xF0 => (4, 0x90..=0xBF),
        0xF1..=0xF3 => (4, 0x80..=0xBF),
        0xF4 => (4, 0x80..=0x8F),
        _ => return Err(invalid()),
    };

    let tail = bytes.get(offset + 1..offset + width).ok_or_else(invalid)?;
    if !first_cont.contains(&tail[0]) {
        return Err(invalid());
    }
    if tail[1..].iter().any(|b| !(0x80..=0xBF).contains(b)) {
        return Err(invalid());
    }

    let lead_bits = u32::from(lead) & (0x7F >> width);
    let codepoint = tail
        .iter()
        .fold(lead_bits, |acc, b| (acc << 6) | (u32::from(*b) & 0x3F));
    let ch = char::from_u32(codepoint).ok_or_else(invalid)?;
    Ok((ch, width))
}

/// Decode only the codepoint at `offset`, for lookahead
pub fn decode_codepoint(bytes: &[u8], offset: usize) -> Result<char> {
    decode(bytes, offset).map(|(ch, _)| ch)
}

/// Check a whole buffer and view it as `str`
pub fn validate(bytes: &[u8]) -> Result<&str> {
    codepoints(bytes).try_for_each(|item| item.map(drop))?;
    // The walk above accepts exactly what std accepts.
    std::str::from_utf8(bytes).map_err(|e| GemtypeError::InvalidEncoding {
        offset: e.valid_up_to(),
    })
}

/// Walk a buffer codepoint by codepoint
///
/// Yields `(offset, char)` pairs and stops after the first error.
pub fn codepoints(bytes: &[u8]) -> Codepoints<'_> {
    Codepoints {
        bytes,
        offset: 0,
        failed: false,
    }
}

pub struct Codepoints<'a> {
    bytes: &'a [u8],
    offset: usize,
    failed: bool,
}

impl Iterator for Codepoints<'_> {
    type Item = Result<(usize, char)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.bytes.len() {
            return None;
        }
        let start = self.offset;
        match decode(self.bytes, start) {
            Ok((ch, width)) => {
                self.offset += width;
                Some(Ok((start, ch)))
            },
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            },
        }
    }
}


#[cfg(test)]
mod proptests;
