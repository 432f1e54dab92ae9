//! Text ⇄ bit conversion over an 8-bit alphabet.
//!
//! Every character maps to exactly one byte, written most-significant bit
//! first. The alphabet is U+0001..=U+00FF (Latin-1 without NUL); the zero
//! byte is what digital silence decodes to, so decoders drop it instead of
//! emitting a character.

use crate::models::error::WatermarkError;

pub const BITS_PER_CHAR: usize = 8;

/// Map a character to its byte, if the codec can carry it.
pub fn encode_char(character: char) -> Option<u8> {
    match u32::from(character) {
        0x01..=0xFF => Some(character as u8),
        _ => None,
    }
}

/// Map a byte back to its character. The zero byte has no character.
pub fn decode_byte(byte: u8) -> Option<char> {
    (byte != 0).then(|| char::from(byte))
}

/// Convert `text` to bits, eight per character, MSB first.
pub fn encode_text(text: &str) -> Result<Vec<bool>, WatermarkError> {
    let mut bits = Vec::with_capacity(text.len() * BITS_PER_CHAR);
    for (position, character) in text.chars().enumerate() {
        let byte = encode_char(character).ok_or_else(|| WatermarkError::alphabet(character, position))?;
        bits.extend((0..BITS_PER_CHAR).rev().map(|shift| (byte >> shift) & 1 == 1));
    }
    Ok(bits)
}

/// Pack up to eight bits, MSB first, into a byte.
pub fn pack_byte(bits: &[bool]) -> u8 {
    bits.iter().fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit))
}

/// Convert bits back to text.
///
/// A trailing group shorter than eight bits is dropped, and groups that do
/// not decode to a character are skipped.
pub fn decode_bits(bits: &[bool]) -> String {
    bits.chunks_exact(BITS_PER_CHAR)
        .map(pack_byte)
        .filter_map(decode_byte)
        .collect()
}
