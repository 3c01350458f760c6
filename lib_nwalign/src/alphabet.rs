//! Four-bit nucleotide codes.
//!
//! Each canonical base owns one bit (`A = 1`, `C = 2`, `G = 4`, `T = U = 8`)
//! and the IUPAC ambiguity symbols are the unions of the bases they stand for.
//! Bytes that are not nucleotide symbols map to zero.

use crate::error::{Error, Result};

pub const A: u8 = 0b0001;
pub const C: u8 = 0b0010;
pub const G: u8 = 0b0100;
pub const T: u8 = 0b1000;

/// Number of distinct four-bit codes.
pub const CODE_COUNT: usize = 16;

const NUCLEOTIDE_CODES: [u8; 256] = build_nucleotide_codes();

const fn build_nucleotide_codes() -> [u8; 256] {
    let symbols: [(u8, u8); 16] = [
        (b'A', A),
        (b'C', C),
        (b'G', G),
        (b'T', T),
        (b'U', T),
        (b'R', A | G),
        (b'Y', C | T),
        (b'S', C | G),
        (b'W', A | T),
        (b'K', G | T),
        (b'M', A | C),
        (b'B', C | G | T),
        (b'D', A | G | T),
        (b'H', A | C | T),
        (b'V', A | C | G),
        (b'N', A | C | G | T),
    ];

    let mut codes = [0; 256];
    let mut index = 0;
    while index < symbols.len() {
        let (symbol, code) = symbols[index];
        codes[symbol as usize] = code;
        codes[symbol.to_ascii_lowercase() as usize] = code;
        index += 1;
    }
    codes
}

/// Returns the four-bit code of an ASCII nucleotide symbol, or zero if the byte is not one.
#[inline]
pub fn nucleotide_code(symbol: u8) -> u8 {
    NUCLEOTIDE_CODES[usize::from(symbol)]
}

/// A code is ambiguous unless it names exactly one base.
pub fn is_ambiguous(code: u8) -> bool {
    code.count_ones() != 1
}

/// Two symbols match if they may stand for a common base.
///
/// This is independent of the score the scoring matrix assigns to the pair.
#[inline]
pub fn symbols_match(a: u8, b: u8) -> bool {
    nucleotide_code(a) & nucleotide_code(b) != 0
}

/// Checks that every byte of the sequence is a nucleotide symbol.
pub fn validate_sequence(sequence: &[u8]) -> Result<()> {
    match sequence
        .iter()
        .position(|&symbol| nucleotide_code(symbol) == 0)
    {
        Some(position) => Err(Error::UnknownNucleotide {
            character: char::from(sequence[position]),
            position,
        }),
        None => Ok(()),
    }
}
