//! Bit-packed layout, most significant bit first, padded to a byte.
//!
//! ```text
//! 0      septet                      literal 32..=126 or phrase 95..=127
//! 100    count-1:4 septet            repeat, 2..=16 printable bytes
//! 101    width-1:5 value             uppercase base-27 letters
//! 110    width-1:5 value             lowercase base-27 letters
//! 11100  width-1:5 value             decimal
//! 11101  width-1:5 value             uppercase hex
//! 11110  width-1:5 value             lowercase hex
//! 111110 count-1:4 bytes             blob, 1..=16 unprintable bytes
//! 111111                             end of stream
//! ```
//!
//! Contraction tables do not apply here; a fixed phrase dictionary takes
//! their place.

pub mod decoder;
pub mod encoder;
pub mod phrases;

pub use decoder::expand;
pub use encoder::compress;

pub(crate) const REPEAT: u32 = 0b100;
pub(crate) const LETTERS_UPPER: u32 = 0b101;
pub(crate) const LETTERS_LOWER: u32 = 0b110;
pub(crate) const DECIMAL: u32 = 0b11100;
pub(crate) const HEX_UPPER: u32 = 0b11101;
pub(crate) const HEX_LOWER: u32 = 0b11110;
pub(crate) const BLOB: u32 = 0b111110;
pub(crate) const END: u32 = 0b111111;

/// Longest blob or repeat run a single token carries.
pub const MAX_RUN: usize = 16;
pub const MIN_REPEAT: usize = 2;
pub const MIN_LETTERS: usize = 3;
pub const MIN_DIGITS: usize = 2;

/// Bits of the width field in front of every numeric value.
pub(crate) const WIDTH_BITS: u32 = 5;
