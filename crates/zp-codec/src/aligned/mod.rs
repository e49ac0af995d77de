//! Byte-aligned layout. The high bits of each token's first byte select the
//! instruction:
//!
//! | bits       | token                                                 |
//! |------------|-------------------------------------------------------|
//! | `0xxxxxxx` | ASCII literal                                         |
//! | `100nnnnn` | blob of `n` (1..=31) raw bytes                        |
//! | `101nnnnn` | `n` (3..=31) repeats of the next byte                 |
//! | `1100wwww` | decimal, `w` (1, 2, 4) little-endian bytes follow     |
//! | `1101cwww` | hex, `c` set for lowercase, `w` (2, 4) bytes follow   |
//! | `1110iiii` | fast contraction, index `i` into size class 0         |
//! | `1111ssss` | contraction in size class `s + 1`, index byte follows |

pub mod decoder;
pub mod encoder;

pub use decoder::expand;
pub use encoder::compress;

pub(crate) const LITERAL_LIMIT: u8 = 0x80;
pub(crate) const KIND_MASK: u8 = 0b1110_0000;
pub(crate) const COUNT_MASK: u8 = 0b0001_1111;
pub(crate) const BLOB: u8 = 0b1000_0000;
pub(crate) const REPEAT: u8 = 0b1010_0000;
pub(crate) const NUMBER: u8 = 0b1100_0000;
pub(crate) const CONTRACTION: u8 = 0b1110_0000;
pub(crate) const DECIMAL: u8 = 0b1100_0000;
pub(crate) const HEX_UPPER: u8 = 0b1101_0000;
pub(crate) const HEX_LOWER: u8 = 0b1101_1000;
pub(crate) const HEX_FLAG: u8 = 0b0001_0000;
pub(crate) const HEX_LOWER_FLAG: u8 = 0b0000_1000;
pub(crate) const EXTENDED_FLAG: u8 = 0b0001_0000;
pub(crate) const FAST_CONTRACTION: u8 = 0b1110_0000;
pub(crate) const EXTENDED_CONTRACTION: u8 = 0b1111_0000;

/// Longest blob or repeat run a single token carries.
pub const MAX_RUN: usize = 31;
/// Shorter repeats cost more as a token than as literals.
pub const MIN_REPEAT: usize = 3;
/// Decimal values below this are no shorter as a token.
pub const MIN_DECIMAL: u32 = 100;
/// Hex values below this are no shorter as a token.
pub const MIN_HEX: u32 = 0x1000;
