//! Digit runs ↔ fixed-width unsigned integers.
//!
//! Three numeral systems share the same 32-bit ceiling: decimal, hexadecimal
//! (case is a property of the whole run) and a base-27 letter system where
//! `A..Z` / `a..z` are the digits 1..=26. Values never carry a zero leading
//! digit, so formatting a parsed value reproduces the source run exactly.

use std::io::Write;

/// Most characters a decimal run can contribute to one token.
pub const MAX_DECIMAL_DIGITS: usize = 10;
/// Most characters a hex run can contribute to one token.
pub const MAX_HEX_DIGITS: usize = 8;
/// Most letters a base-27 run can contribute to one token.
pub const MAX_LETTER_DIGITS: usize = 7;

const LETTER_BASE: u64 = 27;

pub fn is_digit(byte: u8) -> bool {
    byte.is_ascii_digit()
}

pub fn is_upper_hex(byte: u8) -> bool {
    matches!(byte, b'A'..=b'F')
}

pub fn is_lower_hex(byte: u8) -> bool {
    matches!(byte, b'a'..=b'f')
}

pub fn is_hex_letter(byte: u8) -> bool {
    is_upper_hex(byte) || is_lower_hex(byte)
}

pub fn is_letter(byte: u8) -> bool {
    byte.is_ascii_alphabetic()
}

/// Uppercase in the ASCII sense: bit 5 clear. Only meaningful for letters.
pub fn is_upper(byte: u8) -> bool {
    byte & 0b0010_0000 == 0
}

/// Bits needed to represent `value`; zero needs one.
pub fn bit_width(value: u32) -> u32 {
    (u32::BITS - value.leading_zeros()).max(1)
}

/// Smallest of 1, 2 or 4 bytes that holds `value`.
pub fn byte_width(value: u32) -> u8 {
    if value > 0xffff {
        4
    } else if value > 0xff {
        2
    } else {
        1
    }
}

fn accumulate(run: &[u8], base: u64, digit: impl Fn(u8) -> u64) -> (u32, usize) {
    let mut value: u64 = 0;
    let mut used = 0;
    for &byte in run {
        let next = value * base + digit(byte);
        if next > u64::from(u32::MAX) {
            break;
        }
        value = next;
        used += 1;
    }
    // Bounded by u32::MAX above.
    (value as u32, used)
}

/// Parses leading decimal digits, stopping before the value would overflow.
/// Returns the value and how many digits it consumed.
pub fn parse_decimal(run: &[u8]) -> (u32, usize) {
    accumulate(run, 10, |b| u64::from(b - b'0'))
}

/// Parses leading hex digits of either case, stopping before overflow.
pub fn parse_hex(run: &[u8]) -> (u32, usize) {
    accumulate(run, 16, |b| match b {
        b'0'..=b'9' => u64::from(b - b'0'),
        b'A'..=b'F' => u64::from(b - b'A' + 10),
        _ => u64::from(b - b'a' + 10),
    })
}

/// Parses leading base-27 letters, stopping before overflow.
pub fn parse_letters(run: &[u8]) -> (u32, usize) {
    accumulate(run, LETTER_BASE, |b| u64::from((b | 0b0010_0000) - b'a' + 1))
}

pub fn write_decimal(value: u32, out: &mut Vec<u8>) {
    // Writing into a Vec cannot fail.
    let _ = write!(out, "{value}");
}

pub fn write_hex(value: u32, uppercase: bool, out: &mut Vec<u8>) {
    let _ = if uppercase {
        write!(out, "{value:X}")
    } else {
        write!(out, "{value:x}")
    };
}

/// Formats `value` in base 27 over `0A..Z` (or `0a..z`).
pub fn write_letters(value: u32, uppercase: bool, out: &mut Vec<u8>) {
    let first = if uppercase { b'A' } else { b'a' };
    let start = out.len();
    let mut rest = u64::from(value);
    loop {
        let digit = (rest % LETTER_BASE) as u8;
        out.push(if digit == 0 { b'0' } else { first + digit - 1 });
        rest /= LETTER_BASE;
        if rest == 0 {
            break;
        }
    }
    out[start..].reverse();
}
