//! Greedy byte-aligned tokenizer.

use super::*;
use crate::numeric::{
    byte_width, is_digit, is_hex_letter, is_upper_hex, parse_decimal, parse_hex, MAX_DECIMAL_DIGITS,
    MAX_HEX_DIGITS,
};
use crate::tables::{ContractionTableSet, FAST_SIZE_CLASS, MAX_SIZE_CLASS};
use crate::token::Token;
use byteorder::{LittleEndian, WriteBytesExt};
use std::borrow::Cow;
use std::io::Write;
use zp_core::{Result, ZappyError};

/// Tokenizes `source` left to right, committing the first token kind that
/// applies at each position.
pub fn compress(source: &[u8], tables: &ContractionTableSet) -> Result<Vec<u8>> {
    let mut compressed = Vec::with_capacity(source.len());
    let mut index = 0;
    while index < source.len() {
        let (token, used) = next_token(&source[index..], tables)?;
        write_token(&mut compressed, &token)?;
        index += used;
    }
    Ok(compressed)
}

/// Picks the token for the start of `rest` and how many bytes it covers.
pub fn next_token<'a>(rest: &'a [u8], tables: &ContractionTableSet) -> Result<(Token<'a>, usize)> {
    let Some(&byte) = rest.first() else {
        return Err(ZappyError::InternalEncoding("no input left to tokenize".into()));
    };
    if let Some((size_class, index, len)) = tables.find(rest) {
        return Ok((Token::Contraction { size_class, index }, len));
    }
    if let Some(step) = repeat_token(rest) {
        return Ok(step);
    }
    if let Some(step) = integer_token(rest) {
        return Ok(step);
    }
    if byte < LITERAL_LIMIT {
        return Ok((Token::Literal(byte), 1));
    }
    blob_token(rest)
        .ok_or_else(|| ZappyError::InternalEncoding(format!("no token for byte 0x{byte:02x}")))
}

fn repeat_token(rest: &[u8]) -> Option<(Token<'_>, usize)> {
    let byte = *rest.first()?;
    let count = rest.iter().take(MAX_RUN).take_while(|b| **b == byte).count();
    // MAX_RUN fits the 5-bit count.
    (count >= MIN_REPEAT).then_some((Token::Repeat { count: count as u8, byte }, count))
}

fn blob_token(rest: &[u8]) -> Option<(Token<'_>, usize)> {
    let count = rest.iter().take(MAX_RUN).take_while(|b| **b >= LITERAL_LIMIT).count();
    (count > 0).then(|| (Token::Blob(Cow::Borrowed(&rest[..count])), count))
}

/// Decimal run that may turn into a hex run when a hex letter shows up.
/// Zero never starts a run: the integer would lose it.
fn integer_token(rest: &[u8]) -> Option<(Token<'_>, usize)> {
    let first = *rest.first()?;
    if !(matches!(first, b'1'..=b'9') || is_hex_letter(first)) {
        return None;
    }
    let mut hex = is_hex_letter(first);
    let mut uppercase = is_upper_hex(first);
    let mut count = 1;
    for &byte in &rest[1..] {
        let cap = if hex { MAX_HEX_DIGITS } else { MAX_DECIMAL_DIGITS };
        if count >= cap {
            break;
        }
        if is_digit(byte) {
            count += 1;
            continue;
        }
        if !is_hex_letter(byte) {
            break;
        }
        if hex {
            if is_upper_hex(byte) != uppercase {
                break;
            }
        } else {
            if count >= MAX_HEX_DIGITS {
                break;
            }
            hex = true;
            uppercase = is_upper_hex(byte);
        }
        count += 1;
    }
    let run = &rest[..count];
    if hex {
        let (value, used) = parse_hex(run);
        (value >= MIN_HEX).then_some((Token::Hex { value, uppercase }, used))
    } else {
        let (value, used) = parse_decimal(run);
        (value >= MIN_DECIMAL).then_some((Token::Decimal(value), used))
    }
}

fn write_value(out: &mut Vec<u8>, value: u32, width: u8) -> std::io::Result<()> {
    // Width was chosen to hold the value.
    match width {
        1 => out.write_u8(value as u8),
        2 => out.write_u16::<LittleEndian>(value as u16),
        _ => out.write_u32::<LittleEndian>(value),
    }
}

/// Appends the byte-aligned form of `token`.
pub fn write_token(out: &mut Vec<u8>, token: &Token<'_>) -> Result<()> {
    match token {
        Token::Literal(byte) if *byte < LITERAL_LIMIT => out.write_u8(*byte)?,
        Token::Blob(bytes) if (1..=MAX_RUN).contains(&bytes.len()) => {
            out.write_u8(BLOB | bytes.len() as u8)?;
            out.write_all(bytes)?;
        }
        Token::Repeat { count, byte } if (MIN_REPEAT..=MAX_RUN).contains(&usize::from(*count)) => {
            out.write_u8(REPEAT | count)?;
            out.write_u8(*byte)?;
        }
        Token::Decimal(value) => {
            let width = byte_width(*value);
            out.write_u8(DECIMAL | width)?;
            write_value(out, *value, width)?;
        }
        Token::Hex { value, uppercase } => {
            let width = if *value > 0xffff { 4 } else { 2 };
            let kind = if *uppercase { HEX_UPPER } else { HEX_LOWER };
            out.write_u8(kind | width)?;
            write_value(out, *value, width)?;
        }
        Token::Contraction { size_class: FAST_SIZE_CLASS, index } if *index < 16 => {
            out.write_u8(FAST_CONTRACTION | index)?;
        }
        Token::Contraction { size_class, index } if (1..=MAX_SIZE_CLASS).contains(size_class) => {
            out.write_u8(EXTENDED_CONTRACTION | (size_class - 1))?;
            out.write_u8(*index)?;
        }
        other => {
            return Err(ZappyError::InternalEncoding(format!(
                "{} token has no byte-aligned form: {other:?}",
                other.kind()
            )))
        }
    }
    Ok(())
}
