//! Greedy bit-packed tokenizer.

use super::phrases::{find_phrase, is_printable};
use super::*;
use crate::numeric::{
    bit_width, is_digit, is_hex_letter, is_letter, is_upper, parse_decimal, parse_hex, parse_letters,
    MAX_DECIMAL_DIGITS, MAX_HEX_DIGITS, MAX_LETTER_DIGITS,
};
use crate::token::Token;
use bitstream_io::{BigEndian, BitWrite, BitWriter};
use std::borrow::Cow;
use std::io;
use zp_core::{Result, ZappyError};

/// Tokenizes `source` and terminates the stream. Empty input stays empty.
pub fn compress(source: &[u8]) -> Result<Vec<u8>> {
    let mut compressed = Vec::with_capacity(source.len());
    if source.is_empty() {
        return Ok(compressed);
    }
    let mut writer = BitWriter::endian(&mut compressed, BigEndian);
    let mut index = 0;
    while index < source.len() {
        let (token, used) = next_token(&source[index..])?;
        write_token(&mut writer, &token)?;
        index += used;
    }
    write_token(&mut writer, &Token::End)?;
    writer.byte_align()?;
    drop(writer);
    Ok(compressed)
}

/// Picks the token for the start of `rest` and how many bytes it covers.
pub fn next_token(rest: &[u8]) -> Result<(Token<'_>, usize)> {
    let Some(&byte) = rest.first() else {
        return Err(ZappyError::InternalEncoding("no input left to tokenize".into()));
    };
    let unprintable = rest.iter().take(MAX_RUN).take_while(|b| !is_printable(**b)).count();
    if unprintable > 0 {
        return Ok((Token::Blob(Cow::Borrowed(&rest[..unprintable])), unprintable));
    }
    if let Some((septet, len)) = find_phrase(rest) {
        return Ok((Token::Phrase(septet), len));
    }
    let repeats = rest.iter().take(MAX_RUN).take_while(|b| **b == byte).count();
    if repeats >= MIN_REPEAT {
        // MAX_RUN fits the 4-bit count.
        return Ok((Token::Repeat { count: repeats as u8, byte }, repeats));
    }
    if let Some(step) = numeric_token(rest) {
        return Ok(step);
    }
    Ok((Token::Literal(byte), 1))
}

/// How far a run of digits and letters has got. Digits then hex letters
/// stay hex; hex letters followed by other letters become base-27.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Run {
    Decimal,
    DecimalHex,
    Hex,
    HexLetters,
    Letters,
}

impl Run {
    fn cap(self) -> usize {
        match self {
            Run::Decimal => MAX_DECIMAL_DIGITS,
            Run::DecimalHex | Run::Hex => MAX_HEX_DIGITS,
            Run::HexLetters | Run::Letters => MAX_LETTER_DIGITS,
        }
    }
}

fn scan_run(rest: &[u8]) -> Option<(Run, bool, usize)> {
    let mut run: Option<Run> = None;
    let mut uppercase = false;
    let mut count = 0;
    for &byte in rest {
        let class = if is_digit(byte) {
            Run::Decimal
        } else if is_hex_letter(byte) {
            Run::Hex
        } else if is_letter(byte) {
            Run::Letters
        } else {
            break;
        };
        let current = match run {
            Some(current) => current,
            None if byte == b'0' => break,
            None => {
                uppercase = is_upper(byte);
                class
            }
        };
        let next = match class {
            Run::Decimal => match current {
                Run::HexLetters | Run::Letters => break,
                Run::Hex => Run::DecimalHex,
                other => other,
            },
            Run::Hex if current == Run::Decimal => {
                uppercase = is_upper(byte);
                Run::DecimalHex
            }
            Run::Hex if is_upper(byte) != uppercase => break,
            Run::Hex => current,
            _ => {
                if matches!(current, Run::Decimal | Run::DecimalHex) || is_upper(byte) != uppercase {
                    break;
                }
                if current == Run::Hex {
                    Run::HexLetters
                } else {
                    current
                }
            }
        };
        run = Some(next);
        count += 1;
        if count >= next.cap() {
            break;
        }
    }
    run.map(|run| (run, uppercase, count))
}

/// Bits a numeric token with a `value` payload costs after a `prefix`-bit tag.
fn numeric_bits(prefix: u32, value: u32) -> usize {
    (prefix + WIDTH_BITS + bit_width(value)) as usize
}

fn numeric_token(rest: &[u8]) -> Option<(Token<'_>, usize)> {
    let (run, uppercase, count) = scan_run(rest)?;
    if count < MIN_DIGITS {
        return None;
    }
    let digits = &rest[..count];
    let (token, used, bits) = match run {
        Run::Decimal => {
            let (value, used) = parse_decimal(digits);
            (Token::Decimal(value), used, numeric_bits(5, value))
        }
        Run::DecimalHex | Run::Hex => {
            let (value, used) = parse_hex(&digits[..count.min(MAX_HEX_DIGITS)]);
            (Token::Hex { value, uppercase }, used, numeric_bits(5, value))
        }
        Run::HexLetters | Run::Letters => {
            if count < MIN_LETTERS {
                return None;
            }
            let (value, used) = parse_letters(digits);
            (Token::Letters { value, uppercase }, used, numeric_bits(3, value))
        }
    };
    // Each literal costs a full byte.
    (bits < used * 8).then_some((token, used))
}

fn write_value<W: io::Write>(writer: &mut BitWriter<W, BigEndian>, value: u32) -> io::Result<()> {
    let width = bit_width(value);
    writer.write(WIDTH_BITS, width - 1)?;
    writer.write(width, value)
}

fn write_septet<W: io::Write>(writer: &mut BitWriter<W, BigEndian>, septet: u8) -> io::Result<()> {
    writer.write(7, u32::from(septet))
}

/// Appends the bit-packed form of `token`.
pub fn write_token<W: io::Write>(writer: &mut BitWriter<W, BigEndian>, token: &Token<'_>) -> Result<()> {
    match token {
        Token::Literal(byte) if is_printable(*byte) => {
            writer.write_bit(false)?;
            write_septet(writer, *byte - phrases::MIN_PRINTABLE)?;
        }
        Token::Phrase(septet) if phrases::phrase(*septet).is_some() => {
            writer.write_bit(false)?;
            write_septet(writer, *septet)?;
        }
        Token::Repeat { count, byte }
            if (MIN_REPEAT..=MAX_RUN).contains(&usize::from(*count)) && is_printable(*byte) =>
        {
            writer.write(3, REPEAT)?;
            writer.write(4, u32::from(count - 1))?;
            write_septet(writer, *byte - phrases::MIN_PRINTABLE)?;
        }
        Token::Letters { value, uppercase } => {
            writer.write(3, if *uppercase { LETTERS_UPPER } else { LETTERS_LOWER })?;
            write_value(writer, *value)?;
        }
        Token::Decimal(value) => {
            writer.write(5, DECIMAL)?;
            write_value(writer, *value)?;
        }
        Token::Hex { value, uppercase } => {
            writer.write(5, if *uppercase { HEX_UPPER } else { HEX_LOWER })?;
            write_value(writer, *value)?;
        }
        Token::Blob(bytes) if (1..=MAX_RUN).contains(&bytes.len()) => {
            writer.write(6, BLOB)?;
            writer.write(4, bytes.len() as u32 - 1)?;
            writer.write_bytes(bytes)?;
        }
        Token::End => writer.write(6, END)?,
        other => {
            return Err(ZappyError::InternalEncoding(format!(
                "{} token has no bit-packed form: {other:?}",
                other.kind()
            )))
        }
    }
    Ok(())
}
