//! Bit-packed token reader.

use super::phrases::{phrase, septet_to_byte};
use super::*;
use crate::numeric::{write_decimal, write_hex, write_letters};
use crate::token::Token;
use bitstream_io::{BigEndian, BitRead, BitReader};
use std::borrow::Cow;
use std::io::{self, Cursor};
use zp_core::{Result, Utf8Assembler, ZappyError};

/// Expands a bit-packed stream back into text. Bits after the end token
/// up to the next byte boundary are padding; whole bytes after it are not.
pub fn expand(stream: &[u8]) -> Result<String> {
    if stream.is_empty() {
        return Ok(String::new());
    }
    let mut reader = BitReader::endian(Cursor::new(stream), BigEndian);
    let mut assembler = Utf8Assembler::with_capacity(stream.len() * 2);
    let mut expanded = Vec::new();
    loop {
        let token = read_token(&mut reader)?;
        if token == Token::End {
            reader.byte_align();
            break;
        }
        expanded.clear();
        resolve(&token, &mut expanded)?;
        assembler.push(&expanded)?;
    }
    let cursor = reader.into_reader();
    let end = cursor.position() as usize;
    if let Some(&trailing) = stream.get(end) {
        return Err(ZappyError::UnknownToken(trailing));
    }
    assembler.finish()
}

fn stream_error(e: io::Error) -> ZappyError {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        ZappyError::TruncatedStream("bit-packed stream ended before its end token".into())
    } else {
        ZappyError::Io(e)
    }
}

fn read<R: io::Read>(reader: &mut BitReader<R, BigEndian>, bits: u32) -> Result<u32> {
    reader.read::<u32>(bits).map_err(stream_error)
}

fn read_value<R: io::Read>(reader: &mut BitReader<R, BigEndian>) -> Result<u32> {
    let width = read(reader, WIDTH_BITS)? + 1;
    read(reader, width)
}

/// Reads the next token; `Token::End` marks the end of the stream.
pub fn read_token<R: io::Read>(reader: &mut BitReader<R, BigEndian>) -> Result<Token<'static>> {
    if read(reader, 1)? == 0 {
        let septet = read(reader, 7)? as u8;
        return Ok(match septet_to_byte(septet) {
            Some(byte) => Token::Literal(byte),
            None => Token::Phrase(septet),
        });
    }
    let token = match read(reader, 2)? {
        0b00 => {
            let count = read(reader, 4)? as u8 + 1;
            let septet = read(reader, 7)? as u8;
            let byte = septet_to_byte(septet).ok_or(ZappyError::UnknownToken(septet))?;
            Token::Repeat { count, byte }
        }
        0b01 => Token::Letters { value: read_value(reader)?, uppercase: true },
        0b10 => Token::Letters { value: read_value(reader)?, uppercase: false },
        _ => match read(reader, 2)? {
            0b00 => Token::Decimal(read_value(reader)?),
            0b01 => Token::Hex { value: read_value(reader)?, uppercase: true },
            0b10 => Token::Hex { value: read_value(reader)?, uppercase: false },
            _ if read(reader, 1)? == 0 => {
                let count = read(reader, 4)? as usize + 1;
                let mut bytes = vec![0; count];
                reader.read_bytes(&mut bytes).map_err(stream_error)?;
                Token::Blob(Cow::Owned(bytes))
            }
            _ => Token::End,
        },
    };
    Ok(token)
}

/// Appends the source bytes a token stands for.
pub fn resolve(token: &Token<'_>, out: &mut Vec<u8>) -> Result<()> {
    match token {
        Token::Literal(byte) => out.push(*byte),
        Token::Phrase(septet) => {
            let bytes = phrase(*septet).ok_or(ZappyError::UnknownToken(*septet))?;
            out.extend_from_slice(bytes);
        }
        Token::Repeat { count, byte } => out.resize(out.len() + usize::from(*count), *byte),
        Token::Letters { value, uppercase } => write_letters(*value, *uppercase, out),
        Token::Decimal(value) => write_decimal(*value, out),
        Token::Hex { value, uppercase } => write_hex(*value, *uppercase, out),
        Token::Blob(bytes) => out.extend_from_slice(bytes),
        other => {
            return Err(ZappyError::InternalEncoding(format!(
                "{} token in a bit-packed stream",
                other.kind()
            )))
        }
    }
    Ok(())
}
