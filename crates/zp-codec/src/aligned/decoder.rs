//! Byte-aligned token reader.

use super::*;
use crate::numeric::{write_decimal, write_hex};
use crate::tables::{ContractionTableSet, FAST_SIZE_CLASS};
use crate::token::Token;
use byteorder::{LittleEndian, ReadBytesExt};
use std::borrow::Cow;
use std::io::Cursor;
use zp_core::{Result, Utf8Assembler, ZappyError};

/// Expands a byte-aligned stream back into text.
pub fn expand(stream: &[u8], tables: &ContractionTableSet) -> Result<String> {
    let mut cursor = Cursor::new(stream);
    let mut assembler = Utf8Assembler::with_capacity(stream.len() * 2);
    let mut expanded = Vec::new();
    while (cursor.position() as usize) < stream.len() {
        let token = read_token(&mut cursor)?;
        expanded.clear();
        resolve(&token, tables, &mut expanded)?;
        assembler.push(&expanded)?;
    }
    assembler.finish()
}

fn truncated(what: &'static str) -> impl Fn(std::io::Error) -> ZappyError {
    move |e| ZappyError::TruncatedStream(format!("{what}: {e}"))
}

fn take<'a>(cursor: &mut Cursor<&'a [u8]>, count: usize) -> Result<&'a [u8]> {
    let data: &'a [u8] = *cursor.get_ref();
    let start = cursor.position() as usize;
    let bytes = data.get(start..start + count).ok_or_else(|| {
        ZappyError::TruncatedStream(format!("blob of {count} bytes with {} left", data.len().saturating_sub(start)))
    })?;
    cursor.set_position((start + count) as u64);
    Ok(bytes)
}

fn read_value(cursor: &mut Cursor<&[u8]>, width: u8, token: u8) -> Result<u32> {
    let value = match width {
        1 => cursor.read_u8().map(u32::from),
        2 => cursor.read_u16::<LittleEndian>().map(u32::from),
        4 => cursor.read_u32::<LittleEndian>(),
        _ => return Err(ZappyError::UnknownToken(token)),
    };
    value.map_err(truncated("integer value"))
}

/// Reads the next token, borrowing blob bytes from the stream.
pub fn read_token<'a>(cursor: &mut Cursor<&'a [u8]>) -> Result<Token<'a>> {
    let byte = cursor.read_u8().map_err(truncated("token"))?;
    if byte < LITERAL_LIMIT {
        return Ok(Token::Literal(byte));
    }
    let token = match byte & KIND_MASK {
        BLOB => {
            let count = byte & COUNT_MASK;
            if count == 0 {
                return Err(ZappyError::UnknownToken(byte));
            }
            Token::Blob(Cow::Borrowed(take(cursor, usize::from(count))?))
        }
        REPEAT => {
            let count = byte & COUNT_MASK;
            if count == 0 {
                return Err(ZappyError::UnknownToken(byte));
            }
            let value = cursor.read_u8().map_err(truncated("repeat value"))?;
            Token::Repeat { count, byte: value }
        }
        NUMBER if byte & HEX_FLAG == 0 => Token::Decimal(read_value(cursor, byte & 0x0f, byte)?),
        NUMBER => {
            let width = byte & 0x07;
            if !matches!(width, 2 | 4) {
                return Err(ZappyError::UnknownToken(byte));
            }
            Token::Hex {
                value: read_value(cursor, width, byte)?,
                uppercase: byte & HEX_LOWER_FLAG == 0,
            }
        }
        CONTRACTION if byte & EXTENDED_FLAG == 0 => Token::Contraction {
            size_class: FAST_SIZE_CLASS,
            index: byte & 0x0f,
        },
        _ => Token::Contraction {
            size_class: (byte & 0x0f) + 1,
            index: cursor.read_u8().map_err(truncated("contraction index"))?,
        },
    };
    Ok(token)
}

/// Appends the source bytes a token stands for.
pub fn resolve(token: &Token<'_>, tables: &ContractionTableSet, out: &mut Vec<u8>) -> Result<()> {
    match token {
        Token::Literal(byte) => out.push(*byte),
        Token::Blob(bytes) => out.extend_from_slice(bytes),
        Token::Repeat { count, byte } => out.resize(out.len() + usize::from(*count), *byte),
        Token::Decimal(value) => write_decimal(*value, out),
        Token::Hex { value, uppercase } => write_hex(*value, *uppercase, out),
        Token::Contraction { size_class, index } => {
            out.extend_from_slice(tables.lookup(*size_class, *index)?);
        }
        other => {
            return Err(ZappyError::InternalEncoding(format!(
                "{} token in a byte-aligned stream",
                other.kind()
            )))
        }
    }
    Ok(())
}
