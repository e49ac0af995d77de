//! Text-safe transport: base64url without padding, and a raw-deflate path
//! kept for size comparisons.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use std::io::{Read, Write};
use zp_core::{Result, ZappyError};

pub fn encode_bytes_to_base64(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn decode_base64_to_bytes(text: &str) -> Result<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(text)
        .map_err(|e| ZappyError::InvalidBase64(e.to_string()))
}

fn into_text(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| ZappyError::InvalidUtf8 {
        offset: e.utf8_error().valid_up_to(),
    })
}

/// Base64url of the UTF-8 bytes, no token compression.
pub fn encode_base64(text: &str) -> String {
    encode_bytes_to_base64(text.as_bytes())
}

pub fn decode_base64(text: &str) -> Result<String> {
    into_text(decode_base64_to_bytes(text)?)
}

pub fn deflate(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(bytes)?;
    Ok(encoder.finish()?)
}

pub fn inflate(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut inflated = Vec::new();
    DeflateDecoder::new(bytes)
        .read_to_end(&mut inflated)
        .map_err(|e| ZappyError::Deflate(e.to_string()))?;
    Ok(inflated)
}

/// Raw deflate, then base64url.
pub fn encode_deflate(text: &str) -> Result<String> {
    Ok(encode_bytes_to_base64(&deflate(text.as_bytes())?))
}

pub fn decode_deflate(text: &str) -> Result<String> {
    into_text(inflate(&decode_base64_to_bytes(text)?)?)
}
