//! Compact reversible text codecs for short JSON-like payloads and URLs.
//!
//! Two wire layouts share one token model: a byte-aligned layout with
//! caller-configurable contraction tables, and a denser bit-packed layout
//! with a built-in phrase dictionary. Both are wrapped in base64url.

pub mod aligned;
pub mod codec;
pub mod defaults;
pub mod numeric;
pub mod packed;
pub mod tables;
pub mod token;
pub mod transport;

pub use codec::Codec;
pub use defaults::{default_contraction_source, default_contraction_tables};
pub use tables::{ContractionTable, ContractionTableSet};
pub use token::Token;
pub use transport::{
    decode_base64, decode_base64_to_bytes, decode_deflate, encode_base64, encode_bytes_to_base64,
    encode_deflate,
};
pub use zp_core::{CodecConfig, ContractionSource, Result, Variant, ZappyError};

use tracing::trace;

/// Layers `sources` into immutable tables; the last source defining a size
/// class replaces it.
pub fn build_contraction_tables(sources: &[ContractionSource]) -> Result<ContractionTableSet> {
    ContractionTableSet::build(sources)
}

/// Byte-aligned encode to base64url.
pub fn encode(text: &str, tables: &ContractionTableSet) -> Result<String> {
    let compressed = aligned::compress(text.as_bytes(), tables)?;
    trace!(input = text.len(), compressed = compressed.len(), "byte-aligned encode");
    Ok(encode_bytes_to_base64(&compressed))
}

pub fn decode(text: &str, tables: &ContractionTableSet) -> Result<String> {
    let decoded = aligned::expand(&decode_base64_to_bytes(text)?, tables)?;
    trace!(input = text.len(), output = decoded.len(), "byte-aligned decode");
    Ok(decoded)
}

/// Bit-packed encode to base64url.
pub fn encode_packed(text: &str) -> Result<String> {
    let compressed = packed::compress(text.as_bytes())?;
    trace!(input = text.len(), compressed = compressed.len(), "bit-packed encode");
    Ok(encode_bytes_to_base64(&compressed))
}

pub fn decode_packed(text: &str) -> Result<String> {
    let decoded = packed::expand(&decode_base64_to_bytes(text)?)?;
    trace!(input = text.len(), output = decoded.len(), "bit-packed decode");
    Ok(decoded)
}
