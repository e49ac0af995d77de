//! Configured codec: a wire layout, shared tables and a decode policy.

use crate::defaults::{default_contraction_source, DEFAULT_CONTRACTION_TABLES};
use crate::tables::ContractionTableSet;
use crate::transport::{decode_base64_to_bytes, encode_bytes_to_base64};
use crate::{aligned, packed};
use std::sync::Arc;
use tracing::{debug, trace};
use zp_core::{CodecConfig, Result, Utf8Assembler, Variant};

/// Encoder and decoder sharing one immutable `ContractionTableSet`.
/// Clones share the tables and may be used from any thread.
#[derive(Debug, Clone)]
pub struct Codec {
    variant: Variant,
    tables: Arc<ContractionTableSet>,
    throw_on_decode_errors: bool,
}

impl Default for Codec {
    fn default() -> Self {
        Self::new(Arc::new(DEFAULT_CONTRACTION_TABLES.clone()))
    }
}

impl Codec {
    /// Byte-aligned codec over `tables` that propagates decode errors.
    pub fn new(tables: Arc<ContractionTableSet>) -> Self {
        Self {
            variant: Variant::ByteAligned,
            tables,
            throw_on_decode_errors: true,
        }
    }

    pub fn from_config(config: &CodecConfig) -> Result<Self> {
        let sources = config.sources(default_contraction_source());
        let tables = ContractionTableSet::build(&sources)?;
        debug!(
            variant = ?config.variant,
            sources = sources.len(),
            size_classes = tables.size_classes().count(),
            "configured codec"
        );
        Ok(Self::new(Arc::new(tables))
            .with_variant(config.variant)
            .with_throw_on_decode_errors(config.throw_on_decode_errors))
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_throw_on_decode_errors(mut self, throw: bool) -> Self {
        self.throw_on_decode_errors = throw;
        self
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn tables(&self) -> &ContractionTableSet {
        &self.tables
    }

    pub fn throws_on_decode_errors(&self) -> bool {
        self.throw_on_decode_errors
    }

    /// Compressed bytes before transport encoding.
    pub fn compress(&self, text: &str) -> Result<Vec<u8>> {
        match self.variant {
            Variant::ByteAligned => aligned::compress(text.as_bytes(), &self.tables),
            Variant::BitPacked => packed::compress(text.as_bytes()),
        }
    }

    pub fn expand(&self, bytes: &[u8]) -> Result<String> {
        match self.variant {
            Variant::ByteAligned => aligned::expand(bytes, &self.tables),
            Variant::BitPacked => packed::expand(bytes),
        }
    }

    /// Compresses `text` and wraps it as base64url.
    pub fn encode(&self, text: &str) -> Result<String> {
        let compressed = self.compress(text)?;
        trace!(variant = ?self.variant, input = text.len(), compressed = compressed.len(), "encode");
        Ok(encode_bytes_to_base64(&compressed))
    }

    /// Reverses `encode`. Under the non-throwing policy any decode-time
    /// failure yields `Ok(None)`.
    pub fn decode(&self, text: &str) -> Result<Option<String>> {
        let decoded = decode_base64_to_bytes(text).and_then(|bytes| self.expand(&bytes));
        if let Ok(output) = &decoded {
            trace!(variant = ?self.variant, input = text.len(), output = output.len(), "decode");
        }
        self.apply_policy(decoded)
    }

    /// Plain base64url to text, under the same error policy as `decode`.
    pub fn decode_base64(&self, text: &str) -> Result<Option<String>> {
        let decoded = decode_base64_to_bytes(text).and_then(|bytes| {
            let mut assembler = Utf8Assembler::with_capacity(bytes.len());
            assembler.push(&bytes)?;
            assembler.finish()
        });
        self.apply_policy(decoded)
    }

    fn apply_policy(&self, decoded: Result<String>) -> Result<Option<String>> {
        match decoded {
            Ok(text) => Ok(Some(text)),
            Err(e) if !self.throw_on_decode_errors && e.is_decode_error() => {
                debug!(error = %e, "swallowed decode error");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
