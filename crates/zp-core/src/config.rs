//! Codec configuration: contraction sources and decode behavior.

use crate::error::{Result, ZappyError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Size class → contraction entries. Later sources replace whole classes of
/// earlier ones when layered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractionSource(BTreeMap<u8, Vec<String>>);

impl ContractionSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a whole size class.
    pub fn with<I, S>(mut self, size_class: u8, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(size_class, entries);
        self
    }

    pub fn insert<I, S>(&mut self, size_class: u8, entries: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.insert(size_class, entries.into_iter().map(Into::into).collect());
    }

    pub fn get(&self, size_class: u8) -> Option<&[String]> {
        self.0.get(&size_class).map(Vec::as_slice)
    }

    pub fn size_classes(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl<S: Into<String>> FromIterator<(u8, Vec<S>)> for ContractionSource {
    fn from_iter<T: IntoIterator<Item = (u8, Vec<S>)>>(iter: T) -> Self {
        let mut source = Self::new();
        for (size_class, entries) in iter {
            source.insert(size_class, entries);
        }
        source
    }
}

/// Wire layout of the compressed stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Whole-byte tokens with caller-configurable contraction tables.
    #[default]
    ByteAligned,
    /// Bit-granular tokens with a built-in phrase dictionary.
    BitPacked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    #[serde(default)]
    pub variant: Variant,
    /// When false, decode failures produce an absent result instead of an error.
    #[serde(default = "default_true")]
    pub throw_on_decode_errors: bool,
    /// Layer caller contractions over the built-in JSON/URL defaults.
    #[serde(default = "default_true")]
    pub use_default_contractions: bool,
    #[serde(default)]
    pub contractions: Vec<ContractionSource>,
}

fn default_true() -> bool {
    true
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            variant: Variant::ByteAligned,
            throw_on_decode_errors: true,
            use_default_contractions: true,
            contractions: Vec::new(),
        }
    }
}

impl CodecConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| ZappyError::Configuration(format!("invalid codec config: {e}")))
    }

    /// Sources in layering order, given the default source to put underneath.
    pub fn sources(&self, defaults: &ContractionSource) -> Vec<ContractionSource> {
        let mut sources = Vec::with_capacity(self.contractions.len() + 1);
        if self.use_default_contractions {
            sources.push(defaults.clone());
        }
        sources.extend(self.contractions.iter().cloned());
        sources
    }
}
