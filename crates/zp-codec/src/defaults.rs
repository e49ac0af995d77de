//! Built-in contractions favoring JSON messages and URLs.
//!
//! Callers are expected to layer their own tables on top; whole size classes
//! are replaced when they do.

use crate::tables::ContractionTableSet;
use std::sync::LazyLock;
use zp_core::ContractionSource;

/// Up to 16 entries, nibble addressed.
const FAST_CONTRACTIONS: [&str; 16] = [
    "null",
    "true",
    "false",
    "https://",
    "0x",
    "{\"",
    "\"}",
    "\":",
    "\":\"",
    ",\"",
    "\",\"",
    "\":[",
    "\":[\"",
    "\":[{",
    "}]",
    "]}",
];

/// Up to 256 entries.
const URL_CONTRACTIONS: [&str; 12] = [
    "localhost",
    "127.0.0.1",
    "http://",
    "ws://",
    "://",
    ".com",
    ".org",
    ".net",
    ".edu",
    ".io",
    ".dev",
    ".gg",
];

pub static DEFAULT_CONTRACTION_SOURCE: LazyLock<ContractionSource> = LazyLock::new(|| {
    ContractionSource::new()
        .with(0, FAST_CONTRACTIONS)
        .with(16, URL_CONTRACTIONS)
});

pub static DEFAULT_CONTRACTION_TABLES: LazyLock<ContractionTableSet> = LazyLock::new(|| {
    ContractionTableSet::build(std::slice::from_ref(&*DEFAULT_CONTRACTION_SOURCE))
        .expect("default contractions are valid")
});

pub fn default_contraction_source() -> &'static ContractionSource {
    &DEFAULT_CONTRACTION_SOURCE
}

pub fn default_contraction_tables() -> &'static ContractionTableSet {
    &DEFAULT_CONTRACTION_TABLES
}
