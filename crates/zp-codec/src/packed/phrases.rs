//! Built-in phrase dictionary sharing the septet space with printable ASCII.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Septets below this stand for a printable byte, the rest for a phrase.
pub const FIRST_PHRASE_SEPTET: u8 = 95;
pub const MIN_PRINTABLE: u8 = 32;
pub const MAX_PRINTABLE: u8 = 126;
pub const MAX_PHRASE_LEN: usize = 8;

const MIN_PHRASE_LEN: usize = 2;

/// Septet `95 + i` stands for `PHRASES[i]`.
pub const PHRASES: [&str; 33] = [
    "null", "true", "false", "0x", "\"\"", "\":", "\":\"", "\":{\"", "\":[", "\":[\"", "\":[{\"",
    "},\"", "],\"", "}],\"", "]},\"", "\"},\"", "\"],\"", "\"}],\"", "\"]},\"", ",\"", "\",\"",
    "{\"", "]}", "\"}", "\"]}", "https://", "ws://", "://", ".com", ".org", ".net", ".io", ".gg",
];

static PHRASE_INDEX: LazyLock<HashMap<u32, u8>> = LazyLock::new(|| {
    PHRASES
        .iter()
        .enumerate()
        .map(|(i, phrase)| (fnv1a(phrase.as_bytes()), FIRST_PHRASE_SEPTET + i as u8))
        .collect()
});

/// 32-bit FNV-1a.
pub fn fnv1a(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(0x811c_9dc5, |hash, &byte| (hash ^ u32::from(byte)).wrapping_mul(0x0100_0193))
}

pub fn is_printable(byte: u8) -> bool {
    (MIN_PRINTABLE..=MAX_PRINTABLE).contains(&byte)
}

/// Septet for a printable byte.
pub fn byte_to_septet(byte: u8) -> Option<u8> {
    is_printable(byte).then(|| byte - MIN_PRINTABLE)
}

/// Printable byte for a septet below the phrase range.
pub fn septet_to_byte(septet: u8) -> Option<u8> {
    (septet < FIRST_PHRASE_SEPTET).then(|| septet + MIN_PRINTABLE)
}

pub fn phrase(septet: u8) -> Option<&'static [u8]> {
    let index = usize::from(septet.checked_sub(FIRST_PHRASE_SEPTET)?);
    PHRASES.get(index).map(|p| p.as_bytes())
}

/// Longest phrase prefixing `source`: returns its septet and length.
pub fn find_phrase(source: &[u8]) -> Option<(u8, usize)> {
    let longest = source.len().min(MAX_PHRASE_LEN);
    (MIN_PHRASE_LEN..=longest).rev().find_map(|len| {
        let candidate = &source[..len];
        let septet = *PHRASE_INDEX.get(&fnv1a(candidate))?;
        (phrase(septet)? == candidate).then_some((septet, len))
    })
}
