//! Contraction tables: caller-supplied substrings addressed by (size class, index).

use std::collections::BTreeMap;
use tracing::debug;
use zp_core::{ContractionSource, Result, ZappyError};

/// Size class whose entries are addressed by a nibble inside the token byte.
pub const FAST_SIZE_CLASS: u8 = 0;
/// Highest size class the extended token can name.
pub const MAX_SIZE_CLASS: u8 = 16;

const MAX_FAST_ENTRIES: usize = 16;
const MAX_EXTENDED_ENTRIES: usize = 256;

/// Entries of one size class, longest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractionTable {
    size_class: u8,
    entries: Vec<Vec<u8>>,
}

impl ContractionTable {
    /// Builds a table, rejecting entries that would not shrink once replaced
    /// by their token.
    pub fn new(size_class: u8, entries: &[String]) -> Result<Self> {
        if size_class > MAX_SIZE_CLASS {
            return Err(ZappyError::Configuration(format!("invalid size class: {size_class}")));
        }
        let capacity = if size_class == FAST_SIZE_CLASS { MAX_FAST_ENTRIES } else { MAX_EXTENDED_ENTRIES };
        if entries.len() > capacity {
            return Err(ZappyError::Configuration(format!(
                "too many contractions in table-{size_class}: {} (max {capacity})",
                entries.len()
            )));
        }
        let token_len = Self::token_len(size_class);
        let mut sorted: Vec<&String> = entries.iter().collect();
        // Stable: equal lengths keep caller order.
        sorted.sort_by(|a, b| b.len().cmp(&a.len()));
        let mut table = Vec::with_capacity(sorted.len());
        for entry in sorted {
            if entry.len() <= token_len {
                return Err(ZappyError::Configuration(format!(
                    "contraction is smaller than encoding: (table-{size_class})[{token_len}-byte] {entry:?}"
                )));
            }
            table.push(entry.as_bytes().to_vec());
        }
        Ok(Self { size_class, entries: table })
    }

    /// Bytes a reference to this class occupies in the stream.
    pub fn token_len(size_class: u8) -> usize {
        if size_class == FAST_SIZE_CLASS { 1 } else { 2 }
    }

    pub fn size_class(&self) -> u8 {
        self.size_class
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: u8) -> Option<&[u8]> {
        self.entries.get(usize::from(index)).map(Vec::as_slice)
    }

    /// First (and therefore longest) entry that prefixes `source`.
    pub fn find(&self, source: &[u8]) -> Option<(u8, usize)> {
        self.entries
            .iter()
            .position(|entry| source.starts_with(entry))
            // Capacity checks keep indices within a byte.
            .map(|index| (index as u8, self.entries[index].len()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.entries.iter().map(Vec::as_slice)
    }
}

/// Immutable set of tables shared by encoder and decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractionTableSet {
    tables: BTreeMap<u8, ContractionTable>,
}

impl ContractionTableSet {
    /// Layers `sources` in order: for each size class the last source that
    /// defines it supplies the whole table.
    pub fn build(sources: &[ContractionSource]) -> Result<Self> {
        for source in sources {
            if let Some(size_class) = source.size_classes().find(|c| *c > MAX_SIZE_CLASS) {
                return Err(ZappyError::Configuration(format!("invalid size class: {size_class}")));
            }
        }
        let mut tables = BTreeMap::new();
        for size_class in FAST_SIZE_CLASS..=MAX_SIZE_CLASS {
            let Some(entries) = sources.iter().rev().find_map(|s| s.get(size_class)) else {
                continue;
            };
            let table = ContractionTable::new(size_class, entries)?;
            debug!(size_class, entries = table.len(), "built contraction table");
            tables.insert(size_class, table);
        }
        Ok(Self { tables })
    }

    pub fn get(&self, size_class: u8) -> Option<&ContractionTable> {
        self.tables.get(&size_class)
    }

    /// Entry bytes for a reference, if present.
    pub fn lookup(&self, size_class: u8, index: u8) -> Result<&[u8]> {
        self.get(size_class)
            .and_then(|table| table.get(index))
            .ok_or(ZappyError::InvalidContraction { size_class, index })
    }

    /// Match at the start of `source`, trying size classes from the highest
    /// down; within a class the longest entry wins.
    /// Returns (size class, index, matched length).
    pub fn find(&self, source: &[u8]) -> Option<(u8, u8, usize)> {
        self.tables
            .values()
            .rev()
            .find_map(|table| table.find(source).map(|(index, len)| (table.size_class, index, len)))
    }

    pub fn size_classes(&self) -> impl Iterator<Item = u8> + '_ {
        self.tables.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
