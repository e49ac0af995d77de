//! The closed set of instructions a compressed stream is made of.

use std::borrow::Cow;

/// One self-describing unit of a compressed stream. Both wire layouts
/// share this model; each writes the subset its grammar can express.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// A single ASCII byte taken as-is.
    Literal(u8),
    /// Raw bytes the other tokens cannot express, length-prefixed.
    Blob(Cow<'a, [u8]>),
    /// `count` copies of `byte`.
    Repeat { count: u8, byte: u8 },
    /// Decimal digits without a leading zero.
    Decimal(u32),
    /// Hex digits of one case without a leading zero.
    Hex { value: u32, uppercase: bool },
    /// A run of same-case letters read as a base-27 numeral.
    Letters { value: u32, uppercase: bool },
    /// Reference into the caller's contraction tables.
    Contraction { size_class: u8, index: u8 },
    /// Reference into the bit-packed layout's built-in phrase dictionary.
    Phrase(u8),
    /// Bit-packed streams end explicitly; trailing pad bits are ignored.
    End,
}

impl Token<'_> {
    /// Short name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Literal(_) => "literal",
            Self::Blob(_) => "blob",
            Self::Repeat { .. } => "repeat",
            Self::Decimal(_) => "decimal",
            Self::Hex { .. } => "hex",
            Self::Letters { .. } => "letters",
            Self::Contraction { .. } => "contraction",
            Self::Phrase(_) => "phrase",
            Self::End => "end",
        }
    }
}
