//! Shared foundations for the Zappy codecs: errors, configuration and
//! incremental UTF-8 assembly.

pub mod config;
pub mod error;
pub mod utf8;

pub use config::{CodecConfig, ContractionSource, Variant};
pub use error::{Result, ZappyError};
pub use utf8::Utf8Assembler;

#[cfg(test)]
mod tests;
