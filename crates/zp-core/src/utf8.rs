//! Incremental UTF-8 assembly across token boundaries.

use crate::error::{Result, ZappyError};

/// Longest prefix of a multi-byte character that can be left waiting.
const MAX_PENDING: usize = 3;

/// Collects decoded bytes into text, carrying an incomplete trailing
/// character over to the next push.
#[derive(Debug, Default)]
pub struct Utf8Assembler {
    text: String,
    pending: [u8; MAX_PENDING],
    pending_len: usize,
    consumed: usize,
}

impl Utf8Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Appends bytes. Complete characters go to the text; a split character
    /// stays pending until the rest of it arrives.
    pub fn push(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.is_empty() {
            return Ok(());
        }
        if self.pending_len == 0 {
            return self.push_joined(bytes);
        }
        let mut joined = Vec::with_capacity(self.pending_len + bytes.len());
        joined.extend_from_slice(&self.pending[..self.pending_len]);
        joined.extend_from_slice(bytes);
        self.consumed -= self.pending_len;
        self.pending_len = 0;
        self.push_joined(&joined)
    }

    fn push_joined(&mut self, bytes: &[u8]) -> Result<()> {
        match std::str::from_utf8(bytes) {
            Ok(s) => {
                self.text.push_str(s);
                self.consumed += bytes.len();
                Ok(())
            }
            Err(e) => {
                let valid = e.valid_up_to();
                let offset = self.consumed + valid;
                if e.error_len().is_some() {
                    return Err(ZappyError::InvalidUtf8 { offset });
                }
                let (head, tail) = bytes.split_at(valid);
                let head = std::str::from_utf8(head).map_err(|_| ZappyError::InvalidUtf8 { offset })?;
                self.text.push_str(head);
                self.pending[..tail.len()].copy_from_slice(tail);
                self.pending_len = tail.len();
                self.consumed += bytes.len();
                Ok(())
            }
        }
    }

    /// Number of bytes waiting for the rest of their character.
    pub fn pending(&self) -> usize {
        self.pending_len
    }

    /// Text completed so far.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Finishes assembly. A character still incomplete at this point is an error.
    pub fn finish(self) -> Result<String> {
        if self.pending_len > 0 {
            return Err(ZappyError::InvalidUtf8 {
                offset: self.consumed - self.pending_len,
            });
        }
        Ok(self.text)
    }
}
