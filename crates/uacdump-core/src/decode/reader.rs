use super::error::DecodeError;

/// Forward-only little-endian reader over a borrowed buffer.
pub struct FieldReader<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> FieldReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    pub fn require_len(&self, field: &'static str, needed: usize) -> Result<(), DecodeError> {
        if self.remaining() < needed {
            return Err(DecodeError::BufferUnderrun {
                field,
                needed,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }

    /// Read `width` bytes (1..=8) as an unsigned little-endian value.
    pub fn read_le(&mut self, field: &'static str, width: usize) -> Result<u64, DecodeError> {
        let bytes = self.read_slice(field, width)?;
        Ok(bytes
            .iter()
            .rev()
            .fold(0u64, |value, &byte| (value << 8) | u64::from(byte)))
    }

    pub fn read_slice(&mut self, field: &'static str, len: usize) -> Result<&'a [u8], DecodeError> {
        self.require_len(field, len)?;
        let end = self.position + len;
        let bytes = self
            .buffer
            .get(self.position..end)
            .ok_or(DecodeError::BufferUnderrun {
                field,
                needed: len,
                remaining: self.remaining(),
            })?;
        self.position = end;
        Ok(bytes)
    }
}
