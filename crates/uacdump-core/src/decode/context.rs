use super::error::DecodeError;
use super::reader::FieldReader;

/// Per-call decode state: cursor, decoded scalars and indent depth.
///
/// Created for one buffer and dropped when the call returns.
pub struct DecodeContext<'a> {
    reader: FieldReader<'a>,
    values: Vec<(&'static str, u64)>,
    depth: usize,
}

impl<'a> DecodeContext<'a> {
    pub fn new(buffer: &'a [u8], depth: usize) -> Self {
        Self {
            reader: FieldReader::new(buffer),
            values: Vec::new(),
            depth,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn position(&self) -> usize {
        self.reader.position()
    }

    pub fn remaining(&self) -> usize {
        self.reader.remaining()
    }

    pub fn require_len(&self, field: &'static str, needed: usize) -> Result<(), DecodeError> {
        self.reader.require_len(field, needed)
    }

    pub fn read_le(&mut self, field: &'static str, width: usize) -> Result<u64, DecodeError> {
        self.reader.read_le(field, width)
    }

    pub fn record(&mut self, name: &'static str, value: u64) {
        self.values.push((name, value));
    }

    /// Most recent value recorded under `name`.
    pub fn value(&self, name: &str) -> Option<u64> {
        self.values
            .iter()
            .rev()
            .find(|(recorded, _)| *recorded == name)
            .map(|(_, value)| *value)
    }
}
