use super::error::DescriptorError;
use super::layout;

pub struct DescriptorReader<'a> {
    bytes: &'a [u8],
}

impl<'a> DescriptorReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn require_len(&self, needed: usize) -> Result<(), DescriptorError> {
        if self.bytes.len() < needed {
            return Err(DescriptorError::TooShort {
                needed,
                actual: self.bytes.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, DescriptorError> {
        self.bytes
            .get(offset)
            .copied()
            .ok_or(DescriptorError::TooShort {
                needed: offset + 1,
                actual: self.bytes.len(),
            })
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], DescriptorError> {
        self.bytes
            .get(range.clone())
            .ok_or(DescriptorError::TooShort {
                needed: range.end,
                actual: self.bytes.len(),
            })
    }

    /// `bLength`, checked against the header size and the bytes available.
    pub fn read_length(&self) -> Result<usize, DescriptorError> {
        let length = self.read_u8(layout::LENGTH_OFFSET)?;
        let value = usize::from(length);
        if value < layout::HEADER_LEN || value > self.bytes.len() {
            return Err(DescriptorError::InvalidLength {
                length,
                minimum: layout::HEADER_LEN,
                available: self.bytes.len(),
            });
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::DescriptorReader;
    use crate::descriptor::DescriptorError;

    #[test]
    fn read_length_bounds() {
        assert_eq!(DescriptorReader::new(&[3, 0x24, 1]).read_length(), Ok(3));
        assert!(matches!(
            DescriptorReader::new(&[2, 0x24, 1]).read_length(),
            Err(DescriptorError::InvalidLength { length: 2, .. })
        ));
        assert!(matches!(
            DescriptorReader::new(&[9, 0x24, 1]).read_length(),
            Err(DescriptorError::InvalidLength { available: 3, .. })
        ));
        assert_eq!(
            DescriptorReader::new(&[]).read_length(),
            Err(DescriptorError::TooShort { needed: 1, actual: 0 })
        );
    }

    #[test]
    fn read_slice_out_of_range() {
        let reader = DescriptorReader::new(&[1, 2]);
        assert_eq!(reader.read_slice(0..2).unwrap(), &[1, 2]);
        assert!(reader.read_slice(1..4).is_err());
        assert_eq!(reader.len(), 2);
    }
}
