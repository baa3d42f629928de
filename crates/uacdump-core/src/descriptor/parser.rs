use super::error::DescriptorError;
use super::interface::AudioInterface;
use super::layout;
use super::reader::DescriptorReader;
use crate::registry::{DescriptorKind, ProtocolGeneration};

/// A framed class-specific descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassDescriptor<'a> {
    pub interface: AudioInterface,
    pub generation: ProtocolGeneration,
    /// `bLength`; bytes past it belong to the next descriptor.
    pub length: usize,
    pub descriptor_type: u8,
    pub subtype: u8,
    pub kind: DescriptorKind,
    /// Bytes after the 3-byte header, up to `bLength`.
    pub body: &'a [u8],
}

/// Map a `bDescriptorSubtype` to a descriptor kind.
///
/// # Examples
/// ```
/// use uacdump_core::descriptor::descriptor_kind;
/// use uacdump_core::{AudioInterface, DescriptorKind, ProtocolGeneration};
///
/// assert_eq!(
///     descriptor_kind(AudioInterface::Control, ProtocolGeneration::Uac2, 0x0a),
///     Some(DescriptorKind::ClockSource)
/// );
/// // Subtype 7 is a processing unit in UAC1 but an effect unit in UAC2.
/// assert_eq!(
///     descriptor_kind(AudioInterface::Control, ProtocolGeneration::Uac1, 0x07),
///     Some(DescriptorKind::ProcessingUnit)
/// );
/// ```
pub fn descriptor_kind(
    interface: AudioInterface,
    generation: ProtocolGeneration,
    subtype: u8,
) -> Option<DescriptorKind> {
    let subtypes = match (interface, generation) {
        (AudioInterface::Control, ProtocolGeneration::Uac1) => layout::UAC1_AC_SUBTYPES,
        (AudioInterface::Control, ProtocolGeneration::Uac2) => layout::UAC2_AC_SUBTYPES,
        (AudioInterface::Control, ProtocolGeneration::Uac3) => layout::UAC3_AC_SUBTYPES,
        (AudioInterface::Streaming, _) => layout::AS_SUBTYPES,
        (AudioInterface::Endpoint, _) => layout::ENDPOINT_SUBTYPES,
    };
    subtypes
        .iter()
        .find(|(code, _)| *code == subtype)
        .map(|(_, kind)| *kind)
}

/// Validate the class-specific header of `bytes` and locate its body.
///
/// # Errors
/// Returns `DescriptorError` for a short buffer, an out-of-range `bLength`,
/// the wrong `bDescriptorType`, or an unknown subtype.
///
/// # Examples
/// ```
/// use uacdump_core::{AudioInterface, DescriptorKind, ProtocolGeneration, parse_class_descriptor};
///
/// let bytes = [0x08, 0x24, 0x0a, 0x01, 0x01, 0x07, 0x00, 0x00];
/// let descriptor =
///     parse_class_descriptor(AudioInterface::Control, ProtocolGeneration::Uac2, &bytes)?;
/// assert_eq!(descriptor.kind, DescriptorKind::ClockSource);
/// assert_eq!(descriptor.body, &bytes[3..]);
/// # Ok::<(), uacdump_core::DescriptorError>(())
/// ```
pub fn parse_class_descriptor<'a>(
    interface: AudioInterface,
    generation: ProtocolGeneration,
    bytes: &'a [u8],
) -> Result<ClassDescriptor<'a>, DescriptorError> {
    let reader = DescriptorReader::new(bytes);
    reader.require_len(layout::HEADER_LEN)?;
    let length = reader.read_length()?;

    let descriptor_type = reader.read_u8(layout::TYPE_OFFSET)?;
    let expected = interface.descriptor_type();
    if descriptor_type != expected {
        return Err(DescriptorError::UnexpectedType {
            interface,
            expected,
            found: descriptor_type,
        });
    }

    let subtype = reader.read_u8(layout::SUBTYPE_OFFSET)?;
    let kind = descriptor_kind(interface, generation, subtype).ok_or(
        DescriptorError::UnknownSubtype {
            interface,
            generation,
            subtype,
        },
    )?;
    let body = reader.read_slice(layout::HEADER_LEN..length)?;
    log::debug!(
        "{generation} {interface} descriptor: subtype 0x{subtype:02x} ({kind}), {length} bytes"
    );

    Ok(ClassDescriptor {
        interface,
        generation,
        length,
        descriptor_type,
        subtype,
        kind,
        body,
    })
}

/// Iterator over concatenated descriptors, see [`split_descriptors`].
#[derive(Debug, Clone)]
pub struct Descriptors<'a> {
    rest: &'a [u8],
    offset: usize,
    failed: bool,
}

impl Descriptors<'_> {
    /// Offset of the next descriptor, or of the one that failed to frame.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl<'a> Iterator for Descriptors<'a> {
    /// Byte offset of the descriptor and its `bLength` bytes.
    type Item = Result<(usize, &'a [u8]), DescriptorError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.rest.is_empty() {
            return None;
        }
        match DescriptorReader::new(self.rest).read_length() {
            Ok(length) => {
                let (descriptor, rest) = self.rest.split_at(length);
                let offset = self.offset;
                self.rest = rest;
                self.offset += length;
                Some(Ok((offset, descriptor)))
            }
            Err(err) => {
                log::debug!("descriptor at offset {}: {}", self.offset, err);
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

/// Walk `bytes` as a sequence of descriptors by `bLength`.
///
/// A malformed or truncated descriptor yields one error and ends the walk,
/// since the next `bLength` can no longer be located.
///
/// # Examples
/// ```
/// use uacdump_core::split_descriptors;
///
/// let bytes = [0x03, 0x24, 0x01, 0x04, 0x24, 0x02, 0x00];
/// let parts: Vec<_> = split_descriptors(&bytes).collect::<Result<_, _>>()?;
/// assert_eq!(parts, vec![(0, &bytes[..3]), (3, &bytes[3..])]);
/// # Ok::<(), uacdump_core::DescriptorError>(())
/// ```
pub fn split_descriptors(bytes: &[u8]) -> Descriptors<'_> {
    Descriptors {
        rest: bytes,
        offset: 0,
        failed: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_uac1_feature_unit_header() {
        let bytes = [0x0a, 0x24, 0x06, 0x02, 0x01, 0x02, 0x03, 0x00, 0x00, 0x00, 0xff];
        let descriptor =
            parse_class_descriptor(AudioInterface::Control, ProtocolGeneration::Uac1, &bytes)
                .unwrap();
        assert_eq!(descriptor.kind, DescriptorKind::FeatureUnit);
        assert_eq!(descriptor.length, 10);
        // Trailing byte past bLength is not part of the body.
        assert_eq!(descriptor.body.len(), 7);
    }

    #[test]
    fn endpoint_requires_cs_endpoint() {
        let bytes = [0x07, 0x24, 0x01, 0x00, 0x00, 0x00, 0x00];
        let err =
            parse_class_descriptor(AudioInterface::Endpoint, ProtocolGeneration::Uac1, &bytes)
                .unwrap_err();
        assert_eq!(
            err,
            DescriptorError::UnexpectedType {
                interface: AudioInterface::Endpoint,
                expected: 0x25,
                found: 0x24,
            }
        );
    }

    #[test]
    fn unknown_subtype_is_reported() {
        let bytes = [0x03, 0x24, 0x0a];
        let err =
            parse_class_descriptor(AudioInterface::Control, ProtocolGeneration::Uac1, &bytes)
                .unwrap_err();
        assert!(matches!(err, DescriptorError::UnknownSubtype { subtype: 0x0a, .. }));
        assert!(err.to_string().contains("UAC1 control"));
    }

    #[test]
    fn header_only_descriptor_has_empty_body() {
        let bytes = [0x03, 0x24, 0x01];
        let descriptor =
            parse_class_descriptor(AudioInterface::Streaming, ProtocolGeneration::Uac2, &bytes)
                .unwrap();
        assert!(descriptor.body.is_empty());
        assert_eq!(descriptor.kind, DescriptorKind::AsInterface);
    }

    #[test]
    fn too_short_for_header() {
        let err = parse_class_descriptor(AudioInterface::Control, ProtocolGeneration::Uac2, &[2])
            .unwrap_err();
        assert_eq!(err, DescriptorError::TooShort { needed: 3, actual: 1 });
    }

    #[test]
    fn uac3_subtypes_shift_after_output_terminal() {
        let kind = descriptor_kind(AudioInterface::Control, ProtocolGeneration::Uac3, 0x04);
        assert_eq!(kind, None);
        let kind = descriptor_kind(AudioInterface::Control, ProtocolGeneration::Uac3, 0x08);
        assert_eq!(kind, Some(DescriptorKind::EffectUnit));
    }

    #[test]
    fn split_stops_on_truncated_tail() {
        let bytes = [0x03, 0x24, 0x01, 0x05, 0x24, 0x02];
        let mut parts = split_descriptors(&bytes);
        assert_eq!(parts.next(), Some(Ok((0, &bytes[..3]))));
        assert!(matches!(
            parts.next(),
            Some(Err(DescriptorError::InvalidLength { length: 5, .. }))
        ));
        assert_eq!(parts.next(), None);
    }

    #[test]
    fn split_rejects_zero_length() {
        let mut parts = split_descriptors(&[0x00, 0x24, 0x01]);
        assert!(matches!(parts.next(), Some(Err(_))));
        assert_eq!(parts.next(), None);
        assert_eq!(split_descriptors(&[]).count(), 0);
    }
}
