//! Protocol-generation dispatch.
//!
//! Selects the schema for a (kind, generation) pair, decodes, and renders.
//! A pair without a schema is reported as [`UnsupportedCombination`], which
//! callers display as a note rather than a failure.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{DecodeError, decode_at_depth};
use crate::descriptor::{
    AudioInterface, DescriptorError, parse_class_descriptor, split_descriptors,
};
use crate::registry::{DescriptorKind, ProtocolGeneration, SchemaRegistry};
use crate::render::Renderer;
use crate::schema::{FieldSchema, SchemaError};
use crate::DecodedRecord;

/// No schema exists for this kind in this generation.
///
/// # Examples
/// ```
/// use uacdump_core::{DescriptorKind, ProtocolGeneration, UnsupportedCombination};
///
/// let err = UnsupportedCombination {
///     kind: DescriptorKind::EffectUnit,
///     generation: ProtocolGeneration::Uac3,
/// };
/// assert_eq!(err.to_string(), "UAC3 Effect Unit: not yet supported");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{generation} {kind}: not yet supported")]
pub struct UnsupportedCombination {
    pub kind: DescriptorKind,
    pub generation: ProtocolGeneration,
}

/// Errors returned by dispatch entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DumpError {
    #[error(transparent)]
    Unsupported(#[from] UnsupportedCombination),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
}

impl DumpError {
    /// Whether this is the displayable "not yet supported" outcome.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, DumpError::Unsupported(_))
    }
}

/// Decoded framed descriptor: header fields plus the body record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRecord {
    pub interface: AudioInterface,
    pub generation: ProtocolGeneration,
    pub kind: DescriptorKind,
    /// `bLength`.
    pub length: usize,
    /// `bDescriptorType`.
    pub descriptor_type: u8,
    /// `bDescriptorSubtype`.
    pub subtype: u8,
    pub record: DecodedRecord,
}

/// Registry lookup, decoding and rendering bundled with output settings.
///
/// # Examples
/// ```
/// use uacdump_core::{AudioInterface, Dumper, ProtocolGeneration};
///
/// let dumper = Dumper::builtin()?;
/// let bytes = [0x07, 0x25, 0x01, 0x01, 0x02, 0x10, 0x00];
/// let text = dumper.render_class(AudioInterface::Endpoint, ProtocolGeneration::Uac1, &bytes)?;
/// assert!(text.starts_with("UAC1 AudioStreaming Endpoint Descriptor:\n"));
/// assert!(text.contains("Decoded PCM samples"));
/// # Ok::<(), uacdump_core::DumpError>(())
/// ```
#[derive(Clone, Copy)]
pub struct Dumper<'r> {
    registry: &'r SchemaRegistry,
    renderer: Renderer<'r>,
    depth: usize,
}

impl Dumper<'static> {
    /// Dumper over the built-in registry with default resolvers.
    ///
    /// # Errors
    /// Returns `SchemaError` if a built-in layout is malformed.
    pub fn builtin() -> Result<Self, SchemaError> {
        Ok(Self::new(SchemaRegistry::builtin()?, Renderer::default()))
    }
}

impl<'r> Dumper<'r> {
    pub fn new(registry: &'r SchemaRegistry, renderer: Renderer<'r>) -> Self {
        Self {
            registry,
            renderer,
            depth: 0,
        }
    }

    pub fn with_renderer(self, renderer: Renderer<'r>) -> Self {
        Self { renderer, ..self }
    }

    /// Base indent depth for rendered output.
    pub fn with_depth(self, depth: usize) -> Self {
        Self { depth, ..self }
    }

    pub fn schema(
        &self,
        kind: DescriptorKind,
        generation: ProtocolGeneration,
    ) -> Result<&'r FieldSchema, UnsupportedCombination> {
        self.registry
            .lookup(kind, generation)
            .ok_or(UnsupportedCombination { kind, generation })
    }

    /// Decode a descriptor body (header already stripped).
    ///
    /// # Errors
    /// `DumpError::Unsupported` when no schema exists for the pair, otherwise
    /// the decode failure.
    pub fn decode(
        &self,
        kind: DescriptorKind,
        generation: ProtocolGeneration,
        buffer: &[u8],
    ) -> Result<DecodedRecord, DumpError> {
        let schema = self.lookup(kind, generation)?;
        Ok(decode_at_depth(schema, buffer, self.depth)?)
    }

    pub fn render(
        &self,
        kind: DescriptorKind,
        generation: ProtocolGeneration,
        buffer: &[u8],
    ) -> Result<String, DumpError> {
        let record = self.decode(kind, generation, buffer)?;
        Ok(self.renderer.render(&record))
    }

    /// Frame a complete class-specific descriptor and decode its body.
    pub fn decode_class(
        &self,
        interface: AudioInterface,
        generation: ProtocolGeneration,
        bytes: &[u8],
    ) -> Result<ClassRecord, DumpError> {
        let descriptor = parse_class_descriptor(interface, generation, bytes)?;
        let schema = self.lookup(descriptor.kind, generation)?;
        let record = decode_at_depth(schema, descriptor.body, self.depth + 1)?;
        Ok(ClassRecord {
            interface,
            generation,
            kind: descriptor.kind,
            length: descriptor.length,
            descriptor_type: descriptor.descriptor_type,
            subtype: descriptor.subtype,
            record,
        })
    }

    /// Frame, decode and render a complete class-specific descriptor.
    pub fn render_class(
        &self,
        interface: AudioInterface,
        generation: ProtocolGeneration,
        bytes: &[u8],
    ) -> Result<String, DumpError> {
        let descriptor = parse_class_descriptor(interface, generation, bytes)?;
        let schema = self.lookup(descriptor.kind, generation)?;
        let record = decode_at_depth(schema, descriptor.body, self.depth + 1)?;
        Ok(self.renderer.render_class(&descriptor, &record))
    }

    /// Decode every descriptor in a concatenated blob.
    ///
    /// Each entry carries the descriptor's byte offset. A descriptor that
    /// fails does not stop its siblings; a framing error ends the walk.
    pub fn decode_all(
        &self,
        interface: AudioInterface,
        generation: ProtocolGeneration,
        bytes: &[u8],
    ) -> Vec<(usize, Result<ClassRecord, DumpError>)> {
        self.each(bytes, |descriptor| {
            self.decode_class(interface, generation, descriptor)
        })
    }

    /// Render every descriptor in a concatenated blob, see [`Dumper::decode_all`].
    pub fn render_all(
        &self,
        interface: AudioInterface,
        generation: ProtocolGeneration,
        bytes: &[u8],
    ) -> Vec<(usize, Result<String, DumpError>)> {
        self.each(bytes, |descriptor| {
            self.render_class(interface, generation, descriptor)
        })
    }

    fn each<T>(
        &self,
        bytes: &[u8],
        mut visit: impl FnMut(&[u8]) -> Result<T, DumpError>,
    ) -> Vec<(usize, Result<T, DumpError>)> {
        let mut entries = Vec::new();
        let mut descriptors = split_descriptors(bytes);
        loop {
            let offset = descriptors.offset();
            match descriptors.next() {
                Some(Ok((offset, descriptor))) => entries.push((offset, visit(descriptor))),
                Some(Err(err)) => entries.push((offset, Err(err.into()))),
                None => break,
            }
        }
        entries
    }

    fn lookup(
        &self,
        kind: DescriptorKind,
        generation: ProtocolGeneration,
    ) -> Result<&'r FieldSchema, UnsupportedCombination> {
        let schema = self.schema(kind, generation);
        match schema {
            Ok(schema) => log::debug!("{generation} {kind}: using schema {}", schema.name()),
            Err(err) => log::debug!("{err}"),
        }
        schema
    }
}

/// Decode a descriptor body with the built-in registry.
///
/// # Examples
/// ```
/// use uacdump_core::{DescriptorKind, DumpError, ProtocolGeneration, decode_descriptor};
///
/// let err = decode_descriptor(DescriptorKind::ClockSource, ProtocolGeneration::Uac1, &[0; 5])
///     .unwrap_err();
/// assert!(err.is_unsupported());
/// assert_eq!(err.to_string(), "UAC1 Clock Source: not yet supported");
/// ```
pub fn decode_descriptor(
    kind: DescriptorKind,
    generation: ProtocolGeneration,
    buffer: &[u8],
) -> Result<DecodedRecord, DumpError> {
    Dumper::builtin()?.decode(kind, generation, buffer)
}

/// Render a descriptor body with the built-in registry and default resolvers.
pub fn render_descriptor(
    kind: DescriptorKind,
    generation: ProtocolGeneration,
    buffer: &[u8],
) -> Result<String, DumpError> {
    Dumper::builtin()?.render(kind, generation, buffer)
}

/// Render a complete class-specific descriptor (header included).
pub fn render_class_descriptor(
    interface: AudioInterface,
    generation: ProtocolGeneration,
    bytes: &[u8],
) -> Result<String, DumpError> {
    Dumper::builtin()?.render_class(interface, generation, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_uac3_kind_is_unsupported() {
        for kind in DescriptorKind::ALL {
            let err = decode_descriptor(kind, ProtocolGeneration::Uac3, &[0; 64]).unwrap_err();
            assert_eq!(
                err,
                DumpError::Unsupported(UnsupportedCombination {
                    kind,
                    generation: ProtocolGeneration::Uac3,
                })
            );
        }
    }

    #[test]
    fn unsupported_is_checked_before_decoding() {
        // An empty buffer would underrun if decoding were attempted.
        let err = render_descriptor(DescriptorKind::EffectUnit, ProtocolGeneration::Uac1, &[])
            .unwrap_err();
        assert!(err.is_unsupported());
    }

    #[test]
    fn decode_errors_pass_through() {
        let err = decode_descriptor(DescriptorKind::ClockSource, ProtocolGeneration::Uac2, &[1])
            .unwrap_err();
        assert!(matches!(
            err,
            DumpError::Decode(DecodeError::BufferUnderrun {
                field: "bmAttributes",
                ..
            })
        ));
        assert!(!err.is_unsupported());
    }

    #[test]
    fn class_record_keeps_header() {
        let dumper = Dumper::builtin().unwrap();
        let bytes = [0x08, 0x24, 0x0a, 0x01, 0x01, 0x07, 0x00, 0x00];
        let class = dumper
            .decode_class(AudioInterface::Control, ProtocolGeneration::Uac2, &bytes)
            .unwrap();
        assert_eq!(class.kind, DescriptorKind::ClockSource);
        assert_eq!(class.length, 8);
        assert_eq!(class.record.depth, 1);
        assert_eq!(class.record.raw("bmControls"), Some(0x07));
    }

    #[test]
    fn class_unsupported_after_framing() {
        // UAC3 clock source frames fine but has no schema.
        let bytes = [0x03, 0x24, 0x0b];
        let err =
            render_class_descriptor(AudioInterface::Control, ProtocolGeneration::Uac3, &bytes)
                .unwrap_err();
        assert_eq!(err.to_string(), "UAC3 Clock Source: not yet supported");
    }

    #[test]
    fn render_all_continues_past_failures() {
        let dumper = Dumper::builtin().unwrap();
        let bytes = [
            // UAC2 clock multiplier
            0x07, 0x24, 0x0c, 0x03, 0x01, 0x00, 0x00,
            // UAC2 clock source truncated by its own bLength
            0x04, 0x24, 0x0a, 0x01,
            // unknown subtype
            0x03, 0x24, 0x0f,
            // dangling byte
            0x09,
        ];
        let entries = dumper.render_all(AudioInterface::Control, ProtocolGeneration::Uac2, &bytes);
        let offsets: Vec<_> = entries.iter().map(|(offset, _)| *offset).collect();
        assert_eq!(offsets, vec![0, 7, 11, 14]);
        assert!(entries[0].1.is_ok());
        assert!(matches!(entries[1].1, Err(DumpError::Decode(_))));
        assert!(matches!(
            entries[2].1,
            Err(DumpError::Descriptor(DescriptorError::UnknownSubtype { .. }))
        ));
        assert!(matches!(
            entries[3].1,
            Err(DumpError::Descriptor(DescriptorError::InvalidLength { .. }))
        ));
    }

    #[test]
    fn depth_indents_rendered_fields() {
        let dumper = Dumper::builtin().unwrap().with_depth(2);
        let text = dumper
            .render(
                DescriptorKind::ClockMultiplier,
                ProtocolGeneration::Uac2,
                &[0x03, 0x01, 0x00, 0x00],
            )
            .unwrap();
        assert!(text.lines().all(|line| line.starts_with("    b") || line.starts_with("    i")));
    }
}
