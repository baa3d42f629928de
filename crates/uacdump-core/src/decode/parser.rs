use super::context::DecodeContext;
use super::error::DecodeError;
use crate::schema::{ControlBits, FieldKind, FieldSchema, FieldSpec, Repetition, Width};
use crate::tables::LabelTable;
use crate::{ControlAccess, ControlState, DecodedField, DecodedRecord, FieldValue};

/// Largest field width that fits the decoded `u64` value.
const MAX_WIDTH: usize = 8;

/// Decode `buffer` against `schema` at indent depth 0.
///
/// # Errors
/// Returns `DecodeError` when the buffer is too short for the schema or a
/// data-driven width or count is out of range. No partial record is
/// returned.
///
/// # Examples
/// ```
/// use uacdump_core::{DescriptorKind, FieldValue, ProtocolGeneration, SchemaRegistry, decode};
///
/// let registry = SchemaRegistry::builtin()?;
/// let schema = registry
///     .lookup(DescriptorKind::ClockSource, ProtocolGeneration::Uac2)
///     .expect("UAC2 clock source");
/// let record = decode(schema, &[0x01, 0x03, 0x01, 0x00, 0x00])?;
/// assert_eq!(record.raw("bmAttributes"), Some(0x03));
/// assert!(matches!(record.fields[1].value, FieldValue::Custom { .. }));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn decode(schema: &FieldSchema, buffer: &[u8]) -> Result<DecodedRecord, DecodeError> {
    decode_at_depth(schema, buffer, 0)
}

/// Decode `buffer` against `schema` for rendering at `depth`.
///
/// The depth only affects custom decoders that emit nested lines.
pub fn decode_at_depth(
    schema: &FieldSchema,
    buffer: &[u8],
    depth: usize,
) -> Result<DecodedRecord, DecodeError> {
    let mut ctx = DecodeContext::new(buffer, depth);
    let mut fields = Vec::new();

    for (index, spec) in schema.fields().iter().enumerate() {
        let width = resolve_width(&ctx, spec)?;
        let count = resolve_count(&ctx, schema, index, spec, width)?;
        let needed = width
            .checked_mul(count)
            .ok_or(DecodeError::CountOverflow { field: spec.name })?;
        if let Err(err) = ctx.require_len(spec.name, needed) {
            log::debug!("{}: {}", schema.name(), err);
            return Err(err);
        }

        for element in 0..count {
            let raw = ctx.read_le(spec.name, width)?;
            log::trace!("{}: {}[{}] = {:#x}", schema.name(), spec.name, element, raw);
            if !spec.is_array() {
                ctx.record(spec.name, raw);
            }
            fields.push(DecodedField {
                name: spec.name.to_string(),
                index: spec.is_array().then_some(element),
                value: interpret(spec.kind, raw, width, ctx.depth()),
            });
        }
    }

    if ctx.remaining() > 0 {
        log::debug!(
            "{}: {} trailing bytes not covered by the schema",
            schema.name(),
            ctx.remaining()
        );
    }

    Ok(DecodedRecord {
        schema: schema.name().to_string(),
        consumed: ctx.position(),
        trailing: ctx.remaining(),
        depth,
        fields,
    })
}

fn resolve_width(ctx: &DecodeContext<'_>, spec: &FieldSpec) -> Result<usize, DecodeError> {
    let width = match spec.width {
        Width::Bytes(width) => u64::from(width),
        // Earlier-field references are validated when the schema is built.
        Width::Field(name) => ctx.value(name).unwrap_or(0),
    };
    match usize::try_from(width) {
        Ok(width) if (1..=MAX_WIDTH).contains(&width) => Ok(width),
        _ => Err(DecodeError::InvalidWidth {
            field: spec.name,
            width,
        }),
    }
}

fn resolve_count(
    ctx: &DecodeContext<'_>,
    schema: &FieldSchema,
    index: usize,
    spec: &FieldSpec,
    width: usize,
) -> Result<usize, DecodeError> {
    let overflow = || DecodeError::CountOverflow { field: spec.name };
    let field_value = |name: &str| -> Result<usize, DecodeError> {
        usize::try_from(ctx.value(name).unwrap_or(0)).map_err(|_| overflow())
    };

    match spec.repetition {
        Repetition::Scalar => Ok(1),
        Repetition::Fixed(count) => Ok(count),
        Repetition::Field(name) => field_value(name),
        Repetition::Matrix { rows, columns } => field_value(rows)?
            .checked_mul(field_value(columns)?)
            .ok_or_else(overflow),
        Repetition::Remaining => {
            let available = ctx.remaining().saturating_sub(schema.trailing_width(index));
            Ok(available / width)
        }
    }
}

fn interpret(kind: FieldKind, value: u64, width: usize, depth: usize) -> FieldValue {
    match kind {
        FieldKind::Number => FieldValue::Number { value },
        FieldKind::Constant => FieldValue::Constant { value, width },
        FieldKind::Bcd => FieldValue::Bcd {
            value,
            text: format!("{:x}.{:02x}", value >> 8, value & 0xff),
        },
        FieldKind::StringIndex => FieldValue::StringIndex { index: value },
        FieldKind::TerminalType => FieldValue::TerminalType { code: value },
        FieldKind::NumberWithSuffix(suffix) => FieldValue::Suffixed {
            value,
            suffix: suffix.to_string(),
        },
        FieldKind::NumberFromTable(table) => FieldValue::Enumerated {
            value,
            label: table.label_or_undefined(value).to_string(),
        },
        FieldKind::Bitmap => FieldValue::Bitmap { value, width },
        FieldKind::BitmapFromTable(table) => FieldValue::Flags {
            value,
            width,
            labels: table
                .labels_for_bits(value, bit_count(width))
                .into_iter()
                .map(String::from)
                .collect(),
        },
        FieldKind::Controls { bits, table } => FieldValue::Controls {
            value,
            width,
            controls: control_states(value, width, bits, table),
        },
        FieldKind::Custom(decoder) => FieldValue::Custom {
            value,
            decoder: decoder.name().to_string(),
            text: decoder.render(value, depth),
        },
    }
}

fn bit_count(width: usize) -> u32 {
    u32::try_from(width * 8).unwrap_or(u64::BITS)
}

fn control_states(
    value: u64,
    width: usize,
    bits: ControlBits,
    table: &LabelTable,
) -> Vec<ControlState> {
    let per_control = bits.bits();
    let available = bit_count(width);
    let mask = (1u64 << per_control) - 1;

    table
        .iter()
        .filter_map(|(index, name)| {
            let shift = u32::try_from(index).ok()?.checked_mul(per_control)?;
            if shift + per_control > available {
                return None;
            }
            let access = control_access(bits, (value >> shift) & mask)?;
            Some(ControlState {
                name: name.to_string(),
                access,
            })
        })
        .collect()
}

fn control_access(bits: ControlBits, level: u64) -> Option<ControlAccess> {
    match (bits, level) {
        (_, 0) => None,
        (ControlBits::One, _) => Some(ControlAccess::Present),
        (ControlBits::Two, 0b01) => Some(ControlAccess::ReadOnly),
        (ControlBits::Two, 0b10) => Some(ControlAccess::Invalid),
        (ControlBits::Two, _) => Some(ControlAccess::ReadWrite),
    }
}
