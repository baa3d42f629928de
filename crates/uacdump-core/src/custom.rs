//! Custom field decoders.
//!
//! Some fields pack several sub-fields or select between tables, which the
//! generic field kinds cannot describe. A [`CustomDecoder`] receives the raw
//! value and the current indent depth and owns the rendering of the value
//! column. Extra lines must carry their own indentation
//! (see [`indent`](crate::render::indent)).

use std::fmt;

use crate::render::indent;
use crate::tables::UNDEFINED;
use crate::tables::audio::{
    FORMAT_TYPE_I, FORMAT_TYPE_II, FORMAT_TYPE_III, UAC2_CLOCK_SOURCE_ATTRIBUTES,
    UAC3_CLOCK_SOURCE_ATTRIBUTES,
};

/// Named rendering strategy for one field.
pub trait CustomDecoder: fmt::Debug + Send + Sync {
    /// Stable strategy name, used in structured output.
    fn name(&self) -> &'static str;

    /// Render `value` for a field at `depth`.
    fn render(&self, value: u64, depth: usize) -> String;
}

/// UAC2 clock source `bmAttributes`.
///
/// Bits 0..=1 select the clock type; bit 2 marks the clock as synchronized
/// to SOF.
///
/// # Examples
/// ```
/// use uacdump_core::custom::{ClockSourceAttributes, CustomDecoder};
///
/// assert_eq!(ClockSourceAttributes.render(0x03, 0), "Internal programmable clock");
/// assert_eq!(
///     ClockSourceAttributes.render(0x05, 0),
///     "Internal fixed clock (synchronized to SOF)"
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ClockSourceAttributes;

const CLOCK_TYPE_MASK: u64 = 0x3;
const CLOCK_SYNC_TO_SOF: u64 = 0x4;
const CLOCK_SYNC_LABEL_INDEX: u64 = 3;

impl CustomDecoder for ClockSourceAttributes {
    fn name(&self) -> &'static str {
        "clock-source-attributes"
    }

    fn render(&self, value: u64, _depth: usize) -> String {
        let clock = UAC2_CLOCK_SOURCE_ATTRIBUTES.label_or_undefined(value & CLOCK_TYPE_MASK);
        if value & CLOCK_SYNC_TO_SOF == 0 {
            return format!("{clock} clock");
        }
        let sync = UAC3_CLOCK_SOURCE_ATTRIBUTES.label_or_undefined(CLOCK_SYNC_LABEL_INDEX);
        format!("{clock} clock {sync}")
    }
}

/// UAC1 AS interface `wFormatTag`.
///
/// # Examples
/// ```
/// use uacdump_core::custom::{CustomDecoder, FormatTag};
///
/// assert_eq!(FormatTag.render(0x0001, 0), "PCM");
/// assert_eq!(FormatTag.render(0x2002, 0), "IEC1937_MPEG-1_Layer1");
/// assert_eq!(FormatTag.render(0x0006, 0), "undefined");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FormatTag;

impl CustomDecoder for FormatTag {
    fn name(&self) -> &'static str {
        "format-tag"
    }

    fn render(&self, value: u64, _depth: usize) -> String {
        format_tag_name(value).to_string()
    }
}

/// Name of a UAC1 format tag.
///
/// Codes are `0xTNNN` where `T` selects the format type table and `NNN`
/// indexes it. Only the populated ranges are accepted: `0x0000..=0x0005`,
/// `0x1000..=0x1002` and `0x2000..=0x2006`.
pub fn format_tag_name(value: u64) -> &'static str {
    let (table, index) = match value {
        0x0000..=0x0005 => (&FORMAT_TYPE_I, value),
        0x1000..=0x1002 => (&FORMAT_TYPE_II, value & 0x0fff),
        0x2000..=0x2006 => (&FORMAT_TYPE_III, value & 0x0fff),
        _ => return UNDEFINED,
    };
    table.label_or_undefined(index)
}

/// UAC2 AS interface `bmFormats` for format type I.
///
/// Bit `n` stands for type I format code `n + 1`; each supported format is
/// listed on its own line one level deeper than the field.
///
/// # Examples
/// ```
/// use uacdump_core::custom::{CustomDecoder, Uac2Formats};
///
/// assert_eq!(Uac2Formats.render(0x1, 0), "0x00000001\n  PCM");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Uac2Formats;

const TYPE_I_FORMAT_BITS: u64 = 5;

impl CustomDecoder for Uac2Formats {
    fn name(&self) -> &'static str {
        "uac2-formats"
    }

    fn render(&self, value: u64, depth: usize) -> String {
        let mut text = format!("0x{value:08x}");
        let pad = indent(depth + 1);
        for bit in 0..TYPE_I_FORMAT_BITS {
            if (value >> bit) & 1 == 1 {
                text.push('\n');
                text.push_str(&pad);
                text.push_str(FORMAT_TYPE_I.label_or_undefined(bit + 1));
            }
        }
        text
    }
}
