//! uacdump core library: schema-driven USB Audio-Class descriptor decoding.
//!
//! Descriptor layouts are declared as data: one [`FieldSchema`] per
//! (descriptor kind, protocol generation) pair, indexed by the
//! [`SchemaRegistry`]. A single interpreter walks a schema over the raw
//! bytes, producing a [`DecodedRecord`] that is either rendered as indented
//! text or serialized for structured consumers. Both outputs come from the
//! same decode pass.
//!
//! Layering follows the descriptor bytes:
//! `descriptor` (class-specific header framing) -> `dispatch` (registry
//! lookup) -> `decode` (field interpreter) -> `render` (text).
//! The core performs no I/O; string descriptors and terminal-type names are
//! resolved through the traits in [`resolve`].
//!
//! Invariants:
//! - Fields are decoded in schema order, in a single forward pass.
//! - Width and count references always name earlier scalar fields; this is
//!   checked once when a schema is built.
//! - A decode never reads past the end of its buffer and never returns a
//!   partial record.
//! - Label-table misses are not errors.
//!
//! # Examples
//! ```
//! use uacdump_core::{DescriptorKind, ProtocolGeneration, render_descriptor};
//!
//! let text = render_descriptor(
//!     DescriptorKind::ClockSource,
//!     ProtocolGeneration::Uac2,
//!     &[0x01, 0x01, 0x07, 0x00, 0x00],
//! )?;
//! assert!(text.contains("Internal fixed clock"));
//! # Ok::<(), uacdump_core::DumpError>(())
//! ```

use serde::{Deserialize, Serialize};

pub mod custom;
pub mod decode;
pub mod descriptor;
pub mod dispatch;
pub mod hex;
pub mod registry;
pub mod render;
pub mod resolve;
pub mod schema;
pub mod tables;

pub use decode::{DecodeError, decode, decode_at_depth};
pub use descriptor::{
    AudioInterface, ClassDescriptor, DescriptorError, parse_class_descriptor, split_descriptors,
};
pub use dispatch::{
    ClassRecord, DumpError, Dumper, UnsupportedCombination, decode_descriptor,
    render_class_descriptor, render_descriptor,
};
pub use registry::{DescriptorKind, ProtocolGeneration, SchemaRegistry};
pub use render::Renderer;
pub use resolve::{NoStrings, StringResolver, StringTable, TerminalTypeResolver, TerminalTypes};
pub use schema::{FieldSchema, SchemaError};

/// Structured result of decoding one descriptor body.
///
/// # Examples
/// ```
/// use uacdump_core::{DecodedField, DecodedRecord, FieldValue};
///
/// let record = DecodedRecord {
///     schema: "UAC2 Clock Source".to_string(),
///     fields: vec![DecodedField {
///         name: "bClockID".to_string(),
///         index: None,
///         value: FieldValue::Number { value: 1 },
///     }],
///     consumed: 1,
///     trailing: 0,
///     depth: 0,
/// };
/// assert_eq!(record.raw("bClockID"), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedRecord {
    /// Name of the schema used (e.g. "UAC1 Feature Unit").
    pub schema: String,
    /// Decoded values in schema order; arrays contribute one entry per element.
    pub fields: Vec<DecodedField>,
    /// Bytes consumed from the input buffer.
    pub consumed: usize,
    /// Bytes left over after the last field.
    pub trailing: usize,
    /// Indent depth custom decoders rendered at.
    #[serde(skip)]
    pub depth: usize,
}

impl DecodedRecord {
    /// First field named `name` (the first element for arrays).
    pub fn get(&self, name: &str) -> Option<&DecodedField> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn raw(&self, name: &str) -> Option<u64> {
        self.get(name).map(|field| field.value.raw())
    }

    /// Raw values of every element named `name`, in order.
    pub fn values<'s>(&'s self, name: &'s str) -> impl Iterator<Item = u64> + 's {
        self.fields
            .iter()
            .filter(move |field| field.name == name)
            .map(|field| field.value.raw())
    }
}

/// One decoded value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedField {
    /// Field name from the schema.
    pub name: String,
    /// Element index for array fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    pub value: FieldValue,
}

impl DecodedField {
    /// Display label: `name` for scalars, `name(i)` for array elements.
    pub fn label(&self) -> String {
        match self.index {
            Some(index) => format!("{}({index})", self.name),
            None => self.name.clone(),
        }
    }
}

/// Interpreted field value, one variant per field kind.
///
/// Widths are in bytes. String indexes and terminal types keep the raw code;
/// names are resolved when rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldValue {
    Number {
        value: u64,
    },
    Constant {
        value: u64,
        width: usize,
    },
    Bcd {
        value: u64,
        text: String,
    },
    StringIndex {
        index: u64,
    },
    TerminalType {
        code: u64,
    },
    Suffixed {
        value: u64,
        suffix: String,
    },
    Enumerated {
        value: u64,
        label: String,
    },
    Bitmap {
        value: u64,
        width: usize,
    },
    /// Bitmap with one label per set (and labeled) bit.
    Flags {
        value: u64,
        width: usize,
        labels: Vec<String>,
    },
    /// Control bitmap; absent controls are omitted.
    Controls {
        value: u64,
        width: usize,
        controls: Vec<ControlState>,
    },
    Custom {
        value: u64,
        decoder: String,
        text: String,
    },
}

impl FieldValue {
    /// Raw little-endian value read from the buffer.
    pub fn raw(&self) -> u64 {
        match self {
            FieldValue::Number { value }
            | FieldValue::Constant { value, .. }
            | FieldValue::Bcd { value, .. }
            | FieldValue::Suffixed { value, .. }
            | FieldValue::Enumerated { value, .. }
            | FieldValue::Bitmap { value, .. }
            | FieldValue::Flags { value, .. }
            | FieldValue::Controls { value, .. }
            | FieldValue::Custom { value, .. } => *value,
            FieldValue::StringIndex { index } => *index,
            FieldValue::TerminalType { code } => *code,
        }
    }
}

/// A control that is present in a control bitmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlState {
    pub name: String,
    pub access: ControlAccess,
}

/// Access level of a control.
///
/// UAC1 bitmaps only say whether a control is present; UAC2 bitmaps carry
/// two bits per control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlAccess {
    Present,
    ReadOnly,
    /// `0b10`, which the class specification does not allow.
    Invalid,
    ReadWrite,
}

impl ControlAccess {
    /// Suffix shown after the control name, if any.
    ///
    /// # Examples
    /// ```
    /// use uacdump_core::ControlAccess;
    ///
    /// assert_eq!(ControlAccess::Present.label(), None);
    /// assert_eq!(ControlAccess::Invalid.label(), Some("ILLEGAL VALUE (0b10)"));
    /// ```
    pub fn label(self) -> Option<&'static str> {
        match self {
            ControlAccess::Present => None,
            ControlAccess::ReadOnly => Some("read-only"),
            ControlAccess::Invalid => Some("ILLEGAL VALUE (0b10)"),
            ControlAccess::ReadWrite => Some("read/write"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> DecodedRecord {
        DecodedRecord {
            schema: "test".to_string(),
            fields: vec![
                DecodedField {
                    name: "bNrInPins".to_string(),
                    index: None,
                    value: FieldValue::Number { value: 2 },
                },
                DecodedField {
                    name: "baSourceID".to_string(),
                    index: Some(0),
                    value: FieldValue::Number { value: 4 },
                },
                DecodedField {
                    name: "baSourceID".to_string(),
                    index: Some(1),
                    value: FieldValue::Number { value: 5 },
                },
            ],
            consumed: 3,
            trailing: 0,
            depth: 0,
        }
    }

    #[test]
    fn lookup_helpers() {
        let record = record();
        assert_eq!(record.raw("bNrInPins"), Some(2));
        assert_eq!(record.raw("baSourceID"), Some(4));
        assert_eq!(record.values("baSourceID").collect::<Vec<_>>(), vec![4, 5]);
        assert_eq!(record.raw("missing"), None);
        assert_eq!(record.fields[2].label(), "baSourceID(1)");
        assert_eq!(record.fields[0].label(), "bNrInPins");
    }

    #[test]
    fn serializes_tagged_values() {
        let value = FieldValue::Controls {
            value: 0x0c,
            width: 1,
            controls: vec![ControlState {
                name: "Volume".to_string(),
                access: ControlAccess::ReadWrite,
            }],
        };
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json["type"], "controls");
        assert_eq!(json["controls"][0]["access"], "read-write");

        let scalar = serde_json::to_value(&record().fields[0]).unwrap();
        assert!(scalar.get("index").is_none());
    }

    #[test]
    fn depth_is_not_serialized() {
        let mut record = record();
        record.depth = 3;
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("depth").is_none());
        let back: DecodedRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back.depth, 0);
    }
}
