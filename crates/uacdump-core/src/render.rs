//! Text rendering of decoded records.
//!
//! One line per field (one per element for arrays, labeled `name(i)`), the
//! name column padded to the longest label in the block, two spaces of
//! indent per depth level. Bitmap labels and controls are listed one per
//! line one level deeper than their field.
//!
//! # Examples
//! ```text
//! bClockID       0x01
//! bmAttributes   Internal fixed clock
//! bmControls     0x07
//!   Clock Frequency Control (read/write)
//!   Clock Validity Control (read-only)
//! ```

use std::fmt::Write as _;

use crate::descriptor::ClassDescriptor;
use crate::resolve::{NoStrings, StringResolver, TerminalTypeResolver, TerminalTypes};
use crate::{ControlState, DecodedField, DecodedRecord, FieldValue};

/// Spaces per indent level.
pub const INDENT_WIDTH: usize = 2;

/// Indentation for `depth` levels.
pub fn indent(depth: usize) -> String {
    " ".repeat(depth * INDENT_WIDTH)
}

/// Renders decoded records, resolving names through the given resolvers.
///
/// # Examples
/// ```
/// use uacdump_core::{
///     DescriptorKind, ProtocolGeneration, Renderer, SchemaRegistry, StringTable, TerminalTypes,
///     decode,
/// };
///
/// let registry = SchemaRegistry::builtin()?;
/// let schema = registry
///     .lookup(DescriptorKind::SampleRateConverter, ProtocolGeneration::Uac2)
///     .expect("UAC2 sample rate converter");
/// let record = decode(schema, &[0x05, 0x04, 0x01, 0x02, 0x03])?;
///
/// let strings: StringTable = [(3, "SRC".to_string())].into_iter().collect();
/// let text = Renderer::new(&strings, &TerminalTypes).render(&record);
/// assert!(text.ends_with("iSRC              3 SRC\n"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy)]
pub struct Renderer<'r> {
    strings: &'r dyn StringResolver,
    terminals: &'r dyn TerminalTypeResolver,
}

impl Default for Renderer<'static> {
    fn default() -> Self {
        Self {
            strings: &NoStrings,
            terminals: &TerminalTypes,
        }
    }
}

struct Row {
    label: String,
    value: String,
    details: Vec<String>,
}

impl Row {
    fn new(label: impl Into<String>, value: String) -> Self {
        Self {
            label: label.into(),
            value,
            details: Vec::new(),
        }
    }
}

impl<'r> Renderer<'r> {
    pub fn new(
        strings: &'r dyn StringResolver,
        terminals: &'r dyn TerminalTypeResolver,
    ) -> Self {
        Self { strings, terminals }
    }

    /// Render the fields of `record` at its decode depth.
    pub fn render(&self, record: &DecodedRecord) -> String {
        let rows: Vec<Row> = record.fields.iter().map(|field| self.row(field)).collect();
        write_rows(record.depth, &rows)
    }

    /// Render a framed descriptor: a title line, the class-specific header
    /// and then the fields.
    ///
    /// The title is written one level above the record's depth.
    pub fn render_class(&self, descriptor: &ClassDescriptor<'_>, record: &DecodedRecord) -> String {
        let mut rows = vec![
            Row::new("bLength", format!("{:5}", descriptor.length)),
            Row::new("bDescriptorType", format!("{:5}", descriptor.descriptor_type)),
            Row::new(
                "bDescriptorSubtype",
                format!("{:5} ({})", descriptor.subtype, descriptor.kind),
            ),
        ];
        rows.extend(record.fields.iter().map(|field| self.row(field)));

        let mut text = format!(
            "{}{} {}:\n",
            indent(record.depth.saturating_sub(1)),
            descriptor.generation,
            descriptor.interface.title()
        );
        text.push_str(&write_rows(record.depth, &rows));
        text
    }

    fn row(&self, field: &DecodedField) -> Row {
        let mut row = Row::new(field.label(), String::new());
        row.value = match &field.value {
            FieldValue::Number { value } => format!("{value:5}"),
            FieldValue::Constant { value, width } | FieldValue::Bitmap { value, width } => {
                hex(*value, *width)
            }
            FieldValue::Bcd { text, .. } => format!("{text:>5}"),
            FieldValue::StringIndex { index } => match self.strings.resolve(*index) {
                Some(text) => format!("{index:5} {text}"),
                None => format!("{index:5}"),
            },
            FieldValue::TerminalType { code } => match self.terminals.name(*code) {
                Some(name) => format!("0x{code:04x} {name}"),
                None => format!("0x{code:04x}"),
            },
            FieldValue::Suffixed { value, suffix } => format!("{value:5}{suffix}"),
            FieldValue::Enumerated { value, label } => format!("{value:5} {label}"),
            FieldValue::Flags {
                value,
                width,
                labels,
            } => {
                row.details = labels.clone();
                hex(*value, *width)
            }
            FieldValue::Controls {
                value,
                width,
                controls,
            } => {
                row.details = controls.iter().map(control_line).collect();
                hex(*value, *width)
            }
            FieldValue::Custom { text, .. } => text.clone(),
        };
        row
    }
}

fn hex(value: u64, width: usize) -> String {
    format!("0x{value:0digits$x}", digits = width * 2)
}

fn control_line(control: &ControlState) -> String {
    match control.access.label() {
        Some(access) => format!("{} Control ({access})", control.name),
        None => format!("{} Control", control.name),
    }
}

fn write_rows(depth: usize, rows: &[Row]) -> String {
    let pad = indent(depth);
    let detail_pad = indent(depth + 1);
    let width = rows.iter().map(|row| row.label.len()).max().unwrap_or(0);

    let mut text = String::new();
    for row in rows {
        // Writing to a String cannot fail.
        let _ = writeln!(text, "{pad}{:<width$} {}", row.label, row.value);
        for detail in &row.details {
            let _ = writeln!(text, "{detail_pad}{detail}");
        }
    }
    text
}
