use crate::custom::CustomDecoder;
use crate::tables::LabelTable;

/// Byte width of one field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    /// Literal width (1, 2 or 4 bytes).
    Bytes(u8),
    /// Width taken from an earlier scalar field's decoded value.
    Field(&'static str),
}

/// How many values a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repetition {
    Scalar,
    Fixed(usize),
    /// Count taken from an earlier scalar field.
    Field(&'static str),
    /// Count is `rows * columns` (one control group per input pin and channel).
    Matrix {
        rows: &'static str,
        columns: &'static str,
    },
    /// Fills the rest of the descriptor, minus the fixed-width fields that follow.
    Remaining,
}

/// Bits allotted to each control in a control bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlBits {
    /// UAC1: set bit means the control is present.
    One,
    /// UAC2: `0b01` read-only, `0b10` invalid, `0b11` read/write.
    Two,
}

impl ControlBits {
    pub fn bits(self) -> u32 {
        match self {
            ControlBits::One => 1,
            ControlBits::Two => 2,
        }
    }
}

/// Interpretation of a field's raw value.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Number,
    /// Reserved or fixed value, shown as hex without interpretation.
    Constant,
    Bcd,
    StringIndex,
    TerminalType,
    NumberWithSuffix(&'static str),
    NumberFromTable(&'static LabelTable),
    Bitmap,
    BitmapFromTable(&'static LabelTable),
    Controls {
        bits: ControlBits,
        table: &'static LabelTable,
    },
    Custom(&'static dyn CustomDecoder),
}

/// One schema entry.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub width: Width,
    pub kind: FieldKind,
    pub repetition: Repetition,
}

impl FieldSpec {
    pub const fn new(name: &'static str, width: u8, kind: FieldKind) -> Self {
        Self {
            name,
            width: Width::Bytes(width),
            kind,
            repetition: Repetition::Scalar,
        }
    }

    pub const fn sized_by(name: &'static str, size_field: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            width: Width::Field(size_field),
            kind,
            repetition: Repetition::Scalar,
        }
    }

    pub const fn repeated(self, repetition: Repetition) -> Self {
        Self { repetition, ..self }
    }

    pub fn is_array(&self) -> bool {
        !matches!(self.repetition, Repetition::Scalar)
    }

    /// Names of the fields this one depends on, in declaration order.
    pub fn references(&self) -> Vec<&'static str> {
        let mut references = Vec::new();
        if let Width::Field(name) = self.width {
            references.push(name);
        }
        match self.repetition {
            Repetition::Field(name) => references.push(name),
            Repetition::Matrix { rows, columns } => {
                references.push(rows);
                references.push(columns);
            }
            Repetition::Scalar | Repetition::Fixed(_) | Repetition::Remaining => {}
        }
        references
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldKind, FieldSpec, Repetition, Width};

    #[test]
    fn references_cover_width_and_repetition() {
        let field = FieldSpec::sized_by("bmaControls", "bControlSize", FieldKind::Bitmap)
            .repeated(Repetition::Matrix {
                rows: "bNrInPins",
                columns: "bNrChannels",
            });
        assert_eq!(
            field.references(),
            vec!["bControlSize", "bNrInPins", "bNrChannels"]
        );
        assert!(field.is_array());
    }

    #[test]
    fn literal_scalar_has_no_references() {
        let field = FieldSpec::new("bUnitID", 1, FieldKind::Number);
        assert!(field.references().is_empty());
        assert!(!field.is_array());
        assert_eq!(field.width, Width::Bytes(1));
    }
}
