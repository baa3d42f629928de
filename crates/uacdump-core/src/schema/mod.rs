//! Field schemas.
//!
//! A schema is an ordered, explicit-length list of [`FieldSpec`] entries that
//! describes one descriptor layout for one protocol generation. Construction
//! validates every cross-field reference once:
//! - `size_field` / length references must name a strictly earlier field;
//! - referenced fields must be scalars;
//! - an inferred (`Remaining`) array may only be followed by fixed-width
//!   scalars, so its element count can be derived from the buffer length.
//!
//! Built-in layouts live in `definitions` and are indexed by the
//! [`SchemaRegistry`](crate::SchemaRegistry).

pub(crate) mod definitions;
pub mod error;
pub mod field;

pub use error::SchemaError;
pub use field::{ControlBits, FieldKind, FieldSpec, Repetition, Width};

/// Validated, immutable field layout.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    name: &'static str,
    fields: Vec<FieldSpec>,
}

impl FieldSchema {
    /// Validate `fields` and build a schema named `name`.
    ///
    /// # Errors
    /// Returns `SchemaError` when a reference, width or name is malformed.
    pub fn new(name: &'static str, fields: &[FieldSpec]) -> Result<Self, SchemaError> {
        for (index, field) in fields.iter().enumerate() {
            let earlier = &fields[..index];
            let later = &fields[index + 1..];

            if earlier.iter().any(|other| other.name == field.name) {
                return Err(SchemaError::DuplicateField {
                    schema: name,
                    field: field.name,
                });
            }

            if let Width::Bytes(width) = field.width {
                if !matches!(width, 1 | 2 | 4) {
                    return Err(SchemaError::InvalidWidth {
                        schema: name,
                        field: field.name,
                        width,
                    });
                }
            }

            for target in field.references() {
                check_reference(name, field, target, earlier, later)?;
            }

            if field.repetition == Repetition::Remaining {
                let trailer = later
                    .iter()
                    .find(|other| other.is_array() || !matches!(other.width, Width::Bytes(_)));
                if let Some(trailer) = trailer {
                    return Err(SchemaError::VariableTrailer {
                        schema: name,
                        field: field.name,
                        trailer: trailer.name,
                    });
                }
            }
        }

        Ok(Self {
            name,
            fields: fields.to_vec(),
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Total literal width of the fields after `index`.
    ///
    /// Only meaningful for an inferred array, whose trailers are validated
    /// to be fixed-width scalars.
    pub(crate) fn trailing_width(&self, index: usize) -> usize {
        self.fields
            .get(index + 1..)
            .unwrap_or_default()
            .iter()
            .map(|field| match field.width {
                Width::Bytes(width) => usize::from(width),
                Width::Field(_) => 0,
            })
            .sum()
    }
}

fn check_reference(
    schema: &'static str,
    field: &FieldSpec,
    target: &'static str,
    earlier: &[FieldSpec],
    later: &[FieldSpec],
) -> Result<(), SchemaError> {
    if target == field.name {
        return Err(SchemaError::SelfReference {
            schema,
            field: field.name,
        });
    }
    match earlier.iter().find(|other| other.name == target) {
        Some(other) if other.is_array() => Err(SchemaError::ArrayReference {
            schema,
            field: field.name,
            target,
        }),
        Some(_) => Ok(()),
        None if later.iter().any(|other| other.name == target) => {
            Err(SchemaError::ForwardReference {
                schema,
                field: field.name,
                target,
            })
        }
        None => Err(SchemaError::UnknownReference {
            schema,
            field: field.name,
            target,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(name: &'static str) -> FieldSpec {
        FieldSpec::new(name, 1, FieldKind::Number)
    }

    #[test]
    fn accepts_earlier_references() {
        let fields = [
            number("bNrInPins"),
            number("baSourceID").repeated(Repetition::Field("bNrInPins")),
            number("iMixer"),
        ];
        let schema = FieldSchema::new("ok", &fields).unwrap();
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.name(), "ok");
    }

    #[test]
    fn rejects_self_reference() {
        let fields = [FieldSpec::sized_by("bmControls", "bmControls", FieldKind::Bitmap)];
        let err = FieldSchema::new("self", &fields).unwrap_err();
        assert!(matches!(err, SchemaError::SelfReference { .. }));
    }

    #[test]
    fn rejects_unknown_reference() {
        let fields = [number("baSourceID").repeated(Repetition::Field("bMissing"))];
        let err = FieldSchema::new("unknown", &fields).unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownReference {
                schema: "unknown",
                field: "baSourceID",
                target: "bMissing",
            }
        );
    }

    #[test]
    fn rejects_forward_matrix_reference() {
        let fields = [
            number("bNrInPins"),
            number("bmControls").repeated(Repetition::Matrix {
                rows: "bNrInPins",
                columns: "bNrChannels",
            }),
            number("bNrChannels"),
        ];
        let err = FieldSchema::new("forward", &fields).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::ForwardReference {
                target: "bNrChannels",
                ..
            }
        ));
    }

    #[test]
    fn rejects_reference_to_array() {
        let fields = [
            number("baSourceID").repeated(Repetition::Fixed(2)),
            FieldSpec::sized_by("bmControls", "baSourceID", FieldKind::Bitmap),
        ];
        let err = FieldSchema::new("array", &fields).unwrap_err();
        assert!(matches!(err, SchemaError::ArrayReference { .. }));
    }

    #[test]
    fn rejects_duplicates_and_bad_widths() {
        let err = FieldSchema::new("dup", &[number("bUnitID"), number("bUnitID")]).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateField { .. }));

        let err = FieldSchema::new("width", &[FieldSpec::new("wOdd", 3, FieldKind::Number)])
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidWidth { width: 3, .. }));
    }

    #[test]
    fn inferred_array_needs_fixed_trailers() {
        let fields = [
            number("bControlSize"),
            number("bmaControls").repeated(Repetition::Remaining),
            FieldSpec::sized_by("bExtra", "bControlSize", FieldKind::Bitmap),
        ];
        let err = FieldSchema::new("trailer", &fields).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::VariableTrailer {
                trailer: "bExtra",
                ..
            }
        ));
    }

    #[test]
    fn trailing_width_sums_literal_trailers() {
        let fields = [
            number("bmaControls").repeated(Repetition::Remaining),
            FieldSpec::new("wTail", 2, FieldKind::Number),
            number("iFeature"),
        ];
        let schema = FieldSchema::new("tail", &fields).unwrap();
        assert_eq!(schema.trailing_width(0), 3);
        assert_eq!(schema.trailing_width(2), 0);
    }
}
