use thiserror::Error;

/// Errors raised while building a [`FieldSchema`](super::FieldSchema).
///
/// Schemas are static data, so these only surface at construction time and
/// never from a decode call.
///
/// # Examples
/// ```
/// use uacdump_core::schema::{FieldKind, FieldSchema, FieldSpec, Repetition, SchemaError};
///
/// let fields = [
///     FieldSpec::new("baSourceID", 1, FieldKind::Number)
///         .repeated(Repetition::Field("bNrInPins")),
///     FieldSpec::new("bNrInPins", 1, FieldKind::Number),
/// ];
/// let err = FieldSchema::new("broken", &fields).unwrap_err();
/// assert!(matches!(err, SchemaError::ForwardReference { .. }));
/// assert!(err.to_string().starts_with("malformed schema"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("malformed schema {schema}: duplicate field {field}")]
    DuplicateField {
        schema: &'static str,
        field: &'static str,
    },
    #[error("malformed schema {schema}: field {field} has invalid width {width}")]
    InvalidWidth {
        schema: &'static str,
        field: &'static str,
        width: u8,
    },
    #[error("malformed schema {schema}: field {field} references itself")]
    SelfReference {
        schema: &'static str,
        field: &'static str,
    },
    #[error("malformed schema {schema}: field {field} references later field {target}")]
    ForwardReference {
        schema: &'static str,
        field: &'static str,
        target: &'static str,
    },
    #[error("malformed schema {schema}: field {field} references unknown field {target}")]
    UnknownReference {
        schema: &'static str,
        field: &'static str,
        target: &'static str,
    },
    #[error("malformed schema {schema}: field {field} references array field {target}")]
    ArrayReference {
        schema: &'static str,
        field: &'static str,
        target: &'static str,
    },
    #[error(
        "malformed schema {schema}: inferred array {field} is followed by variable-size field {trailer}"
    )]
    VariableTrailer {
        schema: &'static str,
        field: &'static str,
        trailer: &'static str,
    },
}
