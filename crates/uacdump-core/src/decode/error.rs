use thiserror::Error;

/// Errors returned by a single decode call.
///
/// A failed decode produces no partial record; sibling descriptors are
/// unaffected.
///
/// # Examples
/// ```
/// use uacdump_core::DecodeError;
///
/// let err = DecodeError::BufferUnderrun { field: "iFeature", needed: 1, remaining: 0 };
/// assert!(err.to_string().contains("buffer underrun"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("buffer underrun at {field}: need {needed} bytes, {remaining} remaining")]
    BufferUnderrun {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },
    #[error("invalid width for {field}: {width} bytes (expected 1..=8)")]
    InvalidWidth { field: &'static str, width: u64 },
    #[error("element count overflow for {field}")]
    CountOverflow { field: &'static str },
}
