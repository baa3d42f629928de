//! Schema-driven field decoding.
//!
//! The decoder walks a [`FieldSchema`](crate::FieldSchema) once, front to
//! back, over a borrowed buffer:
//! - `reader`: bounds-checked little-endian reads (never past the end)
//! - `context`: cursor, decoded scalar values and indent depth
//! - `parser`: width/count resolution and per-kind interpretation
//! - `error`: explicit, actionable errors
//!
//! The output is a [`DecodedRecord`](crate::DecodedRecord), which feeds both
//! the text renderer and structured (serde) consumers.

pub mod context;
pub mod error;
pub mod parser;
pub mod reader;

pub use context::DecodeContext;
pub use error::DecodeError;
pub use parser::{decode, decode_at_depth};
