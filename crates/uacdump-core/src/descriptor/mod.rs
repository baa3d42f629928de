//! Class-specific descriptor framing.
//!
//! Every Audio-Class descriptor starts with the same 3-byte header
//! (`bLength`, `bDescriptorType`, `bDescriptorSubtype`). This module checks
//! the header, maps the subtype to a [`DescriptorKind`](crate::DescriptorKind)
//! for the interface and protocol generation, and hands back the body that
//! the field schemas describe. Concatenated descriptors (as found in a
//! configuration dump) are split by `bLength` so each one decodes on its own.
//!
//! Byte offsets and subtype maps live in `layout`; bounds-checked access in
//! `reader`.

pub mod error;
pub mod interface;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::DescriptorError;
pub use interface::{AudioInterface, ParseInterfaceError};
pub use parser::{ClassDescriptor, Descriptors, descriptor_kind, parse_class_descriptor, split_descriptors};
