use thiserror::Error;

use super::interface::AudioInterface;
use crate::registry::ProtocolGeneration;

/// Errors raised while framing a class-specific descriptor.
///
/// # Examples
/// ```
/// use uacdump_core::DescriptorError;
///
/// let err = DescriptorError::TooShort { needed: 3, actual: 1 };
/// assert_eq!(err.to_string(), "descriptor too short: need 3 bytes, got 1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("descriptor too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("invalid bLength {length}: must be at least {minimum} and at most {available}")]
    InvalidLength {
        length: u8,
        minimum: usize,
        available: usize,
    },
    #[error(
        "unexpected bDescriptorType 0x{found:02x} for {interface} descriptor (expected 0x{expected:02x})"
    )]
    UnexpectedType {
        interface: AudioInterface,
        expected: u8,
        found: u8,
    },
    #[error("unknown {generation} {interface} descriptor subtype 0x{subtype:02x}")]
    UnknownSubtype {
        interface: AudioInterface,
        generation: ProtocolGeneration,
        subtype: u8,
    },
}
