use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::layout;

/// Where a class-specific descriptor appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioInterface {
    /// AudioControl interface.
    Control,
    /// AudioStreaming interface.
    Streaming,
    /// AudioStreaming isochronous data endpoint.
    Endpoint,
}

impl AudioInterface {
    pub const ALL: [AudioInterface; 3] = [
        AudioInterface::Control,
        AudioInterface::Streaming,
        AudioInterface::Endpoint,
    ];

    /// Heading used when rendering a framed descriptor.
    pub fn title(self) -> &'static str {
        match self {
            AudioInterface::Control => "AudioControl Interface Descriptor",
            AudioInterface::Streaming => "AudioStreaming Interface Descriptor",
            AudioInterface::Endpoint => "AudioStreaming Endpoint Descriptor",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            AudioInterface::Control => "control",
            AudioInterface::Streaming => "streaming",
            AudioInterface::Endpoint => "endpoint",
        }
    }

    /// Expected `bDescriptorType`.
    pub fn descriptor_type(self) -> u8 {
        match self {
            AudioInterface::Control | AudioInterface::Streaming => layout::CS_INTERFACE,
            AudioInterface::Endpoint => layout::CS_ENDPOINT,
        }
    }
}

impl fmt::Display for AudioInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown audio interface '{0}' (expected control, streaming or endpoint)")]
pub struct ParseInterfaceError(String);

impl FromStr for AudioInterface {
    type Err = ParseInterfaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "control" | "ac" => Ok(AudioInterface::Control),
            "streaming" | "as" => Ok(AudioInterface::Streaming),
            "endpoint" | "ep" => Ok(AudioInterface::Endpoint),
            _ => Err(ParseInterfaceError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AudioInterface;

    #[test]
    fn parses_aliases() {
        assert_eq!("AC".parse(), Ok(AudioInterface::Control));
        assert_eq!("streaming".parse(), Ok(AudioInterface::Streaming));
        assert_eq!(" ep ".parse(), Ok(AudioInterface::Endpoint));
        assert!("video".parse::<AudioInterface>().is_err());
    }

    #[test]
    fn endpoint_uses_cs_endpoint() {
        assert_eq!(AudioInterface::Endpoint.descriptor_type(), 0x25);
        assert_eq!(AudioInterface::Streaming.descriptor_type(), 0x24);
    }
}
