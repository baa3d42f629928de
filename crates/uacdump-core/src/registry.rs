//! Schema registry: (descriptor kind, protocol generation) -> layout.
//!
//! The built-in registry is validated once, on first use, and shared
//! read-only afterwards. A missing entry is the normal "unsupported" outcome
//! (e.g. every UAC3 kind, or UAC1 clock entities).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::{FieldSchema, SchemaError, definitions};

/// Audio-Class descriptor kinds with a layout in at least one generation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum DescriptorKind {
    Header,
    InputTerminal,
    OutputTerminal,
    MixerUnit,
    SelectorUnit,
    FeatureUnit,
    ProcessingUnit,
    ExtensionUnit,
    EffectUnit,
    ClockSource,
    ClockSelector,
    ClockMultiplier,
    SampleRateConverter,
    AsInterface,
    IsochronousEndpoint,
}

impl DescriptorKind {
    pub const ALL: [DescriptorKind; 15] = [
        DescriptorKind::Header,
        DescriptorKind::InputTerminal,
        DescriptorKind::OutputTerminal,
        DescriptorKind::MixerUnit,
        DescriptorKind::SelectorUnit,
        DescriptorKind::FeatureUnit,
        DescriptorKind::ProcessingUnit,
        DescriptorKind::ExtensionUnit,
        DescriptorKind::EffectUnit,
        DescriptorKind::ClockSource,
        DescriptorKind::ClockSelector,
        DescriptorKind::ClockMultiplier,
        DescriptorKind::SampleRateConverter,
        DescriptorKind::AsInterface,
        DescriptorKind::IsochronousEndpoint,
    ];

    /// Human-readable name (e.g. "Effect Unit").
    pub fn name(self) -> &'static str {
        match self {
            DescriptorKind::Header => "AC Header",
            DescriptorKind::InputTerminal => "Input Terminal",
            DescriptorKind::OutputTerminal => "Output Terminal",
            DescriptorKind::MixerUnit => "Mixer Unit",
            DescriptorKind::SelectorUnit => "Selector Unit",
            DescriptorKind::FeatureUnit => "Feature Unit",
            DescriptorKind::ProcessingUnit => "Processing Unit",
            DescriptorKind::ExtensionUnit => "Extension Unit",
            DescriptorKind::EffectUnit => "Effect Unit",
            DescriptorKind::ClockSource => "Clock Source",
            DescriptorKind::ClockSelector => "Clock Selector",
            DescriptorKind::ClockMultiplier => "Clock Multiplier",
            DescriptorKind::SampleRateConverter => "Sample Rate Converter",
            DescriptorKind::AsInterface => "AS Interface",
            DescriptorKind::IsochronousEndpoint => "AS Isochronous Audio Data Endpoint",
        }
    }

    /// Command-line identifier (e.g. "effect-unit").
    pub fn slug(self) -> &'static str {
        match self {
            DescriptorKind::Header => "header",
            DescriptorKind::InputTerminal => "input-terminal",
            DescriptorKind::OutputTerminal => "output-terminal",
            DescriptorKind::MixerUnit => "mixer-unit",
            DescriptorKind::SelectorUnit => "selector-unit",
            DescriptorKind::FeatureUnit => "feature-unit",
            DescriptorKind::ProcessingUnit => "processing-unit",
            DescriptorKind::ExtensionUnit => "extension-unit",
            DescriptorKind::EffectUnit => "effect-unit",
            DescriptorKind::ClockSource => "clock-source",
            DescriptorKind::ClockSelector => "clock-selector",
            DescriptorKind::ClockMultiplier => "clock-multiplier",
            DescriptorKind::SampleRateConverter => "sample-rate-converter",
            DescriptorKind::AsInterface => "as-interface",
            DescriptorKind::IsochronousEndpoint => "isochronous-endpoint",
        }
    }
}

impl fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown descriptor kind '{0}'")]
pub struct ParseKindError(String);

impl FromStr for DescriptorKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        DescriptorKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == wanted)
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}

/// Audio Device Class protocol generation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolGeneration {
    Uac1,
    Uac2,
    Uac3,
}

impl ProtocolGeneration {
    pub const ALL: [ProtocolGeneration; 3] = [
        ProtocolGeneration::Uac1,
        ProtocolGeneration::Uac2,
        ProtocolGeneration::Uac3,
    ];

    /// Zero-based index (0 = UAC1, 1 = UAC2, 2 = UAC3).
    pub fn index(self) -> usize {
        match self {
            ProtocolGeneration::Uac1 => 0,
            ProtocolGeneration::Uac2 => 1,
            ProtocolGeneration::Uac3 => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Map an Audio interface `bInterfaceProtocol` value.
    ///
    /// # Examples
    /// ```
    /// use uacdump_core::ProtocolGeneration;
    ///
    /// assert_eq!(
    ///     ProtocolGeneration::from_interface_protocol(0x20),
    ///     Some(ProtocolGeneration::Uac2)
    /// );
    /// assert_eq!(ProtocolGeneration::from_interface_protocol(0x10), None);
    /// ```
    pub fn from_interface_protocol(protocol: u8) -> Option<Self> {
        match protocol {
            0x00 => Some(ProtocolGeneration::Uac1),
            0x20 => Some(ProtocolGeneration::Uac2),
            0x30 => Some(ProtocolGeneration::Uac3),
            _ => None,
        }
    }

    pub fn interface_protocol(self) -> u8 {
        match self {
            ProtocolGeneration::Uac1 => 0x00,
            ProtocolGeneration::Uac2 => 0x20,
            ProtocolGeneration::Uac3 => 0x30,
        }
    }
}

impl fmt::Display for ProtocolGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UAC{}", self.index() + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown protocol generation '{0}' (expected 1, 2 or 3)")]
pub struct ParseGenerationError(String);

impl FromStr for ProtocolGeneration {
    type Err = ParseGenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        match lowered.strip_prefix("uac").unwrap_or(&lowered) {
            "1" => Ok(ProtocolGeneration::Uac1),
            "2" => Ok(ProtocolGeneration::Uac2),
            "3" => Ok(ProtocolGeneration::Uac3),
            _ => Err(ParseGenerationError(s.to_string())),
        }
    }
}

/// Read-only index of field schemas.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<(DescriptorKind, ProtocolGeneration), FieldSchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The validated built-in registry, constructed once per process.
    ///
    /// # Errors
    /// Returns the `SchemaError` of the first malformed built-in layout.
    ///
    /// # Examples
    /// ```
    /// use uacdump_core::{DescriptorKind, ProtocolGeneration, SchemaRegistry};
    ///
    /// let registry = SchemaRegistry::builtin()?;
    /// assert!(registry.lookup(DescriptorKind::ClockSource, ProtocolGeneration::Uac2).is_some());
    /// assert!(registry.lookup(DescriptorKind::ClockSource, ProtocolGeneration::Uac1).is_none());
    /// # Ok::<(), uacdump_core::SchemaError>(())
    /// ```
    pub fn builtin() -> Result<&'static SchemaRegistry, SchemaError> {
        static BUILTIN: OnceLock<Result<SchemaRegistry, SchemaError>> = OnceLock::new();
        BUILTIN
            .get_or_init(Self::from_definitions)
            .as_ref()
            .map_err(Clone::clone)
    }

    fn from_definitions() -> Result<Self, SchemaError> {
        let mut registry = Self::new();
        for &(kind, generation, name, fields) in definitions::BUILTIN {
            registry.insert(kind, generation, FieldSchema::new(name, fields)?);
        }
        log::debug!("built-in registry ready with {} schemas", registry.len());
        Ok(registry)
    }

    /// Add or replace a schema while building a registry.
    pub fn insert(
        &mut self,
        kind: DescriptorKind,
        generation: ProtocolGeneration,
        schema: FieldSchema,
    ) -> Option<FieldSchema> {
        self.schemas.insert((kind, generation), schema)
    }

    pub fn lookup(
        &self,
        kind: DescriptorKind,
        generation: ProtocolGeneration,
    ) -> Option<&FieldSchema> {
        self.schemas.get(&(kind, generation))
    }

    /// Supported pairs, ordered by kind then generation.
    pub fn supported(&self) -> impl Iterator<Item = (DescriptorKind, ProtocolGeneration)> + '_ {
        self.schemas.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_validates() {
        let registry = SchemaRegistry::builtin().unwrap();
        assert_eq!(registry.len(), 25);
    }

    #[test]
    fn uac3_is_never_supported() {
        let registry = SchemaRegistry::builtin().unwrap();
        for kind in DescriptorKind::ALL {
            assert!(registry.lookup(kind, ProtocolGeneration::Uac3).is_none());
        }
    }

    #[test]
    fn uac1_clock_entities_are_unsupported() {
        let registry = SchemaRegistry::builtin().unwrap();
        for kind in [
            DescriptorKind::ClockSource,
            DescriptorKind::ClockSelector,
            DescriptorKind::ClockMultiplier,
            DescriptorKind::SampleRateConverter,
            DescriptorKind::EffectUnit,
        ] {
            assert!(registry.lookup(kind, ProtocolGeneration::Uac1).is_none());
            assert!(registry.lookup(kind, ProtocolGeneration::Uac2).is_some());
        }
    }

    #[test]
    fn supported_is_ordered() {
        let registry = SchemaRegistry::builtin().unwrap();
        let pairs: Vec<_> = registry.supported().collect();
        let mut sorted = pairs.clone();
        sorted.sort();
        assert_eq!(pairs, sorted);
        assert_eq!(pairs[0], (DescriptorKind::Header, ProtocolGeneration::Uac1));
    }

    #[test]
    fn kind_parses_from_slug() {
        assert_eq!(
            "clock-source".parse::<DescriptorKind>(),
            Ok(DescriptorKind::ClockSource)
        );
        assert_eq!(
            "Feature_Unit".parse::<DescriptorKind>(),
            Ok(DescriptorKind::FeatureUnit)
        );
        assert!("bogus".parse::<DescriptorKind>().is_err());
        for kind in DescriptorKind::ALL {
            assert_eq!(kind.slug().parse::<DescriptorKind>(), Ok(kind));
        }
    }

    #[test]
    fn generation_parses_and_displays() {
        assert_eq!("2".parse::<ProtocolGeneration>(), Ok(ProtocolGeneration::Uac2));
        assert_eq!("UAC3".parse::<ProtocolGeneration>(), Ok(ProtocolGeneration::Uac3));
        assert!("4".parse::<ProtocolGeneration>().is_err());
        assert_eq!(ProtocolGeneration::Uac1.to_string(), "UAC1");
        assert_eq!(ProtocolGeneration::from_index(2), Some(ProtocolGeneration::Uac3));
        assert_eq!(ProtocolGeneration::from_index(3), None);
    }
}
